//! Path builders for ECO Mane requests.
//!
//! The CGI names and parameter sets are fixed by the device firmware; they
//! are kept exactly as the device expects them.

/// Pages the poller requests from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource<'a> {
    /// Today's aggregate usage
    Usage,
    /// One page of the circuit list
    CircuitList { page: u32 },
    /// Today's energy of one circuit
    CircuitEnergy {
        page: u32,
        total_pages: u32,
        selection_token: &'a str,
    },
}

impl Resource<'_> {
    /// Path and query relative to the device base URL.
    pub fn path(&self) -> String {
        match self {
            Resource::Usage => "/ecoTopMoni.cgi".to_string(),
            Resource::CircuitList { page } => {
                format!("/elecCheck_6000.cgi?disp=2&page={}", page)
            }
            Resource::CircuitEnergy {
                page,
                total_pages,
                selection_token,
            } => format!(
                "/resultGraphDiv_4242.cgi?page={}&maxp={}&disp=0&selNo={}&check=2",
                page, total_pages, selection_token
            ),
        }
    }
}
