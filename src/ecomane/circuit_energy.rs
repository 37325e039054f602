//! Today's energy of a single circuit (`/resultGraphDiv_4242.cgi`).
//!
//! The page shows a line like `今日:1.02kWh　昨日:3.16kWh` inside `#ttx_01`;
//! only the "today" figure is used.

use std::sync::Arc;

use scraper::Html;

use crate::ecomane::client::PageFetcher;
use crate::ecomane::helper::{find_text_in, parse_number, split_after_marker, Lookup};
use crate::ecomane::query_builder::Resource;
use crate::error::{EcomaneError, ParseError};

const ENERGY_ELEMENT_ID: &str = "ttx_01";
const TODAY_MARKER: &str = "今日:";
const ENERGY_UNIT: &str = "kWh";

/// Extracts today's energy as the device formatted it, e.g. `"1.02"`.
///
/// Fails when the element or the marker is missing, or when the text between
/// marker and unit is not a number.
pub fn parse_today_energy(document: &Html) -> Result<String, ParseError> {
    let text = find_text_in(document, Lookup::Id(ENERGY_ELEMENT_ID))
        .ok_or_else(|| ParseError::element_not_found(format!("#{}", ENERGY_ELEMENT_ID)))?;

    let value = split_after_marker(&text, TODAY_MARKER, ENERGY_UNIT)
        .map(str::trim)
        .ok_or_else(|| ParseError::marker_not_found(TODAY_MARKER, text.as_str()))?;

    parse_number(value)?;
    Ok(value.to_string())
}

fn parse_energy_body(body: &str) -> Result<String, ParseError> {
    parse_today_energy(&Html::parse_document(body))
}

/// Fetches the energy page of one circuit.
pub struct CircuitEnergyFetcher {
    fetcher: Arc<dyn PageFetcher>,
}

impl CircuitEnergyFetcher {
    pub fn new(fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { fetcher }
    }

    /// `page` and `total_pages` are those of the circuit list page the
    /// circuit was found on; the device expects them alongside the token.
    pub async fn fetch(
        &self,
        page: u32,
        total_pages: u32,
        selection_token: &str,
    ) -> Result<String, EcomaneError> {
        let path = Resource::CircuitEnergy {
            page,
            total_pages,
            selection_token,
        }
        .path();
        let body = self.fetcher.get(&path).await?;
        Ok(parse_energy_body(&body)?)
    }
}
