//! Test fixtures and common test data.

/// Fixed timestamps so data point assertions are reproducible.
pub mod dates {
    use chrono::{DateTime, Local, TimeZone};

    pub fn test_timestamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }
}

/// A complete simulated gateway: usage page, circuit list pages and one
/// energy page per circuit, installed into a [`FakeDevice`].
pub mod device {
    use crate::ecomane::{Resource, SLOTS_PER_PAGE};
    use crate::test_utils::html::{energy_page_html, CircuitPageBuilder, UsagePageBuilder};
    use crate::test_utils::mocks::FakeDevice;

    /// What one circuit looks like on the device. `power` and `energy` are
    /// the values a snapshot is expected to carry.
    #[derive(Debug, Clone)]
    pub struct FixtureCircuit {
        pub token: Option<String>,
        pub place: String,
        pub circuit: String,
        pub power: String,
        pub energy: String,
    }

    /// `count` circuits with distinct tokens, names and readings.
    pub fn sample_circuits(count: usize) -> Vec<FixtureCircuit> {
        (0..count)
            .map(|i| FixtureCircuit {
                token: Some(format!("{}", 20 + i)),
                place: format!("場所{:02}", i),
                circuit: format!("回路{:02}", i),
                power: format!("{}", i * 10),
                energy: format!("{}.{:02}", i, (i * 7) % 100),
            })
            .collect()
    }

    pub fn energy_path(page: u32, total_pages: u32, token: &str) -> String {
        Resource::CircuitEnergy {
            page,
            total_pages,
            selection_token: token,
        }
        .path()
    }

    /// One circuit list page holding `circuits`. `declared_pages` of 0
    /// leaves out the page count.
    pub fn circuit_page_body(circuits: &[FixtureCircuit], declared_pages: u32) -> String {
        let mut builder = CircuitPageBuilder::new();
        if declared_pages > 0 {
            builder = builder.max_pages(declared_pages);
        }
        for c in circuits {
            builder = match &c.token {
                Some(token) => builder.circuit(token, &c.place, &c.circuit, &format!("{}W", c.power)),
                None => builder.raw_slot(&format!(
                    r#"<div class="txt">{}</div><div class="txt2">{}</div><div class="num">{}W</div>"#,
                    c.place, c.circuit, c.power
                )),
            };
        }
        builder.build()
    }

    /// Installs the usage page, the circuits spread over as many pages as
    /// they need, a trailing empty page and every energy page.
    pub fn install_device(device: &FakeDevice, circuits: &[FixtureCircuit], declared_pages: u32) {
        device.set_page(&Resource::Usage.path(), UsagePageBuilder::full().build());

        let mut page: u32 = 1;
        for chunk in circuits.chunks(SLOTS_PER_PAGE) {
            device.set_page(
                &Resource::CircuitList { page }.path(),
                circuit_page_body(chunk, declared_pages),
            );
            for c in chunk {
                if let Some(token) = &c.token {
                    device.set_page(
                        &energy_path(page, declared_pages, token),
                        energy_page_html(&c.energy, "9.99"),
                    );
                }
            }
            page += 1;
        }
        device.set_page(
            &Resource::CircuitList { page }.path(),
            circuit_page_body(&[], declared_pages),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::device::*;
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_timestamp_is_noon() {
        assert_eq!(dates::test_timestamp().hour(), 12);
    }

    #[test]
    fn test_sample_circuits_are_distinct() {
        let circuits = sample_circuits(3);
        assert_eq!(circuits[0].token.as_deref(), Some("20"));
        assert_eq!(circuits[2].place, "場所02");
        assert_eq!(circuits[2].power, "20");
        assert_eq!(circuits[2].energy, "2.14");
    }

    #[test]
    fn test_energy_path() {
        assert_eq!(
            energy_path(1, 2, "20"),
            "/resultGraphDiv_4242.cgi?page=1&maxp=2&disp=0&selNo=20&check=2"
        );
    }
}
