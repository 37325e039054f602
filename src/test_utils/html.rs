//! HTML builders mimicking the pages the device serves.

use scraper::Html;
use std::collections::BTreeMap;

/// Wraps `content` in a minimal document and parses it.
pub fn create_html_document(content: &str) -> Html {
    Html::parse_document(&format!(r#"<html><body>{}</body></html>"#, content))
}

/// Body of a circuit energy page.
pub fn energy_page_html(today: &str, yesterday: &str) -> String {
    format!(
        r#"<html><body><div id="ttx_01" class="ttx">今日:{}kWh　昨日:{}kWh</div></body></html>"#,
        today, yesterday
    )
}

/// Builder for the usage page (`/ecoTopMoni.cgi`).
#[derive(Debug, Default)]
pub struct UsagePageBuilder {
    values: Vec<(String, String)>,
}

impl UsagePageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every usage metric present with a distinct value.
    pub fn full() -> Self {
        Self::new()
            .value("num_L1", "12.3")
            .value("num_L2", "8.4")
            .value("num_L4", "0.5")
            .value("num_L5", "0.2")
            .value("num_R1", "5.6")
            .value("num_R2", "3.1")
            .value("num_R3", "2.7")
    }

    pub fn value(mut self, key: &str, value: &str) -> Self {
        self.values.push((key.to_string(), value.to_string()));
        self
    }

    pub fn without(mut self, key: &str) -> Self {
        self.values.retain(|(k, _)| k != key);
        self
    }

    /// The values the page carries, keyed like a snapshot.
    pub fn values(&self) -> BTreeMap<String, String> {
        self.values.iter().cloned().collect()
    }

    pub fn build(self) -> String {
        let mut html = String::from(r#"<html><body><div class="moni">"#);
        for (key, value) in &self.values {
            html.push_str(&format!(
                r#"<div class="num_box"><div id="{}" class="num">{}</div></div>"#,
                key, value
            ));
        }
        html.push_str("</div></body></html>");
        html
    }

    pub fn build_document(self) -> Html {
        Html::parse_document(&self.build())
    }
}

/// Builder for one page of the circuit list (`/elecCheck_6000.cgi`).
///
/// Slots are numbered in insertion order starting at `ojt_01`;
/// [`Self::skip_slot`] leaves a hole in the numbering.
#[derive(Debug)]
pub struct CircuitPageBuilder {
    max_pages: Option<u32>,
    next_slot: usize,
    slots: Vec<(usize, String)>,
}

impl CircuitPageBuilder {
    pub fn new() -> Self {
        Self {
            max_pages: None,
            next_slot: 1,
            slots: Vec::new(),
        }
    }

    /// Emits the hidden `maxp` input. Without it the page declares nothing.
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = Some(max_pages);
        self
    }

    pub fn circuit(self, token: &str, place: &str, circuit: &str, power: &str) -> Self {
        let inner = format!(
            r#"<div class="btn btn_58"><a href="javascript:moveCircuitChange('{}')"><img src="btn.png"></a></div><div class="txt">{}</div><div class="txt2">{}</div><div class="num">{}</div>"#,
            token, place, circuit, power
        );
        self.raw_slot(&inner)
    }

    pub fn raw_slot(mut self, inner_html: &str) -> Self {
        self.slots.push((self.next_slot, inner_html.to_string()));
        self.next_slot += 1;
        self
    }

    pub fn skip_slot(mut self) -> Self {
        self.next_slot += 1;
        self
    }

    pub fn build(self) -> String {
        let mut html = String::from(r#"<html><body><form name="form1">"#);
        if let Some(max_pages) = self.max_pages {
            html.push_str(&format!(
                r#"<input type="hidden" name="maxp" value="{}">"#,
                max_pages
            ));
        }
        for (slot, inner) in &self.slots {
            html.push_str(&format!(r#"<div id="ojt_{:02}">{}</div>"#, slot, inner));
        }
        html.push_str("</form></body></html>");
        html
    }

    pub fn build_document(self) -> Html {
        Html::parse_document(&self.build())
    }
}

impl Default for CircuitPageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_page_builder() {
        let html = UsagePageBuilder::full().without("num_L5").build();

        assert!(html.contains(r#"<div id="num_L1" class="num">12.3</div>"#));
        assert!(!html.contains("num_L5"));
        assert!(html.starts_with("<html><body>"));
    }

    #[test]
    fn test_circuit_page_builder_numbers_slots() {
        let html = CircuitPageBuilder::new()
            .max_pages(2)
            .circuit("21", "キッチン", "照明", "10W")
            .skip_slot()
            .raw_slot("<div class=\"txt\">x</div>")
            .build();

        assert!(html.contains(r#"<input type="hidden" name="maxp" value="2">"#));
        assert!(html.contains(r#"<div id="ojt_01">"#));
        assert!(!html.contains(r#"<div id="ojt_02">"#));
        assert!(html.contains(r#"<div id="ojt_03"><div class="txt">x</div></div>"#));
        assert!(html.contains("moveCircuitChange('21')"));
    }

    #[test]
    fn test_circuit_page_builder_without_max_pages() {
        let html = CircuitPageBuilder::new().build();
        assert!(!html.contains("maxp"));
    }

    #[test]
    fn test_energy_page_html() {
        let html = energy_page_html("1.02", "3.16");
        assert!(html.contains("今日:1.02kWh　昨日:3.16kWh"));
    }
}
