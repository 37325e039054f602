//! Parser for the "today" usage page (`/ecoTopMoni.cgi`).

use scraper::Html;
use std::collections::BTreeMap;

use crate::ecomane::helper::{find_text_in, Lookup};
use crate::model::{UsageMetricSpec, USAGE_METRICS};

/// Static list of the daily aggregates the usage page can carry.
pub fn usage_metric_specs() -> &'static [UsageMetricSpec] {
    &USAGE_METRICS
}

/// Extracts every usage metric present on the page.
///
/// A metric whose element is missing is left out of the result; that is how
/// the device reports a meter that is not installed. Present values are kept
/// verbatim (trimmed), so "0" stays distinguishable from absence.
pub fn parse_usage_page(document: &Html) -> BTreeMap<String, String> {
    usage_metric_specs()
        .iter()
        .filter_map(|spec| {
            find_text_in(document, Lookup::Id(spec.key)).map(|value| (spec.key.to_string(), value))
        })
        .collect()
}
