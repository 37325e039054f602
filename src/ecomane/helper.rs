//! Field extraction primitives for ECO Mane HTML fragments.
//!
//! Every lookup returns `Option`: a missing element is ordinary on this
//! device (a gap in the circuit list, a meter that is not installed) and the
//! caller decides whether absence is an error. All assumptions about the
//! shape of device text live in [`split_after_marker`].

use crate::error::ParseError;
use scraper::{ElementRef, Html, Selector};

/// How to find an element: by id or by (possibly multiple) class names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    Id(&'a str),
    /// Space separated class list; the element must carry every class
    Class(&'a str),
}

impl Lookup<'_> {
    /// CSS form of the lookup, e.g. `#ojt_01` or `.btn.btn_58`.
    pub fn to_css(&self) -> String {
        match self {
            Lookup::Id(id) => format!("#{}", id),
            Lookup::Class(classes) => classes
                .split_whitespace()
                .map(|class| format!(".{}", class))
                .collect(),
        }
    }
}

/// Creates a CSS selector from a string.
///
/// # Examples
///
/// Valid selectors:
/// - `"#id"` - ID selector
/// - `".class"` - Class selector
/// - `"input[name=maxp]"` - Attribute selector
pub fn html_selector(selector: &str) -> Result<Selector, ParseError> {
    Selector::parse(selector).map_err(|e| ParseError::invalid_selector(selector, e))
}

/// Returns the first element below `scope` matching `lookup`.
pub fn find_element<'a>(scope: ElementRef<'a>, lookup: Lookup) -> Option<ElementRef<'a>> {
    let css = lookup.to_css();
    let selector = match html_selector(&css) {
        Ok(selector) => selector,
        Err(e) => {
            tracing::warn!("Unusable lookup {:?}: {}", lookup, e);
            return None;
        }
    };
    scope.select(&selector).next()
}

/// Returns the trimmed text of the first element below `scope` matching `lookup`.
///
/// # Example
///
/// ```ignore
/// let html = Html::parse_document(r#"<div id="num_L1"> 12.3 </div>"#);
/// assert_eq!(find_text(html.root_element(), Lookup::Id("num_L1")), Some("12.3".into()));
/// ```
pub fn find_text(scope: ElementRef, lookup: Lookup) -> Option<String> {
    find_element(scope, lookup).map(element_text)
}

/// Document-level convenience for [`find_text`].
pub fn find_text_in(document: &Html, lookup: Lookup) -> Option<String> {
    find_text(document.root_element(), lookup)
}

/// Concatenated, trimmed text content of an element.
pub fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Value of `attribute` on the first element below `scope` matching `selector`.
pub fn find_attr<'a>(scope: ElementRef<'a>, selector: &str, attribute: &str) -> Option<&'a str> {
    let selector = html_selector(selector).ok()?;
    scope
        .select(&selector)
        .next()
        .and_then(|element| element.value().attr(attribute))
}

/// Returns the text strictly between the first `marker` and the next
/// `terminator` after it.
///
/// An empty marker anchors at the start of `text`, which turns the call into
/// a truncation at `terminator`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(split_after_marker("今日:1.02kWh　昨日:3.16kWh", "今日:", "kWh"), Some("1.02"));
/// assert_eq!(split_after_marker("123W", "", "W"), Some("123"));
/// assert_eq!(split_after_marker("123", "", "W"), None);
/// ```
pub fn split_after_marker<'a>(text: &'a str, marker: &str, terminator: &str) -> Option<&'a str> {
    let start = text.find(marker)? + marker.len();
    let rest = &text[start..];
    let end = rest.find(terminator)?;
    Some(&rest[..end])
}

/// Parses a decimal number, reporting the offending text on failure.
pub fn parse_number(text: &str) -> Result<f64, ParseError> {
    let trimmed = text.trim();
    trimmed
        .parse::<f64>()
        .map_err(|e| ParseError::number_parse(trimmed, e))
}
