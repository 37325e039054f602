//! Parser for one page of the circuit list (`/elecCheck_6000.cgi`).
//!
//! A page carries up to [`SLOTS_PER_PAGE`] fixed-position slots with ids
//! `ojt_01` .. `ojt_08` plus a hidden `maxp` input announcing the page count.

use scraper::{ElementRef, Html};

use crate::ecomane::helper::{find_attr, find_element, find_text, split_after_marker, Lookup};
use crate::model::CircuitRecord;

pub const SLOTS_PER_PAGE: usize = 8;

const SLOT_ID_PREFIX: &str = "ojt";
const PLACE_CLASS: &str = "txt";
const CIRCUIT_CLASS: &str = "txt2";
const BUTTON_CLASS: &str = "btn btn_58";
const POWER_CLASS: &str = "num";
const MAX_PAGE_INPUT: &str = r#"input[name="maxp"]"#;

// <a href="javascript:moveCircuitChange('27')">
const SELECTION_MARKER: &str = "moveCircuitChange('";
const SELECTION_TERMINATOR: &str = "')";
const POWER_UNIT: &str = "W";

/// Circuit data read from one slot, before it has an index or energy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CircuitSlot {
    /// 1-based position on the page
    pub slot: usize,
    pub place: Option<String>,
    pub circuit: Option<String>,
    pub selection_token: Option<String>,
    pub power: Option<String>,
}

impl CircuitSlot {
    pub fn into_record(self, index: usize) -> CircuitRecord {
        CircuitRecord {
            index,
            place: self.place,
            circuit: self.circuit,
            selection_token: self.selection_token,
            power: self.power,
            energy: None,
        }
    }
}

/// Everything one circuit list page yields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CircuitPage {
    /// Declared page count; 0 means the page did not say
    pub total_pages: u32,
    pub slots: Vec<CircuitSlot>,
}

pub fn slot_id(slot: usize) -> String {
    format!("{}_{:02}", SLOT_ID_PREFIX, slot)
}

/// Reads the hidden page-count field. Absent or malformed values give 0,
/// which callers must treat as "unknown".
pub fn parse_total_pages(document: &Html) -> u32 {
    find_attr(document.root_element(), MAX_PAGE_INPUT, "value")
        .and_then(|value| value.trim().parse::<u32>().ok())
        .unwrap_or(0)
}

/// Parses one circuit list page.
///
/// Slots are read in order and scanning stops at the first missing slot:
/// the device lays circuits out contiguously, so a gap is the end of data.
pub fn parse_circuit_page(document: &Html) -> CircuitPage {
    let total_pages = parse_total_pages(document);
    let root = document.root_element();

    let mut slots = Vec::with_capacity(SLOTS_PER_PAGE);
    for slot in 1..=SLOTS_PER_PAGE {
        let id = slot_id(slot);
        let Some(element) = find_element(root, Lookup::Id(&id)) else {
            tracing::debug!("Slot {} not found, end of circuits on this page", id);
            break;
        };
        slots.push(parse_slot(element, slot));
    }

    CircuitPage { total_pages, slots }
}

fn parse_slot(element: ElementRef, slot: usize) -> CircuitSlot {
    let selection_token = find_element(element, Lookup::Class(BUTTON_CLASS))
        .and_then(|button| find_attr(button, "a", "href"))
        .and_then(|href| split_after_marker(href, SELECTION_MARKER, SELECTION_TERMINATOR))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string);

    let power = find_text(element, Lookup::Class(POWER_CLASS)).map(|text| {
        split_after_marker(&text, "", POWER_UNIT)
            .unwrap_or(text.as_str())
            .trim()
            .to_string()
    });

    CircuitSlot {
        slot,
        place: find_text(element, Lookup::Class(PLACE_CLASS)),
        circuit: find_text(element, Lookup::Class(CIRCUIT_CLASS)),
        selection_token,
        power,
    }
}
