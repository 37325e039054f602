//! Page bookkeeping for the circuit list scan.
//!
//! The declared page count (`maxp`) is a hint, not a contract. A scan ends at
//! whichever comes first:
//!
//! - a page with fewer than [`SLOTS_PER_PAGE`] circuits (slot gap, including an empty page),
//! - the declared last page, once a page count is known,
//! - a page repeating the previous page's circuits.
//!
//! A device that keeps serving full, distinct pages past `max_pages` fails the
//! cycle instead of looping forever.

use crate::ecomane::circuit_parser::{CircuitSlot, SLOTS_PER_PAGE};
use crate::error::CycleError;

/// Why a scan stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEnd {
    /// The page had no circuits at all
    EmptyPage,
    /// The page ended before its last slot
    SlotGap,
    /// Reached the page count the device declared
    LastDeclaredPage,
    /// The device served the previous page again
    RepeatedPage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Next(u32),
    Done(ScanEnd),
}

#[derive(Debug, Clone)]
pub struct PageCursor {
    page: u32,
    /// 0 until some page declares a count
    total_pages: u32,
    max_pages: u32,
    previous: Option<Vec<String>>,
}

impl PageCursor {
    pub fn new(max_pages: u32) -> Self {
        Self {
            page: 1,
            total_pages: 0,
            max_pages,
            previous: None,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// Page count in effect, 0 while unknown.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Adopts a declared page count. The first non-zero declaration wins.
    pub fn observe_total(&mut self, declared: u32) {
        if self.total_pages == 0 && declared > 0 {
            tracing::debug!("Device declares {} circuit pages", declared);
            self.total_pages = declared;
        }
    }

    /// Decides what follows a freshly fetched page.
    ///
    /// Call this before recording the page: on `Done(RepeatedPage)` the
    /// slots are the previous page's circuits and must be dropped.
    pub fn advance(&mut self, slots: &[CircuitSlot]) -> Result<PageStep, CycleError> {
        if self.repeats_previous(slots) {
            return Ok(PageStep::Done(ScanEnd::RepeatedPage));
        }
        if slots.is_empty() {
            return Ok(PageStep::Done(ScanEnd::EmptyPage));
        }
        if slots.len() < SLOTS_PER_PAGE {
            return Ok(PageStep::Done(ScanEnd::SlotGap));
        }
        if self.total_pages > 0 && self.page >= self.total_pages {
            return Ok(PageStep::Done(ScanEnd::LastDeclaredPage));
        }
        if self.page >= self.max_pages {
            return Err(CycleError::PageLimitExceeded {
                max_pages: self.max_pages,
            });
        }
        self.page += 1;
        Ok(PageStep::Next(self.page))
    }

    /// Remembers `slots` and reports whether they match the previous page.
    fn repeats_previous(&mut self, slots: &[CircuitSlot]) -> bool {
        let fingerprint: Vec<String> = slots
            .iter()
            .map(|slot| {
                format!(
                    "{}|{}|{}",
                    slot.selection_token.as_deref().unwrap_or_default(),
                    slot.place.as_deref().unwrap_or_default(),
                    slot.circuit.as_deref().unwrap_or_default()
                )
            })
            .collect();
        let repeat = !fingerprint.is_empty() && self.previous.as_ref() == Some(&fingerprint);
        self.previous = Some(fingerprint);
        repeat
    }
}
