mod circuit_energy;
mod circuit_parser;
mod client;
mod helper;
mod pagination;
mod query_builder;
mod usage_parser;

pub use circuit_energy::CircuitEnergyFetcher;
pub use circuit_parser::{parse_circuit_page, CircuitPage};
pub use client::{Client, PageFetcher};
pub use pagination::{PageCursor, PageStep, ScanEnd};
pub use query_builder::Resource;
pub use usage_parser::{parse_usage_page, usage_metric_specs};

#[cfg(test)]
pub use circuit_parser::SLOTS_PER_PAGE;
