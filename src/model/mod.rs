//! Model definitions for ECO Mane telemetry.
//!
//! This module provides the snapshot the poller publishes, the static list
//! of usage metrics the device reports, and the conversion of a snapshot
//! into InfluxDB data points for the optional storage sink.

pub mod metrics;
pub mod snapshot;
pub mod traits;
pub mod types;
pub mod usage_metrics;
pub mod utilities;

// Re-export commonly used items at the module level
pub use metrics::metrics_from_snapshot;
pub use snapshot::{CircuitRecord, SnapshotBuilder, TelemetrySnapshot, IP_ADDRESS_KEY};
pub use usage_metrics::{UsageMetricSpec, USAGE_METRICS};
pub use utilities::build_points;
