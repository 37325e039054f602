use crate::error::StorageError;
use influxdb2::models::DataPoint;

/// A snapshot value that knows how to become an InfluxDB point.
///
/// `Send + Sync` so batches can be built on the sink task.
pub trait DataPointBuilder: Send + Sync {
    /// Fails when the value cannot be represented, e.g. a timestamp
    /// outside the nanosecond range.
    fn to_point(&self) -> Result<DataPoint, StorageError>;
}
