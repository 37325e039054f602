use crate::config::InfluxConfig;
use crate::error::StorageError;
use crate::model::{build_points, metrics_from_snapshot, TelemetrySnapshot};
use futures::prelude::stream;
use influxdb2::models::DataPoint;

/// Optional sink that stores published snapshots in InfluxDB.
pub struct Client {
    client: influxdb2::Client,
    bucket: String,
}

impl Client {
    pub(crate) fn new(config: InfluxConfig) -> Self {
        let client = influxdb2::Client::new(config.url, config.org, config.token);
        Self {
            client,
            bucket: config.bucket,
        }
    }

    pub async fn write(&self, points: Vec<DataPoint>) -> Result<(), StorageError> {
        Ok(self
            .client
            .write(self.bucket.as_str(), stream::iter(points))
            .await?)
    }

    /// Writes every numeric value of `snapshot`. Returns the number of points
    /// sent; a snapshot without numeric values sends nothing.
    pub async fn write_snapshot(&self, snapshot: &TelemetrySnapshot) -> Result<usize, StorageError> {
        if snapshot.is_empty() {
            return Ok(0);
        }
        let points = build_points(metrics_from_snapshot(snapshot));
        if points.is_empty() {
            return Ok(0);
        }
        let count = points.len();
        self.write(points).await?;
        Ok(count)
    }
}
