use influxdb2::models::DataPoint;

use super::traits::DataPointBuilder;

/// Converts metric builders into data points.
///
/// Conversion failures are logged and skipped so one bad value never drops
/// the rest of the batch.
pub fn build_points(builders: Vec<Box<dyn DataPointBuilder>>) -> Vec<DataPoint> {
    builders
        .into_iter()
        .filter_map(|p| match p.to_point() {
            Ok(point) => Some(point),
            Err(e) => {
                tracing::error!("Failed to convert to point: {:?}", e);
                None
            }
        })
        .collect()
}
