use crate::error::StorageError;
use chrono::{DateTime, Local};
use influxdb2::models::DataPoint;

use super::snapshot::TelemetrySnapshot;
use super::traits::DataPointBuilder;
use super::types::{Measurement, MetricKind, StateClass, Unit};
use super::usage_metrics::{UsageMetricSpec, USAGE_METRICS};

/// A daily aggregate from the usage page, ready for storage.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageMetric {
    pub spec: &'static UsageMetricSpec,
    pub value: f64,
    pub timestamp: DateTime<Local>,
}

impl DataPointBuilder for UsageMetric {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        let timestamp = self
            .timestamp
            .timestamp_nanos_opt()
            .ok_or_else(|| StorageError::InvalidDataPoint("Timestamp overflow".to_string()))?;

        DataPoint::builder(Measurement::Usage.to_string().as_str())
            .tag("name", self.spec.name)
            .tag("unit", self.spec.unit.to_string())
            .tag("kind", self.spec.kind.to_string())
            .tag("state_class", self.spec.state_class.to_string())
            .field("value", self.value)
            .timestamp(timestamp)
            .build()
            .map_err(|e| {
                StorageError::InvalidDataPoint(format!("Failed to build UsageMetric: {}", e))
            })
    }
}

/// Power or energy of a single circuit.
#[derive(Debug, Clone, PartialEq)]
pub struct CircuitMetric {
    /// CircuitPower (W) or CircuitEnergy (kWh)
    pub measurement: Measurement,
    pub index: usize,
    pub place: String,
    pub circuit: String,
    pub value: f64,
    pub timestamp: DateTime<Local>,
}

impl CircuitMetric {
    fn unit(&self) -> Unit {
        match self.measurement {
            Measurement::CircuitPower => Unit::Watt,
            _ => Unit::Kwh,
        }
    }

    pub fn kind(&self) -> MetricKind {
        match self.measurement {
            Measurement::CircuitPower => MetricKind::Power,
            _ => MetricKind::Energy,
        }
    }

    pub fn state_class(&self) -> StateClass {
        match self.measurement {
            Measurement::CircuitPower => StateClass::Measurement,
            _ => StateClass::TotalIncreasing,
        }
    }
}

impl DataPointBuilder for CircuitMetric {
    fn to_point(&self) -> Result<DataPoint, StorageError> {
        let timestamp = self
            .timestamp
            .timestamp_nanos_opt()
            .ok_or_else(|| StorageError::InvalidDataPoint("Timestamp overflow".to_string()))?;

        DataPoint::builder(self.measurement.to_string().as_str())
            .tag("index", format!("{:02}", self.index))
            .tag("place", self.place.clone())
            .tag("circuit", self.circuit.clone())
            .tag("unit", self.unit().to_string())
            .tag("kind", self.kind().to_string())
            .tag("state_class", self.state_class().to_string())
            .field("value", self.value)
            .timestamp(timestamp)
            .build()
            .map_err(|e| {
                StorageError::InvalidDataPoint(format!("Failed to build CircuitMetric: {}", e))
            })
    }
}

/// Turns a published snapshot into storable metrics.
///
/// Values that are absent or not numeric are skipped: the snapshot keeps
/// them as text, storage only takes numbers.
pub fn metrics_from_snapshot(snapshot: &TelemetrySnapshot) -> Vec<Box<dyn DataPointBuilder>> {
    let timestamp = snapshot.collected_at().unwrap_or_else(Local::now);
    let mut metrics: Vec<Box<dyn DataPointBuilder>> = Vec::new();

    for spec in USAGE_METRICS.iter() {
        if let Some(value) = snapshot.get(spec.key).and_then(parse_value) {
            metrics.push(Box::new(UsageMetric {
                spec,
                value,
                timestamp,
            }));
        }
    }

    for record in snapshot.circuits() {
        let place = record.place.clone().unwrap_or_default();
        let circuit = record.circuit.clone().unwrap_or_default();
        let readings = [
            (Measurement::CircuitPower, record.power.as_deref()),
            (Measurement::CircuitEnergy, record.energy.as_deref()),
        ];
        for (measurement, raw) in readings {
            if let Some(value) = raw.and_then(parse_value) {
                metrics.push(Box::new(CircuitMetric {
                    measurement,
                    index: record.index,
                    place: place.clone(),
                    circuit: circuit.clone(),
                    value,
                    timestamp,
                }));
            }
        }
    }

    metrics
}

fn parse_value(raw: &str) -> Option<f64> {
    match raw.trim().replace(',', "").parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::debug!("Skipping non-numeric value: {:?}", raw);
            None
        }
    }
}
