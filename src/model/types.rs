use std::fmt;

/// Represents the type of measurement written to the storage sink.
///
/// Each measurement type corresponds to a different InfluxDB measurement
/// (table) where the data will be stored.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Measurement {
    /// Daily aggregates from the "today" usage page
    Usage,
    /// Instantaneous power per circuit
    CircuitPower,
    /// Today's energy per circuit
    CircuitEnergy,
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Measurement::Usage => write!(f, "usage"),
            Measurement::CircuitPower => write!(f, "circuit_power"),
            Measurement::CircuitEnergy => write!(f, "circuit_energy"),
        }
    }
}

/// Units of measurement reported by the device.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Unit {
    /// Watts (W) - for instantaneous power
    Watt,
    /// Kilowatt-hours (kWh) - for energy over time
    Kwh,
    /// Cubic meters (m³) - for gas and water volume
    CubicMeter,
    /// Kilograms (kg) - for CO2 mass
    Kilogram,
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Unit::Watt => write!(f, "W"),
            Unit::Kwh => write!(f, "kWh"),
            Unit::CubicMeter => write!(f, "m³"),
            Unit::Kilogram => write!(f, "kg"),
        }
    }
}

/// What physical quantity a metric describes.
///
/// A UI layer uses this to pick a device class for the value.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum MetricKind {
    Power,
    Energy,
    Gas,
    Water,
    Weight,
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MetricKind::Power => write!(f, "power"),
            MetricKind::Energy => write!(f, "energy"),
            MetricKind::Gas => write!(f, "gas"),
            MetricKind::Water => write!(f, "water"),
            MetricKind::Weight => write!(f, "weight"),
        }
    }
}

/// How a value evolves over time.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum StateClass {
    /// A point-in-time reading (instantaneous power)
    Measurement,
    /// A counter that only grows until the device resets it at midnight
    TotalIncreasing,
}

impl fmt::Display for StateClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StateClass::Measurement => write!(f, "measurement"),
            StateClass::TotalIncreasing => write!(f, "total_increasing"),
        }
    }
}
