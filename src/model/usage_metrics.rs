use super::types::{MetricKind, StateClass, Unit};

/// Static description of one daily aggregate shown on the usage page.
///
/// `key` is both the id of the element carrying the value and the key the
/// value is published under in the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageMetricSpec {
    pub key: &'static str,
    /// Stable English name, suitable for entity ids
    pub name: &'static str,
    pub description: &'static str,
    pub unit: Unit,
    pub kind: MetricKind,
    pub state_class: StateClass,
}

pub static USAGE_METRICS: [UsageMetricSpec; 7] = [
    UsageMetricSpec {
        key: "num_L1",
        name: "electricity_purchased",
        description: "Electricity purchased / 購入電気量",
        unit: Unit::Kwh,
        kind: MetricKind::Energy,
        state_class: StateClass::TotalIncreasing,
    },
    UsageMetricSpec {
        key: "num_L2",
        name: "solar_power_energy",
        description: "Solar power energy / 太陽光発電量",
        unit: Unit::Kwh,
        kind: MetricKind::Energy,
        state_class: StateClass::TotalIncreasing,
    },
    UsageMetricSpec {
        key: "num_L4",
        name: "gas_consumption",
        description: "Gas consumption / ガス消費量",
        unit: Unit::CubicMeter,
        kind: MetricKind::Gas,
        state_class: StateClass::TotalIncreasing,
    },
    UsageMetricSpec {
        key: "num_L5",
        name: "water_consumption",
        description: "Water consumption / 水消費量",
        unit: Unit::CubicMeter,
        kind: MetricKind::Water,
        state_class: StateClass::TotalIncreasing,
    },
    UsageMetricSpec {
        key: "num_R1",
        name: "co2_emissions",
        description: "CO2 emissions / CO2排出量",
        unit: Unit::Kilogram,
        kind: MetricKind::Weight,
        state_class: StateClass::TotalIncreasing,
    },
    UsageMetricSpec {
        key: "num_R2",
        name: "co2_reduction",
        description: "CO2 reduction / CO2削減量",
        unit: Unit::Kilogram,
        kind: MetricKind::Weight,
        state_class: StateClass::TotalIncreasing,
    },
    UsageMetricSpec {
        key: "num_R3",
        name: "electricity_sales",
        description: "Electricity sales / 売電量",
        unit: Unit::Kwh,
        kind: MetricKind::Energy,
        state_class: StateClass::TotalIncreasing,
    },
];
