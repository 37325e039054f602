//! The published telemetry snapshot and the records flattened into it.

use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::fmt;

/// Key prefix shared by every per-circuit entry.
pub const CIRCUIT_KEY_PREFIX: &str = "em_circuit";

/// Key under which the device address is published.
pub const IP_ADDRESS_KEY: &str = "ip_address";

/// One field of a circuit as it appears in a snapshot key.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CircuitField {
    Place,
    Circuit,
    Power,
    Energy,
    Selection,
}

impl CircuitField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitField::Place => "place",
            CircuitField::Circuit => "circuit",
            CircuitField::Power => "power",
            CircuitField::Energy => "energy",
            CircuitField::Selection => "selection",
        }
    }
}

impl fmt::Display for CircuitField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builds `em_circuit_{index:02}_{field}`.
pub fn circuit_key(index: usize, field: CircuitField) -> String {
    format!("{}_{:02}_{}", CIRCUIT_KEY_PREFIX, index, field)
}

/// One circuit found during a scan.
///
/// `index` is dense from 0 within one full scan only. Every other field is
/// optional because the device may leave any of them out of a slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CircuitRecord {
    pub index: usize,
    pub place: Option<String>,
    pub circuit: Option<String>,
    pub selection_token: Option<String>,
    /// Instantaneous power in watts, as printed by the device
    pub power: Option<String>,
    /// Today's energy in kWh, filled in by the energy sub-fetch
    pub energy: Option<String>,
}

impl CircuitRecord {
    /// Snapshot entries for every present field.
    pub fn entries(&self) -> Vec<(String, String)> {
        [
            (CircuitField::Place, &self.place),
            (CircuitField::Circuit, &self.circuit),
            (CircuitField::Power, &self.power),
            (CircuitField::Energy, &self.energy),
            (CircuitField::Selection, &self.selection_token),
        ]
        .into_iter()
        .filter_map(|(field, value)| {
            value
                .as_ref()
                .map(|v| (circuit_key(self.index, field), v.clone()))
        })
        .collect()
    }
}

/// Complete result of one successful poll cycle.
///
/// Snapshots are immutable once built; the poller publishes a new one
/// instead of editing the previous.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    values: BTreeMap<String, String>,
    circuit_count: usize,
    version: u64,
    collected_at: Option<DateTime<Local>>,
}

impl TelemetrySnapshot {
    /// The snapshot readers see before the first cycle has completed.
    pub fn empty() -> Self {
        Self {
            values: BTreeMap::new(),
            circuit_count: 0,
            version: 0,
            collected_at: None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn circuit_count(&self) -> usize {
        self.circuit_count
    }

    /// Publication counter. 0 for the empty pre-bootstrap snapshot.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn collected_at(&self) -> Option<DateTime<Local>> {
        self.collected_at
    }

    /// Reassembles the record of circuit `index` from the flattened keys.
    pub fn circuit(&self, index: usize) -> Option<CircuitRecord> {
        if index >= self.circuit_count {
            return None;
        }
        let field = |f: CircuitField| self.get(&circuit_key(index, f)).map(str::to_string);
        Some(CircuitRecord {
            index,
            place: field(CircuitField::Place),
            circuit: field(CircuitField::Circuit),
            selection_token: field(CircuitField::Selection),
            power: field(CircuitField::Power),
            energy: field(CircuitField::Energy),
        })
    }

    pub fn circuits(&self) -> impl Iterator<Item = CircuitRecord> + '_ {
        (0..self.circuit_count).filter_map(move |index| self.circuit(index))
    }
}

impl Default for TelemetrySnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Cycle-scoped working state that becomes a [`TelemetrySnapshot`].
///
/// Dropping the builder discards everything gathered so far, which is how a
/// failed cycle leaves the published snapshot untouched.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    values: BTreeMap<String, String>,
    next_index: usize,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        self.values.extend(entries);
    }

    /// Index the next pushed circuit will receive.
    pub fn next_index(&self) -> usize {
        self.next_index
    }

    /// Flattens a fully populated record into the working map.
    ///
    /// The record must carry the index handed out by [`Self::next_index`].
    pub fn push_circuit(&mut self, record: CircuitRecord) {
        debug_assert_eq!(record.index, self.next_index);
        self.values.extend(record.entries());
        self.next_index += 1;
    }

    pub fn finish(self, version: u64, collected_at: DateTime<Local>) -> TelemetrySnapshot {
        TelemetrySnapshot {
            values: self.values,
            circuit_count: self.next_index,
            version,
            collected_at: Some(collected_at),
        }
    }
}
