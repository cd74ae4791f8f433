use serde::{Deserialize, Serialize};

/// One benchmarkable hash algorithm from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct AlgorithmSpec {
    pub name: String,
    /// hashcat `-m` hash-mode identifier.
    pub mode: u32,
}

/// Outcome of a single benchmark trial.
///
/// `speed_hps` and `duration` are `None` when the trial failed or its output
/// was unparseable. Absence means "unusable", not "measured as zero"; the
/// distinction survives CSV serialization as an empty field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub name: String,
    pub mode: u32,
    pub speed_raw: String,
    pub speed_hps: Option<f64>,
    pub duration: Option<f64>,
}

/// Per-algorithm mean statistics over the usable samples of one group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub name: String,
    pub avg_speed_hps: f64,
    pub avg_duration: f64,
}

/// Round to two decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
