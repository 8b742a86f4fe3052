use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Rounding rule for coordinate columns
// ---------------------------------------------------------------------------

/// How `.5` ties are resolved when a coordinate value is rounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Ties go to the even neighbour: 2.5 → 2, 3.5 → 4.
    #[default]
    HalfEven,
    /// Ties go away from zero: 2.5 → 3, -2.5 → -3.
    HalfAwayFromZero,
}

impl RoundingMode {
    pub fn round(self, v: f64) -> f64 {
        match self {
            RoundingMode::HalfEven => v.round_ties_even(),
            RoundingMode::HalfAwayFromZero => v.round(),
        }
    }
}

// ---------------------------------------------------------------------------
// Merge options
// ---------------------------------------------------------------------------

/// Knobs for a single merge. Loadable from a JSON file:
///
/// ```json
/// { "drop_confidence_columns": true, "rounding": "half-away-from-zero" }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MergeOptions {
    /// Remove every column ending in `_Confidence` before merging.
    pub drop_confidence_columns: bool,
    pub rounding: RoundingMode,
}

impl MergeOptions {
    pub fn with_drop_confidence(mut self, drop: bool) -> Self {
        self.drop_confidence_columns = drop;
        self
    }

    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Read options from a JSON config file. Missing keys keep their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}
