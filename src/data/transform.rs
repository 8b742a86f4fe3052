use log::debug;

use super::model::{Table, Value};
use crate::config::{MergeOptions, RoundingMode};

/// Suffix marking a per-joint confidence score.
pub const CONFIDENCE_SUFFIX: &str = "_Confidence";

/// Suffixes marking joint coordinate columns.
pub const COORDINATE_SUFFIXES: [&str; 3] = ["_X", "_Y", "_Z"];

pub fn is_confidence_column(name: &str) -> bool {
    name.ends_with(CONFIDENCE_SUFFIX)
}

pub fn is_coordinate_column(name: &str) -> bool {
    COORDINATE_SUFFIXES.iter().any(|s| name.ends_with(s))
}

/// Apply the per-file column transform:
/// * drop `*_Confidence` columns when `options.drop_confidence_columns` is set
/// * round every `*_X` / `*_Y` / `*_Z` cell to a nullable integer
///
/// Row count and the order of the remaining columns are preserved. Applying
/// the transform twice gives the same table as applying it once.
pub fn transform(table: &Table, options: &MergeOptions) -> Table {
    let keep: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .filter(|(_, name)| !(options.drop_confidence_columns && is_confidence_column(name)))
        .map(|(i, _)| i)
        .collect();

    let dropped = table.columns.len() - keep.len();
    if dropped > 0 {
        debug!("dropping {dropped} confidence column(s)");
    }

    let columns: Vec<String> = keep.iter().map(|&i| table.columns[i].clone()).collect();
    let coordinate: Vec<bool> = columns.iter().map(|c| is_coordinate_column(c)).collect();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            keep.iter()
                .zip(&coordinate)
                .map(|(&i, &is_coord)| {
                    if is_coord {
                        round_cell(&row[i], options.rounding)
                    } else {
                        row[i].clone()
                    }
                })
                .collect()
        })
        .collect();

    Table { columns, rows }
}

/// Round one coordinate cell. Anything that is not a finite number that fits
/// in an `i64` after rounding becomes [`Value::Null`].
fn round_cell(value: &Value, mode: RoundingMode) -> Value {
    if let Value::Integer(i) = value {
        return Value::Integer(*i);
    }
    match value.as_f64() {
        Some(v) if v.is_finite() => {
            let r = mode.round(v);
            // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
            if r >= i64::MIN as f64 && r < i64::MAX as f64 {
                Value::Integer(r as i64)
            } else {
                Value::Null
            }
        }
        _ => Value::Null,
    }
}
