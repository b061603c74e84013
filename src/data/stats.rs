use std::collections::BTreeMap;
use std::path::Path;

use super::loader::candidate_columns;
use super::model::{ColumnStat, Dataset, Summary};
use crate::error::PipelineError;

/// Normalized name of the correlation target column.
pub const STRESS_LEVEL: &str = "stress_level";

/// Raw value that maps to the top of the 0–5 scale for the stress column.
const STRESS_RAW_MAX: f64 = 2.0;
/// Raw value that maps to the top of the 0–5 scale for every other column.
const FACTOR_RAW_MAX: f64 = 30.0;
/// Upper bound of the display scale.
pub const SCALE_MAX: f64 = 5.0;

/// Fewer paired observations than this give a correlation of 0.
const MIN_PAIRS: usize = 3;

// ---------------------------------------------------------------------------
// Cell parsing
// ---------------------------------------------------------------------------

/// Parse a cell as a number, or `None` to skip it.
///
/// Surrounding whitespace is allowed. NaN counts as unparsable.
pub fn parse_numeric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Trim, lowercase and turn spaces into underscores.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Running sum/count for one column.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accumulator {
    pub sum: f64,
    pub count: usize,
}

impl Accumulator {
    pub fn push(&mut self, v: f64) {
        self.sum += v;
        self.count += 1;
    }

    /// Arithmetic mean, or `None` when nothing was pushed.
    pub fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Count and mean per column over parseable cells. Columns without a single
/// parseable cell are left out; the rest keep the order of `columns`.
pub fn aggregate(dataset: &Dataset, columns: &[String]) -> Vec<(String, usize, f64)> {
    let mut acc: BTreeMap<&str, Accumulator> = BTreeMap::new();
    for row in &dataset.rows {
        for col in columns {
            let Some(v) = row.get(col).and_then(|cell| parse_numeric(cell)) else {
                continue;
            };
            acc.entry(col.as_str()).or_default().push(v);
        }
    }

    columns
        .iter()
        .filter_map(|col| {
            let a = acc.get(col.as_str())?;
            a.mean().map(|mean| (col.clone(), a.count, mean))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// First column whose name contains both "stress" and "level", ignoring case.
pub fn find_stress_column(columns: &[String]) -> Option<&str> {
    columns
        .iter()
        .find(|c| {
            let lower = c.to_lowercase();
            lower.contains("stress") && lower.contains("level")
        })
        .map(String::as_str)
}

/// Pearson correlation of two equally long sequences.
///
/// Returns 0 for fewer than three pairs and whenever the denominator
/// vanishes; a constant sequence therefore reports 0 rather than undefined.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len().min(ys.len());
    if n < MIN_PAIRS {
        return 0.0;
    }

    let (mut sum_x, mut sum_y, mut sum_x2, mut sum_y2, mut sum_xy) = (0.0, 0.0, 0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(ys) {
        sum_x += x;
        sum_y += y;
        sum_x2 += x * x;
        sum_y2 += y * y;
        sum_xy += x * y;
    }

    let nf = n as f64;
    let numerator = nf * sum_xy - sum_x * sum_y;
    let product = (nf * sum_x2 - sum_x * sum_x) * (nf * sum_y2 - sum_y * sum_y);
    // Round-off on constant input can push the product just below zero.
    let denominator = product.max(0.0).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

/// Paired values of `column` and `target` from rows where both parse.
pub fn paired_values(dataset: &Dataset, column: &str, target: &str) -> (Vec<f64>, Vec<f64>) {
    dataset
        .rows
        .iter()
        .filter_map(|row| {
            let x = parse_numeric(row.get(column)?)?;
            let y = parse_numeric(row.get(target)?)?;
            Some((x, y))
        })
        .unzip()
}

/// Correlation of every column except `target` against `target`.
pub fn correlate(dataset: &Dataset, columns: &[String], target: &str) -> BTreeMap<String, f64> {
    columns
        .iter()
        .filter(|c| c.as_str() != target)
        .map(|c| {
            let (xs, ys) = paired_values(dataset, c, target);
            let r = pearson(&xs, &ys);
            log::debug!("r({c}, {target}) = {r:.4} over {} pairs", xs.len());
            (c.clone(), r)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scaling
// ---------------------------------------------------------------------------

/// Map a raw mean onto the 0–5 display scale.
///
/// The stress column tops out at 2, every other factor at 30.
pub fn scale5(mean: f64, name: &str) -> f64 {
    let raw_max = if normalize_name(name) == STRESS_LEVEL {
        STRESS_RAW_MAX
    } else {
        FACTOR_RAW_MAX
    };
    // min before max: a NaN product lands on SCALE_MAX.
    (mean * (SCALE_MAX / raw_max)).min(SCALE_MAX).max(0.0)
}

// ---------------------------------------------------------------------------
// Full summary
// ---------------------------------------------------------------------------

/// Aggregate, correlate and scale every numeric column of `dataset`.
pub fn summarize(dataset: &Dataset, source: &Path) -> Result<Summary, PipelineError> {
    if dataset.is_empty() {
        log::warn!("{} has a header but no rows", source.display());
    }
    let columns = candidate_columns(&dataset.headers);
    let stress_column = find_stress_column(&columns).map(str::to_string);

    let correlations = match &stress_column {
        Some(target) => correlate(dataset, &columns, target),
        None => {
            log::info!("No stress level column; skipping correlation");
            BTreeMap::new()
        }
    };

    let stats: Vec<ColumnStat> = aggregate(dataset, &columns)
        .into_iter()
        .map(|(name, count, raw_mean)| ColumnStat {
            scaled_mean: scale5(raw_mean, &name),
            correlation: correlations.get(&name).copied(),
            name,
            count,
            raw_mean,
        })
        .collect();

    if stats.is_empty() {
        return Err(PipelineError::NoNumericColumns {
            source_path: source.to_path_buf(),
        });
    }

    log::info!(
        "{} numeric columns (of {} candidates), stress column: {:?}",
        stats.len(),
        columns.len(),
        stress_column
    );

    Ok(Summary {
        source: source.to_path_buf(),
        stress_column,
        columns: stats,
    })
}
