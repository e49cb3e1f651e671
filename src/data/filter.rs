use std::fmt;

use super::error::InvalidQuadrantError;
use super::model::{RiskQuadrant, Table, TaxpayerRecord, LIKELY_DEFAULT_SCORE};

// ---------------------------------------------------------------------------
// Filter mode
// ---------------------------------------------------------------------------

/// Which rows of the table the user wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    #[default]
    All,
    /// `prediction_score > 50`; a score of exactly 50 is excluded.
    LikelyToDefault,
    ByQuadrant(RiskQuadrant),
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterMode::All => f.write_str("All Records"),
            FilterMode::LikelyToDefault => f.write_str("Likely to Default (Score > 50%)"),
            FilterMode::ByQuadrant(q) => write!(f, "By Risk Quadrant: {q}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Aggregates over a filtered row set.
///
/// For an empty set `mean_score` and `revenue_sum` are reported as 0 and
/// `empty` is set, rather than propagating NaN.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub count: usize,
    pub mean_score: f64,
    pub revenue_sum: f64,
    pub empty: bool,
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of rows that match `mode`, in table order.
///
/// Fails when a quadrant filter names a quadrant no row carries.
pub fn matching_indices(
    table: &Table,
    mode: &FilterMode,
) -> Result<Vec<usize>, InvalidQuadrantError> {
    if let FilterMode::ByQuadrant(q) = *mode {
        if !table.rows.iter().any(|r| r.risk_quadrant == q) {
            return Err(InvalidQuadrantError {
                label: q.label().to_string(),
            });
        }
    }

    let keep = |r: &TaxpayerRecord| match *mode {
        FilterMode::All => true,
        FilterMode::LikelyToDefault => r.prediction_score > LIKELY_DEFAULT_SCORE,
        FilterMode::ByQuadrant(q) => r.risk_quadrant == q,
    };

    Ok(table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, r)| keep(*r))
        .map(|(i, _)| i)
        .collect())
}

/// Count, mean score and summed revenue over `rows`.
pub fn summarize<'a, I>(rows: I) -> Summary
where
    I: IntoIterator<Item = &'a TaxpayerRecord>,
{
    let (count, score_sum, revenue_sum) = rows.into_iter().fold((0usize, 0.0, 0.0), |acc, r| {
        (acc.0 + 1, acc.1 + r.prediction_score, acc.2 + r.annual_revenue_usd)
    });

    if count == 0 {
        return Summary {
            empty: true,
            ..Summary::default()
        };
    }
    Summary {
        count,
        mean_score: score_sum / count as f64,
        revenue_sum,
        empty: false,
    }
}

/// Apply `mode` to `table`, returning the matching rows and their summary.
pub fn filter(table: &Table, mode: &FilterMode) -> Result<(Table, Summary), InvalidQuadrantError> {
    let indices = matching_indices(table, mode)?;
    let subset = table.subset(&indices);
    let summary = summarize(&subset.rows);
    Ok((subset, summary))
}
