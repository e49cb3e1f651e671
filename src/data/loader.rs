use std::path::Path;

use super::error::DataSourceError;
use super::model::{RiskQuadrant, Table, TaxpayerRecord, HIGH_IMPACT_PERCENTILE};

/// Columns every input file must carry. Extra columns are ignored.
pub const REQUIRED_COLUMNS: [&str; 11] = [
    "taxpayer_name",
    "taxpayer_id",
    "sector",
    "region",
    "annual_revenue_usd",
    "late_filings_last_12m",
    "fiscal_device_uptime_pct",
    "vat_to_sales_ratio",
    "outstanding_debt_zig",
    "previous_audit_violations",
    "prediction_score",
];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a taxpayer CSV and classify every row.
pub fn load(path: &Path) -> Result<Table, DataSourceError> {
    let records = read_records(path)?;
    let table = augment(records);
    log::info!(
        "Loaded {} taxpayers from {} (revenue threshold {:?})",
        table.len(),
        path.display(),
        table.revenue_threshold
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV reader
// ---------------------------------------------------------------------------

/// Read raw rows from a headered CSV file.
///
/// The returned records still carry the default quadrant; run them through
/// [`augment`] before use. The reader owns the file handle and closes it
/// when it goes out of scope, on the error paths as well.
pub fn read_records(path: &Path) -> Result<Vec<TaxpayerRecord>, DataSourceError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| DataSourceError::from_csv(path.to_path_buf(), e))?;

    let headers = reader
        .headers()
        .map_err(|e| DataSourceError::from_csv(path.to_path_buf(), e))?;

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| col.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DataSourceError::MissingColumns {
            path: path.to_path_buf(),
            columns: missing,
        });
    }

    reader
        .deserialize::<TaxpayerRecord>()
        .map(|row| row.map_err(|e| DataSourceError::from_csv(path.to_path_buf(), e)))
        .collect()
}

// ---------------------------------------------------------------------------
// Derived column
// ---------------------------------------------------------------------------

/// Compute the revenue threshold and assign each row its risk quadrant.
pub fn augment(mut rows: Vec<TaxpayerRecord>) -> Table {
    let revenues: Vec<f64> = rows.iter().map(|r| r.annual_revenue_usd).collect();
    let revenue_threshold = percentile(&revenues, HIGH_IMPACT_PERCENTILE);

    if let Some(threshold) = revenue_threshold {
        for row in &mut rows {
            row.risk_quadrant =
                RiskQuadrant::classify(row.prediction_score, row.annual_revenue_usd, threshold);
        }
    }

    Table {
        rows,
        revenue_threshold,
    }
}

/// `q`-th quantile (`0.0..=1.0`) with linear interpolation between closest ranks.
///
/// Non-finite values (NaN, ±inf) are skipped, as pandas skips NaN; `None`
/// when nothing finite remains.
pub fn percentile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let rank = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    if lo == hi {
        return Some(sorted[lo]);
    }
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}
