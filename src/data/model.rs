use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use super::error::InvalidQuadrantError;

/// Scores at or above this mark a taxpayer as high risk.
pub const HIGH_RISK_SCORE: f64 = 70.0;

/// Scores strictly above this count as "likely to default".
pub const LIKELY_DEFAULT_SCORE: f64 = 50.0;

/// Revenue percentile separating high impact from low impact.
pub const HIGH_IMPACT_PERCENTILE: f64 = 0.75;

// ---------------------------------------------------------------------------
// RiskQuadrant – the derived classification
// ---------------------------------------------------------------------------

/// Risk/impact classification of a taxpayer.
///
/// Ordering follows the declaration order, which is also the order used
/// everywhere the quadrants are listed in the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskQuadrant {
    HighRiskHighImpact,
    HighRiskLowImpact,
    LowRiskHighImpact,
    #[default]
    LowRiskLowImpact,
}

impl RiskQuadrant {
    pub const ALL: [RiskQuadrant; 4] = [
        RiskQuadrant::HighRiskHighImpact,
        RiskQuadrant::HighRiskLowImpact,
        RiskQuadrant::LowRiskHighImpact,
        RiskQuadrant::LowRiskLowImpact,
    ];

    /// Classify one taxpayer against the dataset-wide revenue threshold.
    pub fn classify(
        prediction_score: f64,
        annual_revenue_usd: f64,
        revenue_threshold: f64,
    ) -> Self {
        let is_high_risk = prediction_score >= HIGH_RISK_SCORE;
        let is_high_impact = annual_revenue_usd >= revenue_threshold;
        match (is_high_risk, is_high_impact) {
            (true, true) => RiskQuadrant::HighRiskHighImpact,
            (true, false) => RiskQuadrant::HighRiskLowImpact,
            (false, true) => RiskQuadrant::LowRiskHighImpact,
            (false, false) => RiskQuadrant::LowRiskLowImpact,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RiskQuadrant::HighRiskHighImpact => "High Risk / High Impact",
            RiskQuadrant::HighRiskLowImpact => "High Risk / Low Impact",
            RiskQuadrant::LowRiskHighImpact => "Low Risk / High Impact",
            RiskQuadrant::LowRiskLowImpact => "Low Risk / Low Impact",
        }
    }

    /// Marker shown in front of the label in the dashboard.
    pub fn icon(self) -> &'static str {
        match self {
            RiskQuadrant::HighRiskHighImpact => "🔥",
            RiskQuadrant::HighRiskLowImpact => "⚠",
            RiskQuadrant::LowRiskHighImpact => "💰",
            RiskQuadrant::LowRiskLowImpact => "✅",
        }
    }
}

impl fmt::Display for RiskQuadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskQuadrant {
    type Err = InvalidQuadrantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        RiskQuadrant::ALL
            .into_iter()
            .find(|q| q.label() == wanted)
            .ok_or_else(|| InvalidQuadrantError {
                label: wanted.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// TaxpayerRecord – one row of the source file
// ---------------------------------------------------------------------------

/// A single taxpayer (one row of the source CSV).
///
/// `risk_quadrant` is not read from the file; it is filled in by
/// [`augment`](super::loader::augment) once the revenue threshold is known.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TaxpayerRecord {
    pub taxpayer_id: String,
    pub taxpayer_name: String,
    pub sector: String,
    pub region: String,
    pub annual_revenue_usd: f64,
    pub late_filings_last_12m: u32,
    pub fiscal_device_uptime_pct: f64,
    pub vat_to_sales_ratio: f64,
    pub outstanding_debt_zig: f64,
    pub previous_audit_violations: u32,
    pub prediction_score: f64,
    #[serde(skip_deserializing)]
    pub risk_quadrant: RiskQuadrant,
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Classified rows in file order plus the threshold they were classified with.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub rows: Vec<TaxpayerRecord>,
    /// 75th percentile of `annual_revenue_usd`; `None` when the source had no rows.
    pub revenue_threshold: Option<f64>,
}

impl Table {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct quadrants carried by at least one row, in fixed quadrant order.
    pub fn quadrants_present(&self) -> BTreeSet<RiskQuadrant> {
        self.rows.iter().map(|r| r.risk_quadrant).collect()
    }

    /// A new table holding the rows at `indices`, keeping this table's threshold.
    pub fn subset(&self, indices: &[usize]) -> Table {
        Table {
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            revenue_threshold: self.revenue_threshold,
        }
    }
}

// ---------------------------------------------------------------------------
// FeatureColumn / FeatureValue – the inspectable columns
// ---------------------------------------------------------------------------

/// Columns the user can pick for the "inspect feature" column of the results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FeatureColumn {
    #[default]
    Sector,
    Region,
    AnnualRevenueUsd,
    LateFilingsLast12m,
    FiscalDeviceUptimePct,
    VatToSalesRatio,
    OutstandingDebtZig,
    PreviousAuditViolations,
    RiskQuadrant,
}

impl FeatureColumn {
    pub const ALL: [FeatureColumn; 9] = [
        FeatureColumn::Sector,
        FeatureColumn::Region,
        FeatureColumn::AnnualRevenueUsd,
        FeatureColumn::LateFilingsLast12m,
        FeatureColumn::FiscalDeviceUptimePct,
        FeatureColumn::VatToSalesRatio,
        FeatureColumn::OutstandingDebtZig,
        FeatureColumn::PreviousAuditViolations,
        FeatureColumn::RiskQuadrant,
    ];

    /// Column name as it appears in the source file.
    pub fn name(self) -> &'static str {
        match self {
            FeatureColumn::Sector => "sector",
            FeatureColumn::Region => "region",
            FeatureColumn::AnnualRevenueUsd => "annual_revenue_usd",
            FeatureColumn::LateFilingsLast12m => "late_filings_last_12m",
            FeatureColumn::FiscalDeviceUptimePct => "fiscal_device_uptime_pct",
            FeatureColumn::VatToSalesRatio => "vat_to_sales_ratio",
            FeatureColumn::OutstandingDebtZig => "outstanding_debt_zig",
            FeatureColumn::PreviousAuditViolations => "previous_audit_violations",
            FeatureColumn::RiskQuadrant => "risk_quadrant",
        }
    }

    pub fn value(self, record: &TaxpayerRecord) -> FeatureValue {
        match self {
            FeatureColumn::Sector => FeatureValue::Text(record.sector.clone()),
            FeatureColumn::Region => FeatureValue::Text(record.region.clone()),
            FeatureColumn::AnnualRevenueUsd => FeatureValue::Float(record.annual_revenue_usd),
            FeatureColumn::LateFilingsLast12m => {
                FeatureValue::Integer(i64::from(record.late_filings_last_12m))
            }
            FeatureColumn::FiscalDeviceUptimePct => {
                FeatureValue::Float(record.fiscal_device_uptime_pct)
            }
            FeatureColumn::VatToSalesRatio => FeatureValue::Float(record.vat_to_sales_ratio),
            FeatureColumn::OutstandingDebtZig => FeatureValue::Float(record.outstanding_debt_zig),
            FeatureColumn::PreviousAuditViolations => {
                FeatureValue::Integer(i64::from(record.previous_audit_violations))
            }
            FeatureColumn::RiskQuadrant => FeatureValue::Text(record.risk_quadrant.to_string()),
        }
    }
}

impl fmt::Display for FeatureColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single cell of the inspected column.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureValue::Text(s) => write!(f, "{s}"),
            FeatureValue::Integer(i) => write!(f, "{i}"),
            FeatureValue::Float(v) => write!(f, "{v:.2}"),
        }
    }
}

impl FeatureValue {
    /// Numeric view of the value, for right-aligning numbers in the table.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FeatureValue::Float(v) => Some(*v),
            FeatureValue::Integer(i) => Some(*i as f64),
            FeatureValue::Text(_) => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(id: &str, score: f64, revenue: f64) -> TaxpayerRecord {
        TaxpayerRecord {
            taxpayer_id: id.to_string(),
            taxpayer_name: format!("Taxpayer {id}"),
            sector: "Retail".to_string(),
            region: "Harare".to_string(),
            annual_revenue_usd: revenue,
            late_filings_last_12m: 1,
            fiscal_device_uptime_pct: 97.5,
            vat_to_sales_ratio: 0.12,
            outstanding_debt_zig: 0.0,
            previous_audit_violations: 0,
            prediction_score: score,
            risk_quadrant: RiskQuadrant::default(),
        }
    }

    #[test]
    fn classify_covers_all_four_quadrants() {
        assert_eq!(RiskQuadrant::classify(80.0, 2000.0, 1500.0), RiskQuadrant::HighRiskHighImpact);
        assert_eq!(RiskQuadrant::classify(80.0, 1000.0, 1500.0), RiskQuadrant::HighRiskLowImpact);
        assert_eq!(RiskQuadrant::classify(40.0, 2000.0, 1500.0), RiskQuadrant::LowRiskHighImpact);
        assert_eq!(RiskQuadrant::classify(40.0, 1000.0, 1500.0), RiskQuadrant::LowRiskLowImpact);
    }

    #[test]
    fn classify_boundaries_are_inclusive() {
        assert_eq!(RiskQuadrant::classify(70.0, 1500.0, 1500.0), RiskQuadrant::HighRiskHighImpact);
        assert_eq!(RiskQuadrant::classify(69.99, 1499.99, 1500.0), RiskQuadrant::LowRiskLowImpact);
    }

    #[test]
    fn labels_parse_back() {
        for q in RiskQuadrant::ALL {
            assert_eq!(q.label().parse::<RiskQuadrant>(), Ok(q));
        }
        assert_eq!(
            "  Low Risk / Low Impact ".parse::<RiskQuadrant>(),
            Ok(RiskQuadrant::LowRiskLowImpact)
        );
    }

    #[test]
    fn unknown_label_is_rejected() {
        let err = "Medium Risk".parse::<RiskQuadrant>().unwrap_err();
        assert_eq!(err.label, "Medium Risk");
    }

    #[test]
    fn quadrants_present_is_distinct_and_ordered() {
        let mut a = record("a", 10.0, 1.0);
        a.risk_quadrant = RiskQuadrant::LowRiskLowImpact;
        let mut b = record("b", 90.0, 1.0);
        b.risk_quadrant = RiskQuadrant::HighRiskHighImpact;
        let table = Table {
            rows: vec![a.clone(), b, a],
            revenue_threshold: Some(1.0),
        };
        let present: Vec<_> = table.quadrants_present().into_iter().collect();
        assert_eq!(
            present,
            vec![RiskQuadrant::HighRiskHighImpact, RiskQuadrant::LowRiskLowImpact]
        );
    }

    #[test]
    fn feature_values_display() {
        let mut r = record("x", 55.0, 1234.5);
        r.risk_quadrant = RiskQuadrant::HighRiskLowImpact;
        assert_eq!(FeatureColumn::Sector.value(&r).to_string(), "Retail");
        assert_eq!(FeatureColumn::AnnualRevenueUsd.value(&r).to_string(), "1234.50");
        assert_eq!(FeatureColumn::LateFilingsLast12m.value(&r), FeatureValue::Integer(1));
        assert_eq!(
            FeatureColumn::RiskQuadrant.value(&r).to_string(),
            "High Risk / Low Impact"
        );
        assert_eq!(FeatureColumn::ALL.len(), 9);
    }
}
