//! End-to-end: CSV on disk → load → filter → summary, through the public API.

use std::io::Write;
use std::sync::Arc;

use approx::assert_relative_eq;
use audit_command_center::data::cache::DatasetCache;
use audit_command_center::data::error::DataSourceError;
use audit_command_center::data::filter::{filter, FilterMode};
use audit_command_center::data::loader::{augment, load, read_records};
use audit_command_center::data::model::RiskQuadrant;

const DATA: &str = "\
taxpayer_name,taxpayer_id,sector,region,annual_revenue_usd,late_filings_last_12m,fiscal_device_uptime_pct,vat_to_sales_ratio,outstanding_debt_zig,previous_audit_violations,prediction_score
Zambezi Holdings,ZW1000001,Retail,Harare,120000,3,88.5,0.120,15000,1,82.5
Kariba Traders,ZW1000002,Mining,Bulawayo,45000,0,99.1,0.150,0,0,12.0
Mutare Enterprises,ZW1000003,Agriculture,Manicaland,800000,5,71.0,0.040,220000,3,91.0
Granite (Pvt) Ltd,ZW1000004,Retail,Harare,30000,1,95.0,0.180,500,0,50.0
Baobab Holdings,ZW1000005,Services,Midlands,960000,0,98.7,0.110,0,0,35.0
";

fn data_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(DATA.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn every_row_gets_exactly_one_quadrant() {
    let file = data_file();
    let table = load(file.path()).unwrap();

    // sorted revenues: 30k, 45k, 120k, 800k, 960k → p75 = 800k
    assert_relative_eq!(table.revenue_threshold.unwrap(), 800_000.0);
    let quadrants: Vec<_> = table.rows.iter().map(|r| r.risk_quadrant).collect();
    assert_eq!(
        quadrants,
        vec![
            RiskQuadrant::HighRiskLowImpact,
            RiskQuadrant::LowRiskLowImpact,
            RiskQuadrant::HighRiskHighImpact,
            RiskQuadrant::LowRiskLowImpact,
            RiskQuadrant::LowRiskHighImpact,
        ]
    );
}

#[test]
fn pipeline_stages_compose() {
    let file = data_file();
    let staged = augment(read_records(file.path()).unwrap());
    assert_eq!(staged, load(file.path()).unwrap());

    let (likely, summary) = filter(&staged, &FilterMode::LikelyToDefault).unwrap();
    let ids: Vec<_> = likely.rows.iter().map(|r| r.taxpayer_id.as_str()).collect();
    assert_eq!(ids, vec!["ZW1000001", "ZW1000003"]);
    assert_relative_eq!(summary.mean_score, (82.5 + 91.0) / 2.0);
    assert_relative_eq!(summary.revenue_sum, 920_000.0);

    let (all, summary) = filter(&staged, &FilterMode::All).unwrap();
    assert_eq!(all.rows, staged.rows);
    assert_eq!(summary.count, 5);
}

#[test]
fn quadrant_filter_then_reject() {
    let file = data_file();
    let table = load(file.path()).unwrap();

    let low_low = FilterMode::ByQuadrant(RiskQuadrant::LowRiskLowImpact);
    let (low, summary) = filter(&table, &low_low).unwrap();
    assert_eq!(low.len(), 2);
    assert_relative_eq!(summary.revenue_sum, 75_000.0);

    let (likely, _) = filter(&table, &FilterMode::LikelyToDefault).unwrap();
    let low_high = FilterMode::ByQuadrant(RiskQuadrant::LowRiskHighImpact);
    let err = filter(&likely, &low_high).unwrap_err();
    assert_eq!(err.label, RiskQuadrant::LowRiskHighImpact.label());
}

#[test]
fn cache_serves_same_table_until_invalidated() {
    let file = data_file();
    let mut cache = DatasetCache::new();

    let a = cache.get_or_load(file.path()).unwrap();
    let b = cache.get_or_load(file.path()).unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    cache.clear();
    let c = cache.get_or_load(file.path()).unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
}

#[test]
fn missing_file_surfaces_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = load(&dir.path().join("zimra_data.csv")).unwrap_err();
    assert!(matches!(err, DataSourceError::NotFound { .. }));
    assert!(err.to_string().contains("zimra_data.csv"));
}
