use std::collections::BTreeMap;

use super::model::Table;

/// Row indices ordered by `prediction_score`, highest first. Ties keep file order.
pub fn score_order(table: &Table) -> Vec<usize> {
    let mut order: Vec<usize> = (0..table.len()).collect();
    order.sort_by(|&a, &b| {
        table.rows[b]
            .prediction_score
            .total_cmp(&table.rows[a].prediction_score)
    });
    order
}

/// One bar of the regional chart: mean score of a sector within a region.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownBar {
    pub region: String,
    pub sector: String,
    pub mean_score: f64,
    pub count: usize,
}

/// Group rows by (region, sector), both in sorted order.
pub fn region_breakdown(table: &Table) -> Vec<BreakdownBar> {
    let mut groups: BTreeMap<(&str, &str), (usize, f64)> = BTreeMap::new();
    for r in &table.rows {
        let entry = groups
            .entry((r.region.as_str(), r.sector.as_str()))
            .or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += r.prediction_score;
    }

    groups
        .into_iter()
        .map(|((region, sector), (count, total))| BreakdownBar {
            region: region.to_string(),
            sector: sector.to_string(),
            mean_score: total / count as f64,
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::loader::augment;
    use crate::data::model::tests::record;

    #[test]
    fn sorted_descending_and_stable() {
        let table = augment(vec![
            record("a", 40.0, 1.0),
            record("b", 90.0, 1.0),
            record("c", 40.0, 1.0),
            record("d", 75.0, 1.0),
        ]);
        let ids: Vec<_> = score_order(&table)
            .into_iter()
            .map(|i| table.rows[i].taxpayer_id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn groups_by_region_then_sector() {
        let mut rows = vec![
            record("1", 80.0, 1.0),
            record("2", 40.0, 1.0),
            record("3", 90.0, 1.0),
        ];
        rows[1].sector = "Mining".into();
        rows[2].region = "Bulawayo".into();
        let bars = region_breakdown(&augment(rows));

        let keys: Vec<_> = bars
            .iter()
            .map(|b| (b.region.as_str(), b.sector.as_str()))
            .collect();
        assert_eq!(
            keys,
            vec![("Bulawayo", "Retail"), ("Harare", "Mining"), ("Harare", "Retail")]
        );
        assert_relative_eq!(bars[2].mean_score, 80.0);
        assert_eq!(bars[2].count, 1);
    }

    #[test]
    fn empty_table_has_no_bars() {
        assert!(region_breakdown(&augment(Vec::new())).is_empty());
    }
}
