use crate::data::model::{IpoTable, NumericField};

/// Headline metrics of the market snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryKpis {
    pub count: usize,
    /// Mean listing gain over rows that have one; `None` means "no data".
    pub avg_gain: Option<f64>,
    pub profitable_count: usize,
    /// `profitable_count / count * 100`, or 0 for an empty table.
    pub win_rate_pct: f64,
}

pub fn summary_kpis(table: &IpoTable) -> SummaryKpis {
    let count = table.len();
    let profitable_count = table
        .records()
        .iter()
        .filter(|r| r.listing_gains_profit())
        .count();
    let win_rate_pct = if count > 0 {
        profitable_count as f64 / count as f64 * 100.0
    } else {
        0.0
    };

    SummaryKpis {
        count,
        avg_gain: mean(&table.values(NumericField::ListingGainsPercent)),
        profitable_count,
        win_rate_pct,
    }
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{filter_by_year, YearSelection};
    use crate::data::model::fixtures::{record, table};

    fn round1(v: f64) -> f64 {
        (v * 10.0).round() / 10.0
    }

    fn scenario() -> IpoTable {
        table(vec![
            record("A", Some((2010, 2, 3)), Some(5.0)),
            record("B", Some((2010, 6, 1)), Some(-2.0)),
            record("C", Some((2011, 1, 5)), Some(10.0)),
        ])
    }

    #[test]
    fn full_table_snapshot() {
        let k = summary_kpis(&scenario());
        assert_eq!(k.count, 3);
        assert_eq!(k.profitable_count, 2);
        assert_eq!(round1(k.win_rate_pct), 66.7);
        let avg = k.avg_gain.unwrap();
        assert!((avg - 13.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn single_year_snapshot() {
        let selected: YearSelection = [2010].into_iter().collect();
        let k = summary_kpis(&filter_by_year(&scenario(), &selected));
        assert_eq!(k.count, 2);
        assert_eq!(k.profitable_count, 1);
        assert_eq!(round1(k.win_rate_pct), 50.0);
    }

    #[test]
    fn empty_table_is_neutral() {
        let k = summary_kpis(&IpoTable::empty());
        assert_eq!(k, SummaryKpis::default());
        assert_eq!(k.avg_gain, None);
        assert_eq!(k.win_rate_pct, 0.0);
    }

    #[test]
    fn missing_gains_count_rows_but_not_the_mean() {
        let t = table(vec![
            record("A", Some((2010, 2, 3)), Some(4.0)),
            record("B", Some((2010, 6, 1)), None),
        ]);
        let k = summary_kpis(&t);
        assert_eq!(k.count, 2);
        assert_eq!(k.avg_gain, Some(4.0));
        assert_eq!(k.profitable_count, 1);
        assert!(k.profitable_count <= k.count);
        assert!((0.0..=100.0).contains(&k.win_rate_pct));
    }
}
