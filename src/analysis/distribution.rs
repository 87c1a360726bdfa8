use std::fmt;

use crate::data::model::{IpoTable, NumericField, Status};

pub const MIN_BINS: usize = 5;
pub const MAX_BINS: usize = 100;
pub const DEFAULT_BINS: usize = 30;

/// Columns the distribution view can histogram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistributionVariable {
    #[default]
    ListingGainsPercent,
    IssueSize,
    SubscriptionTotal,
}

impl DistributionVariable {
    pub const ALL: [DistributionVariable; 3] = [
        DistributionVariable::ListingGainsPercent,
        DistributionVariable::IssueSize,
        DistributionVariable::SubscriptionTotal,
    ];

    pub fn field(self) -> NumericField {
        match self {
            DistributionVariable::ListingGainsPercent => NumericField::ListingGainsPercent,
            DistributionVariable::IssueSize => NumericField::IssueSize,
            DistributionVariable::SubscriptionTotal => NumericField::SubscriptionTotal,
        }
    }
}

impl fmt::Display for DistributionVariable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.field().fmt(f)
    }
}

/// Profit / loss split of each bin's count.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatusCounts {
    pub profit: Vec<usize>,
    pub loss: Vec<usize>,
}

impl StatusCounts {
    pub fn for_status(&self, status: Status) -> &[usize] {
        match status {
            Status::Profit => &self.profit,
            Status::Loss => &self.loss,
        }
    }
}

/// Five-number summary used for the marginal box plot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Equal-width histogram of one column.
///
/// `edges` has `counts.len() + 1` entries; bin `i` covers
/// `[edges[i], edges[i + 1])`, the last bin also includes its upper edge.
/// Empty input produces no bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub variable: DistributionVariable,
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    /// Only present for the listing-gain variable.
    pub by_status: Option<StatusCounts>,
    pub spread: Option<BoxSummary>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

pub fn clamp_bins(bin_count: usize) -> usize {
    bin_count.clamp(MIN_BINS, MAX_BINS)
}

/// Bin the non-missing values of `variable` into `bin_count` equal-width bins
/// (clamped to 5..=100). When the variable is the listing gain the counts are
/// also split by status.
pub fn distribution_input(table: &IpoTable, variable: DistributionVariable, bin_count: usize) -> Histogram {
    let bins = clamp_bins(bin_count);
    let field = variable.field();
    let split_by_status = variable == DistributionVariable::ListingGainsPercent;

    let samples: Vec<(f64, Status)> = table
        .records()
        .iter()
        .filter_map(|r| r.value(field).map(|v| (v, r.status())))
        .filter(|(v, _)| v.is_finite())
        .collect();

    let mut values: Vec<f64> = samples.iter().map(|(v, _)| *v).collect();
    values.sort_by(f64::total_cmp);

    let (Some(&lo), Some(&hi)) = (values.first(), values.last()) else {
        return Histogram {
            variable,
            edges: Vec::new(),
            counts: Vec::new(),
            by_status: split_by_status.then(StatusCounts::default),
            spread: None,
        };
    };

    // A single distinct value still gets a visible, non-zero width range.
    let (lo, hi) = if hi > lo { (lo, hi) } else { (lo - 0.5, hi + 0.5) };
    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    let mut by_status = StatusCounts {
        profit: vec![0; bins],
        loss: vec![0; bins],
    };
    for &(v, status) in &samples {
        let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
        counts[idx] += 1;
        match status {
            Status::Profit => by_status.profit[idx] += 1,
            Status::Loss => by_status.loss[idx] += 1,
        }
    }

    Histogram {
        variable,
        edges,
        counts,
        by_status: split_by_status.then_some(by_status),
        spread: box_summary(&values),
    }
}

/// Quartiles with linear interpolation between closest ranks. `sorted` must
/// be ascending.
pub fn box_summary(sorted: &[f64]) -> Option<BoxSummary> {
    let (&min, &max) = (sorted.first()?, sorted.last()?);
    Some(BoxSummary {
        min,
        q1: quantile(sorted, 0.25),
        median: quantile(sorted, 0.5),
        q3: quantile(sorted, 0.75),
        max,
    })
}

fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * frac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, table};

    fn gains(values: &[f64]) -> IpoTable {
        table(
            values
                .iter()
                .enumerate()
                .map(|(i, &g)| record(&format!("IPO{i}"), Some((2010, 1, 1)), Some(g)))
                .collect(),
        )
    }

    #[test]
    fn bins_are_equal_width_and_cover_every_value() {
        let h = distribution_input(&gains(&[0.0, 1.0, 2.0, 3.0, 4.0, 10.0]), DistributionVariable::ListingGainsPercent, 5);
        assert_eq!(h.counts.len(), 5);
        assert_eq!(h.edges.len(), 6);
        assert_eq!(h.edges[0], 0.0);
        assert!((h.edges[5] - 10.0).abs() < 1e-9);
        assert!((h.bin_width() - 2.0).abs() < 1e-12);
        assert_eq!(h.counts, vec![2, 2, 1, 0, 1]);
        assert_eq!(h.total(), 6);
    }

    #[test]
    fn gain_histogram_splits_by_status() {
        let h = distribution_input(&gains(&[-5.0, -1.0, 0.0, 2.0, 5.0]), DistributionVariable::ListingGainsPercent, 5);
        let split = h.by_status.as_ref().unwrap();
        assert_eq!(split.profit.iter().sum::<usize>(), 2);
        assert_eq!(split.loss.iter().sum::<usize>(), 3);
        for i in 0..h.counts.len() {
            assert_eq!(split.profit[i] + split.loss[i], h.counts[i]);
        }
    }

    #[test]
    fn other_variables_are_not_split() {
        let h = distribution_input(&gains(&[1.0, 2.0]), DistributionVariable::IssueSize, 10);
        assert!(h.by_status.is_none());
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn bin_count_is_clamped() {
        let t = gains(&[1.0, 2.0, 3.0]);
        assert_eq!(distribution_input(&t, DistributionVariable::ListingGainsPercent, 1).counts.len(), MIN_BINS);
        assert_eq!(distribution_input(&t, DistributionVariable::ListingGainsPercent, 500).counts.len(), MAX_BINS);
    }

    #[test]
    fn constant_column_lands_in_one_bin() {
        let h = distribution_input(&gains(&[7.0, 7.0, 7.0]), DistributionVariable::ListingGainsPercent, 5);
        assert_eq!(h.total(), 3);
        assert!(h.bin_width() > 0.0);
    }

    #[test]
    fn missing_values_are_skipped() {
        let mut t = vec![record("A", None, Some(1.0)), record("B", None, None)];
        t[0].subscription_total = None;
        let h = distribution_input(&table(t), DistributionVariable::SubscriptionTotal, 5);
        assert_eq!(h.total(), 1);
    }

    #[test]
    fn empty_table_has_no_bins() {
        let h = distribution_input(&IpoTable::empty(), DistributionVariable::ListingGainsPercent, 30);
        assert!(h.counts.is_empty());
        assert!(h.edges.is_empty());
        assert_eq!(h.bin_width(), 0.0);
        assert!(h.spread.is_none());
    }

    #[test]
    fn box_summary_interpolates_quartiles() {
        let s = box_summary(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.min, 1.0);
        assert_eq!(s.q1, 1.75);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.q3, 3.25);
        assert_eq!(s.max, 4.0);
        assert!(box_summary(&[]).is_none());
    }
}
