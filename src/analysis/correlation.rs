use crate::data::model::{IpoTable, NumericField};
use crate::error::AnalysisError;

/// Columns shown in the subscription heatmap, in display order.
pub const SUBSCRIPTION_HEATMAP_COLUMNS: [NumericField; 6] = [
    NumericField::SubscriptionQib,
    NumericField::SubscriptionHni,
    NumericField::SubscriptionRii,
    NumericField::SubscriptionTotal,
    NumericField::IssueSize,
    NumericField::ListingGainsPercent,
];

/// Symmetric Pearson correlation matrix.
///
/// `values[i][j]` correlates `columns[i]` with `columns[j]`. The diagonal is
/// always `Some(1.0)`; an off-diagonal cell is `None` when the pair has fewer
/// than two rows with both values present or either side has zero variance.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<NumericField>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.values.get(i)?.get(j).copied().flatten()
    }
}

/// Correlate every pair of the requested columns that the table provides.
/// Requested columns missing from the table are dropped silently; if none
/// remain the request fails with [`AnalysisError::InsufficientColumns`].
pub fn correlation_matrix(table: &IpoTable, columns: &[NumericField]) -> Result<CorrelationMatrix, AnalysisError> {
    let mut present: Vec<NumericField> = Vec::new();
    for &c in columns {
        if table.has_column(c) && !present.contains(&c) {
            present.push(c);
        }
    }
    if present.is_empty() {
        return Err(AnalysisError::InsufficientColumns);
    }

    let n = present.len();
    let mut values = vec![vec![None; n]; n];
    for i in 0..n {
        values[i][i] = Some(1.0);
        for j in (i + 1)..n {
            let r = pairwise_pearson(table, present[i], present[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: present,
        values,
    })
}

/// Pearson's r over the rows where both columns have a value.
fn pairwise_pearson(table: &IpoTable, a: NumericField, b: NumericField) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = table
        .records()
        .iter()
        .filter_map(|r| Some((r.value(a)?, r.value(b)?)))
        .collect();
    pearson(&pairs)
}

pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for &(x, y) in pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return None;
    }
    Some((cov / denom).clamp(-1.0, 1.0))
}
