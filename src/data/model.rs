use std::collections::BTreeSet;
use std::fmt;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// NumericField – the numeric columns of the IPO table
// ---------------------------------------------------------------------------

/// A numeric column that charts can select as an axis, colour or variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NumericField {
    IssuePrice,
    IssueSize,
    SubscriptionQib,
    SubscriptionHni,
    SubscriptionRii,
    SubscriptionTotal,
    ListingGainsPercent,
    Year,
}

impl NumericField {
    /// Every numeric column, in source order.
    pub const ALL: [NumericField; 8] = [
        NumericField::IssuePrice,
        NumericField::IssueSize,
        NumericField::SubscriptionQib,
        NumericField::SubscriptionHni,
        NumericField::SubscriptionRii,
        NumericField::SubscriptionTotal,
        NumericField::ListingGainsPercent,
        NumericField::Year,
    ];

    /// Column name as it appears in the source header.
    pub fn column_name(self) -> &'static str {
        match self {
            NumericField::IssuePrice => "Issue_Price",
            NumericField::IssueSize => "Issue_Size",
            NumericField::SubscriptionQib => "Subscription_QIB",
            NumericField::SubscriptionHni => "Subscription_HNI",
            NumericField::SubscriptionRii => "Subscription_RII",
            NumericField::SubscriptionTotal => "Subscription_Total",
            NumericField::ListingGainsPercent => "Listing_Gains_Percent",
            NumericField::Year => "Year",
        }
    }

    pub fn from_column_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.column_name() == name)
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column_name())
    }
}

// ---------------------------------------------------------------------------
// Status – Profit / Loss label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Status {
    Profit,
    Loss,
}

impl Status {
    pub fn from_profit(profit: bool) -> Self {
        if profit {
            Status::Profit
        } else {
            Status::Loss
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Status::Profit => "Profit",
            Status::Loss => "Loss",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// IpoRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single historical IPO.
///
/// Every optional field is `None` when the source cell was blank or could not
/// be parsed. `year`, profit flag and status are derived from the stored
/// fields on access, so they can never disagree with them.
#[derive(Debug, Clone, PartialEq)]
pub struct IpoRecord {
    pub ipo_name: String,
    /// Listing date; `None` when the `dd/mm/yy` text was not a real date.
    pub date: Option<NaiveDate>,
    pub issue_price: Option<f64>,
    pub issue_size: Option<f64>,
    pub subscription_qib: Option<f64>,
    pub subscription_hni: Option<f64>,
    pub subscription_rii: Option<f64>,
    pub subscription_total: Option<f64>,
    pub listing_gains_percent: Option<f64>,
}

impl IpoRecord {
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    /// `listing_gains_percent > 0`. A missing gain counts as not profitable.
    pub fn listing_gains_profit(&self) -> bool {
        self.listing_gains_percent.is_some_and(|g| g > 0.0)
    }

    pub fn status(&self) -> Status {
        Status::from_profit(self.listing_gains_profit())
    }

    /// Read a numeric column by field.
    pub fn value(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::IssuePrice => self.issue_price,
            NumericField::IssueSize => self.issue_size,
            NumericField::SubscriptionQib => self.subscription_qib,
            NumericField::SubscriptionHni => self.subscription_hni,
            NumericField::SubscriptionRii => self.subscription_rii,
            NumericField::SubscriptionTotal => self.subscription_total,
            NumericField::ListingGainsPercent => self.listing_gains_percent,
            NumericField::Year => self.year().map(f64::from),
        }
    }
}

// ---------------------------------------------------------------------------
// IpoTable – the complete loaded dataset (or a filtered copy of it)
// ---------------------------------------------------------------------------

/// Rows plus the set of numeric columns the source actually provided.
///
/// Tables are never mutated after construction; filtering builds a new one.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IpoTable {
    records: Vec<IpoRecord>,
    columns: BTreeSet<NumericField>,
}

impl IpoTable {
    pub fn new(records: Vec<IpoRecord>, columns: BTreeSet<NumericField>) -> Self {
        IpoTable { records, columns }
    }

    /// Zero rows, no columns: the sentinel returned when loading fails.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[IpoRecord] {
        &self.records
    }

    pub fn columns(&self) -> &BTreeSet<NumericField> {
        &self.columns
    }

    pub fn has_column(&self, field: NumericField) -> bool {
        self.columns.contains(&field)
    }

    /// Number of IPO rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Non-missing values of one numeric column, in row order.
    pub fn values(&self, field: NumericField) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.value(field)).collect()
    }

    /// Same column set, different rows.
    pub(crate) fn with_records(&self, records: Vec<IpoRecord>) -> Self {
        IpoTable {
            records,
            columns: self.columns.clone(),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn record(name: &str, date: Option<(i32, u32, u32)>, gain: Option<f64>) -> IpoRecord {
        IpoRecord {
            ipo_name: name.to_string(),
            date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            issue_price: Some(100.0),
            issue_size: Some(500.0),
            subscription_qib: Some(10.0),
            subscription_hni: Some(20.0),
            subscription_rii: Some(5.0),
            subscription_total: Some(12.0),
            listing_gains_percent: gain,
        }
    }

    pub fn table(records: Vec<IpoRecord>) -> IpoTable {
        IpoTable::new(records, NumericField::ALL.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::record;
    use super::*;

    #[test]
    fn status_follows_listing_gain_sign() {
        let up = record("Up", Some((2010, 1, 1)), Some(3.5));
        let flat = record("Flat", Some((2010, 1, 1)), Some(0.0));
        let down = record("Down", Some((2010, 1, 1)), Some(-1.0));
        let missing = record("Missing", Some((2010, 1, 1)), None);

        for r in [&up, &flat, &down, &missing] {
            let positive = r.listing_gains_percent.is_some_and(|g| g > 0.0);
            assert_eq!(r.listing_gains_profit(), positive);
            assert_eq!(r.status() == Status::Profit, r.listing_gains_profit());
        }
        assert_eq!(up.status().label(), "Profit");
        assert_eq!(missing.status().label(), "Loss");
    }

    #[test]
    fn year_tracks_date() {
        let dated = record("A", Some((2011, 3, 4)), Some(1.0));
        assert_eq!(dated.year(), Some(2011));
        assert_eq!(dated.value(NumericField::Year), Some(2011.0));

        let undated = record("B", None, Some(1.0));
        assert_eq!(undated.year(), None);
        assert_eq!(undated.value(NumericField::Year), None);
    }

    #[test]
    fn column_names_round_trip_through_lookup() {
        for field in NumericField::ALL {
            assert_eq!(NumericField::from_column_name(field.column_name()), Some(field));
        }
        assert_eq!(NumericField::from_column_name("IPOName"), None);
    }

    #[test]
    fn empty_table_has_no_rows_or_columns() {
        let t = IpoTable::empty();
        assert!(t.is_empty());
        assert!(t.columns().is_empty());
    }
}
