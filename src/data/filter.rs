use std::collections::BTreeSet;

use super::model::IpoTable;

// ---------------------------------------------------------------------------
// Year filter
// ---------------------------------------------------------------------------

/// Selected listing years. An empty selection means "no filter" (show all).
pub type YearSelection = BTreeSet<i32>;

/// Sorted, de-duplicated years present in the table. Rows without a date do
/// not contribute.
pub fn available_years(table: &IpoTable) -> Vec<i32> {
    table
        .records()
        .iter()
        .filter_map(|r| r.year())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Return a new table holding the rows whose year is selected.
///
/// * `selected` is empty → every row, unchanged
/// * otherwise → rows with `year ∈ selected`; undated rows never match
pub fn filter_by_year(table: &IpoTable, selected: &YearSelection) -> IpoTable {
    if selected.is_empty() {
        return table.clone();
    }
    let records = table
        .records()
        .iter()
        .filter(|r| r.year().is_some_and(|y| selected.contains(&y)))
        .cloned()
        .collect();
    table.with_records(records)
}

/// Rows ordered newest listing first; undated rows go last. Ties keep their
/// table order.
pub fn sorted_by_date_desc(table: &IpoTable) -> IpoTable {
    let mut records = table.records().to_vec();
    // `None < Some(_)`, so reversing the comparison puts undated rows last.
    records.sort_by(|a, b| b.date.cmp(&a.date));
    table.with_records(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::fixtures::{record, table};

    fn sample() -> IpoTable {
        table(vec![
            record("A", Some((2010, 2, 3)), Some(5.0)),
            record("B", Some((2010, 9, 1)), Some(-2.0)),
            record("C", Some((2011, 1, 5)), Some(10.0)),
            record("D", None, Some(1.0)),
        ])
    }

    #[test]
    fn empty_selection_is_neutral() {
        let t = sample();
        assert_eq!(filter_by_year(&t, &YearSelection::new()), t);
    }

    #[test]
    fn keeps_exactly_the_selected_years() {
        let t = sample();
        let selected: YearSelection = [2010].into_iter().collect();
        let f = filter_by_year(&t, &selected);
        let names: Vec<_> = f.records().iter().map(|r| r.ipo_name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
        assert_eq!(f.columns(), t.columns());

        for r in t.records() {
            let wanted = r.year().is_some_and(|y| selected.contains(&y));
            assert_eq!(f.records().contains(r), wanted);
        }
    }

    #[test]
    fn undated_rows_are_excluded_by_any_filter() {
        let t = sample();
        let all: YearSelection = available_years(&t).into_iter().collect();
        let f = filter_by_year(&t, &all);
        assert_eq!(f.len(), 3);
        assert!(f.records().iter().all(|r| r.date.is_some()));
        assert_eq!(t.len(), 4);
    }

    #[test]
    fn selecting_an_absent_year_yields_nothing() {
        let selected: YearSelection = [1999].into_iter().collect();
        assert!(filter_by_year(&sample(), &selected).is_empty());
    }

    #[test]
    fn available_years_are_sorted_and_unique() {
        assert_eq!(available_years(&sample()), vec![2010, 2011]);
        assert!(available_years(&IpoTable::empty()).is_empty());
    }

    #[test]
    fn date_sort_puts_newest_first_and_undated_last() {
        let sorted = sorted_by_date_desc(&sample());
        let names: Vec<_> = sorted.records().iter().map(|r| r.ipo_name.as_str()).collect();
        assert_eq!(names, ["C", "B", "A", "D"]);
    }
}
