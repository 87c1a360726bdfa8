use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

use super::model::{IpoRecord, IpoTable, NumericField};
use crate::error::LoadError;

/// Date layout of the `Date` column, e.g. `03/02/10`.
pub const DATE_FORMAT: &str = "%d/%m/%y";

/// Columns without which the file is not an IPO table at all.
const REQUIRED_COLUMNS: [&str; 3] = ["IPOName", "Date", "Listing_Gains_Percent"];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Result of a load that never fails: either the parsed table, or an empty
/// table together with the reason loading failed.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadOutcome {
    pub table: IpoTable,
    pub error: Option<LoadError>,
}

impl LoadOutcome {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Load the IPO table, converting every failure into an empty table plus a
/// human-readable error.
pub fn load_or_empty(path: &Path) -> LoadOutcome {
    match load_csv(path) {
        Ok(table) => LoadOutcome { table, error: None },
        Err(e) => {
            log::error!("{e}");
            LoadOutcome {
                table: IpoTable::empty(),
                error: Some(e),
            }
        }
    }
}

/// Load the IPO table from a CSV file on disk.
pub fn load_csv(path: &Path) -> Result<IpoTable, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::SourceNotFound(path.to_path_buf()),
        _ => unparsable(path, format!("opening file: {e}")),
    })?;
    let table = load_from_reader(file, path)?;
    log::info!(
        "Loaded {} IPOs from {} (numeric columns: {:?})",
        table.len(),
        path.display(),
        table.columns()
    );
    Ok(table)
}

/// Parse CSV text from any reader. `origin` only labels error messages.
///
/// Header names and cell text are trimmed. Blank, non-numeric or non-finite
/// numeric cells and dates that are not valid `dd/mm/yy` calendar dates become
/// missing values; the row itself is always kept. Short rows are padded with
/// missing cells, rows longer than the header are rejected.
pub fn load_from_reader<R: Read>(reader: R, origin: &Path) -> Result<IpoTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let header_record = reader
        .headers()
        .map_err(|e| unparsable(origin, format!("reading CSV headers: {e}")))?
        .clone();
    let headers: Vec<String> = header_record.iter().map(|h| h.to_string()).collect();

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|req| !headers.iter().any(|h| h == req))
        .collect();
    if !missing.is_empty() {
        return Err(unparsable(
            origin,
            format!("missing required column(s): {}", missing.join(", ")),
        ));
    }

    let mut columns: BTreeSet<NumericField> = headers
        .iter()
        .filter_map(|h| NumericField::from_column_name(h))
        .collect();
    // Year is derived from Date, which is guaranteed above.
    columns.insert(NumericField::Year);

    let mut records = Vec::new();
    let mut bad_dates = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        // Line 1 is the header.
        let line = row_no + 2;
        let record = result.map_err(|e| unparsable(origin, format!("CSV row {line}: {e}")))?;
        // Short rows keep their trailing cells as missing; long rows have no
        // column to put the extra cells in.
        if record.len() > header_record.len() {
            return Err(unparsable(
                origin,
                format!(
                    "CSV row {line}: expected {} fields, saw {}",
                    header_record.len(),
                    record.len()
                ),
            ));
        }
        let raw: RawIpoRow = record
            .deserialize(Some(&header_record))
            .map_err(|e| unparsable(origin, format!("CSV row {line}: {e}")))?;
        let date = raw.date.as_deref().and_then(parse_date);
        if date.is_none() {
            bad_dates += 1;
            log::debug!("Row {line}: unparsable date {:?}", raw.date);
        }
        records.push(raw.into_record(date));
    }

    if bad_dates > 0 {
        log::warn!(
            "{bad_dates} row(s) in {} have a missing or invalid date; they are kept but excluded from year filters",
            origin.display()
        );
    }

    Ok(IpoTable::new(records, columns))
}

/// Parse a `dd/mm/yy` date. Anything that is not a real calendar date
/// (including `31/02/10`) yields `None`.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

fn unparsable(path: &Path, reason: String) -> LoadError {
    LoadError::SourceUnparsable {
        path: PathBuf::from(path),
        reason,
    }
}

// ---------------------------------------------------------------------------
// Raw CSV row
// ---------------------------------------------------------------------------

/// Numeric cell that is blank, unparsable or not finite (`NaN`, `inf`) reads
/// as `None`.
fn finite_number<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = csv::invalid_option(de)?;
    Ok(value.filter(|v| v.is_finite()))
}

/// One CSV row exactly as the header names it. Numeric cells that fail to
/// parse deserialize to `None` instead of failing the row.
#[derive(Debug, Deserialize)]
struct RawIpoRow {
    #[serde(rename = "IPOName", default)]
    ipo_name: String,
    #[serde(rename = "Date", default)]
    date: Option<String>,
    #[serde(rename = "Issue_Price", default, deserialize_with = "finite_number")]
    issue_price: Option<f64>,
    #[serde(rename = "Issue_Size", default, deserialize_with = "finite_number")]
    issue_size: Option<f64>,
    #[serde(rename = "Subscription_QIB", default, deserialize_with = "finite_number")]
    subscription_qib: Option<f64>,
    #[serde(rename = "Subscription_HNI", default, deserialize_with = "finite_number")]
    subscription_hni: Option<f64>,
    #[serde(rename = "Subscription_RII", default, deserialize_with = "finite_number")]
    subscription_rii: Option<f64>,
    #[serde(rename = "Subscription_Total", default, deserialize_with = "finite_number")]
    subscription_total: Option<f64>,
    #[serde(rename = "Listing_Gains_Percent", default, deserialize_with = "finite_number")]
    listing_gains_percent: Option<f64>,
}

impl RawIpoRow {
    fn into_record(self, date: Option<NaiveDate>) -> IpoRecord {
        IpoRecord {
            ipo_name: self.ipo_name,
            date,
            issue_price: self.issue_price,
            issue_size: self.issue_size,
            subscription_qib: self.subscription_qib,
            subscription_hni: self.subscription_hni,
            subscription_rii: self.subscription_rii,
            subscription_total: self.subscription_total,
            listing_gains_percent: self.listing_gains_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::analysis::kpi::summary_kpis;
    use crate::data::filter::{filter_by_year, YearSelection};
    use crate::data::model::Status;

    const HEADER: &str = " Date ,IPOName, Issue_Size ,Subscription_QIB,Subscription_HNI,Subscription_RII,Subscription_Total,Issue_Price, Listing_Gains_Percent \n";

    fn parse(body: &str) -> Result<IpoTable, LoadError> {
        let text = format!("{HEADER}{body}");
        load_from_reader(text.as_bytes(), Path::new("test.csv"))
    }

    #[test]
    fn trims_headers_and_derives_fields() {
        let t = parse(
            "03/02/10,Alpha,100.5,2.1,3.2,4.3,3.0,75,5.0\n\
             15/07/10,Beta,200,1,1,1,1,120,-2.0\n",
        )
        .unwrap();
        assert_eq!(t.len(), 2);
        let a = &t.records()[0];
        assert_eq!(a.ipo_name, "Alpha");
        assert_eq!(a.date, NaiveDate::from_ymd_opt(2010, 2, 3));
        assert_eq!(a.year(), Some(2010));
        assert_eq!(a.issue_size, Some(100.5));
        assert_eq!(a.status(), Status::Profit);
        assert_eq!(t.records()[1].status(), Status::Loss);
        assert!(t.has_column(NumericField::SubscriptionTotal));
        assert!(t.has_column(NumericField::Year));
    }

    #[test]
    fn invalid_calendar_date_is_kept_as_missing() {
        let t = parse(
            "31/02/10,Ghost,1,1,1,1,1,1,4.0\n\
             not a date,Blank,1,1,1,1,1,1,4.0\n",
        )
        .unwrap();
        assert_eq!(t.len(), 2);
        assert!(t.records().iter().all(|r| r.date.is_none() && r.year().is_none()));
    }

    #[test]
    fn blank_and_garbage_numbers_become_missing() {
        let t = parse("01/01/11,Gamma,,N/A,3,4,5,6,\n").unwrap();
        let r = &t.records()[0];
        assert_eq!(r.issue_size, None);
        assert_eq!(r.subscription_qib, None);
        assert_eq!(r.subscription_hni, Some(3.0));
        assert_eq!(r.listing_gains_percent, None);
        assert_eq!(r.status(), Status::Loss);
    }

    #[test]
    fn optional_numeric_columns_may_be_absent() {
        let text = "IPOName,Date,Listing_Gains_Percent\nDelta,01/01/12,7.5\n";
        let t = load_from_reader(text.as_bytes(), Path::new("slim.csv")).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.records()[0].subscription_total, None);
        assert!(!t.has_column(NumericField::SubscriptionQib));
        assert!(t.has_column(NumericField::ListingGainsPercent));
    }

    #[test]
    fn missing_required_column_is_unparsable() {
        let text = "Name,Date\nDelta,01/01/12\n";
        let err = load_from_reader(text.as_bytes(), Path::new("bad.csv")).unwrap_err();
        match err {
            LoadError::SourceUnparsable { reason, .. } => {
                assert!(reason.contains("IPOName"));
                assert!(reason.contains("Listing_Gains_Percent"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn short_rows_keep_missing_trailing_cells() {
        let t = parse(
            "01/01/11,Gamma,1,2\n\
             02/01/11,Delta,1,1,1,1,1,1,3.0\n",
        )
        .unwrap();
        assert_eq!(t.len(), 2);
        let r = &t.records()[0];
        assert_eq!(r.ipo_name, "Gamma");
        assert_eq!(r.year(), Some(2011));
        assert_eq!(r.issue_size, Some(1.0));
        assert_eq!(r.subscription_qib, Some(2.0));
        assert_eq!(r.subscription_hni, None);
        assert_eq!(r.listing_gains_percent, None);
        assert_eq!(r.status(), Status::Loss);
    }

    #[test]
    fn long_rows_are_unparsable() {
        let err = parse("01/01/11,Gamma,1,1,1,1,1,1,3.0,extra\n").unwrap_err();
        assert!(matches!(err, LoadError::SourceUnparsable { .. }));
    }

    #[test]
    fn non_finite_numbers_become_missing() {
        let t = parse(
            "01/01/11,A,NaN,1,1,1,1,1,5.0\n\
             02/01/11,B,1,nan,1,1,1,1,NaN\n\
             03/01/11,C,1,1,inf,1,1,1,-inf\n\
             04/01/11,D,1,1,1,1,1,infinity,nan\n",
        )
        .unwrap();
        let r = t.records();
        assert_eq!(r[0].issue_size, None);
        assert_eq!(r[1].subscription_qib, None);
        assert_eq!(r[2].subscription_hni, None);
        assert_eq!(r[3].issue_price, None);
        for rec in r {
            assert!(rec.listing_gains_percent.map_or(true, f64::is_finite));
        }

        let k = summary_kpis(&t);
        assert_eq!(k.count, 4);
        assert_eq!(k.avg_gain, Some(5.0));
    }

    #[test]
    fn loaded_rows_drive_the_snapshot_and_year_filter() {
        let t = parse(
            "03/02/10,Alpha,1,1,1,1,1,1,5.0\n\
             15/07/10,Beta,1,1,1,1,1,1,-2.0\n\
             09/03/11,Gamma,1,1,1,1,1,1,10.0\n",
        )
        .unwrap();
        let round1 = |v: f64| (v * 10.0).round() / 10.0;

        let all = summary_kpis(&t);
        assert_eq!(all.count, 3);
        assert_eq!(all.profitable_count, 2);
        assert_eq!(round1(all.win_rate_pct), 66.7);

        let only_2010: YearSelection = [2010].into_iter().collect();
        let subset = filter_by_year(&t, &only_2010);
        let names: Vec<_> = subset.records().iter().map(|r| r.ipo_name.as_str()).collect();
        assert_eq!(names, ["Alpha", "Beta"]);
        let k = summary_kpis(&subset);
        assert_eq!(k.count, 2);
        assert_eq!(k.profitable_count, 1);
        assert_eq!(round1(k.win_rate_pct), 50.0);
    }

    #[test]
    fn missing_file_degrades_to_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let outcome = load_or_empty(&path);
        assert!(outcome.table.is_empty());
        assert_eq!(outcome.error, Some(LoadError::SourceNotFound(path)));
    }

    #[test]
    fn malformed_file_degrades_to_empty_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"just some words\n").unwrap();
        let outcome = load_or_empty(file.path());
        assert!(outcome.table.is_empty());
        assert!(outcome.table.columns().is_empty());
        assert!(matches!(outcome.error, Some(LoadError::SourceUnparsable { .. })));
    }

    #[test]
    fn loading_is_idempotent() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{HEADER}03/02/10,Alpha,1,2,3,4,5,6,7\n").unwrap();
        let first = load_csv(file.path()).unwrap();
        let second = load_csv(file.path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn parse_date_uses_day_month_year() {
        assert_eq!(parse_date("03/02/10"), NaiveDate::from_ymd_opt(2010, 2, 3));
        assert_eq!(parse_date(" 29/02/12 "), NaiveDate::from_ymd_opt(2012, 2, 29));
        assert_eq!(parse_date("29/02/11"), None);
        assert_eq!(parse_date("2010-02-03"), None);
    }
}
