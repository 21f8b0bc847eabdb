//! Raw result sheet loading.
//!
//! Reads the first worksheet of a workbook (xls, xlsx, xlsm, ods) or a
//! CSV export of one into loosely typed rows addressed by position, and
//! validates once per sheet that every positional column is present.

use crate::constants::columns;
use crate::error::{Result, SwimError};
use crate::race_time::round_hundredths;
use calamine::{Data, Reader, open_workbook_auto};
use chrono::{Days, NaiveDate};
use std::path::Path;
use tracing::debug;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Date parts that spreadsheet applications attach to pure time values
const ZERO_DATES: &[&str] = &["1899-12-30", "1899-12-31", "1904-01-01"];

/// One row of a raw sheet; blank cells are `None`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<Option<String>>,
}

impl RawRow {
    pub fn new(cells: Vec<Option<String>>) -> Self {
        Self { cells }
    }

    /// Build a row from text cells, treating blank strings as empty cells
    pub fn from_texts<S: AsRef<str>>(cells: &[S]) -> Self {
        Self::new(cells.iter().map(|cell| non_blank(cell.as_ref())).collect())
    }

    /// Cell text at a position, `None` when blank or past the end of the row
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).and_then(|cell| cell.as_deref())
    }

    pub fn width(&self) -> usize {
        self.cells.len()
    }
}

/// A result sheet: a column-label row followed by content rows
#[derive(Debug, Clone, Default)]
pub struct RawSheet {
    header: Option<RawRow>,
    rows: Vec<RawRow>,
}

impl RawSheet {
    /// Split physical rows into the label row and the content rows
    pub fn from_rows(physical_rows: Vec<RawRow>) -> Self {
        let mut rows = physical_rows.into_iter();
        let header = rows.next();
        Self {
            header,
            rows: rows.collect(),
        }
    }

    /// Load the first worksheet of a spreadsheet or a CSV export
    pub fn load(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .unwrap_or_default();

        let physical_rows = match extension.as_str() {
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => read_workbook_rows(path)?,
            "csv" => read_csv_rows(path)?,
            _ => {
                return Err(SwimError::UnsupportedFormat {
                    path: path.to_path_buf(),
                });
            }
        };

        debug!(
            "Loaded {} physical rows from {}",
            physical_rows.len(),
            path.display()
        );

        Ok(Self::from_rows(physical_rows))
    }

    /// Content rows in sheet order, label row excluded
    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    /// First content row, where meet titles live
    pub fn first_row(&self) -> Option<&RawRow> {
        self.rows.first()
    }

    /// Width of the widest row, label row included
    pub fn width(&self) -> usize {
        self.header
            .iter()
            .chain(self.rows.iter())
            .map(RawRow::width)
            .max()
            .unwrap_or(0)
    }
}

/// Named positions of the columns the record builder reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnLayout {
    pub marker: usize,
    pub swimmer_name: usize,
    pub age: usize,
    pub team: usize,
    pub seed_time: usize,
    pub finals_time: usize,
    pub qualification: usize,
    pub place_points: usize,
    pub rank: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            marker: columns::MARKER,
            swimmer_name: columns::SWIMMER_NAME,
            age: columns::AGE,
            team: columns::TEAM,
            seed_time: columns::SEED_TIME,
            finals_time: columns::FINALS_TIME,
            qualification: columns::QUALIFICATION,
            place_points: columns::PLACE_POINTS,
            rank: columns::RANK,
        }
    }
}

impl ColumnLayout {
    /// Check that the sheet is wide enough for every positional column
    pub fn validate(sheet: &RawSheet, path: &Path) -> Result<Self> {
        let layout = Self::default();
        let expected = layout.required_width();
        let found = sheet.width();

        if found < expected {
            return Err(SwimError::SheetTooNarrow {
                path: path.to_path_buf(),
                expected,
                found,
            });
        }

        Ok(layout)
    }

    fn required_width(&self) -> usize {
        [
            self.marker,
            self.swimmer_name,
            self.age,
            self.team,
            self.seed_time,
            self.finals_time,
            self.qualification,
            self.place_points,
            self.rank,
        ]
        .into_iter()
        .max()
        .map_or(0, |index| index + 1)
    }
}

fn read_workbook_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path).map_err(|e| SwimError::spreadsheet(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| SwimError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(|e| SwimError::spreadsheet(path, e))?;

    // Ranges start at the first used cell; pad so positions match sheet columns
    let leading_columns = range.start().map_or(0, |(_, column)| column as usize);

    let rows = range
        .rows()
        .map(|row| {
            let cells = std::iter::repeat_n(None, leading_columns)
                .chain(row.iter().map(cell_text))
                .collect();
            RawRow::new(cells)
        })
        .collect();

    Ok(rows)
}

fn read_csv_rows(path: &Path) -> Result<Vec<RawRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| SwimError::csv(path, e))?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| SwimError::csv(path, e))?;
        rows.push(RawRow::new(record.iter().map(non_blank).collect()));
    }

    Ok(rows)
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(text) => non_blank(text),
        Data::Int(value) => Some(value.to_string()),
        Data::Float(value) => Some(format_number(*value)),
        Data::DateTime(value) => Some(serial_text(value.as_f64(), value.is_duration())),
        Data::DurationIso(text) => {
            non_blank(text).map(|raw| iso_duration_seconds(&raw).map_or(raw, elapsed_text))
        }
        Data::DateTimeIso(text) => {
            non_blank(text).map(|raw| iso_time_seconds(&raw).map_or(raw, elapsed_text))
        }
        other => non_blank(&other.to_string()),
    }
}

/// Excel stores times as fractions of a day. Durations and sub-day values
/// are race times; anything else is a calendar date.
fn serial_text(serial: f64, is_duration: bool) -> String {
    if is_duration || (0.0..1.0).contains(&serial) {
        return elapsed_text(serial * SECONDS_PER_DAY);
    }

    // Calendar dates never parse as race times
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|epoch| epoch.checked_add_days(Days::new(serial.floor() as u64)))
        .map_or_else(|| serial.to_string(), |date| date.format("%Y-%m-%d").to_string())
}

/// Seconds as `M:SS.ss`, or `SS.ss` under a minute
fn elapsed_text(seconds: f64) -> String {
    let total = round_hundredths(seconds);
    let minutes = (total / 60.0).floor();
    let remainder = round_hundredths(total - minutes * 60.0);
    if minutes >= 1.0 {
        format!("{}:{:05.2}", minutes as i64, remainder)
    } else {
        format!("{:.2}", remainder)
    }
}

/// Seconds in an ISO 8601 duration such as `PT1M5.5S`
fn iso_duration_seconds(text: &str) -> Option<f64> {
    let rest = text.trim().strip_prefix("PT")?;
    let mut seconds = 0.0;
    let mut number = String::new();
    for ch in rest.chars() {
        match ch {
            '0'..='9' | '.' => number.push(ch),
            'H' | 'M' | 'S' => {
                let value: f64 = number.parse().ok()?;
                number.clear();
                seconds += value
                    * match ch {
                        'H' => 3600.0,
                        'M' => 60.0,
                        _ => 1.0,
                    };
            }
            _ => return None,
        }
    }
    number.is_empty().then_some(seconds)
}

/// Seconds in an ISO time of day (`00:01:05.5`), alone or on the zero date
fn iso_time_seconds(text: &str) -> Option<f64> {
    let text = text.trim();
    let time = match text.split_once('T') {
        Some((date, time)) if ZERO_DATES.contains(&date) => time,
        Some(_) => return None,
        None => text,
    };

    let mut parts = time.split(':');
    let hours: f64 = parts.next()?.parse().ok()?;
    let minutes: f64 = parts.next()?.parse().ok()?;
    let seconds: f64 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

/// Whole numbers print without a fractional part, everything else as-is
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

fn non_blank(text: &str) -> Option<String> {
    if text.trim().is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_row_access() {
        let row = RawRow::from_texts(&["1", "Ada Lovelace", "  ", "SWIM"]);
        assert_eq!(row.get(1), Some("Ada Lovelace"));
        assert_eq!(row.get(2), None);
        assert_eq!(row.get(40), None);
        assert_eq!(row.width(), 4);
    }

    #[test]
    fn test_first_physical_row_is_labels() {
        let sheet = RawSheet::from_rows(vec![
            RawRow::from_texts(&["Club Name"]),
            RawRow::from_texts(&["Results - Spring Splash"]),
            RawRow::from_texts(&["Event 1  Girls 10 & Under 50 SC Meter Freestyle"]),
        ]);

        assert_eq!(sheet.rows().len(), 2);
        assert_eq!(
            sheet.first_row().and_then(|row| row.get(0)),
            Some("Results - Spring Splash")
        );
    }

    #[test]
    fn test_layout_rejects_narrow_sheet() {
        let sheet = RawSheet::from_rows(vec![RawRow::from_texts(&["a", "b", "c"])]);
        let err = ColumnLayout::validate(&sheet, Path::new("narrow.csv")).unwrap_err();
        match err {
            SwimError::SheetTooNarrow {
                expected, found, ..
            } => {
                assert_eq!(expected, 14);
                assert_eq!(found, 3);
            }
            other => panic!("Expected SheetTooNarrow, got {other:?}"),
        }
    }

    #[test]
    fn test_layout_accepts_wide_sheet() {
        let cells = vec![""; 14];
        let sheet = RawSheet::from_rows(vec![RawRow::from_texts(&cells)]);
        let layout = ColumnLayout::validate(&sheet, Path::new("wide.csv")).unwrap();
        assert_eq!(layout.rank, 13);
        assert_eq!(layout.finals_time, 7);
    }

    #[test]
    fn test_load_csv_sheet() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "Col A,Col B").unwrap();
        writeln!(file, "Results - Winter Open,").unwrap();
        writeln!(file, "1,Grace Hopper,11,NAVY").unwrap();

        let sheet = RawSheet::load(file.path()).unwrap();
        assert_eq!(sheet.rows().len(), 2);
        assert_eq!(sheet.rows()[1].get(1), Some("Grace Hopper"));
        assert_eq!(sheet.rows()[0].get(1), None);
        assert_eq!(sheet.width(), 4);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = NamedTempFile::with_suffix(".txt").unwrap();
        assert!(matches!(
            RawSheet::load(file.path()),
            Err(SwimError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_time_formatted_cells_keep_their_seconds() {
        use crate::race_time::parse_race_time;
        use calamine::{ExcelDateTime, ExcelDateTimeType};

        let finals = Data::DateTime(ExcelDateTime::new(
            65.5 / 86_400.0,
            ExcelDateTimeType::DateTime,
            false,
        ));
        let text = cell_text(&finals).unwrap();
        assert_eq!(text, "1:05.50");
        assert_eq!(parse_race_time(&text), Ok(Some(65.5)));

        let seed = Data::DateTime(ExcelDateTime::new(
            38.2 / 86_400.0,
            ExcelDateTimeType::TimeDelta,
            false,
        ));
        assert_eq!(cell_text(&seed).as_deref(), Some("38.20"));

        let duration = Data::DurationIso("PT1M5.5S".to_string());
        assert_eq!(cell_text(&duration).as_deref(), Some("1:05.50"));

        let ods_time = Data::DateTimeIso("1899-12-30T00:02:35.10".to_string());
        assert_eq!(cell_text(&ods_time).as_deref(), Some("2:35.10"));
    }

    #[test]
    fn test_calendar_dates_are_not_race_times() {
        use crate::race_time::parse_race_time;
        use calamine::{ExcelDateTime, ExcelDateTimeType};

        let date = Data::DateTime(ExcelDateTime::new(
            45_658.0,
            ExcelDateTimeType::DateTime,
            false,
        ));
        let text = cell_text(&date).unwrap();
        assert_eq!(text, "2025-01-01");
        assert!(parse_race_time(&text).is_err());

        let iso = Data::DateTimeIso("2025-01-01T10:00:00".to_string());
        assert!(parse_race_time(&cell_text(&iso).unwrap()).is_err());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(58.3), "58.3");
    }
}
