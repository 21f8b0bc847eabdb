//! CSV output for standardized and aggregated tables
//!
//! Converts standardized records into a polars DataFrame with a fixed
//! column order and reads/writes comma-separated files with a header row.

use crate::constants::fields;
use crate::constants::markers::DQ;
use crate::constants::{AGGREGATED_PREFIX, OUTPUT_EXTENSION, STANDARDIZED_PREFIX};
use crate::error::Result;
use crate::models::StandardizedRecord;

use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Build the standardized table, one row per record in input order
pub fn records_to_frame(records: &[StandardizedRecord]) -> Result<DataFrame> {
    fn text<F>(records: &[StandardizedRecord], name: &str, value: F) -> Column
    where
        F: Fn(&StandardizedRecord) -> Option<String>,
    {
        let values: Vec<Option<String>> = records.iter().map(value).collect();
        Column::from(Series::new(name.into(), values))
    }

    fn float<F>(records: &[StandardizedRecord], name: &str, value: F) -> Column
    where
        F: Fn(&StandardizedRecord) -> Option<f64>,
    {
        let values: Vec<Option<f64>> = records.iter().map(value).collect();
        Column::from(Series::new(name.into(), values))
    }

    fn integer<F>(records: &[StandardizedRecord], name: &str, value: F) -> Column
    where
        F: Fn(&StandardizedRecord) -> Option<i64>,
    {
        let values: Vec<Option<i64>> = records.iter().map(value).collect();
        Column::from(Series::new(name.into(), values))
    }

    let columns = vec![
        text(records, fields::MEET_NAME, |r| Some(r.meet_name.clone())),
        text(records, fields::DATE, |r| Some(r.date.clone())),
        text(records, fields::EVENT, |r| Some(r.event.clone())),
        text(records, fields::GENDER, |r| {
            r.details.gender.map(|g| g.as_str().to_string())
        }),
        text(records, fields::AGE_GROUP, |r| r.details.age_group.clone()),
        integer(records, fields::DISTANCE, |r| r.details.distance.map(i64::from)),
        text(records, fields::STROKE, |r| {
            r.details.stroke.map(|s| s.as_str().to_string())
        }),
        text(records, fields::CATEGORY, |r| {
            Some(r.category.as_str().to_string())
        }),
        text(records, fields::SWIMMER_NAME, |r| Some(r.swimmer_name.clone())),
        text(records, fields::AGE, |r| r.age.clone()),
        text(records, fields::TEAM, |r| r.team.clone()),
        float(records, fields::SEED_TIME, |r| r.seed_time),
        float(records, fields::FINALS_TIME, |r| r.finals_time),
        float(records, fields::IMPROVEMENT, |r| r.improvement),
        text(records, fields::RANK, |r| r.rank.clone()),
        text(records, fields::DQ, |r| r.dq.then(|| DQ.to_string())),
        text(records, fields::QUALIFICATION, |r| r.qualification.clone()),
        float(records, fields::PLACE_POINTS, |r| r.place_points),
        integer(records, fields::PB_POINTS, |r| r.pb_points),
        integer(records, fields::TIME_POINTS, |r| r.time_points),
        float(records, fields::TOTAL_POINTS, |r| r.total_points),
    ];

    debug_assert_eq!(columns.len(), fields::STANDARDIZED.len());

    Ok(DataFrame::new(columns)?)
}

/// Write a table as CSV with a header row, replacing any existing file
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;

    debug!(
        "Wrote {} rows x {} columns to {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(())
}

/// Read a CSV table, inferring column types from every row
pub fn read_csv(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!("Read {} rows from {}", df.height(), path.display());
    Ok(df)
}

/// `standardized_<stem>.csv` for a raw sheet
pub fn standardized_output_name(input: &Path) -> PathBuf {
    PathBuf::from(format!(
        "{}{}.{}",
        STANDARDIZED_PREFIX,
        file_stem(input),
        OUTPUT_EXTENSION
    ))
}

/// `aggregated_<rest>.csv` for a standardized file, swapping the prefix
pub fn aggregated_output_name(input: &Path) -> PathBuf {
    let stem = file_stem(input);
    let rest = stem.strip_prefix(STANDARDIZED_PREFIX).unwrap_or(&stem);
    PathBuf::from(format!("{}{}.{}", AGGREGATED_PREFIX, rest, OUTPUT_EXTENSION))
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_default()
}
