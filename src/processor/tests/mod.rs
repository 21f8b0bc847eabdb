//! Pipeline tests over temporary directories of meet result sheets

pub mod aggregate_pipeline;

use crate::config::PipelineConfig;
use crate::processor::SwimPipeline;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// A pipeline with a fixed run date and no progress output
pub fn test_pipeline() -> SwimPipeline {
    SwimPipeline::new(
        PipelineConfig::default()
            .without_progress()
            .with_run_date(NaiveDate::from_ymd_opt(2025, 3, 9).unwrap()),
    )
}

/// Pad cells to the 14 positional columns of a result sheet
pub fn sheet_row(cells: &[&str]) -> String {
    let mut padded: Vec<String> = cells.iter().map(|c| quote(c)).collect();
    padded.resize(14, String::new());
    padded.join(",")
}

fn quote(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}

/// A meet sheet with two individual events, one relay and one unknown event
pub fn sample_sheet() -> String {
    [
        sheet_row(&[
            "Place", "Swimmer", "Age", "Club", "Seed", "", "", "Finals", "", "Qual", "Points", "",
            "", "Rank",
        ]),
        sheet_row(&["Results - Spring Splash"]),
        sheet_row(&["Event 1  Girls 10 & Under 50 SC Meter Freestyle"]),
        sheet_row(&["Name", "Age", "Team"]),
        sheet_row(&[
            "1", "Ada Lovelace", "10", "SHRK", "40.12", "", "", "38.50", "", "ADV", "5", "", "",
            "1",
        ]),
        sheet_row(&["", "ADV 39.00"]),
        sheet_row(&[
            "2", "Bea Smith", "9", "SHRK", "NT", "", "", "41.00", "", "", "3", "", "", "2",
        ]),
        sheet_row(&[
            "3", "Cara Jones", "10", "DOLF", "39.00", "", "", "DQ", "", "", "", "", "", "---",
        ]),
        sheet_row(&["Event 2  Mixed 10 & Under 200 SC Meter Freestyle Relay"]),
        sheet_row(&[
            "1", "Sharks A", "", "SHRK", "2:40.00", "", "", "2:35.10", "", "ADV", "10", "", "",
            "1",
        ]),
        sheet_row(&["Event 3  Girls 10 & Under 50 SC Meter Backstroke"]),
        sheet_row(&[
            "1", "Ada Lovelace", "10", "SHRK", "45.00", "", "", "46.20", "", "DEV", "3", "", "",
            "1",
        ]),
        sheet_row(&["Event 4  Open 25 Yard Doggy Paddle"]),
        sheet_row(&[
            "1", "Dee Ray", "11", "SHRK", "xx", "", "", "30.00", "", "", "", "", "", "1",
        ]),
    ]
    .join("\n")
        + "\n"
}

/// Write a raw sheet into `dir` and return its path
pub fn write_sheet(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}
