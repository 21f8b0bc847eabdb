//! Meet name and date extraction.
//!
//! Names default to the file stem and dates to the run date. File names
//! like `2025-meet3-results.xlsx` carry the meet number and year, and a
//! `Results - <name>` title at the top of the sheet overrides the name.

use crate::constants::DEFAULT_MEET_MONTH_DAY;
use crate::constants::markers::{RESULTS_TITLE, RESULTS_TITLE_PREFIX};
use crate::sheet::RawSheet;
use chrono::NaiveDate;
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;
use tracing::{debug, info};

/// `<year><sep>meet<n>` at the start of a lowercased file name
static MEET_FILE_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<year>\d{4})[-_](?P<meet>meet\d+)[-_\w]*")
        .expect("Invalid meet file name regex")
});

/// Name and ISO date of the meet a sheet belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetInfo {
    pub name: String,
    pub date: String,
}

impl MeetInfo {
    /// Derive meet info from the file name alone
    pub fn from_file_name(path: &Path, run_date: NaiveDate) -> Self {
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut info = Self {
            name: stem,
            date: run_date.format("%Y-%m-%d").to_string(),
        };

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        if let Some(captures) = MEET_FILE_NAME_REGEX.captures(&file_name) {
            info.name = format!("Meet {}", &captures["meet"]);
            info.date = format!("{}-{}", &captures["year"], DEFAULT_MEET_MONTH_DAY);
            info!(
                "Extracted from filename: meet_name={}, meet_date={}",
                info.name, info.date
            );
        }

        info
    }

    /// Override the name with a `Results - <name>` sheet title, if present
    pub fn apply_sheet_title(&mut self, title: Option<&str>) {
        let Some(title) = title else {
            return;
        };

        if title.contains(RESULTS_TITLE) {
            self.name = title.replace(RESULTS_TITLE_PREFIX, "").trim().to_string();
            info!("Extracted meet_name from file content: {}", self.name);
        } else {
            debug!("First cell is not a results title: {}", title);
        }
    }
}

/// Meet info for a loaded sheet: file name conventions, then the sheet title
pub fn extract_meet_info(path: &Path, sheet: &RawSheet, run_date: NaiveDate) -> MeetInfo {
    let mut info = MeetInfo::from_file_name(path, run_date);
    info.apply_sheet_title(sheet.first_row().and_then(|row| row.get(0)));
    info
}
