//! Record builder for raw meet result sheets.
//!
//! A result sheet interleaves event header rows with result rows, column
//! label rows and qualifier annotation rows. The builder folds over the
//! rows in order, carrying the currently open event section, and emits at
//! most one [`StandardizedRecord`] per row.
//!
//! Cell-level problems never fail the sheet. They are collected as
//! [`Diagnostic`]s for the caller to report.

use crate::config::BonusPoints;
use crate::constants::markers::{
    ADVANCED, DEVELOPING, DQ_RANK, EVENT, NAME_LABEL, NO_TIME, RELAY, TEAM_LABEL,
};
use crate::event_name::{extract_event_header, parse_event_name};
use crate::meet_info::MeetInfo;
use crate::models::{Category, EventDetails, StandardizedRecord};
use crate::race_time::{parse_race_time, round_hundredths};
use crate::sheet::{ColumnLayout, RawRow, RawSheet};
use std::fmt;

/// A recoverable problem found while standardizing one sheet.
///
/// Lines are spreadsheet line numbers, counting the label row as line 1.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A time cell that is neither a marker nor a number; the time is left empty
    UnparseableTime {
        line: usize,
        column: &'static str,
        token: String,
    },

    /// An event title the event pattern does not match; its records carry unknown details
    UnparseableEvent { line: usize, event: String },

    /// A place points cell that is not a number; treated as no points
    NonNumericPlacePoints { line: usize, token: String },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnparseableTime {
                line,
                column,
                token,
            } => write!(f, "line {line}: could not convert {column} '{token}' to seconds"),
            Diagnostic::UnparseableEvent { line, event } => {
                write!(f, "line {line}: could not parse event name '{event}'")
            }
            Diagnostic::NonNumericPlacePoints { line, token } => {
                write!(f, "line {line}: place points '{token}' is not a number")
            }
        }
    }
}

/// Records and diagnostics produced from one sheet
#[derive(Debug, Clone, Default)]
pub struct StandardizedSheet {
    pub records: Vec<StandardizedRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// The event section a result row belongs to
#[derive(Debug, Clone)]
struct EventSection {
    title: String,
    details: EventDetails,
    category: Category,
    is_relay: bool,
}

impl EventSection {
    fn open(cell: &str, line: usize, diagnostics: &mut Vec<Diagnostic>) -> Self {
        let title = extract_event_header(cell);
        let details = parse_event_name(&title);
        if !details.is_known() {
            diagnostics.push(Diagnostic::UnparseableEvent {
                line,
                event: title.clone(),
            });
        }

        let category = if title.contains(RELAY) {
            Category::Relay
        } else {
            Category::Individual
        };
        let is_relay = title.to_uppercase().contains(&RELAY.to_uppercase());

        Self {
            title,
            details,
            category,
            is_relay,
        }
    }
}

/// How a raw row takes part in the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind<'a> {
    /// Opens a new event section
    EventHeader(&'a str),
    /// Blank, label or qualifier annotation row
    Skipped,
    /// May hold a swimmer result
    Candidate,
}

fn classify_row<'a>(row: &'a RawRow, layout: &ColumnLayout) -> RowKind<'a> {
    let Some(marker) = row.get(layout.marker) else {
        return RowKind::Skipped;
    };

    if marker.contains(EVENT) {
        return RowKind::EventHeader(marker);
    }

    if marker.contains(NAME_LABEL) || marker.contains(TEAM_LABEL) {
        return RowKind::Skipped;
    }

    let is_annotation = row
        .get(layout.swimmer_name)
        .is_some_and(|cell| cell.contains(ADVANCED) || cell.contains(DEVELOPING));
    if is_annotation {
        return RowKind::Skipped;
    }

    RowKind::Candidate
}

/// Builds standardized records from raw sheets using fixed bonus weights
#[derive(Debug, Clone, Copy, Default)]
pub struct Standardizer {
    bonus: BonusPoints,
}

impl Standardizer {
    pub fn new(bonus: BonusPoints) -> Self {
        Self { bonus }
    }

    /// Scan a sheet and build one record per swimmer result
    pub fn standardize(
        &self,
        meet: &MeetInfo,
        sheet: &RawSheet,
        layout: &ColumnLayout,
    ) -> StandardizedSheet {
        let mut diagnostics = Vec::new();

        let (_, records) = sheet.rows().iter().enumerate().fold(
            (None::<EventSection>, Vec::new()),
            |(current, mut records), (index, row)| {
                // Content rows start on line 2, below the label row
                let line = index + 2;
                match classify_row(row, layout) {
                    RowKind::EventHeader(cell) => {
                        (Some(EventSection::open(cell, line, &mut diagnostics)), records)
                    }
                    RowKind::Skipped => (current, records),
                    RowKind::Candidate => {
                        if let Some(section) = &current {
                            if let Some(record) = self.build_record(
                                meet,
                                section,
                                row,
                                line,
                                layout,
                                &mut diagnostics,
                            ) {
                                records.push(record);
                            }
                        }
                        (current, records)
                    }
                }
            },
        );

        StandardizedSheet {
            records,
            diagnostics,
        }
    }

    fn build_record(
        &self,
        meet: &MeetInfo,
        section: &EventSection,
        row: &RawRow,
        line: usize,
        layout: &ColumnLayout,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<StandardizedRecord> {
        let swimmer_name = row.get(layout.swimmer_name)?.trim().to_string();

        let rank = row.get(layout.rank).map(str::to_string);
        let dq = rank.as_deref().is_some_and(|rank| rank.contains(DQ_RANK));
        let qualification = row.get(layout.qualification).map(|q| q.trim().to_string());

        let seed_token = row.get(layout.seed_time);
        let seed_time = time_cell(seed_token, "SeedTime", line, diagnostics);
        let finals_time = time_cell(row.get(layout.finals_time), "FinalsTime", line, diagnostics);
        let improvement = improvement(seed_time, finals_time);

        let place_points = row.get(layout.place_points).and_then(|token| {
            let parsed = token.trim().parse::<f64>().ok().filter(|v| v.is_finite());
            if parsed.is_none() {
                diagnostics.push(Diagnostic::NonNumericPlacePoints {
                    line,
                    token: token.to_string(),
                });
            }
            parsed
        });

        let pb_points = pb_points(&self.bonus, dq, section.is_relay, seed_token, improvement);
        let time_points = time_points(
            &self.bonus,
            dq,
            section.is_relay,
            qualification.as_deref(),
        );
        let total_points = total_points(place_points, pb_points, time_points);

        Some(StandardizedRecord {
            meet_name: meet.name.clone(),
            date: meet.date.clone(),
            event: section.title.clone(),
            details: section.details.clone(),
            category: section.category,
            swimmer_name,
            age: row.get(layout.age).map(|age| age.trim().to_string()),
            team: row.get(layout.team).map(|team| team.trim().to_string()),
            seed_time,
            finals_time,
            improvement,
            rank,
            dq,
            qualification,
            place_points,
            pb_points,
            time_points,
            total_points,
        })
    }
}

fn time_cell(
    token: Option<&str>,
    column: &'static str,
    line: usize,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<f64> {
    let token = token?;
    match parse_race_time(token) {
        Ok(seconds) => seconds,
        Err(err) => {
            diagnostics.push(Diagnostic::UnparseableTime {
                line,
                column,
                token: err.token,
            });
            None
        }
    }
}

/// Finals minus seed time, only when the swim was not slower
pub fn improvement(seed_time: Option<f64>, finals_time: Option<f64>) -> Option<f64> {
    let difference = finals_time? - seed_time?;
    if difference > 0.0 {
        return None;
    }

    let rounded = round_hundredths(difference);
    // Avoid writing -0.0 for unchanged times
    Some(if rounded == 0.0 { 0.0 } else { rounded })
}

/// No-time and personal best bonuses for an individual, non-DQ swim
pub fn pb_points(
    bonus: &BonusPoints,
    dq: bool,
    relay: bool,
    seed_token: Option<&str>,
    improvement: Option<f64>,
) -> Option<i64> {
    if dq || relay {
        return None;
    }

    let mut points = 0;
    let no_seed_time = seed_token.is_none_or(|seed| seed.to_uppercase().contains(NO_TIME));
    if no_seed_time {
        points += bonus.nt;
    }
    if improvement.is_some_and(|delta| delta < 0.0) {
        points += bonus.pb;
    }

    (points != 0).then_some(points)
}

/// Qualification tier bonuses for an individual, non-DQ swim
pub fn time_points(
    bonus: &BonusPoints,
    dq: bool,
    relay: bool,
    qualification: Option<&str>,
) -> Option<i64> {
    if dq || relay {
        return None;
    }

    let qualification = qualification.unwrap_or_default().to_uppercase();
    let mut points = 0;
    if qualification.contains(ADVANCED) {
        points += bonus.adv;
    }
    if qualification.contains(DEVELOPING) {
        points += bonus.dev;
    }

    (points != 0).then_some(points)
}

/// Place plus bonus points, empty unless the swim scored
pub fn total_points(
    place_points: Option<f64>,
    pb_points: Option<i64>,
    time_points: Option<i64>,
) -> Option<f64> {
    let total = place_points.unwrap_or(0.0)
        + pb_points.unwrap_or(0) as f64
        + time_points.unwrap_or(0) as f64;

    (total > 0.0).then_some(total)
}
