//! Core data structures for swim result processing.
//!
//! Defines the parsed event details, the standardized row-per-swim record
//! and the statistics reported by a batch run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Gender of an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Girls,
    Boys,
    Mixed,
}

impl Gender {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "Girls" => Some(Gender::Girls),
            "Boys" => Some(Gender::Boys),
            "Mixed" => Some(Gender::Mixed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Girls => "Girls",
            Gender::Boys => "Boys",
            Gender::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stroke of an event, relays included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stroke {
    Freestyle,
    Butterfly,
    MedleyRelay,
    Backstroke,
    Breaststroke,
    IndividualMedley,
    FreestyleRelay,
}

impl Stroke {
    /// Map a matched stroke token; whitespace inside relay names is not significant
    pub fn from_token(token: &str) -> Option<Self> {
        let normalized = token.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.as_str() {
            "Freestyle" => Some(Stroke::Freestyle),
            "Butterfly" => Some(Stroke::Butterfly),
            "Medley Relay" => Some(Stroke::MedleyRelay),
            "Backstroke" => Some(Stroke::Backstroke),
            "Breaststroke" => Some(Stroke::Breaststroke),
            "IM" => Some(Stroke::IndividualMedley),
            "Freestyle Relay" | "FreestyleRelay" => Some(Stroke::FreestyleRelay),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Stroke::Freestyle => "Freestyle",
            Stroke::Butterfly => "Butterfly",
            Stroke::MedleyRelay => "Medley Relay",
            Stroke::Backstroke => "Backstroke",
            Stroke::Breaststroke => "Breaststroke",
            Stroke::IndividualMedley => "IM",
            Stroke::FreestyleRelay => "Freestyle Relay",
        }
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields parsed out of an event title.
///
/// Parsing is all-or-nothing: either every field is known or the whole
/// value is [`EventDetails::unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventDetails {
    pub gender: Option<Gender>,
    pub age_group: Option<String>,
    pub distance: Option<u32>,
    pub stroke: Option<Stroke>,
}

impl EventDetails {
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn is_known(&self) -> bool {
        self.gender.is_some()
    }
}

/// Individual swims score towards swimmer totals, relays do not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Individual,
    Relay,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Individual => "Individual",
            Category::Relay => "Relay",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One swimmer's result in one event: a row of the standardized table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardizedRecord {
    pub meet_name: String,
    /// ISO `YYYY-MM-DD`
    pub date: String,
    /// Event title as it appeared in the sheet
    pub event: String,
    pub details: EventDetails,
    pub category: Category,
    pub swimmer_name: String,
    pub age: Option<String>,
    pub team: Option<String>,
    /// Seconds
    pub seed_time: Option<f64>,
    /// Seconds
    pub finals_time: Option<f64>,
    /// Finals minus seed in seconds, never positive
    pub improvement: Option<f64>,
    pub rank: Option<String>,
    pub dq: bool,
    pub qualification: Option<String>,
    pub place_points: Option<f64>,
    pub pb_points: Option<i64>,
    pub time_points: Option<i64>,
    pub total_points: Option<f64>,
}

/// Result of standardizing or aggregating one file
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub rows_written: usize,
    pub diagnostics: usize,
}

/// Processing statistics for one stage of a batch
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub files_failed: usize,
    pub total_rows: usize,
    pub diagnostics: usize,
    pub output_dir: PathBuf,
    pub outputs: Vec<PathBuf>,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub(crate) fn record_success(&mut self, outcome: FileOutcome) {
        self.files_processed += 1;
        self.total_rows += outcome.rows_written;
        self.diagnostics += outcome.diagnostics;
        self.outputs.push(outcome.output_path);
    }

    pub(crate) fn record_failure(&mut self) {
        self.files_failed += 1;
    }
}
