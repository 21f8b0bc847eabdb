//! Application constants for the swim results converter
//!
//! Positional column layout of meet result sheets, the markers the record
//! builder looks for, default bonus weights and output naming conventions.

// =============================================================================
// Raw Sheet Layout
// =============================================================================

/// Positional columns of a meet result sheet
pub mod columns {
    /// Row-kind marker: event headers, column labels, place numbers
    pub const MARKER: usize = 0;

    /// Swimmer name on result rows, qualifier text on annotation rows
    pub const SWIMMER_NAME: usize = 1;

    pub const AGE: usize = 2;
    pub const TEAM: usize = 3;
    pub const SEED_TIME: usize = 4;
    pub const FINALS_TIME: usize = 7;

    /// Qualification token, may contain "ADV" or "DEV"
    pub const QUALIFICATION: usize = 9;

    pub const PLACE_POINTS: usize = 10;

    /// Rank token, "---" marks a disqualified swim
    pub const RANK: usize = 13;
}

// =============================================================================
// Row Markers
// =============================================================================

/// Substrings that classify raw rows and tokens
pub mod markers {
    /// First cell of an event header row
    pub const EVENT: &str = "Event";

    /// Separator between the event number and the event title
    pub const EVENT_TITLE_SEPARATOR: &str = "  ";

    /// Column label rows repeat these words in the first cell
    pub const NAME_LABEL: &str = "Name";
    pub const TEAM_LABEL: &str = "Team";

    /// Qualification tiers
    pub const ADVANCED: &str = "ADV";
    pub const DEVELOPING: &str = "DEV";

    /// Rank token of a disqualified swim
    pub const DQ_RANK: &str = "---";

    /// Value of the DQ column on disqualified records
    pub const DQ: &str = "DQ";

    pub const NO_TIME: &str = "NT";
    pub const DID_NOT_FINISH: &str = "DNF";

    /// Word that marks relay events
    pub const RELAY: &str = "Relay";

    /// Meet title rows carry this word in their first cell
    pub const RESULTS_TITLE: &str = "Results";
    pub const RESULTS_TITLE_PREFIX: &str = "Results - ";
}

// =============================================================================
// Bonus Points
// =============================================================================

pub const DEFAULT_DEV_BONUS: i64 = 3;
pub const DEFAULT_ADV_BONUS: i64 = 6;
pub const DEFAULT_NT_BONUS: i64 = 1;
pub const DEFAULT_PB_BONUS: i64 = 2;

// =============================================================================
// Events and Meets
// =============================================================================

/// Age group assumed when an event title does not name one
pub const DEFAULT_AGE_GROUP: &str = "12 & Over";

/// Month and day used when a file name only carries the meet year
pub const DEFAULT_MEET_MONTH_DAY: &str = "07-01";

// =============================================================================
// Files and Directories
// =============================================================================

/// Raw sheet extensions picked up from the input directory
pub const SHEET_EXTENSIONS: &[&str] = &["xls", "xlsx", "xlsm", "ods", "csv"];

/// Extension of standardized and aggregated outputs
pub const OUTPUT_EXTENSION: &str = "csv";

pub const STANDARDIZED_PREFIX: &str = "standardized_";
pub const AGGREGATED_PREFIX: &str = "aggregated_";

pub const DEFAULT_STANDARDIZED_DIR: &str = "standardized_results";
pub const DEFAULT_AGGREGATED_DIR: &str = "aggregated_results";

/// Rows of each aggregated table echoed to the log
pub const PREVIEW_ROWS: usize = 5;

// =============================================================================
// Output Columns
// =============================================================================

/// Column names of the standardized and aggregated tables
pub mod fields {
    pub const MEET_NAME: &str = "MeetName";
    pub const DATE: &str = "Date";
    pub const EVENT: &str = "Event";
    pub const GENDER: &str = "Gender";
    pub const AGE_GROUP: &str = "AgeGroup";
    pub const DISTANCE: &str = "Distance";
    pub const STROKE: &str = "Stroke";
    pub const CATEGORY: &str = "Category";
    pub const SWIMMER_NAME: &str = "SwimmerName";
    pub const AGE: &str = "Age";
    pub const TEAM: &str = "Team";
    pub const SEED_TIME: &str = "SeedTime";
    pub const FINALS_TIME: &str = "FinalsTime";
    pub const IMPROVEMENT: &str = "Improvement";
    pub const RANK: &str = "Rank";
    pub const DQ: &str = "DQ";
    pub const QUALIFICATION: &str = "Qualification";
    pub const PLACE_POINTS: &str = "PlacePoints";
    pub const PB_POINTS: &str = "PBPoints";
    pub const TIME_POINTS: &str = "TimePoints";
    pub const TOTAL_POINTS: &str = "TotalPoints";

    /// Single bonus column of older standardized files, and PB + time points in aggregates
    pub const BONUS_POINTS: &str = "BonusPoints";

    pub const QUALIFICATION_ADV_COUNT: &str = "QualificationADVCount";
    pub const QUALIFICATION_DEV_COUNT: &str = "QualificationDEVCount";

    /// Standardized table layout, in output order
    pub const STANDARDIZED: &[&str] = &[
        MEET_NAME,
        DATE,
        EVENT,
        GENDER,
        AGE_GROUP,
        DISTANCE,
        STROKE,
        CATEGORY,
        SWIMMER_NAME,
        AGE,
        TEAM,
        SEED_TIME,
        FINALS_TIME,
        IMPROVEMENT,
        RANK,
        DQ,
        QUALIFICATION,
        PLACE_POINTS,
        PB_POINTS,
        TIME_POINTS,
        TOTAL_POINTS,
    ];

    /// One aggregated row per distinct combination of these
    pub const AGGREGATION_KEYS: &[&str] =
        &[MEET_NAME, DATE, GENDER, AGE_GROUP, SWIMMER_NAME, AGE, TEAM];
}
