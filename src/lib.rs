//! Swim Results Converter Library
//!
//! Converts swim meet result spreadsheets into analysis-ready tables.
//!
//! This library provides tools for:
//! - Loading result sheets from Excel workbooks, ODS files and CSV exports
//! - Parsing event headers, race times and meet titles
//! - Building one standardized record per swim with place and bonus points
//! - Aggregating standardized tables into per-swimmer point totals
//! - Writing both tables as CSV, one output file per input file

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod event_name;
pub mod meet_info;
pub mod models;
pub mod processor;
pub mod race_time;
pub mod sheet;
pub mod standardizer;

// Re-export commonly used types
pub use config::{BonusPoints, PipelineConfig};
pub use error::{Result, SwimError};
pub use models::{ProcessingStats, StandardizedRecord};
pub use processor::SwimPipeline;
