//! Processing pipeline for meet result files.
//!
//! Runs the two stages over a directory: standardization turns each raw
//! sheet into a `standardized_*.csv` table, and aggregation turns each
//! standardized table into `aggregated_*.csv` per-swimmer totals. A failing
//! file is logged and counted; the remaining files are still processed.

pub mod discovery;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::discovery::{discover_files, ensure_directory, prepare_output_dir};
use self::writer::{
    aggregated_output_name, read_csv, records_to_frame, standardized_output_name, write_csv,
};

use crate::aggregator::aggregate;
use crate::config::PipelineConfig;
use crate::constants::{OUTPUT_EXTENSION, PREVIEW_ROWS, SHEET_EXTENSIONS};
use crate::error::Result;
use crate::meet_info::extract_meet_info;
use crate::models::{FileOutcome, ProcessingStats};
use crate::sheet::{ColumnLayout, RawSheet};
use crate::standardizer::Standardizer;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Pipeline stage, for progress messages and summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    Standardize,
    Aggregate,
}

impl Stage {
    fn title(self) -> &'static str {
        match self {
            Stage::Standardize => "Standardizing meet results",
            Stage::Aggregate => "Aggregating swimmer points",
        }
    }

    fn extensions(self) -> &'static [&'static str] {
        match self {
            Stage::Standardize => SHEET_EXTENSIONS,
            Stage::Aggregate => &[OUTPUT_EXTENSION],
        }
    }
}

/// Converts meet result files with a fixed configuration
#[derive(Debug, Clone)]
pub struct SwimPipeline {
    config: PipelineConfig,
    standardizer: Standardizer,
}

impl Default for SwimPipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

impl SwimPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let standardizer = Standardizer::new(config.bonus_points);
        Self {
            config,
            standardizer,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Standardize one raw sheet into `out_dir`
    pub fn standardize_file(&self, input: &Path, out_dir: &Path) -> Result<FileOutcome> {
        info!("Processing file: {}", input.display());

        let sheet = RawSheet::load(input)?;
        let layout = ColumnLayout::validate(&sheet, input)?;
        let meet = extract_meet_info(input, &sheet, self.config.run_date);
        debug!("Meet info for {}: {:?}", input.display(), meet);

        let standardized = self.standardizer.standardize(&meet, &sheet, &layout);
        for diagnostic in &standardized.diagnostics {
            warn!("{}: {}", input.display(), diagnostic);
        }

        let mut df = records_to_frame(&standardized.records)?;
        let output_path = out_dir.join(standardized_output_name(input));
        write_csv(&mut df, &output_path)?;

        info!(
            "Saved standardized data to: {} ({} rows)",
            output_path.display(),
            df.height()
        );

        Ok(FileOutcome {
            input_path: input.to_path_buf(),
            output_path,
            rows_written: df.height(),
            diagnostics: standardized.diagnostics.len(),
        })
    }

    /// Aggregate one standardized table into `out_dir`
    pub fn aggregate_file(&self, input: &Path, out_dir: &Path) -> Result<FileOutcome> {
        info!("Aggregating file: {}", input.display());

        let df = read_csv(input)?;
        let mut aggregated = aggregate(df, input)?;

        let output_path = out_dir.join(aggregated_output_name(input));
        write_csv(&mut aggregated, &output_path)?;

        info!("Aggregated data saved to {}", output_path.display());
        info!(
            "Preview of {}:\n{}",
            output_path.display(),
            aggregated.head(Some(PREVIEW_ROWS))
        );

        Ok(FileOutcome {
            input_path: input.to_path_buf(),
            output_path,
            rows_written: aggregated.height(),
            diagnostics: 0,
        })
    }

    /// Standardize every raw sheet directly inside `input_dir`
    pub fn run_standardization(&self, input_dir: &Path, out_dir: &Path) -> Result<ProcessingStats> {
        self.run_stage(Stage::Standardize, input_dir, out_dir, |path| {
            self.standardize_file(path, out_dir)
        })
    }

    /// Aggregate every standardized table directly inside `input_dir`
    pub fn run_aggregation(&self, input_dir: &Path, out_dir: &Path) -> Result<ProcessingStats> {
        self.run_stage(Stage::Aggregate, input_dir, out_dir, |path| {
            self.aggregate_file(path, out_dir)
        })
    }

    fn run_stage<F>(
        &self,
        stage: Stage,
        input_dir: &Path,
        out_dir: &Path,
        process: F,
    ) -> Result<ProcessingStats>
    where
        F: Fn(&Path) -> Result<FileOutcome>,
    {
        let start_time = Instant::now();

        ensure_directory(input_dir)?;
        prepare_output_dir(out_dir)?;

        println!("{}", stage.title().bright_green().bold());
        println!("  {} {}", "Input:".bright_cyan(), input_dir.display());
        println!("  {} {}", "Output:".bright_cyan(), out_dir.display());

        let files = discover_files(input_dir, stage.extensions())?;
        println!(
            "  {} {} files",
            "Found".bright_green(),
            files.len().to_string().bright_white().bold()
        );

        let mut stats = ProcessingStats::new(out_dir);
        if files.is_empty() {
            warn!("No input files found in {}", input_dir.display());
        }

        let pb = self.progress_bar(files.len(), stage);
        for path in &files {
            pb.set_message(file_label(path));
            match process(path) {
                Ok(outcome) => {
                    debug!(
                        "Processed {} -> {}",
                        outcome.input_path.display(),
                        outcome.output_path.display()
                    );
                    stats.record_success(outcome);
                }
                Err(e) => {
                    error!("Failed to process {}: {:#}", path.display(), e);
                    stats.record_failure();
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        stats.processing_time_ms = start_time.elapsed().as_millis();
        print_summary(&stats);

        Ok(stats)
    }

    fn progress_bar(&self, len: usize, stage: Stage) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(stage.title());
        pb
    }
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white()
    );
    if stats.files_failed > 0 {
        println!(
            "  {} {}",
            "Files failed:".bright_red(),
            stats.files_failed.to_string().bright_red().bold()
        );
    }
    println!(
        "  {} {}",
        "Total rows:".bright_cyan(),
        stats.total_rows.to_string().bright_white().bold()
    );
    if stats.diagnostics > 0 {
        println!(
            "  {} {}",
            "Cell warnings:".bright_yellow(),
            stats.diagnostics.to_string().bright_yellow()
        );
    }
}

