//! Command-line interface components.

use crate::config::BonusPoints;
use crate::constants::{DEFAULT_AGGREGATED_DIR, DEFAULT_STANDARDIZED_DIR};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "swim-results")]
#[command(about = "Convert swim meet result spreadsheets into standardized tables and swimmer point totals")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    /// Directory containing raw meet result sheets (prompted for if not provided)
    #[arg(short, long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Output directory for standardized tables
    #[arg(long, value_name = "DIR", default_value = DEFAULT_STANDARDIZED_DIR)]
    pub standardized_dir: PathBuf,

    /// Output directory for aggregated swimmer totals
    #[arg(long, value_name = "DIR", default_value = DEFAULT_AGGREGATED_DIR)]
    pub aggregated_dir: PathBuf,

    /// Also aggregate the standardized tables into per-swimmer totals
    #[arg(short, long)]
    pub aggregate_results: bool,

    /// Bonus points for a DEV qualification
    #[arg(long, value_name = "POINTS")]
    pub dev_bonus: Option<i64>,

    /// Bonus points for an ADV qualification
    #[arg(long, value_name = "POINTS")]
    pub adv_bonus: Option<i64>,

    /// Bonus points for a swim without a seed time
    #[arg(long, value_name = "POINTS")]
    pub nt_bonus: Option<i64>,

    /// Bonus points for a personal best
    #[arg(long, value_name = "POINTS")]
    pub pb_bonus: Option<i64>,

    /// Award place points only; individual bonus flags still apply on top
    #[arg(long)]
    pub no_bonus_points: bool,

    /// Enable verbose logging
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors, without progress bars
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Bonus weights after applying the command-line overrides
    pub fn bonus_points(&self) -> BonusPoints {
        let base = if self.no_bonus_points {
            BonusPoints::none()
        } else {
            BonusPoints::default()
        };

        let mut bonus = base;
        if let Some(points) = self.dev_bonus {
            bonus = bonus.with_dev(points);
        }
        if let Some(points) = self.adv_bonus {
            bonus = bonus.with_adv(points);
        }
        if let Some(points) = self.nt_bonus {
            bonus = bonus.with_nt(points);
        }
        if let Some(points) = self.pb_bonus {
            bonus = bonus.with_pb(points);
        }
        bonus
    }

    pub fn get_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("swim_results_converter={}", args.get_log_level()))
    });

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Interactive input directory selection
pub mod input_prompt {
    use anyhow::{Context, Result};
    use colored::*;
    use std::io::{self, BufRead, Write};
    use std::path::PathBuf;

    /// Ask for the raw results directory on stdin
    pub fn prompt_input_dir() -> Result<PathBuf> {
        print!(
            "{}",
            "Enter the directory containing meet result sheets: ".bright_white()
        );
        io::stdout().flush().context("Failed to flush stdout")?;

        read_input_dir(io::stdin().lock())
    }

    /// Read one line naming a directory
    pub fn read_input_dir<R: BufRead>(mut reader: R) -> Result<PathBuf> {
        let mut input = String::new();
        reader
            .read_line(&mut input)
            .context("Failed to read user input")?;

        let trimmed = input.trim();
        if trimmed.is_empty() {
            anyhow::bail!("No input directory given");
        }

        Ok(PathBuf::from(trimmed))
    }
}
