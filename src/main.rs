use clap::Parser;
use colored::*;
use std::process;
use swim_results_converter::cli::{Args, input_prompt, setup_logging};
use swim_results_converter::processor::discovery::ensure_directory;
use swim_results_converter::{PipelineConfig, SwimPipeline};
use tracing::{error, info};

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    match run(&args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let input_dir = match &args.input_dir {
        Some(dir) => dir.clone(),
        None => input_prompt::prompt_input_dir()?,
    };

    if let Err(e) = ensure_directory(&input_dir) {
        error!("Invalid input directory: {}", e);
        return Err(e.into());
    }

    let mut config = PipelineConfig::default().with_bonus_points(args.bonus_points());
    if args.quiet {
        config = config.without_progress();
    }
    info!("Bonus points: {:?}", config.bonus_points);

    let pipeline = SwimPipeline::new(config);

    let stats = pipeline.run_standardization(&input_dir, &args.standardized_dir)?;
    info!(
        "Standardized {} of {} files into {}",
        stats.files_processed,
        stats.files_processed + stats.files_failed,
        stats.output_dir.display()
    );

    if args.aggregate_results {
        println!();
        let stats = pipeline.run_aggregation(&args.standardized_dir, &args.aggregated_dir)?;
        info!(
            "Aggregated {} of {} files into {}",
            stats.files_processed,
            stats.files_processed + stats.files_failed,
            stats.output_dir.display()
        );
    }

    println!("\n{}", "Done".bright_green().bold());
    Ok(())
}
