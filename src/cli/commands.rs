//! Command implementations for the strikers CLI
//!
//! Sets up logging, runs the selected command and prints the run summary.

use crate::cli::args::{Args, Commands};
use crate::models::ProcessingStats;
use crate::processor::StatementProcessor;
use anyhow::{Context, Result};
use colored::*;
use tracing::{debug, info};

/// Main command runner
pub fn run(args: Args) -> Result<ProcessingStats> {
    setup_logging(&args);

    info!("Starting strikers processor");
    debug!("Command line arguments: {:?}", args);

    let config = args.to_config().context("Invalid command line arguments")?;
    let (input, output, label) = match &args.command {
        Commands::Clean(clean) => (&clean.input_path, &clean.output_path, "Clean"),
        Commands::Export(export) => (&export.input_path, &export.output_path, "Export"),
    };

    let mut processor = StatementProcessor::new(config);
    let stats = processor
        .process_file(input, output)
        .with_context(|| format!("Failed to process {}", input.display()))?;

    if args.show_progress() {
        print_summary(label, &stats, processor.config().rejects_path.as_deref());
    }

    Ok(stats)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("strikers_processor={}", log_level)));

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

    debug!("Logging initialized at level: {}", log_level);
}

fn print_summary(label: &str, stats: &ProcessingStats, rejects: Option<&std::path::Path>) {
    println!();
    println!("{}", format!("{} complete", label).bright_green().bold());
    println!(
        "{} {}",
        "Input:".bright_cyan(),
        stats.input_path.display().to_string().bright_white()
    );
    println!(
        "{} {}",
        "Output:".bright_cyan(),
        stats.output_path.display().to_string().bright_white()
    );
    println!(
        "{} {}",
        "Statements read:".bright_cyan(),
        stats.statements_read.to_string().bright_white().bold()
    );
    println!(
        "{} {} ({:.1}%)",
        "Records written:".bright_cyan(),
        stats.records_written.to_string().bright_white().bold(),
        stats.success_rate()
    );

    if stats.total_rejected() > 0 {
        println!(
            "{} {}",
            "Skipped:".bright_yellow(),
            stats.total_rejected().to_string().bright_yellow().bold()
        );
        for (reason, count) in &stats.rejected {
            println!("  {} {}", format!("{}:", reason).bright_black(), count);
        }
        if let Some(path) = rejects {
            println!(
                "{} {}",
                "Reject log:".bright_cyan(),
                path.display().to_string().bright_white()
            );
        }
    }

    if stats.fields_defaulted > 0 {
        println!(
            "{} {}",
            "Fields defaulted:".bright_cyan(),
            stats.fields_defaulted.to_string().bright_white()
        );
    }

    println!(
        "{} {}ms",
        "Processing time:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
}
