mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::demo::DemoArgs;
use commands::estimate::EstimateArgs;
use commands::sweep::SweepArgs;

/// Sales-performance benchmark gap estimation
#[derive(Parser)]
#[command(
    name = "bgap",
    version,
    about = "Benchmark gap estimation for commercial diagnostics",
    long_about = "Estimates how far a company's win rate, sales cycle, and net revenue \
                  retention sit from the benchmark for its ACV band, prices each gap as \
                  annual recoverable revenue, and scores overall performance on a 0-10 \
                  scale. Supports one-off estimates, metric sweeps, and demo profiles."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate benchmark gaps and recoverable revenue for one company
    Estimate(EstimateArgs),
    /// Print the ACV-bracket benchmark table
    Benchmarks,
    /// Sweep one metric across a range (slider-style sensitivity)
    Sweep(SweepArgs),
    /// List demo company profiles, or run the estimator on one
    Demo(DemoArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Estimate(args) => commands::estimate::run_estimate(args),
        Commands::Benchmarks => commands::benchmarks::run_benchmarks(),
        Commands::Sweep(args) => commands::sweep::run_sweep(args),
        Commands::Demo(args) => commands::demo::run_demo(args),
        Commands::Version => {
            println!("bgap {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
