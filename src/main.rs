use std::path::PathBuf;
use std::process;
use std::time::Duration;

use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use owo_colors::{OwoColorize, Stream};

use hcbench::config;
use hcbench::report;
use hcbench::runner;
use hcbench::summary;

#[derive(Parser)]
#[command(
    name = "hcbench",
    version,
    about = "Benchmark hashcat hash modes and aggregate throughput statistics"
)]
struct Cli {
    /// "report" subcommand, or nothing to run the benchmark suite
    command: Option<String>,

    /// Algorithm config file (default: ./algorithms.toml, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Benchmark runs per algorithm
    #[arg(short, long, default_value_t = 3)]
    repeats: usize,

    /// Per-run timeout in seconds
    #[arg(short, long, default_value_t = 90)]
    timeout: u64,

    /// Results CSV path (written by a run, read by `report`)
    #[arg(short, long, default_value = "results.csv")]
    output: PathBuf,

    /// Comma-separated algorithm names or mode numbers to benchmark
    #[arg(long)]
    only: Option<String>,

    /// hashcat binary to invoke
    #[arg(long, default_value = "hashcat")]
    hashcat: PathBuf,

    /// Emit the report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.as_deref() {
        None => {
            let config_path = config::resolve_config_path(cli.config.as_deref());
            let mut algorithms = config::load_algorithms(&config_path)?;
            if let Some(ref selectors) = cli.only {
                algorithms = config::select_algorithms(algorithms, selectors)?;
            }

            let header = format!(
                "[#] hcbench - {} algorithm(s), {} runs each",
                algorithms.len(),
                cli.repeats
            );
            println!(
                "{}",
                header.if_supports_color(Stream::Stdout, |s| s.bold())
            );

            let tool = runner::Hashcat::new(&cli.hashcat);
            let run_config = runner::RunConfig {
                repeats: cli.repeats,
                timeout: Duration::from_secs(cli.timeout),
            };
            let samples = runner::run_suite(&tool, &algorithms, &run_config);

            report::write_csv(&cli.output, &samples)?;
            let saved = format!("\n[\u{2714}] Results saved to {}", cli.output.display());
            println!(
                "{}",
                saved.if_supports_color(Stream::Stdout, |s| s.dimmed())
            );
        }
        Some("report") => {
            let samples = report::read_samples(&cli.output)?;
            let mut rows = summary::aggregate(&samples);
            rows.sort_by(|a, b| b.avg_speed_hps.total_cmp(&a.avg_speed_hps));

            if cli.json {
                println!("{}", report::format_json(&rows, Utc::now()));
            } else {
                print!("{}", report::format_summary(&rows));
            }
        }
        Some(other) => {
            anyhow::bail!("Unknown command '{}'. Usage: hcbench [report]", other);
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{}", err);
        process::exit(1);
    }
}
