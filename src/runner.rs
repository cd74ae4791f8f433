use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use owo_colors::{OwoColorize, Stream};

use crate::parse;
use crate::types::{AlgorithmSpec, Sample, round2};

/// Per-trial failure. Contained at this boundary: every variant becomes an
/// `"Error"` sample, none propagates out of the suite.
#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    #[error("failed to launch '{binary}': {source}")]
    Spawn {
        binary: String,
        source: std::io::Error,
    },

    #[error("timed out after {}s", .timeout.as_secs())]
    Timeout { timeout: Duration },

    #[error("exited with {status}")]
    Failed { status: ExitStatus },

    #[error("process error: {0}")]
    Wait(std::io::Error),
}

/// Capability interface for one benchmark invocation: run the tool for a
/// hash mode and return its captured stdout, or fail. Tests substitute a
/// fake returning canned output without spawning processes.
pub trait BenchmarkTool {
    fn run(&self, mode: u32, timeout: Duration) -> Result<String, ToolError>;
}

/// The real hashcat binary, invoked as `<binary> -b -m <mode> --force`.
pub struct Hashcat {
    binary: PathBuf,
}

impl Hashcat {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

const POLL_INTERVAL: Duration = Duration::from_millis(100);

impl BenchmarkTool for Hashcat {
    fn run(&self, mode: u32, timeout: Duration) -> Result<String, ToolError> {
        let mut child = Command::new(&self.binary)
            .args(["-b", "-m"])
            .arg(mode.to_string())
            .arg("--force")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ToolError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        // Drain stdout on a separate thread so a chatty tool cannot fill the
        // pipe and block while we poll for exit.
        let reader = child.stdout.take().map(|mut stdout| {
            std::thread::spawn(move || {
                let mut buffer = String::new();
                let _ = stdout.read_to_string(&mut buffer);
                buffer
            })
        });

        // On the error paths the reader is left to finish on its own: a
        // killed child may leave grandchildren holding the pipe open, and
        // joining here would block until they exit.
        let status = wait_with_timeout(&mut child, timeout)?;

        // The child exited, so its end of the pipe is closed and the reader
        // finishes promptly.
        let stdout = reader
            .map(|handle| handle.join().unwrap_or_default())
            .unwrap_or_default();

        if !status.success() {
            return Err(ToolError::Failed { status });
        }

        Ok(stdout)
    }
}

/// Poll `try_wait` until the child exits or the deadline passes. On timeout
/// the child is killed and reaped before the error is returned.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus, ToolError> {
    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(ToolError::Timeout { timeout });
                }
                std::thread::sleep(POLL_INTERVAL);
            }
            Err(err) => return Err(ToolError::Wait(err)),
        }
    }
}

/// Suite parameters, injected rather than read from process-wide constants
/// so tests can use small repeat counts and short timeouts.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub repeats: usize,
    pub timeout: Duration,
}

/// Execute one trial and produce exactly one sample.
///
/// Any tool failure (spawn error, non-zero exit, timeout) degrades to an
/// `"Error"` sample with both numeric fields absent; the error itself is
/// surfaced on stderr and the suite continues.
pub fn run_trial(
    tool: &dyn BenchmarkTool,
    algorithm: &AlgorithmSpec,
    timeout: Duration,
) -> Sample {
    let start = Instant::now();

    match tool.run(algorithm.mode, timeout) {
        Ok(output) => {
            let duration = round2(start.elapsed().as_secs_f64());
            let (speed_raw, speed_hps) = parse::parse_speed(parse::find_speed_line(&output));
            Sample {
                name: algorithm.name.clone(),
                mode: algorithm.mode,
                speed_raw,
                speed_hps,
                duration: Some(duration),
            }
        }
        Err(err) => {
            eprintln!(
                "  {} {} (mode {}): {}",
                "[!]".if_supports_color(Stream::Stderr, |s| s.red()),
                algorithm.name,
                algorithm.mode,
                err
            );
            Sample {
                name: algorithm.name.clone(),
                mode: algorithm.mode,
                speed_raw: "Error".to_string(),
                speed_hps: None,
                duration: None,
            }
        }
    }
}

/// Run the whole suite: for each algorithm in order, `repeats` sequential
/// trials. One process at a time: concurrent trials would contend for the
/// device and skew every reading. A failed trial never aborts the run.
pub fn run_suite(
    tool: &dyn BenchmarkTool,
    algorithms: &[AlgorithmSpec],
    config: &RunConfig,
) -> Vec<Sample> {
    let mut samples = Vec::with_capacity(algorithms.len() * config.repeats);

    for algorithm in algorithms {
        let header = format!(
            "[+] Benchmarking {} (mode {}) - {} runs",
            algorithm.name, algorithm.mode, config.repeats
        );
        println!(
            "{}",
            header.if_supports_color(Stream::Stdout, |s| s.cyan())
        );

        for run in 1..=config.repeats {
            println!("  [>] Run {run}...");
            let sample = run_trial(tool, algorithm, config.timeout);
            match sample.duration {
                Some(duration) => println!("      -> {} in {duration}s", sample.speed_raw),
                None => println!("      -> {}", sample.speed_raw),
            }
            samples.push(sample);
        }
    }

    samples
}
