//! ROTOR-DIAG - Rotating Machinery Fault Diagnosis
//!
//! Command-line front end for the spectrum analyzer.
//!
//! # Usage
//!
//! ```bash
//! # Harmonic diagnosis of a 1200 RPM fan captured at 60 FPS
//! rotor-diag analyze --input samples.txt --sample-rate 60 --rpm 1200
//!
//! # Blind scan (strongest peak) from stdin, JSON output
//! capture-tool | rotor-diag analyze --input - --sample-rate 30 --format json
//!
//! # Validate a config file
//! rotor-diag check-config rotor_diag.toml
//! ```
//!
//! # Environment Variables
//!
//! - `ROTOR_DIAG_CONFIG`: Path to the TOML config (default: ./rotor_diag.toml)
//! - `RUST_LOG`: Logging level (default: info)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use rotor_diag::acquisition::read_samples_from_path;
use rotor_diag::config::validation::validate_unknown_keys;
use rotor_diag::{AnalysisConfig, AnalysisResult, Analyzer, DiagnosticConfig, SampleHistory};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "rotor-diag")]
#[command(about = "Rotating machinery fault diagnosis from motion-intensity samples")]
#[command(version)]
struct CliArgs {
    /// Config file (overrides ROTOR_DIAG_CONFIG and ./rotor_diag.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: SubCommand,
}

#[derive(Subcommand, Debug)]
enum SubCommand {
    /// Analyze a sample file and print the diagnosis
    Analyze {
        /// Sample file (text or JSON array), or "-" for stdin
        #[arg(short, long, value_name = "PATH")]
        input: PathBuf,

        /// Capture rate in Hz (default: scan.sample_rate_hz from config)
        #[arg(short, long, env = "ROTOR_DIAG_SAMPLE_RATE")]
        sample_rate: Option<f64>,

        /// Expected shaft speed in RPM; 0 runs a blind peak scan
        #[arg(short, long, allow_negative_numbers = true)]
        rpm: Option<f64>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Load and validate a config file
    CheckConfig {
        /// Path to the TOML file
        path: PathBuf,
    },

    /// Print the effective configuration as TOML
    PrintConfig,

    /// Write the built-in defaults to a new config file
    InitConfig {
        /// Destination path
        #[arg(default_value = "rotor_diag.toml")]
        path: PathBuf,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// Human-readable report
    Text,
    /// Pretty-printed JSON result
    Json,
    /// One number per line: frequency, amplitude, confidence, fault code, length, spectrum
    Flat,
}

// ============================================================================
// Commands
// ============================================================================

fn load_config(path: Option<&Path>) -> Result<DiagnosticConfig> {
    match path {
        Some(p) => DiagnosticConfig::load_from_file(p)
            .with_context(|| format!("Failed to load config from {}", p.display())),
        None => Ok(DiagnosticConfig::load()),
    }
}

fn run_analyze(
    config: &DiagnosticConfig,
    input: &Path,
    sample_rate: Option<f64>,
    rpm: Option<f64>,
    format: OutputFormat,
) -> Result<()> {
    let analyzer =
        Analyzer::new(config.analyzer_settings()).context("Invalid analyzer settings")?;

    let scan = AnalysisConfig::new(
        sample_rate.unwrap_or(config.scan.sample_rate_hz),
        rpm.unwrap_or(config.scan.target_rpm),
    );
    if !scan.sample_rate_hz.is_finite() || scan.sample_rate_hz <= 0.0 {
        anyhow::bail!("Sample rate must be a positive number, got {}", scan.sample_rate_hz);
    }

    let samples = read_samples_from_path(input)
        .with_context(|| format!("Failed to read samples from {}", input.display()))?;

    let mut history = SampleHistory::new(config.history.capacity);
    let total = samples.len();
    history.extend(samples);

    info!(
        machine = %config.machine.name,
        samples = total,
        retained = history.len(),
        sample_rate_hz = scan.sample_rate_hz,
        target_rpm = scan.target_rpm,
        "Running analysis"
    );

    let result = analyzer.analyze_history(&history, &scan);

    if result.fault.is_fault() {
        warn!(fault = %result.fault, confidence = result.confidence, "{}", result.message);
    } else {
        info!(fault = %result.fault, "{}", result.message);
    }

    print_result(&result, format)
}

fn print_result(result: &AnalysisResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", result.format_report()),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(result).context("Failed to encode result")?;
            println!("{json}");
        }
        OutputFormat::Flat => {
            for value in result.to_flat() {
                println!("{value}");
            }
        }
    }
    Ok(())
}

fn run_check_config(path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let warnings = validate_unknown_keys(&raw);
    for w in &warnings {
        println!("warning: {w}");
    }

    let config = DiagnosticConfig::load_from_file(path)?;
    println!(
        "OK: {} (machine '{}', window {}, {} warning(s))",
        path.display(),
        config.machine.name,
        config.analysis.window_size,
        warnings.len()
    );
    Ok(())
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match args.command {
        SubCommand::Analyze {
            input,
            sample_rate,
            rpm,
            format,
        } => {
            let config = load_config(args.config.as_deref())?;
            run_analyze(&config, &input, sample_rate, rpm, format)
        }
        SubCommand::CheckConfig { path } => run_check_config(&path),
        SubCommand::PrintConfig => {
            let config = load_config(args.config.as_deref())?;
            print!("{}", config.to_toml()?);
            Ok(())
        }
        SubCommand::InitConfig { path } => {
            if path.exists() {
                anyhow::bail!("{} already exists, refusing to overwrite", path.display());
            }
            DiagnosticConfig::default().save_to_file(&path)?;
            println!("Wrote default config to {}", path.display());
            Ok(())
        }
    }
}
