// crates/contract-suite-cli/src/main.rs
// ============================================================================
// Module: Contract Suite CLI Entry Point
// Description: Command dispatcher for coverage reports and filter tooling.
// Purpose: Inspect contract coverage of manifest class paths from a shell.
// Dependencies: clap, class-filter, contract-suite-config, contract-suite-core,
//               serde_json, thiserror, tracing, tracing-subscriber.
// ============================================================================

//! ## Overview
//! `contract-suite` reads type manifests from the configured class path,
//! populates a contract registry, and reports coverage: interfaces without
//! contract tests, classes no suite targets, and configuration errors. It
//! also checks and evaluates filter expressions.
//!
//! Exit codes: `0` on success, `1` on any error, `2` when a report finds
//! configuration errors.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod report;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use class_filter::parse_filter;
use contract_suite_config::ContractSuiteConfig;
use contract_suite_config::ReportFormat;
use contract_suite_core::ClassPath;
use contract_suite_core::ContractRegistry;
use contract_suite_core::CoverageReport;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::report::ReportSections;
use crate::report::render_json;
use crate::report::render_text;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "CONTRACT_SUITE_LOG";
/// Log filter used when `CONTRACT_SUITE_LOG` is unset or invalid.
const DEFAULT_LOG_FILTER: &str = "warn";
/// Exit code for a report that found configuration errors.
const EXIT_CONFIGURATION_ERRORS: u8 = 2;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "contract-suite", version, disable_help_subcommand = true)]
struct Cli {
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Commands,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Report contract coverage for the configured class path.
    Report(ReportCommand),
    /// Filter expression utilities.
    Filter {
        /// Selected filter subcommand.
        #[command(subcommand)]
        command: FilterCommand,
    },
    /// List live contract tests by interface.
    List(ListCommand),
}

/// Arguments for `report`.
#[derive(Args, Debug)]
struct ReportCommand {
    /// Config file path (defaults to `CONTRACT_SUITE_CONFIG` or `contract-suite.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Output format (overrides `report.format`).
    #[arg(long, value_enum)]
    format: Option<FormatArg>,
    /// Show interfaces without a contract test.
    #[arg(long)]
    untested: bool,
    /// Show classes no suite targets.
    #[arg(long)]
    unimplemented: bool,
    /// Show configuration errors.
    #[arg(long)]
    errors: bool,
}

/// Filter subcommands.
#[derive(Subcommand, Debug)]
enum FilterCommand {
    /// Parse an expression and print its canonical form.
    Check {
        /// Filter expression.
        expression: String,
    },
    /// Evaluate an expression against type names.
    Test {
        /// Filter expression.
        expression: String,
        /// Fully-qualified type names.
        #[arg(required = true)]
        names: Vec<String>,
    },
}

/// Arguments for `list`.
#[derive(Args, Debug)]
struct ListCommand {
    /// Config file path (defaults to `CONTRACT_SUITE_CONFIG` or `contract-suite.toml`).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Report output formats.
#[derive(ValueEnum, Copy, Clone, Debug)]
enum FormatArg {
    /// Human-readable lines.
    Text,
    /// One JSON document.
    Json,
}

impl From<FormatArg> for ReportFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => Self::Text,
            FormatArg::Json => Self::Json,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for user-facing messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`].
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    init_logging();
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Installs the stderr log subscriber.
fn init_logging() {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Report(command) => command_report(&command),
        Commands::Filter {
            command,
        } => command_filter(command),
        Commands::List(command) => command_list(&command),
    }
}

// ============================================================================
// SECTION: Report Command
// ============================================================================

/// Executes the `report` command.
fn command_report(command: &ReportCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let (class_path, registry) = populate(&config)?;
    let report = CoverageReport::build(&registry, &class_path);
    let requested = command.untested || command.unimplemented || command.errors;
    let sections = if requested {
        ReportSections {
            untested: command.untested,
            unimplemented: command.unimplemented,
            errors: command.errors,
        }
    } else {
        ReportSections::from(&config.report)
    };
    let format = command.format.map_or(config.report.format, ReportFormat::from);
    match format {
        ReportFormat::Text => {
            for line in render_text(&report, sections) {
                write_stdout_line(&line).map_err(|err| output_error("stdout", &err))?;
            }
        }
        ReportFormat::Json => {
            let document = render_json(&report, sections)
                .map_err(|err| CliError::new(format!("failed to serialize report: {err}")))?;
            write_stdout_line(&document).map_err(|err| output_error("stdout", &err))?;
        }
    }
    if report.errors().is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(EXIT_CONFIGURATION_ERRORS))
    }
}

// ============================================================================
// SECTION: Filter Commands
// ============================================================================

/// Dispatches filter subcommands.
fn command_filter(command: FilterCommand) -> CliResult<ExitCode> {
    match command {
        FilterCommand::Check {
            expression,
        } => {
            let filter = parse_filter(&expression)
                .map_err(|err| CliError::new(format!("invalid filter expression: {err}")))?;
            write_stdout_line(&filter.to_string()).map_err(|err| output_error("stdout", &err))?;
            Ok(ExitCode::SUCCESS)
        }
        FilterCommand::Test {
            expression,
            names,
        } => {
            let filter = parse_filter(&expression)
                .map_err(|err| CliError::new(format!("invalid filter expression: {err}")))?;
            for name in &names {
                let verdict = if filter.accepts_name(name) { "accept" } else { "reject" };
                write_stdout_line(&format!("{verdict} {name}"))
                    .map_err(|err| output_error("stdout", &err))?;
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

// ============================================================================
// SECTION: List Command
// ============================================================================

/// Executes the `list` command.
fn command_list(command: &ListCommand) -> CliResult<ExitCode> {
    let config = load_config(command.config.as_deref())?;
    let (_, registry) = populate(&config)?;
    for (contract, test) in registry.live_entries() {
        write_stdout_line(&format!("{contract} -> {}", test.test_type()))
            .map_err(|err| output_error("stdout", &err))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Loads and validates configuration.
fn load_config(path: Option<&Path>) -> CliResult<ContractSuiteConfig> {
    let config = ContractSuiteConfig::load(path)
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    if let Some(source) = &config.source {
        info!(path = %source.display(), "configuration loaded");
    }
    Ok(config)
}

/// Builds the class path and populates a registry over it.
fn populate(config: &ContractSuiteConfig) -> CliResult<(ClassPath, ContractRegistry)> {
    let class_path = config
        .discovery
        .class_path()
        .map_err(|err| CliError::new(format!("failed to load config: {err}")))?;
    let settings = config.discovery.to_settings();
    let registry = ContractRegistry::populate(&class_path, &settings);
    info!(
        scanned = registry.scanned().len(),
        live = registry.live_entries().count(),
        errors = registry.errors().len(),
        "registry populated"
    );
    Ok((class_path, registry))
}

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Wraps an output failure.
fn output_error(stream: &str, error: &std::io::Error) -> CliError {
    CliError::new(format!("failed to write to {stream}: {error}"))
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
