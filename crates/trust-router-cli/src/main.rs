// crates/trust-router-cli/src/main.rs
// ============================================================================
// Module: Trust Router CLI Entry Point
// Description: Command dispatcher for offline configuration checks.
// Purpose: Validate, summarize, and list trust router configuration directories.
// Dependencies: clap, serde, serde_jcs, thiserror, trust-router-config, trust-router-core
// ============================================================================

//! ## Overview
//! The `trust-router` binary runs the same reload pass a server would run on
//! a configuration directory, without serving anything. `config validate`
//! promotes the result into a scratch manager, `config show` prints the
//! running-configuration summary, and `config files` lists the files a
//! reload would read, in processing order.

// ============================================================================
// SECTION: Modules
// ============================================================================


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::ArgAction;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use serde::Serialize;
use thiserror::Error;
use trust_router_config::ConfigAuditSink;
use trust_router_config::ConfigError;
use trust_router_config::FileConfigAuditSink;
use trust_router_config::StderrConfigAuditSink;
use trust_router_config::find_config_files;
use trust_router_config::load_config;
use trust_router_config::load_documents_from_dir;
use trust_router_config::reload;
use trust_router_core::ConfigManager;
use trust_router_core::ConfigSummary;
use trust_router_core::SeverityThresholds;
use trust_router_core::ThresholdSink;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "trust-router", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Configuration directory utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Run a full reload pass over a configuration directory.
    Validate(ConfigValidateCommand),
    /// Print the running-configuration summary.
    Show(ConfigShowCommand),
    /// List the configuration files a reload would read.
    Files(ConfigDirArgs),
}

/// Configuration directory argument shared by config subcommands.
#[derive(Args, Debug, Clone)]
struct ConfigDirArgs {
    /// Directory holding `*.cfg` documents.
    #[arg(value_name = "DIR")]
    dir: PathBuf,
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Configuration directory.
    #[command(flatten)]
    location: ConfigDirArgs,
    /// Append audit events to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    audit_log: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Arguments for the config summary.
#[derive(Args, Debug)]
struct ConfigShowCommand {
    /// Configuration directory.
    #[command(flatten)]
    location: ConfigDirArgs,
    /// Output format.
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

/// Output format for structured results.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    /// Canonical JSON.
    Json,
    /// Human-readable text.
    Text,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a printable message.
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

impl From<ConfigError> for CliError {
    fn from(error: ConfigError) -> Self {
        Self::new(format!("configuration rejected ({}): {error}", error.kind()))
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("trust-router {version}"))?;
        return Ok(ExitCode::SUCCESS);
    }
    let Some(command) = cli.command else {
        write_stdout_line("no command given; see `trust-router --help`")?;
        return Ok(ExitCode::SUCCESS);
    };
    match command {
        Commands::Config {
            command,
        } => command_config(command),
    }
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: ConfigCommand) -> CliResult<ExitCode> {
    let output = match command {
        ConfigCommand::Validate(command) => command_config_validate(&command)?,
        ConfigCommand::Show(command) => command_config_show(&command)?,
        ConfigCommand::Files(command) => command_config_files(&command.dir)?,
    };
    write_stdout_line(output.trim_end_matches('\n'))?;
    Ok(ExitCode::SUCCESS)
}

/// Result of a successful validation pass.
#[derive(Debug, Serialize)]
struct ValidateOutput {
    /// Number of documents merged.
    documents: usize,
    /// Generation number the pass was promoted as.
    generation: u64,
    /// Running-configuration summary.
    summary: ConfigSummary,
}

/// Executes the config validation command.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<String> {
    let thresholds = Arc::new(SeverityThresholds::default());
    let sink = audit_sink(command.audit_log.as_deref(), &thresholds)?;
    let output = validate_dir(&command.location.dir, &thresholds, sink.as_ref())?;
    match command.format {
        OutputFormat::Json => canonical_json(&output),
        OutputFormat::Text => Ok(render_validate_text(&output)),
    }
}

/// Executes the config summary command.
fn command_config_show(command: &ConfigShowCommand) -> CliResult<String> {
    let thresholds = Arc::new(SeverityThresholds::default());
    let sink = StderrConfigAuditSink::new(thresholds);
    let documents = load_documents_from_dir(&command.location.dir)?;
    let summary = load_config(&documents, &sink)?.summary();
    match command.format {
        OutputFormat::Json => canonical_json(&summary),
        OutputFormat::Text => Ok(render_summary_text(&summary)),
    }
}

/// Executes the config file listing command.
fn command_config_files(dir: &Path) -> CliResult<String> {
    let files = find_config_files(dir)?;
    Ok(files.iter().map(|path| format!("{}\n", path.display())).collect())
}

/// Runs one reload pass over `dir` through a scratch manager.
fn validate_dir(
    dir: &Path,
    thresholds: &Arc<SeverityThresholds>,
    sink: &dyn ConfigAuditSink,
) -> CliResult<ValidateOutput> {
    let publish: Arc<dyn ThresholdSink> = Arc::clone(thresholds) as Arc<dyn ThresholdSink>;
    let manager = ConfigManager::new(publish);
    let documents = load_documents_from_dir(dir)?;
    let active = reload(&manager, &documents, sink)?;
    Ok(ValidateOutput {
        documents: documents.len(),
        generation: manager.generation(),
        summary: active.summary(),
    })
}

/// Selects the audit sink for a validation pass.
fn audit_sink(
    audit_log: Option<&Path>,
    thresholds: &Arc<SeverityThresholds>,
) -> CliResult<Box<dyn ConfigAuditSink>> {
    match audit_log {
        None => Ok(Box::new(StderrConfigAuditSink::new(Arc::clone(thresholds)))),
        Some(path) => FileConfigAuditSink::new(path, Arc::clone(thresholds))
            .map(|sink| Box::new(sink) as Box<dyn ConfigAuditSink>)
            .map_err(|err| {
                CliError::new(format!("cannot open audit log {}: {err}", path.display()))
            }),
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders a validation result as text.
fn render_validate_text(output: &ValidateOutput) -> String {
    let summary = &output.summary;
    let hostname = summary.internal.hostname.as_ref().map(ToString::to_string).unwrap_or_default();
    format!(
        "configuration valid: {} document(s), generation {}\nhostname: {hostname}\nrp clients: \
         {}\nidp realms: {}\ndefault servers: {}\ncommunities: {}\n",
        output.documents,
        output.generation,
        summary.rp_clients.len(),
        summary.idp_realms.len(),
        summary.default_servers.len(),
        summary.communities.len(),
    )
}

/// Renders a configuration summary as text, one community per line.
fn render_summary_text(summary: &ConfigSummary) -> String {
    let mut output = String::new();
    if let Some(hostname) = &summary.internal.hostname {
        output.push_str(&format!("hostname {hostname}\n"));
    }
    output.push_str(&format!(
        "ports tids={} trps={}\n",
        summary.internal.tids_port, summary.internal.trps_port
    ));
    for community in &summary.communities {
        let idps: Vec<String> = community.idp_realms.iter().map(|realm| format!("@{realm}")).collect();
        let rps: Vec<String> = community.rp_realms.iter().map(ToString::to_string).collect();
        output.push_str(&format!(
            "community {} ({}) idps [{}] rps [{}]\n",
            community.id,
            community.kind,
            idps.join(", "),
            rps.join(", ")
        ));
    }
    output
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Serializes `value` as canonical JSON text.
fn canonical_json<T: Serialize>(value: &T) -> CliResult<String> {
    let bytes = serde_jcs::to_vec(value)
        .map_err(|err| CliError::new(format!("failed to serialize output: {err}")))?;
    String::from_utf8(bytes)
        .map_err(|err| CliError::new(format!("failed to serialize output: {err}")))
}

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats an output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
