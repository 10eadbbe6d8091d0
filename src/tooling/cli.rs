//! CLI argument parsing and command dispatch.
//!
//! Parsing and formatting live here; workflow logic lives in the service
//! layers (`ReviewCommandService`, `WakeReport`, `WindDownReport`).

use crate::config::xdg::aget_dir;
use crate::config::{find_agent_root, AgetConfig, ConfigLoader};
use crate::error::AgetError;
use crate::identity::{validate_identity, AgentIdentity, CapabilityVocabulary, IdentityStore};
use crate::logging::{self, LoggingConfig};
use crate::review::format as review_format;
use crate::review::{ReviewCommandService, ReviewStore};
use crate::session::format as session_format;
use crate::session::{SessionState, WakeReport, WindDownOptions, WindDownReport};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "aget")]
#[command(about = "Reviewer agent tooling: identity, sessions, and review gates")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory to resolve the agent root from
    #[arg(long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Load configuration from a specific file instead of the source stack
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Override the configured log format (text, json)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Override the configured log output (stdout, stderr, file, file+stderr)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Override the log file path
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a session: greet, list capabilities and carried-over work
    Wake {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// End a session: sanity gate, pending-work scan, handoff note
    WindDown {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Handoff notes for the session record
        #[arg(long)]
        notes: Option<String>,

        /// Skip the sanity gate
        #[arg(long)]
        skip_checks: bool,
    },
    /// Show agent status: identity, session clock, open reviews
    Status {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Identity operations
    Identity {
        #[command(subcommand)]
        command: IdentityCommands,
    },
    /// Review workflow operations
    Review {
        #[command(subcommand)]
        command: ReviewCommands,
    },
    /// Scaffold a new agent root in the target directory
    Init {
        /// Overwrite existing identity files
        #[arg(long)]
        force: bool,

        /// List the files that would be written without writing them
        #[arg(long)]
        list: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum IdentityCommands {
    /// Show the identity descriptor and capability vocabulary
    Show {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Validate identity files on disk
    Validate {
        /// Show every check, not just failures
        #[arg(long)]
        verbose: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommands {
    /// Open a review of an artifact
    Start {
        /// Artifact under review (path or name)
        artifact: String,

        /// Checklist item; repeat for multiple (defaults from config)
        #[arg(long = "item")]
        item: Vec<String>,
    },
    /// Mark a checklist item complete
    Check {
        /// Checklist item label
        label: String,

        /// Review id (defaults to the sole open review)
        #[arg(long)]
        review: Option<String>,
    },
    /// Record a finding
    Finding {
        /// Severity: critical, major, minor
        #[arg(long)]
        severity: String,

        /// What is wrong
        description: String,

        /// How to fix it
        #[arg(long)]
        remediation: String,

        /// Review id (defaults to the sole open review)
        #[arg(long)]
        review: Option<String>,
    },
    /// Request approval (denied while checklist items remain incomplete)
    Approve {
        /// Review id (defaults to the sole open review)
        #[arg(long)]
        review: Option<String>,
    },
    /// Show one review in full
    Status {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Review id (defaults to the sole open review)
        #[arg(long)]
        review: Option<String>,
    },
    /// List all reviews
    List {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Close a review without approval
    Close {
        /// Review id (defaults to the sole open review)
        #[arg(long)]
        review: Option<String>,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Final output of a command: text for stdout plus the process exit code.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub text: String,
    pub exit_code: i32,
}

impl CommandOutput {
    fn ok(text: String) -> Self {
        Self { text, exit_code: 0 }
    }
}

/// Resolved execution context for one command.
pub struct CliContext {
    pub agent_root: PathBuf,
    pub aget_dir: PathBuf,
    pub config: AgetConfig,
    pub identity_store: IdentityStore,
    pub review_store: ReviewStore,
    pub sessions_dir: PathBuf,
}

impl CliContext {
    /// Resolve the agent root from `dir` and load configuration.
    pub fn new(dir: &Path, config_path: Option<&Path>) -> Result<Self, AgetError> {
        let dir = absolute(dir);
        let agent_root = find_agent_root(&dir).ok_or_else(|| {
            AgetError::ConfigError(format!(
                "No {} directory found from {}. Run 'aget init' to scaffold one.",
                crate::config::settings::AGET_DIR,
                dir.display()
            ))
        })?;
        Self::at_root(agent_root, config_path)
    }

    /// Build a context for a known agent root, without searching.
    pub fn at_root(agent_root: PathBuf, config_path: Option<&Path>) -> Result<Self, AgetError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path),
            None => ConfigLoader::load(&agent_root),
        }
        .map_err(|e| AgetError::ConfigError(e.to_string()))?;
        Ok(Self::with_config(agent_root, config))
    }

    /// Build a context from an already-loaded configuration, bypassing the
    /// file and environment sources entirely.
    pub fn with_config(agent_root: PathBuf, config: AgetConfig) -> Self {
        let aget_dir = aget_dir(&agent_root);
        let identity_store = IdentityStore::new(aget_dir.clone(), &config.identity);
        let review_store = ReviewStore::new(&aget_dir);
        let sessions_dir = if config.session.sessions_dir.is_absolute() {
            config.session.sessions_dir.clone()
        } else {
            agent_root.join(&config.session.sessions_dir)
        };

        Self {
            agent_root,
            aget_dir,
            config,
            identity_store,
            review_store,
            sessions_dir,
        }
    }

    /// Execute a command against this context.
    pub fn execute(&self, command: &Commands) -> Result<CommandOutput, AgetError> {
        match command {
            Commands::Wake { format } => self.wake(*format),
            Commands::WindDown {
                format,
                notes,
                skip_checks,
            } => self.wind_down(*format, notes.as_deref(), *skip_checks),
            Commands::Status { format } => self.status(*format),
            Commands::Identity { command } => self.identity(command),
            Commands::Review { command } => self.review(command),
            Commands::Init { force, list } => init_agent(&self.agent_root, *force, *list),
        }
    }

    fn wake(&self, format: OutputFormat) -> Result<CommandOutput, AgetError> {
        info!(agent_root = %self.agent_root.display(), "session wake");
        let report = WakeReport::gather(&self.identity_store, &self.review_store, &self.aget_dir)?;
        let text = match format {
            OutputFormat::Text => session_format::format_wake_text(&report),
            OutputFormat::Json => to_json(&report)?,
        };
        Ok(CommandOutput::ok(text))
    }

    fn wind_down(
        &self,
        format: OutputFormat,
        notes: Option<&str>,
        skip_checks: bool,
    ) -> Result<CommandOutput, AgetError> {
        info!(agent_root = %self.agent_root.display(), skip_checks, "session wind-down");
        let options = WindDownOptions {
            skip_checks,
            handoff_notes: notes.unwrap_or_default().to_string(),
            always_write_note: self.config.session.always_write_note,
        };
        let report = WindDownReport::gather(
            &self.identity_store,
            &self.review_store,
            &self.aget_dir,
            &self.sessions_dir,
            &options,
        )?;
        let text = match format {
            OutputFormat::Text => session_format::format_wind_down_text(&report),
            OutputFormat::Json => to_json(&report)?,
        };
        Ok(CommandOutput {
            text,
            exit_code: report.exit_code(),
        })
    }

    fn status(&self, format: OutputFormat) -> Result<CommandOutput, AgetError> {
        let report = StatusReport::gather(self)?;
        let text = match format {
            OutputFormat::Text => format_agent_status_text(&report),
            OutputFormat::Json => to_json(&report)?,
        };
        Ok(CommandOutput::ok(text))
    }

    fn identity(&self, command: &IdentityCommands) -> Result<CommandOutput, AgetError> {
        match command {
            IdentityCommands::Show { format } => {
                let identity = self.identity_store.load()?;
                let capabilities = self.identity_store.load_capabilities()?;
                let text = match format {
                    OutputFormat::Text => format_identity_text(&identity, &capabilities),
                    OutputFormat::Json => to_json(&IdentityShowOutput {
                        identity,
                        capabilities: capabilities.capabilities,
                    })?,
                };
                Ok(CommandOutput::ok(text))
            }
            IdentityCommands::Validate { verbose } => {
                let result = validate_identity(&self.identity_store);
                let mut out = String::new();
                if *verbose {
                    for (description, passed) in &result.checks {
                        let mark = if *passed { "ok" } else { "FAIL" };
                        out.push_str(&format!("  [{}] {}\n", mark, description));
                    }
                }
                for error in &result.errors {
                    out.push_str(&format!("  error: {}\n", error));
                }
                let exit_code = if result.is_valid() {
                    out.push_str(&format!(
                        "Identity valid ({}/{} checks passed)\n",
                        result.passed_checks(),
                        result.total_checks()
                    ));
                    0
                } else {
                    out.push_str("Identity INVALID\n");
                    1
                };
                Ok(CommandOutput { text: out, exit_code })
            }
        }
    }

    fn review(&self, command: &ReviewCommands) -> Result<CommandOutput, AgetError> {
        let store = &self.review_store;
        match command {
            ReviewCommands::Start { artifact, item } => {
                debug!(%artifact, "review start");
                let result = ReviewCommandService::start(
                    store,
                    artifact,
                    item,
                    &self.config.review.default_checklist,
                )?;
                Ok(CommandOutput::ok(review_format::format_start_text(&result)))
            }
            ReviewCommands::Check { label, review } => {
                let result = ReviewCommandService::check(store, review.as_deref(), label)?;
                Ok(CommandOutput::ok(review_format::format_check_text(&result)))
            }
            ReviewCommands::Finding {
                severity,
                description,
                remediation,
                review,
            } => {
                let result = ReviewCommandService::finding(
                    store,
                    review.as_deref(),
                    severity,
                    description,
                    remediation,
                )?;
                Ok(CommandOutput::ok(review_format::format_finding_text(
                    &result,
                )))
            }
            ReviewCommands::Approve { review } => {
                let result = ReviewCommandService::approve(store, review.as_deref())?;
                let exit_code = if result.decision.allowed { 0 } else { 1 };
                Ok(CommandOutput {
                    text: review_format::format_approve_text(&result),
                    exit_code,
                })
            }
            ReviewCommands::Status { format, review } => {
                let status = ReviewCommandService::status(store, review.as_deref())?;
                let text = match format {
                    OutputFormat::Text => review_format::format_status_text(&status),
                    OutputFormat::Json => to_json(&status)?,
                };
                Ok(CommandOutput::ok(text))
            }
            ReviewCommands::List { format } => {
                let listing = ReviewCommandService::list(store)?;
                let text = match format {
                    OutputFormat::Text => review_format::format_list_text(&listing),
                    OutputFormat::Json => to_json(&listing)?,
                };
                Ok(CommandOutput::ok(text))
            }
            ReviewCommands::Close { review, yes } => {
                let target = store.resolve_open(review.as_deref())?;
                if !yes && !confirm_close(&target.id)? {
                    return Ok(CommandOutput::ok("Close aborted.\n".to_string()));
                }
                let result = ReviewCommandService::close(store, Some(&target.id))?;
                Ok(CommandOutput::ok(review_format::format_close_text(&result)))
            }
        }
    }
}

fn absolute(dir: &Path) -> PathBuf {
    dir.canonicalize().unwrap_or_else(|_| dir.to_path_buf())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, AgetError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AgetError::StorageError(format!("Failed to serialize output: {}", e)))
}

fn confirm_close(id: &str) -> Result<bool, AgetError> {
    dialoguer::Confirm::new()
        .with_prompt(format!("Close review '{}' without approval?", id))
        .default(false)
        .interact()
        .map_err(|e| AgetError::ReviewError(format!("Confirmation prompt failed: {}", e)))
}

/// Entry point: resolve context, apply logging, run the command.
pub fn run(cli: &Cli) -> Result<CommandOutput, AgetError> {
    // Init must work before any agent root exists.
    if let Commands::Init { force, list } = &cli.command {
        let dir = absolute(&cli.dir);
        let root = find_agent_root(&dir).unwrap_or(dir);
        // No log file yet; stderr until the agent root exists.
        let mut logging_config = LoggingConfig {
            output: "stderr".to_string(),
            ..LoggingConfig::default()
        };
        apply_logging_overrides(cli, &mut logging_config);
        init_cli_logging(cli, &logging_config, &aget_dir(&root))?;
        return init_agent(&root, *force, *list);
    }

    let ctx = CliContext::new(&cli.dir, cli.config.as_deref())?;
    let mut logging_config = ctx.config.logging.clone();
    apply_logging_overrides(cli, &mut logging_config);
    init_cli_logging(cli, &logging_config, &ctx.aget_dir)?;
    ctx.execute(&cli.command)
}

fn apply_logging_overrides(cli: &Cli, config: &mut LoggingConfig) {
    if let Some(level) = &cli.log_level {
        config.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        config.output = output.clone();
    }
}

fn init_cli_logging(
    cli: &Cli,
    config: &LoggingConfig,
    aget_dir: &Path,
) -> Result<(), AgetError> {
    let mut config = config.clone();
    if cli.log_file.is_some() {
        config.file = Some(logging::resolve_log_file_path(
            cli.log_file.clone(),
            config.file.clone(),
            aget_dir,
        ));
    }
    logging::init_logging(&config, aget_dir)
}

/// Unified status output.
#[derive(Debug, Clone, Serialize)]
struct StatusReport {
    agent: Option<AgentIdentity>,
    identity_valid: bool,
    session_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_started: Option<DateTime<Utc>>,
    open_reviews: Vec<OpenReviewRow>,
}

#[derive(Debug, Clone, Serialize)]
struct OpenReviewRow {
    id: String,
    artifact: String,
    completed: usize,
    total: usize,
    findings: usize,
}

impl StatusReport {
    fn gather(ctx: &CliContext) -> Result<Self, AgetError> {
        let agent = ctx.identity_store.load().ok();
        let identity_valid = validate_identity(&ctx.identity_store).is_valid();
        let state = SessionState::load(&ctx.aget_dir);
        let session_started = state.current_session.as_ref().map(|s| s.started);
        let open_reviews = ctx
            .review_store
            .open_reviews()?
            .iter()
            .map(|r| OpenReviewRow {
                id: r.id.clone(),
                artifact: r.artifact.clone(),
                completed: r.checklist.completed_count(),
                total: r.checklist.len(),
                findings: r.findings.len(),
            })
            .collect();
        Ok(Self {
            agent,
            identity_valid,
            session_active: session_started.is_some(),
            session_started,
            open_reviews,
        })
    }
}

fn format_agent_status_text(report: &StatusReport) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        review_format::format_section_heading("Agent Status")
    ));
    match &report.agent {
        Some(agent) => {
            out.push_str(&format!("  Agent: {} v{}\n", agent.name, agent.version));
            out.push_str(&format!("  Domain: {}\n", agent.domain));
        }
        None => out.push_str("  Agent: <no identity configured>\n"),
    }
    out.push_str(&format!(
        "  Identity: {}\n",
        if report.identity_valid { "valid" } else { "INVALID" }
    ));
    match report.session_started {
        Some(started) => out.push_str(&format!(
            "  Session: active since {}\n",
            started.format("%Y-%m-%d %H:%M UTC")
        )),
        None => out.push_str("  Session: none\n"),
    }
    out.push('\n');

    if report.open_reviews.is_empty() {
        out.push_str("No open reviews.\n");
    } else {
        out.push_str(&format!(
            "{}\n\n",
            review_format::format_section_heading("Open Reviews")
        ));
        for row in &report.open_reviews {
            out.push_str(&format!(
                "  - {} ({}): {}/{} items, {} findings\n",
                row.id, row.artifact, row.completed, row.total, row.findings
            ));
        }
    }
    out
}

#[derive(Debug, Clone, Serialize)]
struct IdentityShowOutput {
    identity: AgentIdentity,
    capabilities: Vec<crate::identity::Capability>,
}

fn format_identity_text(identity: &AgentIdentity, vocab: &CapabilityVocabulary) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        review_format::format_section_heading("Identity")
    ));
    out.push_str(&format!("  Name: {}\n", identity.name));
    out.push_str(&format!("  Version: {}\n", identity.version));
    out.push_str(&format!("  Domain: {}\n", identity.domain));
    out.push_str(&format!("  Purpose: {}\n", identity.purpose));
    if vocab.capabilities.is_empty() {
        out.push_str("\nNo capabilities declared.\n");
    } else {
        out.push_str(&format!(
            "\n{}\n\n",
            review_format::format_section_heading("Capabilities")
        ));
        for capability in &vocab.capabilities {
            match &capability.description {
                Some(description) => {
                    out.push_str(&format!("  - {}: {}\n", capability.label, description))
                }
                None => out.push_str(&format!("  - {}\n", capability.label)),
            }
        }
    }
    out
}

/// Scaffold an agent root: identity, starter capabilities, default config.
fn init_agent(root: &Path, force: bool, list: bool) -> Result<CommandOutput, AgetError> {
    let aget = aget_dir(root);
    let config = AgetConfig::default();
    let store = IdentityStore::new(aget.clone(), &config.identity);
    let config_file = aget.join("config.toml");

    if list {
        let mut out = String::new();
        out.push_str(&format!("Files for agent root {}:\n", root.display()));
        out.push_str(&format!("  {}\n", store.identity_path().display()));
        out.push_str(&format!("  {}\n", store.capabilities_path().display()));
        out.push_str(&format!("  {}\n", config_file.display()));
        return Ok(CommandOutput::ok(out));
    }

    if store.identity_path().exists() && !force {
        return Err(AgetError::IdentityError(format!(
            "Identity already exists at {} (use --force to overwrite)",
            store.identity_path().display()
        )));
    }

    store.save(&AgentIdentity::placeholder())?;
    store.save_capabilities(&CapabilityVocabulary::starter())?;
    let config_text = toml::to_string_pretty(&config)
        .map_err(|e| AgetError::ConfigError(format!("Failed to serialize config: {}", e)))?;
    std::fs::write(&config_file, config_text)
        .map_err(|e| AgetError::storage_io(&config_file.display().to_string(), e))?;

    info!(root = %root.display(), "agent root initialized");
    let mut out = String::new();
    out.push_str(&format!("Initialized agent root at {}\n", root.display()));
    out.push_str(&format!("  Identity: {}\n", store.identity_path().display()));
    out.push_str(&format!(
        "  Capabilities: {}\n",
        store.capabilities_path().display()
    ));
    out.push_str(&format!("  Config: {}\n", config_file.display()));
    out.push_str("Edit the identity file to name your agent.\n");
    Ok(CommandOutput::ok(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_context_requires_agent_root() {
        let temp = tempfile::tempdir().unwrap();
        assert!(CliContext::new(temp.path(), None).is_err());
    }

    fn sandboxed_context(root: &Path) -> CliContext {
        CliContext::with_config(root.to_path_buf(), AgetConfig::default())
    }

    #[test]
    fn test_init_then_wake() {
        let temp = tempfile::tempdir().unwrap();
        init_agent(temp.path(), false, false).unwrap();

        let ctx = sandboxed_context(temp.path());
        let output = ctx
            .execute(&Commands::Wake {
                format: OutputFormat::Text,
            })
            .unwrap();
        assert_eq!(output.exit_code, 0);
        assert!(output.text.contains("SESSION WAKE"));
    }

    #[test]
    fn test_init_twice_requires_force() {
        let temp = tempfile::tempdir().unwrap();
        init_agent(temp.path(), false, false).unwrap();
        assert!(init_agent(temp.path(), false, false).is_err());
        assert!(init_agent(temp.path(), true, false).is_ok());
    }

    #[test]
    fn test_init_list_writes_nothing() {
        let temp = tempfile::tempdir().unwrap();
        let output = init_agent(temp.path(), false, true).unwrap();
        assert!(output.text.contains("identity.toml"));
        assert!(!temp.path().join(".aget").exists());
    }

    #[test]
    fn test_review_approve_exit_code_reflects_gate() {
        let temp = tempfile::tempdir().unwrap();
        init_agent(temp.path(), false, false).unwrap();
        let ctx = sandboxed_context(temp.path());

        ctx.execute(&Commands::Review {
            command: ReviewCommands::Start {
                artifact: "spec.md".to_string(),
                item: vec!["read".to_string()],
            },
        })
        .unwrap();

        let denied = ctx
            .execute(&Commands::Review {
                command: ReviewCommands::Approve { review: None },
            })
            .unwrap();
        assert_eq!(denied.exit_code, 1);
        assert!(denied.text.contains("DENIED"));

        ctx.execute(&Commands::Review {
            command: ReviewCommands::Check {
                label: "read".to_string(),
                review: None,
            },
        })
        .unwrap();

        let approved = ctx
            .execute(&Commands::Review {
                command: ReviewCommands::Approve { review: None },
            })
            .unwrap();
        assert_eq!(approved.exit_code, 0);
    }

    #[test]
    fn test_status_without_session() {
        let temp = tempfile::tempdir().unwrap();
        init_agent(temp.path(), false, false).unwrap();
        let ctx = sandboxed_context(temp.path());
        let output = ctx
            .execute(&Commands::Status {
                format: OutputFormat::Text,
            })
            .unwrap();
        assert!(output.text.contains("Session: none"));
        assert!(output.text.contains("No open reviews."));
    }
}
