use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::Level;

use crate::clipboard::copy_to_clipboard;
use crate::config::{CONFIG_FILE_NAMES, IntegrationKind, Workspace};
use crate::context;
use crate::integrations::AdapterRegistry;
use crate::session_log::{RECENT_WINDOW_DAYS, SessionLogStore};
use crate::telemetry::init_tracing;
use crate::templates::{self, DEFAULT_TEMPLATE, TEMPLATES};
use crate::utils::{format_age, format_path_with_tilde, sanitize_for_display};
use crate::workflow::{Notifier, SessionUpdater, UpdateOutcome, WorkflowStatus};

/// `logs --recent` window
const RECENT_LOG_DAYS: i64 = 7;
const SUMMARY_DISPLAY_CHARS: usize = 80;

#[derive(Parser)]
#[command(name = "contextflow")]
#[command(version)]
#[command(
    about = "Keep AI sessions in context: session logs, workflow checks and context snapshots",
    long_about = None
)]
pub struct Cli {
    /// Project directory (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit log lines as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a ContextFlow project from a template
    Init {
        #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
        template: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Replace an existing contextflow.toml
        #[arg(long)]
        force: bool,
    },
    /// Show or regenerate the AI context for new sessions
    Context {
        /// Print the quick context
        #[arg(short, long)]
        quick: bool,
        /// Regenerate the context files first
        #[arg(short, long)]
        refresh: bool,
        /// Copy the quick context to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Record an end-of-session summary
    Update { summary: String },
    /// List session logs, newest first
    Logs {
        /// Only logs from the last 7 days
        #[arg(short, long)]
        recent: bool,
        #[arg(short, long, default_value_t = 10)]
        count: usize,
    },
    /// Show project configuration, session statistics and maintenance state
    Status {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// List available project templates
    Templates,
    /// Archive or delete session logs past the retention window
    Cleanup,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs, if cli.verbose { Level::DEBUG } else { Level::WARN });

    let project_dir = match &cli.directory {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().context("Failed to determine current directory")?,
    };

    match cli.command {
        Some(Commands::Init { template, name, description, force }) => {
            init_project(&project_dir, &template, &name, &description, force)
        }
        Some(Commands::Context { quick, refresh, copy }) => {
            show_context(&project_dir, quick, refresh, copy)
        }
        Some(Commands::Update { summary }) => update_session(&project_dir, &summary),
        Some(Commands::Logs { recent, count }) => show_logs(&project_dir, recent, count),
        Some(Commands::Status { json }) => show_status(&project_dir, json),
        Some(Commands::Templates) => {
            list_templates();
            Ok(())
        }
        Some(Commands::Cleanup) => cleanup_logs(&project_dir),
        None => {
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn load_workspace(project_dir: &Path) -> Result<Workspace> {
    Workspace::discover(project_dir)
        .with_context(|| format!("Failed to load configuration for {}", project_dir.display()))
}

fn init_project(
    project_dir: &Path,
    template: &str,
    name: &str,
    description: &str,
    force: bool,
) -> Result<()> {
    let existing = CONFIG_FILE_NAMES.iter().map(|n| project_dir.join(n)).find(|p| p.exists());
    if let Some(path) = existing
        && !force
    {
        bail!("{} already exists (use --force to replace it)", path.display());
    }

    fs::create_dir_all(project_dir)
        .with_context(|| format!("Failed to create project directory {}", project_dir.display()))?;
    println!("Initializing ContextFlow project: {}", name);

    let workspace = templates::create_project(project_dir, template, name, description)?;
    let store = SessionLogStore::for_workspace(&workspace);
    context::regenerate(&workspace, &store).context("Failed to generate initial context")?;

    println!("Project initialized with template: {}", template);
    if let Some(path) = &workspace.config_path {
        println!("Configuration saved to: {}", format_path_with_tilde(path));
    }
    println!();
    println!("Next steps:");
    println!("1. Review and customize contextflow.toml");
    println!("2. Configure your integrations (Jira, Confluence, ...)");
    println!("3. Start your first session with: contextflow context --quick");
    Ok(())
}

fn show_context(project_dir: &Path, quick: bool, refresh: bool, copy: bool) -> Result<()> {
    let workspace = load_workspace(project_dir)?;

    if refresh {
        println!("Refreshing AI context...");
        let store = SessionLogStore::for_workspace(&workspace);
        let refreshed = context::regenerate(&workspace, &store)?;
        println!("Quick context: {}", format_path_with_tilde(&refreshed.files.quick));
        println!("Full context: {}", format_path_with_tilde(&refreshed.files.full));
    }

    let quick_path = workspace.quick_context_path();
    if quick || copy {
        if !quick_path.exists() {
            if copy {
                bail!("Quick context file not found. Run: contextflow context --refresh");
            }
            println!("Quick context file not found. Run: contextflow context --refresh");
            return Ok(());
        }
        let text = fs::read_to_string(&quick_path)
            .with_context(|| format!("Failed to read {}", quick_path.display()))?;

        if quick {
            println!("{}", text.trim_end());
            println!();
        }
        if copy {
            copy_to_clipboard(&text)?;
            println!("Quick context copied to clipboard");
        } else {
            println!("Copy the above content and paste it into your new AI session");
        }
        return Ok(());
    }

    let full_path = workspace.full_context_path();
    if full_path.exists() {
        println!("Full context available at: {}", format_path_with_tilde(&full_path));
        println!("Use --quick for copy-paste ready context");
    } else {
        println!("Context files not found. Run: contextflow context --refresh");
    }
    Ok(())
}

/// Prints compliance feedback; errors go to stderr
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&mut self, errors: &[String], warnings: &[String], suggestions: &[String]) {
        if !errors.is_empty() {
            eprintln!("Session update validation failed:");
            for error in errors {
                eprintln!("  - {}", error);
            }
        }
        if !warnings.is_empty() {
            println!("Session update warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
        if !suggestions.is_empty() {
            println!("Session update suggestions:");
            for suggestion in suggestions {
                println!("  - {}", suggestion);
            }
        }
    }
}

fn update_session(project_dir: &Path, summary: &str) -> Result<()> {
    let workspace = load_workspace(project_dir)?;

    if !workspace.config.workflow.mandatory_session_updates {
        println!("Session updates are not mandatory for this project");
        println!(
            "Enable with: mandatory_session_updates = true under [workflow] in contextflow.toml"
        );
        return Ok(());
    }

    println!("Updating session documentation...");
    let mut updater = SessionUpdater::new(&workspace, AdapterRegistry::new());
    let report = match updater.update(summary, &mut ConsoleNotifier)? {
        UpdateOutcome::Rejected => {
            bail!("Session documentation update failed: summary does not meet workflow rules")
        }
        UpdateOutcome::Recorded(report) => report,
    };

    println!("Session documentation updated successfully!");
    println!("Session log: {}", format_path_with_tilde(&report.record.path));
    if !report.update.categories.is_empty() {
        println!("Categories: {}", report.update.category_list());
    }
    if !report.adapters.is_empty() {
        println!("Trackers updated: {}/{}", report.adapter_successes(), report.adapters.len());
        for failure in report.adapter_failures() {
            if let Err(e) = &failure.result {
                println!("  - {}", e);
            }
        }
    }
    if report.context.is_some() {
        println!("AI context refreshed");
    }

    let stats = updater.store().statistics()?;
    println!("Total sessions: {}", stats.total_sessions);
    println!("Recent sessions ({} days): {}", RECENT_WINDOW_DAYS, stats.recent_sessions);
    Ok(())
}

fn show_logs(project_dir: &Path, recent: bool, count: usize) -> Result<()> {
    let workspace = load_workspace(project_dir)?;
    let store = SessionLogStore::for_workspace(&workspace);

    let records = if recent { store.modified_within(RECENT_LOG_DAYS)? } else { store.list()? };
    if records.is_empty() {
        println!("No session logs found");
        return Ok(());
    }

    println!("Session Logs");
    println!("============");
    for record in records.iter().take(count) {
        let summary = if record.summary.is_empty() {
            "No summary".to_string()
        } else {
            sanitize_for_display(&record.summary, SUMMARY_DISPLAY_CHARS)
        };
        println!("{}  {}", record.display_date(), summary);
    }
    println!();
    println!("Log directory: {}", format_path_with_tilde(store.log_dir()));
    Ok(())
}

fn show_status(project_dir: &Path, json: bool) -> Result<()> {
    let workspace = load_workspace(project_dir)?;
    let store = SessionLogStore::for_workspace(&workspace);
    let status = WorkflowStatus::collect(&workspace, &store)?;
    let config = &workspace.config;

    if json {
        let report = serde_json::json!({
            "project": config.project,
            "integrations": config.integrations.enabled(),
            "config_file": workspace.config_path,
            "status": status,
            "recommendations": status.recommendations(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Project Information");
    println!("===================");
    println!("Name: {}", config.project.name);
    println!("Type: {}", config.project.project_type);
    println!("Version: {}", config.project.version);
    println!("Description: {}", config.project.description);
    println!();

    println!("Integrations");
    println!("============");
    for kind in IntegrationKind::ALL {
        let state = if config.integrations.is_enabled(kind) { "Enabled" } else { "Disabled" };
        println!("{:<12} {}", kind.display_name(), state);
    }
    println!();

    let settings = &status.configuration;
    println!("Workflow Configuration");
    println!("======================");
    println!("Mandatory Updates: {}", if settings.mandatory_updates { "Yes" } else { "No" });
    println!(
        "Work Item References: {}",
        if settings.require_work_items { "Required" } else { "Optional" }
    );
    println!("Auto Refresh Context: {}", if settings.auto_refresh { "Yes" } else { "No" });
    println!("Session Log Retention: {} days", settings.retention_days);
    println!();

    println!("File Locations");
    println!("==============");
    println!("Context Directory: {}", format_path_with_tilde(&workspace.context_dir()));
    println!("Session Logs: {}", format_path_with_tilde(&workspace.session_log_dir()));
    match &workspace.config_path {
        Some(path) => println!("Config File: {}", format_path_with_tilde(path)),
        None => println!("Config File: Not found"),
    }
    println!();

    let stats = &status.statistics;
    println!("Session Statistics");
    println!("==================");
    println!("Total Sessions: {}", stats.total_sessions);
    println!("Recent Sessions ({} days): {}", RECENT_WINDOW_DAYS, stats.recent_sessions);
    println!("Average per Week: {:.1}", stats.avg_sessions_per_week);
    if let Some(last) = &stats.last_session {
        println!("Last Session: {} ({})", last.format("%Y-%m-%d %H:%M"), format_age(last));
    }

    let recommendations = status.recommendations();
    if !recommendations.is_empty() {
        println!();
        println!("Recommendations");
        println!("===============");
        for recommendation in recommendations {
            println!("- {}", recommendation);
        }
    }
    Ok(())
}

fn list_templates() {
    println!("Available Project Templates");
    println!("===========================");
    for template in TEMPLATES {
        let integrations: Vec<&str> = template.integrations().iter().map(|k| k.as_str()).collect();
        println!("{:<22} {}", template.name, template.description);
        if !integrations.is_empty() {
            println!("{:<22} integrations: {}", "", integrations.join(", "));
        }
    }
    println!();
    println!("Use: contextflow init --template <template-name> --name <project-name>");
}

fn cleanup_logs(project_dir: &Path) -> Result<()> {
    let workspace = load_workspace(project_dir)?;
    let store = SessionLogStore::for_workspace(&workspace);
    let report = store.prune_expired(&workspace.config.workflow)?;

    if report.archived == 0 && report.deleted == 0 && report.errors.is_empty() {
        println!(
            "No session logs older than {} days",
            workspace.config.workflow.session_log_retention_days
        );
        return Ok(());
    }

    println!("Archived: {}", report.archived);
    println!("Deleted: {}", report.deleted);
    for error in &report.errors {
        eprintln!("  - {}", error);
    }
    if !report.errors.is_empty() {
        bail!("{} session log(s) could not be cleaned up", report.errors.len());
    }
    Ok(())
}
