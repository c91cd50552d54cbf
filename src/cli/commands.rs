use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};

use crate::config::{Settings, sessions_root};
use crate::discover::scan_sessions;
use crate::export::export_session;
use crate::filters::{SessionFilter, filter_sessions, sort_sessions};
use crate::models::SessionInfo;
use crate::render::RenderOptions;
use crate::tui::run_interactive;
use crate::utils::format_timestamp;

#[derive(Parser)]
#[command(name = "codex-session-export")]
#[command(version)]
#[command(about = "Browse Codex session logs and export them as Markdown", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Only sessions from this year
    #[arg(long)]
    pub year: Option<i32>,

    /// Only sessions from this month (1-12)
    #[arg(long)]
    pub month: Option<u32>,

    /// Only sessions whose working directory contains this text
    #[arg(long)]
    pub cwd: Option<String>,

    /// Only sessions whose repository URL or working directory contains this text
    #[arg(long)]
    pub repo: Option<String>,

    /// Free-text match against preview, working directory and repository
    #[arg(long)]
    pub query: Option<String>,
}

impl FilterArgs {
    fn to_filter(&self) -> SessionFilter {
        SessionFilter {
            year: self.year,
            month: self.month,
            cwd: self.cwd.clone(),
            repo: self.repo.clone(),
            query: self.query.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// List discovered sessions, newest first
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Maximum number of sessions to show
        #[arg(long, default_value_t = 50)]
        limit: usize,
    },

    /// Export sessions to Markdown files
    Export {
        /// Export this session file directly instead of discovering
        file: Option<PathBuf>,

        /// Select a discovered session by id
        #[arg(long)]
        session_id: Option<String>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Maximum number of sessions to export
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Write to this exact file (single session only)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Directory for derived output filenames
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Include tool calls and tool output
        #[arg(long)]
        include_tools: bool,

        /// Omit reasoning sections
        #[arg(long)]
        skip_reasoning: bool,

        /// Replace the home directory with ~ in rendered text
        #[arg(long)]
        redact_paths: bool,
    },

    /// Browse sessions interactively
    Tui,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::List { filters, limit }) => list_sessions(&filters, limit),
        Some(Commands::Export {
            file,
            session_id,
            filters,
            limit,
            out,
            out_dir,
            include_tools,
            skip_reasoning,
            redact_paths,
        }) => {
            let options = RenderOptions {
                include_tools,
                include_reasoning: !skip_reasoning,
                redact_home: redact_paths,
                home_path: if redact_paths { dirs::home_dir() } else { None },
            };
            export_sessions(file, session_id, &filters, limit, out, &out_dir, &options)
        }
        Some(Commands::Tui) | None => {
            let root = sessions_root()?;
            let sessions = sort_sessions(scan_sessions(&root));
            run_interactive(sessions, Settings::default())
        }
    }
}

fn discover_filtered(filters: &FilterArgs) -> Result<Vec<SessionInfo>> {
    let root = sessions_root()?;
    let sessions = scan_sessions(&root);
    Ok(sort_sessions(filter_sessions(&sessions, &filters.to_filter())))
}

fn list_sessions(filters: &FilterArgs, limit: usize) -> Result<()> {
    let sessions = discover_filtered(filters)?;
    if sessions.is_empty() {
        println!("No sessions found");
        return Ok(());
    }

    for info in sessions.iter().take(limit) {
        println!("{}", list_line(info));
    }
    if sessions.len() > limit {
        println!("... and {} more (use --limit to show them)", sessions.len() - limit);
    }
    Ok(())
}

fn list_line(info: &SessionInfo) -> String {
    let timestamp = match &info.started_at {
        Some(ts) => format_timestamp(ts),
        None => "unknown date".to_string(),
    };
    let cwd = info.cwd.as_deref().unwrap_or("-");
    let preview = info.preview.as_deref().unwrap_or("(no preview)");

    let mut line = format!("{} | {} | {} | {}", timestamp, info.label(), cwd, preview);
    if info.skip_count > 0 {
        line.push_str(&format!(" !{}", info.skip_count));
    }
    line
}

#[allow(clippy::too_many_arguments)]
fn export_sessions(
    file: Option<PathBuf>,
    session_id: Option<String>,
    filters: &FilterArgs,
    limit: usize,
    out: Option<PathBuf>,
    out_dir: &Path,
    options: &RenderOptions,
) -> Result<()> {
    if let Some(path) = file {
        let written = export_session(&path, options, out.as_deref(), out_dir)?;
        println!("Wrote {}", written.display());
        return Ok(());
    }

    let mut sessions = discover_filtered(filters)?;
    if let Some(id) = &session_id {
        sessions.retain(|s| s.session_id.as_deref() == Some(id.as_str()));
        if sessions.is_empty() {
            bail!("No session found with id {}", id);
        }
    }
    sessions.truncate(limit);

    if sessions.is_empty() {
        bail!("No sessions matched the given filters");
    }
    if out.is_some() && sessions.len() > 1 {
        bail!("--out requires a single session; {} matched", sessions.len());
    }

    for info in &sessions {
        let written = export_session(&info.path, options, out.as_deref(), out_dir)?;
        println!("Wrote {}", written.display());
    }
    Ok(())
}
