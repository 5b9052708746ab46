//! Command-line front end for Jotter notebooks.

pub mod settings;

use clap::{Parser, Subcommand};
use jotter_core::{AutoSavePolicy, EditSession, JotterError, ListState, NoteList, NoteStore, Notebook};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

#[derive(Parser, Debug)]
#[command(name = "jotter", version, about = "Take, search and edit short notes")]
pub struct Cli {
    /// Notebook file to use instead of the one in settings.json.
    #[arg(long, global = true)]
    pub notebook: Option<PathBuf>,

    /// Log at debug level.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write default settings and create the notebook.
    Init,
    /// Add a note. A missing title becomes "Untitled".
    Add {
        #[arg(long, short)]
        title: Option<String>,
        /// Note body.
        content: Option<String>,
    },
    /// List notes whose title or content contains QUERY (case-insensitive).
    List { query: Option<String> },
    /// Print one note.
    Show { id: String },
    /// Replace the title and/or content of a note.
    Edit {
        id: String,
        #[arg(long, short)]
        title: Option<String>,
        #[arg(long, short)]
        content: Option<String>,
    },
    /// Delete one note.
    Delete { id: String },
    /// Delete every note in the notebook.
    Clear {
        /// Skip the confirmation requirement.
        #[arg(long, short)]
        yes: bool,
    },
    /// Show the most recent changes to the notebook.
    History {
        /// Only show operations of this type (e.g. UpdateNote).
        #[arg(long = "type")]
        op_type: Option<String>,
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] JotterError),
    #[error("{0}")]
    Settings(String),
    #[error("output error: {0}")]
    Output(#[from] std::io::Error),
    #[error("refusing to delete {0} notes without --yes")]
    NotConfirmed(usize),
    #[error("`{0}` does not run against an open notebook")]
    NotANotebookCommand(&'static str),
}

pub type CliResult<T> = std::result::Result<T, CliError>;

/// Parses arguments, runs the command and returns the process exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();
    let (settings, settings_warning) = settings::load_settings();
    init_logging(&settings.log_level, cli.verbose);
    if let Some(warning) = settings_warning {
        log::warn!("{warning}");
    }

    let notebook_path = cli
        .notebook
        .clone()
        .unwrap_or_else(|| PathBuf::from(&settings.notebook_path));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = match cli.command {
        Commands::Init => init(
            &settings,
            &settings::settings_file_path(),
            &notebook_path,
            &mut out,
        ),
        command => Notebook::open_or_create(&notebook_path)
            .map_err(CliError::from)
            .and_then(|mut notebook| execute(command, &mut notebook, &mut out)),
    };

    match result {
        Ok(()) => 0,
        Err(err) => {
            log::debug!("command failed: {err:?}");
            match &err {
                CliError::Core(core) => eprintln!("error: {}", core.user_message()),
                other => eprintln!("error: {other}"),
            }
            1
        }
    }
}

fn init_logging(level: &str, verbose: bool) {
    let level = if verbose { "debug" } else { level };
    // A second init (e.g. from tests) is harmless; keep the first logger.
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .try_init();
}

/// Writes `settings` to `settings_path` unless a file is already there, then
/// opens or creates the notebook.
pub fn init(
    settings: &settings::AppSettings,
    settings_path: &Path,
    notebook_path: &Path,
    out: &mut dyn Write,
) -> CliResult<()> {
    if !settings_path.exists() {
        settings::save_settings_to(settings_path, settings).map_err(CliError::Settings)?;
        writeln!(out, "Wrote {}", settings_path.display())?;
    }
    let notebook = Notebook::open_or_create(notebook_path)?;
    writeln!(
        out,
        "Notebook {} ({} notes)",
        notebook_path.display(),
        notebook.count_notes()?
    )?;
    Ok(())
}

/// Runs a notebook command, writing human-readable output to `out`.
///
/// `init` works on files rather than an open notebook and goes through
/// [`init`] instead.
pub fn execute(command: Commands, notebook: &mut Notebook, out: &mut dyn Write) -> CliResult<()> {
    match command {
        Commands::Init => Err(CliError::NotANotebookCommand("init")),
        Commands::Add { title, content } => {
            let note = notebook.add(title.as_deref().unwrap_or(""), content.as_deref().unwrap_or(""))?;
            writeln!(out, "{}", note.id)?;
            Ok(())
        }
        Commands::List { query } => {
            let mut list = NoteList::new();
            list.refresh(&*notebook)?;
            list.set_query(query.as_deref().unwrap_or(""));
            match list.state() {
                ListState::Loading => writeln!(out, "Loading…")?,
                ListState::Empty => writeln!(out, "No notes found")?,
                ListState::Populated(notes) => {
                    for note in notes {
                        writeln!(out, "{}\t{}\t{}", note.id, note.title, preview(&note.content))?;
                    }
                }
            }
            Ok(())
        }
        Commands::Show { id } => {
            let note = notebook.get(&id)?;
            writeln!(out, "{}", note.title)?;
            writeln!(out, "modified {}", format_timestamp(note.modified_at))?;
            writeln!(out)?;
            writeln!(out, "{}", note.content)?;
            Ok(())
        }
        Commands::Edit { id, title, content } => {
            let note = notebook.get(&id)?;
            let mut session = EditSession::new(note, AutoSavePolicy::default());
            let now = Instant::now();
            if let Some(title) = title {
                session.set_title(notebook, &title, now)?;
            }
            if let Some(content) = content {
                session.set_content(notebook, &content, now)?;
            }
            if session.flush(notebook)? {
                writeln!(out, "Saved {}", session.note_id())?;
            } else {
                writeln!(out, "No changes")?;
            }
            Ok(())
        }
        Commands::Delete { id } => {
            if notebook.delete_by_id(&id)? {
                writeln!(out, "Deleted {id}")?;
            } else {
                writeln!(out, "No note with id {id}")?;
            }
            Ok(())
        }
        Commands::Clear { yes } => {
            let count = notebook.count_notes()?;
            if !yes && count > 0 {
                return Err(CliError::NotConfirmed(count));
            }
            let deleted = notebook.delete_all()?;
            writeln!(out, "Deleted {deleted} notes")?;
            Ok(())
        }
        Commands::History { op_type, limit } => {
            let ops = notebook.list_operations(op_type.as_deref(), None, None)?;
            for op in ops.into_iter().take(limit) {
                writeln!(
                    out,
                    "{}\t{}\t{}",
                    format_timestamp(op.timestamp),
                    op.operation_type,
                    op.note_id.unwrap_or_else(|| "-".to_string())
                )?;
            }
            Ok(())
        }
    }
}

/// First line of `content`, shortened to 60 characters.
fn preview(content: &str) -> String {
    const MAX_CHARS: usize = 60;
    let first_line = content.lines().next().unwrap_or("");
    if first_line.chars().count() > MAX_CHARS {
        let cut: String = first_line.chars().take(MAX_CHARS).collect();
        format!("{cut}…")
    } else {
        first_line.to_string()
    }
}

fn format_timestamp(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| ts.to_string())
}
