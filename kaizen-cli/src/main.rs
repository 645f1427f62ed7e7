//! kaizen - daily journaling, 21-day protocol, and discipline score.
//!
//! Thin front end over the library crates. All state lives in a single
//! DuckDB file under the platform data directory unless `--data-dir`
//! points somewhere else.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use kaizen_backup::{
    export_backup, export_notes, export_score_log, import_backup, import_notes, import_score_log,
    to_json, ImportMode,
};
use kaizen_insights::{
    compute_score, displayed_streak, filter_notes, group_by_month, mark_today, month_title,
    summarize, today_target, verdict, weekly_counts, NoteFilter,
};
use kaizen_storage::{DuckDbStore, Repository};
use kaizen_types::{date_key, Note, NoteTag, ProtocolSetup};
use kaizen_vault::Vault;

/// kaizen - daily journaling, 21-day protocol, and discipline score
#[derive(Parser, Debug)]
#[command(name = "kaizen")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the data file (defaults to the platform data dir)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    // === Journal ===
    /// Reflective notes
    #[command(subcommand)]
    Note(NoteCommands),

    /// The 21-day target protocol
    #[command(subcommand)]
    Protocol(ProtocolCommands),

    /// Mark today's check-in and advance the streak
    Checkin,

    // === Derived views ===
    /// Today's discipline score with its breakdown
    Score,

    /// Notes grouped by month plus weekly counts
    Timeline,

    /// Tag frequencies, recurring words, and tone for the last two weeks
    Reflect,

    /// Today's focus card
    Target {
        /// Recompute even when today's card is already cached
        #[arg(long)]
        regenerate: bool,
    },

    /// Score history by day
    Calendar {
        /// Restrict to one month (yyyy-mm)
        #[arg(long)]
        month: Option<String>,
    },

    // === Vault ===
    /// PIN-gated private entries
    #[command(subcommand)]
    Vault(VaultCommands),

    // === Data management ===
    /// Write a backup (or a flat notes/scores file) to stdout or a file
    Export {
        /// Destination file; stdout when omitted
        file: Option<PathBuf>,

        /// What to export
        #[arg(long, value_enum, default_value_t = Payload::Backup)]
        what: Payload,
    },

    /// Read a backup (or a flat notes/scores file) and apply it
    Import {
        /// Source file
        file: PathBuf,

        /// How a combined backup is applied
        #[arg(long, value_enum, default_value_t = Mode::Merge)]
        mode: Mode,

        /// What the file contains
        #[arg(long, value_enum, default_value_t = Payload::Backup)]
        what: Payload,
    },

    /// Delete every stored record
    Reset {
        /// Skip the confirmation check
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand, Debug)]
enum NoteCommands {
    /// Add a note
    Add {
        /// Note text
        text: String,

        /// Tag: Motivation, Insight, Overthinking, Planning, "Emotional Release"
        #[arg(short, long, default_value = "Insight")]
        tag: String,
    },

    /// List notes, most recent first
    List {
        /// Case-insensitive substring match on the text
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only notes with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Delete a note by id
    Delete {
        /// Note id
        id: String,
    },
}

#[derive(Subcommand, Debug)]
enum ProtocolCommands {
    /// Start (or replace) the protocol
    Setup {
        /// The one priority for the next 21 days
        #[arg(long)]
        priority: String,

        /// Why it matters
        #[arg(long)]
        why: String,

        /// Daily action (repeatable)
        #[arg(long = "action")]
        actions: Vec<String>,

        /// Thing to avoid (repeatable)
        #[arg(long = "avoid")]
        avoid: Vec<String>,
    },

    /// Show the current protocol
    Show,
}

#[derive(Subcommand, Debug)]
enum VaultCommands {
    /// Set the PIN (once; min 4 characters)
    SetPin {
        pin: String,
    },

    /// Add an entry
    Add {
        /// Vault PIN
        #[arg(short, long)]
        pin: String,

        /// Entry text
        text: String,
    },

    /// List entries, most recent first
    List {
        /// Vault PIN
        #[arg(short, long)]
        pin: String,
    },

    /// Delete an entry by id
    Delete {
        /// Vault PIN
        #[arg(short, long)]
        pin: String,

        /// Entry id
        id: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Payload {
    Backup,
    Notes,
    Scores,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Merge,
    Replace,
}

impl From<Mode> for ImportMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Merge => ImportMode::Merge,
            Mode::Replace => ImportMode::Replace,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let repo = open_repository(cli.data_dir)?;
    let today = Local::now().date_naive();

    match cli.command {
        Commands::Note(cmd) => run_note(&repo, cmd),
        Commands::Protocol(cmd) => run_protocol(&repo, cmd),
        Commands::Checkin => run_checkin(&repo, today),
        Commands::Score => run_score(&repo, today),
        Commands::Timeline => run_timeline(&repo),
        Commands::Reflect => run_reflect(&repo, today),
        Commands::Target { regenerate } => run_target(&repo, today, regenerate),
        Commands::Calendar { month } => run_calendar(&repo, month),
        Commands::Vault(cmd) => run_vault(&repo, cmd),
        Commands::Export { file, what } => run_export(&repo, file, what),
        Commands::Import { file, mode, what } => run_import(&repo, file, mode, what),
        Commands::Reset { yes } => run_reset(&repo, yes),
    }
}

fn open_repository(data_dir: Option<PathBuf>) -> Result<Repository> {
    let dir = match data_dir {
        Some(dir) => dir,
        None => dirs::data_dir()
            .context("no platform data directory; pass --data-dir")?
            .join("kaizen"),
    };
    fs::create_dir_all(&dir)
        .with_context(|| format!("creating data directory {}", dir.display()))?;
    tracing::debug!(dir = %dir.display(), "data directory resolved");
    let store = DuckDbStore::open(&dir.join("kaizen.duckdb"))
        .with_context(|| format!("opening data file in {}", dir.display()))?;
    Ok(Repository::new(Arc::new(store)))
}

fn parse_tag(s: &str) -> Result<NoteTag> {
    NoteTag::from_str(s).with_context(|| {
        let all: Vec<&str> = NoteTag::ALL.iter().map(NoteTag::as_str).collect();
        format!("unknown tag {s:?}; expected one of: {}", all.join(", "))
    })
}

fn run_note(repo: &Repository, cmd: NoteCommands) -> Result<()> {
    match cmd {
        NoteCommands::Add { text, tag } => {
            let text = text.trim();
            if text.is_empty() {
                bail!("note text is empty");
            }
            let note = Note::new(text, parse_tag(&tag)?, Local::now());
            let (id, tag) = (note.id.clone(), note.tag);
            repo.add_note(note)?;
            println!("added note {id} [{tag}]");
        }
        NoteCommands::List { search, tag } => {
            let filter = NoteFilter {
                search,
                tag: tag.as_deref().map(parse_tag).transpose()?,
            };
            let notes = repo.load_notes()?;
            let shown = filter_notes(&notes, &filter);
            if shown.is_empty() {
                println!("no notes");
            }
            for note in shown {
                println!("{}  {}  [{}]  {}", note.id, note.date, note.tag, note.text);
            }
        }
        NoteCommands::Delete { id } => {
            if repo.delete_note(&id)? {
                println!("deleted note {id}");
            } else {
                bail!("no note with id {id}");
            }
        }
    }
    Ok(())
}

fn run_protocol(repo: &Repository, cmd: ProtocolCommands) -> Result<()> {
    match cmd {
        ProtocolCommands::Setup {
            priority,
            why,
            actions,
            avoid,
        } => {
            if priority.trim().is_empty() {
                bail!("priority is empty");
            }
            repo.save_protocol(&ProtocolSetup {
                priority,
                why,
                actions,
                avoid,
            })?;
            println!("protocol saved; the next 21 days have one priority");
        }
        ProtocolCommands::Show => match repo.load_protocol()? {
            Some(p) => {
                println!("Priority: {}", p.priority);
                println!("Why:      {}", p.why);
                for action in &p.actions {
                    println!("  do:    {action}");
                }
                for item in &p.avoid {
                    println!("  avoid: {item}");
                }
            }
            None => println!("no protocol set; run `kaizen protocol setup`"),
        },
    }
    Ok(())
}

fn run_checkin(repo: &Repository, today: NaiveDate) -> Result<()> {
    let outcome = mark_today(repo, today)?;
    if outcome.already_marked {
        println!("already checked in today (streak {})", outcome.streak);
    } else {
        println!("checked in; streak is now {}", outcome.streak);
    }
    Ok(())
}

fn run_score(repo: &Repository, today: NaiveDate) -> Result<()> {
    let breakdown = compute_score(repo, today)?;
    let streak = displayed_streak(repo.load_progress()?.as_ref(), today);

    let mark = |hit: bool| if hit { "x" } else { " " };
    println!("score for {}: {}/100", date_key(today), breakdown.total);
    println!("  [{}] protocol active       +20", mark(breakdown.protocol));
    println!("  [{}] checked in today      +30", mark(breakdown.progress));
    println!("  [{}] note written today    +20", mark(breakdown.note));
    println!("  [{}] vault entry today     +20", mark(breakdown.vault));
    println!("  [{}] consistency bonus     +10", mark(breakdown.bonus));
    println!("streak: {streak}");
    println!("{}", verdict(breakdown.total));
    Ok(())
}

fn run_timeline(repo: &Repository) -> Result<()> {
    let notes = repo.load_notes()?;
    if notes.is_empty() {
        println!("no notes yet");
        return Ok(());
    }

    for (month, group) in group_by_month(&notes) {
        println!("{} ({})", month_title(&month), group.len());
        for note in group {
            println!("  {}  [{}]  {}", note.date, note.tag, note.text);
        }
    }

    println!();
    println!("notes per week:");
    for (week, count) in weekly_counts(&notes) {
        println!("  week of {}: {}", date_key(week), count);
    }
    Ok(())
}

fn run_reflect(repo: &Repository, today: NaiveDate) -> Result<()> {
    let notes = repo.load_notes()?;
    let summary = summarize(&notes, today);

    println!("last 14 days: {} notes", summary.total);
    for (tag, count) in &summary.tag_frequency {
        println!("  {tag}: {count}");
    }
    if !summary.top_words.is_empty() {
        println!("recurring words: {}", summary.top_words.join(", "));
    }
    println!("tone: {}", summary.tone.as_str());
    println!("{}", summary.tone.suggestion());
    Ok(())
}

fn run_target(repo: &Repository, today: NaiveDate, regenerate: bool) -> Result<()> {
    let target = today_target(repo, today, regenerate)?;
    println!("{}", target.title);
    if let Some(subtitle) = &target.subtitle {
        println!("{subtitle}");
    }
    println!("{}", target.description);
    println!("Focus: {}", target.focus_area);
    println!("{}", target.motivation);
    Ok(())
}

fn run_calendar(repo: &Repository, month: Option<String>) -> Result<()> {
    let history = repo.load_score_history()?;
    let checked_in = streak_days(repo.load_progress()?.as_ref());

    let mut shown = 0;
    for (day, score) in &history {
        if month.as_deref().map_or(true, |m| day.starts_with(m)) {
            let mark = if checked_in.contains(day) { "*" } else { " " };
            println!("{day}  {score:>3} {mark}");
            shown += 1;
        }
    }
    if shown == 0 {
        println!("no recorded scores");
    } else {
        println!("(* = day covered by the current streak)");
    }
    Ok(())
}

/// The days covered by the current streak, newest to oldest.
fn streak_days(state: Option<&kaizen_types::ProgressState>) -> Vec<String> {
    let Some(state) = state else {
        return Vec::new();
    };
    let Some(last) = kaizen_types::parse_date_key(&state.last_check_in) else {
        return Vec::new();
    };
    (0..state.streak)
        .filter_map(|i| last.checked_sub_days(chrono::Days::new(u64::from(i))))
        .map(date_key)
        .collect()
}

fn run_vault(repo: &Repository, cmd: VaultCommands) -> Result<()> {
    let vault = Vault::new(repo.clone());
    match cmd {
        VaultCommands::SetPin { pin } => {
            vault.set_pin(&pin)?;
            println!("vault PIN set");
        }
        VaultCommands::Add { pin, text } => {
            let session = vault.unlock(&pin)?;
            let entry = session.add_entry(&text, Local::now())?;
            println!("added vault entry {}", entry.id);
        }
        VaultCommands::List { pin } => {
            let session = vault.unlock(&pin)?;
            let entries = session.entries()?;
            if entries.is_empty() {
                println!("vault is empty");
            }
            for entry in entries {
                println!("{}  {}  {}", entry.id, entry.date, entry.text);
            }
        }
        VaultCommands::Delete { pin, id } => {
            let session = vault.unlock(&pin)?;
            session.delete_entry(&id)?;
            println!("deleted vault entry {id}");
        }
    }
    Ok(())
}

fn run_export(repo: &Repository, file: Option<PathBuf>, what: Payload) -> Result<()> {
    let json = match what {
        Payload::Backup => to_json(&export_backup(repo)?)?,
        Payload::Notes => export_notes(repo)?,
        Payload::Scores => export_score_log(repo)?,
    };
    match file {
        Some(path) => {
            fs::write(&path, &json).with_context(|| format!("writing {}", path.display()))?;
            println!("exported to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn run_import(repo: &Repository, file: PathBuf, mode: Mode, what: Payload) -> Result<()> {
    let json = fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
    match what {
        Payload::Backup => {
            let preview = import_backup(repo, &json, mode.into())?;
            println!(
                "imported {} notes, {} score entries{} ({:?} mode)",
                preview.note_count,
                preview.score_entries,
                if preview.has_protocol {
                    ", and a protocol"
                } else {
                    ""
                },
                mode
            );
        }
        Payload::Notes => {
            let count = import_notes(repo, &json)?;
            println!("imported {count} notes (replaced existing)");
        }
        Payload::Scores => {
            let count = import_score_log(repo, &json)?;
            println!("imported {count} score entries (replaced existing)");
        }
    }
    Ok(())
}

fn run_reset(repo: &Repository, yes: bool) -> Result<()> {
    if !yes {
        bail!("this deletes every stored record; re-run with --yes to confirm");
    }
    repo.reset()?;
    println!("all records deleted");
    Ok(())
}
