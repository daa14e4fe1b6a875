//! CLI tool for weekgrid - edits class timetables stored as JSON files
//!
//! Usage:
//!   weekgrid_cli --class CS-A show
//!   weekgrid_cli --class CS-A add-practical --day Monday --block 0 --batch 1 Physics
//!   weekgrid_cli --class CS-A --data-dir ./data config-add batch 1
//!
//! Set `RUST_LOG=debug` for merge and mutation tracing on stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use weekgrid::editor::input::EntryForm;
use weekgrid::{
    ConfigKind, Entry, EntryKind, GridCell, JsonFileBackend, Projection, TimetableBackend,
    TimetableEditor,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "weekgrid_cli", about = "Weekly class timetable editor")]
struct Cli {
    /// Directory holding `{class}_timetable.json` and `{class}_config.json`.
    #[arg(long, default_value = "./timetables")]
    data_dir: String,
    #[arg(long)]
    class: String,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the timetable grid.
    Show {
        /// Print the render projection as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Put a subject in a one-period slot, replacing what it held.
    AddSubject {
        #[arg(long)]
        day: String,
        /// Time-slot row (0-9, break rows rejected).
        #[arg(long)]
        slot: usize,
        name: String,
    },
    /// Stack a specialization subject into a one-period slot.
    AddSpec {
        #[arg(long)]
        day: String,
        #[arg(long)]
        slot: usize,
        name: String,
    },
    /// Add a batch practical to a two-period block.
    AddPractical {
        #[arg(long)]
        day: String,
        /// Practical block (0-2).
        #[arg(long)]
        block: usize,
        #[arg(long)]
        batch: String,
        subject: String,
    },
    /// Remove one stacked entry, given its displayed text.
    Remove {
        #[arg(long)]
        day: String,
        #[arg(long)]
        slot: usize,
        entry: String,
    },
    /// Remove every entry from a cell.
    Clear {
        #[arg(long)]
        day: String,
        #[arg(long)]
        slot: usize,
    },
    /// Add a name to a config list (subject, specSubject, batch, practical).
    ConfigAdd { kind: ConfigKind, name: String },
    /// Delete every occurrence of a name from a config list.
    ConfigDelete { kind: ConfigKind, name: String },
    /// Print all config lists.
    ConfigList,
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

const COLUMN_WIDTH: usize = 24;

fn cell_text(cell: &GridCell) -> String {
    match cell {
        GridCell::Break { label, .. } => (*label).to_string(),
        GridCell::Slot {
            content, row_span, ..
        } => {
            let text = content
                .as_ref()
                .map(|c| {
                    c.entries()
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<_>>()
                        .join(" / ")
                })
                .unwrap_or_default();
            if *row_span > 1 {
                format!("{text} [x{row_span}]")
            } else {
                text
            }
        }
        GridCell::Absorbed { .. } => "^".to_string(),
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('~');
        cut
    }
}

fn print_table(projection: &Projection) {
    let mut header = format!("{:<15}", "Time");
    for day in projection.days {
        header.push_str(&format!(" | {:<COLUMN_WIDTH$}", day));
    }
    println!("{header}");
    println!("{}", "-".repeat(header.len()));

    for row in &projection.rows {
        let mut line = format!("{:<15}", row.label);
        for cell in &row.cells {
            line.push_str(&format!(
                " | {:<COLUMN_WIDTH$}",
                truncate(&cell_text(cell), COLUMN_WIDTH)
            ));
        }
        println!("{line}");
    }
}

fn print_config<B: TimetableBackend>(editor: &TimetableEditor<B>) {
    for kind in ConfigKind::ALL {
        println!("{kind}: {}", editor.config().names(kind).join(", "));
    }
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn one_hour_form(day: String, slot: usize, name: String, kind: EntryKind) -> EntryForm {
    let (subject, spec_subject) = match kind {
        EntryKind::SpecSubject => (None, Some(name)),
        EntryKind::Subject | EntryKind::Practical => (Some(name), None),
    };
    EntryForm {
        day: Some(day),
        option: Some(kind),
        subject,
        spec_subject,
        slot: Some(slot),
        ..EntryForm::default()
    }
}

fn run(editor: &mut TimetableEditor<JsonFileBackend>, command: Commands) -> Result<()> {
    let status = match command {
        Commands::Show { json } => {
            let session = editor.session().context("no class selected")?;
            let projection = session.projection();
            if json {
                println!("{}", serde_json::to_string_pretty(&projection)?);
            } else {
                print_table(&projection);
            }
            return Ok(());
        }
        Commands::AddSubject { day, slot, name } => {
            editor.submit(&one_hour_form(day, slot, name, EntryKind::Subject))?
        }
        Commands::AddSpec { day, slot, name } => {
            editor.submit(&one_hour_form(day, slot, name, EntryKind::SpecSubject))?
        }
        Commands::AddPractical {
            day,
            block,
            batch,
            subject,
        } => editor.submit(&EntryForm {
            day: Some(day),
            option: Some(EntryKind::Practical),
            practical_subject: Some(subject),
            batch: Some(batch),
            slot: Some(block),
            ..EntryForm::default()
        })?,
        Commands::Remove { day, slot, entry } => {
            editor.remove_entry(slot, &day, &Entry::from_text(&entry))?
        }
        Commands::Clear { day, slot } => editor.clear_cell(slot, &day)?,
        Commands::ConfigAdd { kind, name } => {
            editor.add_config(kind, &name)?;
            print_config(editor);
            return Ok(());
        }
        Commands::ConfigDelete { kind, name } => {
            editor.delete_config(kind, &name)?;
            print_config(editor);
            return Ok(());
        }
        Commands::ConfigList => {
            print_config(editor);
            return Ok(());
        }
    };
    eprintln!("{status}");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let backend = JsonFileBackend::new(&cli.data_dir);
    let mut editor = TimetableEditor::new(backend);
    editor
        .select_class(&cli.class)
        .with_context(|| format!("loading class {} from {}", cli.class, cli.data_dir))?;
    run(&mut editor, cli.command)
}
