// PairGrid CLI - operations on a file-backed table of text pairs
// One invocation = one operation; every change is written back immediately.

mod display;
mod exit_codes;
mod util;

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};

use pairgrid_config::Settings;
use pairgrid_engine::{Coord, Part, RandomText, SortOrder};
use pairgrid_io::{Commit, StoreError, TableStore};

use exit_codes::{store_exit_code, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "pgrid")]
#[command(about = "Sparse table of text pairs, stored as a flat text file")]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    /// Table file (default: settings "table.path", then ./table.txt)
    #[arg(long, short = 'f', global = true, env = "PAIRGRID_FILE")]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new table file filled with generated cells
    #[command(after_help = "\
Examples:
  pgrid init
  pgrid -f scores.txt init --rows 5 --cols 2")]
    Init {
        /// Number of rows (default: settings "reset.rows")
        #[arg(long)]
        rows: Option<usize>,

        /// Number of columns (default: settings "reset.cols")
        #[arg(long)]
        cols: Option<usize>,
    },

    /// Print the table, absent cells shown with a placeholder
    Show {
        /// Text shown for absent cells (default: settings "display.nullPlaceholder")
        #[arg(long)]
        placeholder: Option<String>,

        /// Pad columns to a common width
        #[arg(long)]
        aligned: bool,

        /// Widest a column may get with --aligned
        #[arg(long, default_value_t = 24)]
        max_width: usize,
    },

    /// Print row and column counts
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Count occurrences of text in every cell part
    Search {
        /// Text to look for (case-sensitive)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Append a row: first cell generated, the rest absent
    AddRow,

    /// Sort the present cells of a row; absent cells move to the end
    SortRow {
        /// Row index (0-based)
        row: usize,

        /// Sort descending instead of ascending
        #[arg(long)]
        desc: bool,
    },

    /// Replace the left or right part of an existing cell
    #[command(after_help = "\
Examples:
  pgrid edit 0 1 left apple
  pgrid edit 2 0 right ''")]
    Edit {
        /// Row index (0-based)
        row: usize,

        /// Column index (0-based)
        col: usize,

        /// Which part of the cell to replace
        part: PartArg,

        /// New text
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// Fill an absent cell; occupied cells are left alone
    AddCell {
        /// Row index (0-based)
        row: usize,

        /// Column index (0-based)
        col: usize,

        /// Left part
        #[arg(allow_hyphen_values = true)]
        left: String,

        /// Right part
        #[arg(allow_hyphen_values = true)]
        right: String,
    },

    /// Replace the whole table with a dense generated grid
    Reset {
        /// Number of rows (default: settings "reset.rows")
        rows: Option<usize>,

        /// Number of columns (default: settings "reset.cols")
        cols: Option<usize>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PartArg {
    Left,
    Right,
}

impl From<PartArg> for Part {
    fn from(arg: PartArg) -> Self {
        match arg {
            PartArg::Left => Part::Left,
            PartArg::Right => Part::Right,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let settings = Settings::load();
    let path = cli.file.unwrap_or_else(|| settings.effective_table_path());
    log::debug!("table file {}", path.display());

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: pgrid <command> [options]");
            eprintln!("       pgrid --help for more information");
            Ok(())
        }
        Some(Commands::Init { rows, cols }) => cmd_init(&path, rows, cols, &settings),
        Some(Commands::Show { placeholder, aligned, max_width }) => {
            cmd_show(&path, placeholder, aligned, max_width, &settings)
        }
        Some(Commands::Info { json }) => cmd_info(&path, json),
        Some(Commands::Search { query, json }) => cmd_search(&path, &query, json),
        Some(Commands::AddRow) => cmd_add_row(&path, &settings),
        Some(Commands::SortRow { row, desc }) => cmd_sort_row(&path, row, desc),
        Some(Commands::Edit { row, col, part, text }) => cmd_edit(&path, row, col, part.into(), text),
        Some(Commands::AddCell { row, col, left, right }) => cmd_add_cell(&path, row, col, left, right),
        Some(Commands::Reset { rows, cols }) => cmd_reset(&path, rows, cols, &settings),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Create error from a store error with the matching exit code.
    pub fn store(err: StoreError) -> Self {
        let code = store_exit_code(&err);
        let hint = match &err {
            StoreError::Read { source, .. } if source.kind() == io::ErrorKind::NotFound => {
                Some("create one with `pgrid init`".to_string())
            }
            StoreError::Format { .. } => {
                Some("rows are 'left,right' cells joined by '/', all with the same column count".to_string())
            }
            StoreError::AlreadyExists(_) => Some("use `pgrid reset` to regenerate it".to_string()),
            StoreError::Write { .. } => {
                Some("the change was applied in memory only; the file was not updated".to_string())
            }
            _ => None,
        };
        Self { code, message: err.to_string(), hint }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn open_store(path: &Path) -> Result<TableStore, CliError> {
    TableStore::open(path).map_err(CliError::store)
}

/// Turn a commit into the command result. No-ops succeed with a note.
fn finish(commit: Commit, noop_note: impl FnOnce() -> String) -> Result<(), CliError> {
    match commit {
        Commit::Persisted => Ok(()),
        Commit::Unchanged => {
            eprintln!("note: {}", noop_note());
            Ok(())
        }
        Commit::Failed(err) => Err(CliError::store(err)),
    }
}

fn write_stdout(text: &str) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(text.as_bytes()).map_err(|e| CliError::io(e.to_string()))
}

fn check_text(what: &str, text: &str) -> Result<(), CliError> {
    util::check_storable(what, text)
        .map_err(|msg| CliError::args(msg).with_hint("'/' separates columns and ',' separates cell parts"))
}

// ============================================================================
// init
// ============================================================================

fn cmd_init(path: &Path, rows: Option<usize>, cols: Option<usize>, settings: &Settings) -> Result<(), CliError> {
    let rows = rows.unwrap_or(settings.reset_rows);
    let cols = cols.unwrap_or(settings.reset_cols);
    let mut source = RandomText::new(settings.text_length);

    let store = TableStore::create(path, rows, cols, &mut source).map_err(CliError::store)?;
    eprintln!(
        "created {} ({} x {})",
        store.path().display(),
        store.table().row_count(),
        store.table().column_count()
    );
    Ok(())
}

// ============================================================================
// show / info / search
// ============================================================================

fn cmd_show(
    path: &Path,
    placeholder: Option<String>,
    aligned: bool,
    max_width: usize,
    settings: &Settings,
) -> Result<(), CliError> {
    let store = open_store(path)?;
    let placeholder = placeholder.as_deref().unwrap_or(&settings.null_placeholder);

    let text = if aligned {
        display::render_aligned(store.table(), placeholder, max_width)
    } else {
        display::render_table(store.table(), placeholder)
    };
    write_stdout(&text)
}

fn cmd_info(path: &Path, json: bool) -> Result<(), CliError> {
    let store = open_store(path)?;
    let table = store.table();

    let text = if json {
        let value = serde_json::json!({
            "file": store.path().display().to_string(),
            "rows": table.row_count(),
            "cols": table.column_count(),
            "cells": table.cells_iter().count(),
        });
        let mut out = serde_json::to_string_pretty(&value).map_err(|e| CliError::io(e.to_string()))?;
        out.push('\n');
        out
    } else {
        format!(
            "file:  {}\nrows:  {}\ncols:  {}\ncells: {}\n",
            store.path().display(),
            table.row_count(),
            table.column_count(),
            table.cells_iter().count()
        )
    };
    write_stdout(&text)
}

fn cmd_search(path: &Path, query: &str, json: bool) -> Result<(), CliError> {
    let store = open_store(path)?;
    let hits = store.search(query);

    if json {
        let mut out = serde_json::to_string_pretty(&hits).map_err(|e| CliError::io(e.to_string()))?;
        out.push('\n');
        return write_stdout(&out);
    }

    if hits.is_empty() {
        eprintln!("no matches for '{query}'");
        return Ok(());
    }
    write_stdout(&display::render_hits(&hits))
}

// ============================================================================
// mutations
// ============================================================================

fn cmd_add_row(path: &Path, settings: &Settings) -> Result<(), CliError> {
    let mut store = open_store(path)?;
    let mut source = RandomText::new(settings.text_length);
    finish(store.add_row(&mut source), || "row not added".to_string())
}

fn cmd_sort_row(path: &Path, row: usize, desc: bool) -> Result<(), CliError> {
    let mut store = open_store(path)?;
    let order = if desc { SortOrder::Descending } else { SortOrder::Ascending };
    let rows = store.table().row_count();
    finish(store.sort_row(row, order), || {
        format!("row {row} is out of range (table has {rows} rows); nothing sorted")
    })
}

fn cmd_edit(path: &Path, row: usize, col: usize, part: Part, text: String) -> Result<(), CliError> {
    let what = part.label().to_lowercase();
    check_text(&what, &text)?;

    let mut store = open_store(path)?;
    let coord = Coord::new(row, col);
    let reason = noop_reason(&store, coord, "is absent, nothing to edit");
    finish(store.edit_cell(coord, part, text), || reason)
}

fn cmd_add_cell(path: &Path, row: usize, col: usize, left: String, right: String) -> Result<(), CliError> {
    check_text("left", &left)?;
    check_text("right", &right)?;

    let mut store = open_store(path)?;
    let coord = Coord::new(row, col);
    let reason = noop_reason(&store, coord, "is already occupied, nothing added");
    finish(store.add_cell(coord, left, right), || reason)
}

fn cmd_reset(path: &Path, rows: Option<usize>, cols: Option<usize>, settings: &Settings) -> Result<(), CliError> {
    let rows = rows.unwrap_or(settings.reset_rows);
    let cols = cols.unwrap_or(settings.reset_cols);

    let mut store = open_store(path)?;
    let mut source = RandomText::new(settings.text_length);
    finish(store.reset(rows, cols, &mut source), || "table not reset".to_string())
}

/// Explain why a mutation at `coord` would do nothing.
fn noop_reason(store: &TableStore, coord: Coord, in_bounds_reason: &str) -> String {
    let table = store.table();
    if table.is_out_of_bounds(coord) {
        format!(
            "cell {coord} is out of range (table is {} x {}); nothing changed",
            table.row_count(),
            table.column_count()
        )
    } else {
        format!("cell {coord} {in_bounds_reason}")
    }
}
