//! File-backed table.
//!
//! `TableStore` owns the only copy of the table. It parses the backing file
//! once when opened, and after every mutation that actually changed something
//! it renders the whole table and overwrites the file.
//!
//! The overwrite is a plain truncate-and-write, not a write-to-temp-and-rename:
//! a crash mid-write can leave a truncated file. A failed write is reported
//! through [`Commit::Failed`] but the in-memory change is kept, so memory and
//! disk disagree until the next successful commit.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use pairgrid_engine::{Coord, Part, SearchHit, SortOrder, Table, TextSource};

use crate::error::StoreError;
use crate::pairs;

/// What happened to the backing file after a mutating call.
#[derive(Debug)]
#[must_use]
pub enum Commit {
    /// The operation was a no-op; the file was not touched.
    Unchanged,
    /// The table changed and the file was rewritten.
    Persisted,
    /// The table changed in memory but the file could not be rewritten.
    Failed(StoreError),
}

impl Commit {
    /// True if the in-memory table changed, whether or not it reached disk.
    pub fn changed(&self) -> bool {
        !matches!(self, Commit::Unchanged)
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self, Commit::Persisted)
    }
}

#[derive(Debug)]
pub struct TableStore {
    path: PathBuf,
    table: Table,
}

impl TableStore {
    /// Load and parse an existing table file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let text = fs::read_to_string(&path)
            .map_err(|source| StoreError::Read { path: path.clone(), source })?;
        let table = pairs::parse(&text)
            .map_err(|source| StoreError::Format { path: path.clone(), source })?;

        log::debug!(
            "loaded {} ({} rows x {} cols)",
            path.display(),
            table.row_count(),
            table.column_count()
        );
        Ok(Self { path, table })
    }

    /// Write a freshly generated `rows x cols` table to a new file.
    pub fn create(
        path: impl AsRef<Path>,
        rows: usize,
        cols: usize,
        source: &mut impl TextSource,
    ) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let table = Table::generate(rows, cols, source);

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| match source.kind() {
                ErrorKind::AlreadyExists => StoreError::AlreadyExists(path.clone()),
                _ => StoreError::Write { path: path.clone(), source },
            })?;
        file.write_all(pairs::render(&table).as_bytes())
            .map_err(|source| StoreError::Write { path: path.clone(), source })?;

        Ok(Self { path, table })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn add_row(&mut self, source: &mut impl TextSource) -> Commit {
        let changed = self.table.add_row(source);
        self.commit(changed)
    }

    pub fn sort_row(&mut self, row: usize, order: SortOrder) -> Commit {
        let changed = self.table.sort_row(row, order);
        self.commit(changed)
    }

    /// Replace one part of a present cell.
    ///
    /// Text holding a delimiter or a line break could not be read back, so it
    /// is refused and the call is a no-op.
    pub fn edit_cell(&mut self, coord: Coord, part: Part, text: impl Into<String>) -> Commit {
        let text = text.into();
        if !storable(&text) {
            return Commit::Unchanged;
        }
        let changed = self.table.edit_cell(coord, part, text);
        self.commit(changed)
    }

    /// Fill an absent slot. Refuses unstorable text like `edit_cell`.
    pub fn add_cell(
        &mut self,
        coord: Coord,
        left: impl Into<String>,
        right: impl Into<String>,
    ) -> Commit {
        let (left, right) = (left.into(), right.into());
        if !storable(&left) || !storable(&right) {
            return Commit::Unchanged;
        }
        let changed = self.table.add_cell(coord, left, right);
        self.commit(changed)
    }

    pub fn reset(&mut self, rows: usize, cols: usize, source: &mut impl TextSource) -> Commit {
        let changed = self.table.reset(rows, cols, source);
        self.commit(changed)
    }

    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        self.table.search(query)
    }

    fn commit(&self, changed: bool) -> Commit {
        if !changed {
            return Commit::Unchanged;
        }

        match fs::write(&self.path, pairs::render(&self.table)) {
            Ok(()) => {
                log::debug!("persisted {}", self.path.display());
                Commit::Persisted
            }
            Err(source) => {
                log::error!("data persistence failed for {}: {source}", self.path.display());
                Commit::Failed(StoreError::Write { path: self.path.clone(), source })
            }
        }
    }
}

fn storable(text: &str) -> bool {
    match pairs::unstorable_char(text) {
        Some(ch) => {
            log::warn!("refusing cell text containing {ch:?}");
            false
        }
        None => true,
    }
}
