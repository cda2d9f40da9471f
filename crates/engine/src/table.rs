use serde::{Deserialize, Serialize};

use super::cell::{Cell, Part, Slot};
use super::coord::Coord;
use super::text_source::TextSource;

/// Separates columns within a row line.
pub const OUTER_DELIMITER: char = '/';

pub type Row = Vec<Slot>;

/// Direction for `Table::sort_row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// One part of one cell containing the search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub coord: Coord,
    pub part: Part,
    /// Non-overlapping occurrences of the query in that part.
    pub count: usize,
}

/// A sparse grid of text pairs.
///
/// Every row has the same number of slots. Mutations that cannot apply
/// (coordinate out of range, target absent or occupied) leave the table
/// untouched and return `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Row>,
}

impl Default for Table {
    fn default() -> Self {
        Self::empty()
    }
}

impl Table {
    /// The canonical empty table: one row holding one absent slot.
    pub fn empty() -> Self {
        Self { rows: vec![vec![Slot::Absent]] }
    }

    /// Build from rows that are already known to be uniform.
    ///
    /// Returns `None` if row lengths differ.
    pub fn from_rows(rows: Vec<Row>) -> Option<Self> {
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self { rows })
    }

    /// Dense `rows x cols` grid of freshly generated cells.
    pub fn generate(rows: usize, cols: usize, source: &mut impl TextSource) -> Self {
        let rows = (0..rows)
            .map(|_| (0..cols).map(|_| fresh_slot(source)).collect())
            .collect();
        Self { rows }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Width of row 0, or 0 for a table with no rows.
    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn is_out_of_bounds(&self, coord: Coord) -> bool {
        coord.row >= self.row_count() || coord.col >= self.column_count()
    }

    /// True only for an in-range slot that holds no cell.
    pub fn is_absent(&self, coord: Coord) -> bool {
        self.slot(coord).is_some_and(Slot::is_absent)
    }

    pub fn slot(&self, coord: Coord) -> Option<&Slot> {
        self.rows.get(coord.row)?.get(coord.col)
    }

    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.slot(coord)?.cell()
    }

    /// All present cells in row-major order.
    pub fn cells_iter(&self) -> impl Iterator<Item = (Coord, &Cell)> {
        self.rows.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter_map(move |(c, slot)| slot.cell().map(|cell| (Coord::new(r, c), cell)))
        })
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append a row at the current width. The first slot gets a fresh cell,
    /// the rest start absent.
    pub fn add_row(&mut self, source: &mut impl TextSource) -> bool {
        let row = (0..self.column_count())
            .map(|col| if col == 0 { fresh_slot(source) } else { Slot::Absent })
            .collect();
        self.rows.push(row);
        true
    }

    /// Sort the present cells of a row; absent slots always end up last, in
    /// either direction.
    pub fn sort_row(&mut self, row: usize, order: SortOrder) -> bool {
        let Some(slots) = self.rows.get_mut(row) else {
            log::debug!("sort_row: row {row} out of bounds");
            return false;
        };

        let (mut present, absent): (Vec<Slot>, Vec<Slot>) =
            std::mem::take(slots).into_iter().partition(|slot| !slot.is_absent());

        // Stable in both directions: ties keep their original order.
        present.sort_by(|a, b| {
            let ord = compare_slots(a, b);
            match order {
                SortOrder::Ascending => ord,
                SortOrder::Descending => ord.reverse(),
            }
        });

        present.extend(absent);
        *slots = present;
        true
    }

    /// Replace one part of a present cell. Text is stored as given; keeping it
    /// free of delimiters is up to whoever persists the table.
    pub fn edit_cell(&mut self, coord: Coord, part: Part, text: impl Into<String>) -> bool {
        match self.slot_mut(coord).and_then(Slot::cell_mut) {
            Some(cell) => {
                cell.set_part(part, text);
                true
            }
            None => {
                log::debug!("edit_cell: no cell at {coord}");
                false
            }
        }
    }

    /// Install a cell into an absent slot. Occupied slots are left alone.
    pub fn add_cell(&mut self, coord: Coord, left: impl Into<String>, right: impl Into<String>) -> bool {
        match self.slot_mut(coord) {
            Some(slot) if slot.is_absent() => {
                *slot = Slot::present(left, right);
                true
            }
            Some(_) => {
                log::debug!("add_cell: {coord} is occupied");
                false
            }
            None => {
                log::debug!("add_cell: {coord} out of bounds");
                false
            }
        }
    }

    /// Discard everything and generate a dense grid.
    ///
    /// `reset(0, _)` leaves a table with no rows; it renders to nothing and
    /// loads back as the canonical empty table.
    pub fn reset(&mut self, rows: usize, cols: usize, source: &mut impl TextSource) -> bool {
        *self = Self::generate(rows, cols, source);
        true
    }

    // =========================================================================
    // Reporting
    // =========================================================================

    /// Count occurrences of `query` in every present cell, left part before
    /// right. An empty query finds nothing.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        if query.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for (coord, cell) in self.cells_iter() {
            for part in [Part::Left, Part::Right] {
                let count = cell.part(part).matches(query).count();
                if count > 0 {
                    hits.push(SearchHit { coord, part, count });
                }
            }
        }
        hits
    }

    fn slot_mut(&mut self, coord: Coord) -> Option<&mut Slot> {
        self.rows.get_mut(coord.row)?.get_mut(coord.col)
    }
}

fn fresh_slot(source: &mut impl TextSource) -> Slot {
    let left = source.next_text();
    let right = source.next_text();
    Slot::present(left, right)
}

fn compare_slots(a: &Slot, b: &Slot) -> std::cmp::Ordering {
    match (a, b) {
        (Slot::Present(a), Slot::Present(b)) => a.compare_text(b),
        // sort_row only ever compares present slots
        _ => std::cmp::Ordering::Equal,
    }
}
