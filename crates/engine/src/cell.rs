use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Separates the two parts of a present cell (`left,right`).
pub const INNER_DELIMITER: char = ',';

/// Which half of a cell an edit or search hit refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Part {
    Left,
    Right,
}

impl Part {
    pub fn label(&self) -> &'static str {
        match self {
            Part::Left => "Left",
            Part::Right => "Right",
        }
    }
}

/// A present cell: two pieces of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub left: String,
    pub right: String,
}

impl Cell {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self { left: left.into(), right: right.into() }
    }

    pub fn part(&self, part: Part) -> &str {
        match part {
            Part::Left => &self.left,
            Part::Right => &self.right,
        }
    }

    pub fn set_part(&mut self, part: Part, text: impl Into<String>) {
        match part {
            Part::Left => self.left = text.into(),
            Part::Right => self.right = text.into(),
        }
    }

    /// Persisted form: `left,right`.
    pub fn render(&self) -> String {
        format!("{}{}{}", self.left, INNER_DELIMITER, self.right)
    }

    /// Sort order used inside a row: case-insensitive on `left + right`.
    ///
    /// This is deliberately not `Ord`; two cells that compare `Equal` here can
    /// still differ (`("A", "b")` vs `("a", "B")`).
    pub fn compare_text(&self, other: &Cell) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }

    fn sort_key(&self) -> String {
        let mut key = self.left.to_lowercase();
        key.push_str(&self.right.to_lowercase());
        key
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.left, INNER_DELIMITER, self.right)
    }
}

/// One column position in a row. Absent is not the same as a cell with two
/// empty parts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Slot {
    Present(Cell),
    #[default]
    Absent,
}

impl Slot {
    pub fn present(left: impl Into<String>, right: impl Into<String>) -> Self {
        Slot::Present(Cell::new(left, right))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Slot::Absent)
    }

    pub fn cell(&self) -> Option<&Cell> {
        match self {
            Slot::Present(cell) => Some(cell),
            Slot::Absent => None,
        }
    }

    pub fn cell_mut(&mut self) -> Option<&mut Cell> {
        match self {
            Slot::Present(cell) => Some(cell),
            Slot::Absent => None,
        }
    }
}

impl From<Cell> for Slot {
    fn from(cell: Cell) -> Self {
        Slot::Present(cell)
    }
}

impl From<Option<Cell>> for Slot {
    fn from(cell: Option<Cell>) -> Self {
        cell.map_or(Slot::Absent, Slot::Present)
    }
}
