pub mod cell;
pub mod coord;
pub mod table;
pub mod text_source;

pub use cell::{Cell, Part, Slot};
pub use coord::Coord;
pub use table::{SearchHit, SortOrder, Table};
pub use text_source::{RandomText, TextSource};
