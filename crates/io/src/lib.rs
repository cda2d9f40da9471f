// File I/O operations

pub mod error;
pub mod pairs;
pub mod store;

pub use error::{FormatError, StoreError};
pub use store::{Commit, TableStore};
