//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success (including no-op mutations)      |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, bad text)     |
//! | 3-9     | table            | Table file load/save codes               |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use pairgrid_io::StoreError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, text that cannot be stored.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Table (3-9)
// =============================================================================

/// Table file missing or unreadable.
pub const EXIT_TABLE_READ: u8 = 3;

/// Table file is not valid pair-table text.
pub const EXIT_TABLE_FORMAT: u8 = 4;

/// The change was applied but the table file could not be rewritten.
pub const EXIT_TABLE_PERSIST: u8 = 5;

/// `init` refused to overwrite an existing table file.
pub const EXIT_TABLE_EXISTS: u8 = 6;

/// Map a StoreError to its exit code.
pub fn store_exit_code(err: &StoreError) -> u8 {
    match err {
        StoreError::Read { .. } => EXIT_TABLE_READ,
        StoreError::Format { .. } => EXIT_TABLE_FORMAT,
        StoreError::Write { .. } => EXIT_TABLE_PERSIST,
        StoreError::AlreadyExists(_) => EXIT_TABLE_EXISTS,
    }
}
