//! Fresh text for generated cells.
//!
//! `Table::add_row` and `Table::reset` need new cell contents. Where that text
//! comes from is pluggable; the default draws random printable ASCII.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cell::INNER_DELIMITER;
use crate::table::OUTER_DELIMITER;

/// Length of generated text when nothing else is configured.
pub const DEFAULT_TEXT_LENGTH: usize = 5;

/// Supplies text for newly generated cells.
pub trait TextSource {
    fn next_text(&mut self) -> String;
}

impl<F: FnMut() -> String> TextSource for F {
    fn next_text(&mut self) -> String {
        self()
    }
}

/// Random printable ASCII (space through `~`), never containing either
/// delimiter, so generated cells always survive a save/load cycle.
#[derive(Debug)]
pub struct RandomText {
    len: usize,
    rng: StdRng,
}

impl RandomText {
    pub fn new(len: usize) -> Self {
        Self { len, rng: StdRng::from_entropy() }
    }

    /// Deterministic output for a given seed.
    pub fn seeded(len: usize, seed: u64) -> Self {
        Self { len, rng: StdRng::seed_from_u64(seed) }
    }
}

impl Default for RandomText {
    fn default() -> Self {
        Self::new(DEFAULT_TEXT_LENGTH)
    }
}

impl TextSource for RandomText {
    fn next_text(&mut self) -> String {
        let mut text = String::with_capacity(self.len);
        while text.len() < self.len {
            let ch = char::from(self.rng.gen_range(32u8..=126));
            if ch != INNER_DELIMITER && ch != OUTER_DELIMITER {
                text.push(ch);
            }
        }
        text
    }
}
