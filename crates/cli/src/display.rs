//! Console output for `show` and `search`.
//!
//! Absent slots are shown with a placeholder here. That placeholder is a
//! display convention only; the table file stores an absent slot as an empty
//! column.

use pairgrid_engine::table::OUTER_DELIMITER;
use pairgrid_engine::{SearchHit, Slot, Table};

use crate::util::{display_width, pad_right};

fn slot_text(slot: &Slot, placeholder: &str) -> String {
    match slot {
        Slot::Present(cell) => cell.render(),
        Slot::Absent => placeholder.to_string(),
    }
}

/// One line per row, columns joined by '/'.
pub(crate) fn render_table(table: &Table, placeholder: &str) -> String {
    let mut out = String::new();
    for row in table.rows() {
        let line: Vec<String> = row.iter().map(|slot| slot_text(slot, placeholder)).collect();
        out.push_str(&line.join(OUTER_DELIMITER.to_string().as_str()));
        out.push('\n');
    }
    out
}

/// Columns padded to a common width (capped at `max_width`), separated by " / ".
pub(crate) fn render_aligned(table: &Table, placeholder: &str, max_width: usize) -> String {
    let texts: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(|slot| slot_text(slot, placeholder)).collect())
        .collect();

    let widths: Vec<usize> = (0..table.column_count())
        .map(|col| {
            texts
                .iter()
                .map(|row| display_width(&row[col]))
                .max()
                .unwrap_or(0)
                .min(max_width)
        })
        .collect();

    let separator = format!(" {OUTER_DELIMITER} ");
    let mut out = String::new();
    for row in &texts {
        let padded: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(text, &width)| pad_right(text, width))
            .collect();
        out.push_str(padded.join(separator.as_str()).trim_end());
        out.push('\n');
    }
    out
}

pub(crate) fn render_hits(hits: &[SearchHit]) -> String {
    let mut out = String::new();
    for hit in hits {
        let noun = if hit.count == 1 { "occurrence" } else { "occurrences" };
        out.push_str(&format!(
            "@({},{}) {} Inner Cell, Found {} {}.\n",
            hit.coord.row,
            hit.coord.col,
            hit.part.label(),
            hit.count,
            noun
        ));
    }
    out
}
