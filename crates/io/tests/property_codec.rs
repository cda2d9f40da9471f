// Property-based tests for the pair-table text format.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use proptest::prelude::*;
use pairgrid_engine::table::Row;
use pairgrid_engine::{Slot, SortOrder, Table};
use pairgrid_io::pairs::{parse, render};
use pairgrid_io::FormatError;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

/// Cell text that can be persisted: no delimiters, no line breaks.
fn arb_text() -> impl Strategy<Value = String> {
    r"[a-zA-Z0-9 .;:!?_-]{0,8}"
}

/// Present most of the time, absent sometimes.
fn arb_slot() -> impl Strategy<Value = Slot> {
    prop_oneof![
        3 => (arb_text(), arb_text()).prop_map(|(l, r)| Slot::present(l, r)),
        1 => Just(Slot::Absent),
    ]
}

/// A uniform table of 1-4 columns and 1-5 rows.
///
/// Absent-only rows in a single-column table render as blank lines. Inside
/// the table those are rows, but blank lines at the end of the text are not,
/// so a multi-row single-column table keeps its last row present.
fn arb_table() -> impl Strategy<Value = Table> {
    (1usize..5, 1usize..6).prop_flat_map(|(width, height)| {
        prop::collection::vec(prop::collection::vec(arb_slot(), width), height).prop_map(
            move |mut rows: Vec<Row>| {
                if width == 1 && height > 1 && rows[height - 1][0].is_absent() {
                    rows[height - 1][0] = Slot::present("x", "y");
                }
                Table::from_rows(rows).unwrap()
            },
        )
    })
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn round_trip(table in arb_table()) {
        let text = render(&table);
        let parsed = parse(&text).unwrap();
        prop_assert_eq!(parsed, table);
    }

    #[test]
    fn render_ends_every_row_with_newline(table in arb_table()) {
        let text = render(&table);
        prop_assert!(text.ends_with('\n'));
        prop_assert_eq!(text.matches('\n').count(), table.row_count());
    }

    #[test]
    fn mismatched_widths_fail(
        a in 1usize..6,
        b in 1usize..6,
        extra_rows in 0usize..3,
    ) {
        prop_assume!(a != b);
        let line_a = vec!["l,r"; a].join("/");
        let line_b = vec!["l,r"; b].join("/");

        let mut text = String::new();
        for _ in 0..=extra_rows {
            text.push_str(&line_a);
            text.push('\n');
        }
        text.push_str(&line_b);
        text.push('\n');

        let err = parse(&text).unwrap_err();
        prop_assert_eq!(
            err,
            FormatError::ColumnCountMismatch { line: extra_rows + 2, expected: a, found: b }
        );
    }

    #[test]
    fn extra_inner_delimiters_fail(left in arb_text(), mid in arb_text(), right in arb_text()) {
        let token = format!("{left},{mid},{right}");
        let is_too_many = matches!(parse(&token), Err(FormatError::TooManyDelimiters { .. }));
        prop_assert!(is_too_many);
    }

    #[test]
    fn missing_inner_delimiter_fails(text in r"[a-z]{1,8}") {
        let is_missing = matches!(parse(&text), Err(FormatError::MissingDelimiter { .. }));
        prop_assert!(is_missing);
    }

    #[test]
    fn sort_keeps_absent_last_and_survives_reload(table in arb_table(), desc in any::<bool>()) {
        let order = if desc { SortOrder::Descending } else { SortOrder::Ascending };
        let mut sorted = table.clone();
        for row in 0..sorted.row_count() {
            sorted.sort_row(row, order);
        }

        for (before, after) in table.rows().iter().zip(sorted.rows()) {
            let present = before.iter().filter(|s| !s.is_absent()).count();
            prop_assert_eq!(after.len(), before.len());
            prop_assert!(after[..present].iter().all(|s| !s.is_absent()));
            prop_assert!(after[present..].iter().all(Slot::is_absent));
        }

        prop_assert_eq!(parse(&render(&sorted)).unwrap(), sorted);
    }
}
