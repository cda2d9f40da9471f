// Pair-table text format
//
//   left,right/left,right/
//   ,/a,b/c,
//
// One line per row. Columns are split on '/', an empty column is an absent
// slot, and a present cell always carries its ','. Blank lines at the end of
// the text are not rows; a blank line with rows after it is a row holding one
// absent slot.

use pairgrid_engine::cell::{Slot, INNER_DELIMITER};
use pairgrid_engine::table::{Row, Table, OUTER_DELIMITER};

use crate::error::FormatError;

/// Parse table text. Either the whole input is valid or nothing is returned.
pub fn parse(text: &str) -> Result<Table, FormatError> {
    let lines: Vec<&str> = text.lines().collect();
    let end = lines
        .iter()
        .rposition(|line| !line.trim().is_empty())
        .map_or(0, |last| last + 1);
    if end < lines.len() {
        log::debug!("ignoring {} trailing blank line(s)", lines.len() - end);
    }

    let mut rows: Vec<Row> = Vec::with_capacity(end);
    let mut width: Option<usize> = None;

    for (idx, line) in lines[..end].iter().enumerate() {
        let line_no = idx + 1;

        // str::split keeps the empty token after a trailing '/', which is the
        // absent final column. A blank line is a single empty token.
        let tokens: Vec<&str> = if line.trim().is_empty() {
            vec![""]
        } else {
            line.split(OUTER_DELIMITER).collect()
        };

        match width {
            None => width = Some(tokens.len()),
            Some(expected) if expected != tokens.len() => {
                return Err(FormatError::ColumnCountMismatch {
                    line: line_no,
                    expected,
                    found: tokens.len(),
                });
            }
            Some(_) => {}
        }

        let row = tokens
            .iter()
            .enumerate()
            .map(|(col, token)| parse_slot(token, line_no, col))
            .collect::<Result<Row, _>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Ok(Table::empty());
    }

    // Every row was checked against the first row's width above, so
    // `from_rows` always accepts them; the fallback is never taken.
    Ok(Table::from_rows(rows).unwrap_or_default())
}

fn parse_slot(token: &str, line: usize, column: usize) -> Result<Slot, FormatError> {
    if token.is_empty() {
        return Ok(Slot::Absent);
    }

    // A trailing ',' leaves an empty right part, which split keeps.
    let mut parts = token.split(INNER_DELIMITER);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(left), Some(right), None) => Ok(Slot::present(left, right)),
        (Some(_), None, _) => Err(FormatError::MissingDelimiter {
            line,
            column,
            token: token.to_string(),
        }),
        _ => Err(FormatError::TooManyDelimiters {
            line,
            column,
            token: token.to_string(),
        }),
    }
}

/// First character of `text` that cannot be stored inside a cell part: either
/// delimiter or a line break.
pub fn unstorable_char(text: &str) -> Option<char> {
    text.chars()
        .find(|&c| c == OUTER_DELIMITER || c == INNER_DELIMITER || c == '\n' || c == '\r')
}

/// Render a table to its persisted text. Every row ends with a newline.
pub fn render(table: &Table) -> String {
    let mut out = String::new();
    for row in table.rows() {
        for (col, slot) in row.iter().enumerate() {
            if col > 0 {
                out.push(OUTER_DELIMITER);
            }
            if let Slot::Present(cell) = slot {
                out.push_str(&cell.render());
            }
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pairgrid_engine::{Cell, Coord, Part, SortOrder};

    fn slots(table: &Table) -> Vec<Vec<Option<(String, String)>>> {
        table
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|slot| slot.cell().map(|c| (c.left.clone(), c.right.clone())))
                    .collect()
            })
            .collect()
    }

    fn pair(l: &str, r: &str) -> Option<(String, String)> {
        Some((l.to_string(), r.to_string()))
    }

    #[test]
    fn test_parse_basic() {
        let table = parse("a,b/c,d\ne,f/g,h\n").unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.cell(Coord::new(1, 1)), Some(&Cell::new("g", "h")));
    }

    #[test]
    fn test_parse_empty_input_is_canonical() {
        assert_eq!(parse("").unwrap(), Table::empty());
        assert_eq!(parse("\n\n").unwrap(), Table::empty());
        assert_eq!(parse("   \n").unwrap(), Table::empty());
    }

    #[test]
    fn test_render_canonical_empty() {
        assert_eq!(render(&Table::empty()), "\n");
    }

    #[test]
    fn test_trailing_outer_delimiter() {
        let table = parse("a,b/").unwrap();
        assert_eq!(slots(&table), vec![vec![pair("a", "b"), None]]);
    }

    #[test]
    fn test_trailing_inner_delimiter() {
        let table = parse("a,").unwrap();
        assert_eq!(slots(&table), vec![vec![pair("a", "")]]);
    }

    #[test]
    fn test_absent_columns_anywhere() {
        let table = parse("/a,b//").unwrap();
        assert_eq!(slots(&table), vec![vec![None, pair("a", "b"), None, None]]);

        let table = parse("/").unwrap();
        assert_eq!(slots(&table), vec![vec![None, None]]);
    }

    #[test]
    fn test_empty_parts() {
        let table = parse(",/,x").unwrap();
        assert_eq!(slots(&table), vec![vec![pair("", ""), pair("", "x")]]);
    }

    #[test]
    fn test_column_count_mismatch() {
        let err = parse("a,b/c,d\ne,f\n").unwrap_err();
        assert_eq!(err, FormatError::ColumnCountMismatch { line: 2, expected: 2, found: 1 });

        let err = parse("a,b\n/\n").unwrap_err();
        assert_eq!(err, FormatError::ColumnCountMismatch { line: 2, expected: 1, found: 2 });
    }

    #[test]
    fn test_too_many_inner_delimiters() {
        let err = parse("a,b,c").unwrap_err();
        assert!(matches!(err, FormatError::TooManyDelimiters { line: 1, column: 0, .. }));

        let err = parse("x,y/a,b,").unwrap_err();
        assert!(matches!(err, FormatError::TooManyDelimiters { line: 1, column: 1, .. }));

        assert!(parse(",,").is_err());
    }

    #[test]
    fn test_missing_inner_delimiter() {
        let err = parse("a,b/word").unwrap_err();
        assert_eq!(
            err,
            FormatError::MissingDelimiter { line: 1, column: 1, token: "word".to_string() }
        );
    }

    #[test]
    fn test_trailing_blank_lines_are_not_rows() {
        let table = parse("a,b/c,\n\n  \n\n").unwrap();
        assert_eq!(slots(&table), vec![vec![pair("a", "b"), pair("c", "")]]);
    }

    #[test]
    fn test_inner_blank_line_is_absent_row() {
        let table = parse("a,b\n\nc,d\n").unwrap();
        assert_eq!(slots(&table), vec![vec![pair("a", "b")], vec![None], vec![pair("c", "d")]]);

        // A blank first row followed by content, as left by add_row on an
        // empty file.
        let table = parse("\ng1,g2\n").unwrap();
        assert_eq!(slots(&table), vec![vec![None], vec![pair("g1", "g2")]]);
    }

    #[test]
    fn test_inner_blank_line_in_wide_table_fails() {
        let err = parse("a,b/c,d\n\ne,f/g,h\n").unwrap_err();
        assert_eq!(err, FormatError::ColumnCountMismatch { line: 2, expected: 2, found: 1 });
    }

    #[test]
    fn test_single_column_absent_rows_round_trip() {
        let table = Table::from_rows(vec![
            vec![Slot::present("a", "b")],
            vec![Slot::Absent],
            vec![Slot::present("c", "d")],
        ])
        .unwrap();
        let text = render(&table);
        assert_eq!(text, "a,b\n\nc,d\n");
        assert_eq!(parse(&text).unwrap(), table);
    }

    #[test]
    fn test_unstorable_char() {
        assert_eq!(unstorable_char("plain text"), None);
        assert_eq!(unstorable_char(""), None);
        assert_eq!(unstorable_char("a/b,c"), Some('/'));
        assert_eq!(unstorable_char("a,b"), Some(','));
        assert_eq!(unstorable_char("line\r\n"), Some('\r'));
    }

    #[test]
    fn test_crlf_line_endings() {
        let table = parse("a,b/\r\nc,d/e,\r\n").unwrap();
        assert_eq!(
            slots(&table),
            vec![vec![pair("a", "b"), None], vec![pair("c", "d"), pair("e", "")]]
        );
    }

    #[test]
    fn test_render_rows() {
        let table = parse("a,b//c,\n/x,y/\n").unwrap();
        assert_eq!(render(&table), "a,b//c,\n/x,y/\n");
    }

    #[test]
    fn test_render_after_mutation() {
        let mut table = parse("b,1//a,2\n").unwrap();
        table.sort_row(0, SortOrder::Ascending);
        assert_eq!(render(&table), "a,2/b,1/\n");

        table.edit_cell(Coord::new(0, 2), Part::Left, "ignored");
        assert_eq!(render(&table), "a,2/b,1/\n");
    }

    #[test]
    fn test_render_zero_rows() {
        let mut table = Table::empty();
        table.reset(0, 4, &mut || String::from("x"));
        assert_eq!(render(&table), "");
        assert_eq!(parse(&render(&table)).unwrap(), Table::empty());
    }
}
