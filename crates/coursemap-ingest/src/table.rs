//! Minimal comma-separated table reader for exported annotation spreadsheets
//!
//! Fields are separated by `,`. A field opened with a double quote may contain
//! commas, line breaks and `""` escapes; a quote elsewhere in a field is literal.
//! `\n`, `\r\n` and a lone `\r` each end a row. A blank line yields an empty row so row
//! positions match the source file. A leading byte-order mark is ignored.

/// Split `text` into rows of cells.
pub fn parse_table(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    // Whether anything (a cell separator or a character) has been read on this row.
    let mut row_started = false;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            if ch == '"' {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    cell.push('"');
                } else {
                    in_quotes = false;
                }
            } else {
                cell.push(ch);
            }
            continue;
        }

        match ch {
            '"' if cell.is_empty() => {
                in_quotes = true;
                row_started = true;
            }
            ',' => {
                row.push(std::mem::take(&mut cell));
                row_started = true;
            }
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if row_started {
                    row.push(std::mem::take(&mut cell));
                }
                rows.push(std::mem::take(&mut row));
                row_started = false;
            }
            _ => {
                cell.push(ch);
                row_started = true;
            }
        }
    }

    if row_started {
        row.push(cell);
        rows.push(row);
    }

    rows
}
