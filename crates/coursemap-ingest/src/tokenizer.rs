//! Node references in free-text connection cells
//!
//! Grammar, applied to the upper-cased cell and scanned left to right:
//!
//! ```text
//! reference := DIGIT+ SPACE* LETTER+
//! DIGIT     := '0'..='9'
//! LETTER    := 'A'..='Z'
//! SPACE     := any Unicode whitespace
//! ```
//!
//! Digit and letter runs are taken whole. Everything that does not form a reference
//! is ignored. A reference is normalised by dropping the whitespace, so `3 b` becomes
//! `3B`.

/// Extract normalised references from a connections cell, deduplicated in first-seen order.
pub fn connection_refs(cell: &str) -> Vec<String> {
    let upper: Vec<char> = cell.to_uppercase().chars().collect();
    let mut refs: Vec<String> = Vec::new();

    let mut i = 0;
    while i < upper.len() {
        if !upper[i].is_ascii_digit() {
            i += 1;
            continue;
        }

        let digits_end = run_end(&upper, i, |c| c.is_ascii_digit());
        let letters_start = run_end(&upper, digits_end, char::is_whitespace);
        let letters_end = run_end(&upper, letters_start, |c| c.is_ascii_uppercase());

        if letters_end > letters_start {
            let mut token: String = upper[i..digits_end].iter().collect();
            token.extend(&upper[letters_start..letters_end]);
            if !refs.contains(&token) {
                refs.push(token);
            }
            i = letters_end;
        } else {
            i = digits_end;
        }
    }

    refs
}

fn run_end(chars: &[char], start: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut end = start;
    while end < chars.len() && pred(chars[end]) {
        end += 1;
    }
    end
}
