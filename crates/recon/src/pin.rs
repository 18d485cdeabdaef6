//! Identifier extraction and numeric cell coercion.

use std::sync::OnceLock;

use regex::Regex;

use crate::model::Cell;

/// Exactly nine digits at a word boundary, anchored at the end of the text,
/// optionally followed by trailing whitespace.
fn pin_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{9})\s*$").unwrap())
}

/// Extract a partner PIN from the tail of a free-text description.
/// Non-text and blank cells yield none — extraction never fails a run.
pub fn extract_partner_pin(cell: &Cell) -> Option<String> {
    let text = match cell {
        Cell::Text(s) => s,
        _ => return None,
    };
    pin_regex()
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Normalize an identifier cell to its canonical string form.
///
/// Numeric cells and decimal-formatted numeric text (`"123456789.0"`) become
/// the integer string of the truncated value; other text is kept trimmed;
/// blank and `"nan"` become none.
pub fn normalize_pin(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty => None,
        Cell::Number(n) => {
            if n.is_nan() {
                None
            } else {
                Some(format!("{}", n.trunc() as i64))
            }
        }
        Cell::Bool(b) => Some(cell_bool_text(*b)),
        Cell::Text(s) => {
            let s = s.trim();
            if s.is_empty() || s == "nan" {
                return None;
            }
            if s.contains('.') && s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
                // "1.2.3"-style text fails the float parse and stays a string.
                if let Ok(n) = s.parse::<f64>() {
                    return Some(format!("{}", n.trunc() as i64));
                }
            }
            Some(s.to_string())
        }
    }
}

fn cell_bool_text(b: bool) -> String {
    (if b { "TRUE" } else { "FALSE" }).to_string()
}

/// Coerce a cell to a number. Unparseable cells are missing, never an error.
pub fn cell_to_f64(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) if !n.is_nan() => Some(*n),
        Cell::Text(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Like [`cell_to_f64`], but strips `,` thousands separators from text first
/// (`"27,239.00"` parses as 27239.0).
pub fn cell_to_f64_grouped(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Text(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        other => cell_to_f64(other),
    }
}
