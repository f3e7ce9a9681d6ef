//! Name syntax for cells and formula variables.
//!
//! Cell names are spreadsheet-style: one or more letters followed by one or
//! more digits (`A1`, `bc12`). Formula variables are broader identifiers
//! (`x`, `_tmp`, `rate2`); a spreadsheet narrows them to cell names.

use regex::Regex;
use std::sync::OnceLock;

/// Check whether `name` is a spreadsheet-style cell name (e.g. "A1", "AA10").
pub fn is_cell_name(name: &str) -> bool {
    cell_name_re().is_match(name)
}

/// Check whether `name` is a syntactically valid formula variable.
pub fn is_variable(name: &str) -> bool {
    variable_re().is_match(name)
}

fn cell_name_re() -> &'static Regex {
    static CELL_RE: OnceLock<Regex> = OnceLock::new();
    CELL_RE.get_or_init(|| {
        Regex::new(r"^(?<letters>[A-Za-z]+)(?<numbers>[0-9]+)$")
            .expect("cell name regex must compile")
    })
}

fn variable_re() -> &'static Regex {
    static VAR_RE: OnceLock<Regex> = OnceLock::new();
    VAR_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("variable regex must compile")
    })
}
