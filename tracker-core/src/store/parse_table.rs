//! Parses the content of the tracker table into `Entry` rows keyed by date.
use super::entry::{Entry, Field};
use super::format_utils::{DATE_FORMAT, header_columns};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;

#[derive(Debug, Default)]
pub struct ParsedTable {
    pub rows: BTreeMap<NaiveDate, Entry>,
    /// The header was the one written by the older spreadsheet-style tracker.
    pub legacy_header: bool,
    /// Dates that appeared more than once. The later row was kept.
    pub duplicates: Vec<NaiveDate>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseError {
    /// 1-based line number in the file.
    pub line: usize,
    pub message: String,
}

/// Parses a whole table.
///
/// - Empty content (or only blank lines) is an empty table.
/// - The first non-blank line must be a header: either the current column names or
///   a legacy header with the same number of columns and `Date` first.
/// - Empty cells take the field's default.
/// - Any other problem stops parsing with the offending line number.
pub fn parse_table_content(content: &str) -> Result<ParsedTable, ParseError> {
    let mut table = ParsedTable::default();
    let mut lines = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim_start_matches('\u{feff}').trim()))
        .filter(|(_, line)| !line.is_empty());

    let Some((header_line, header)) = lines.next() else {
        return Ok(table);
    };
    table.legacy_header = parse_header(header).map_err(|message| ParseError {
        line: header_line,
        message,
    })?;

    for (line, row) in lines {
        let entry = parse_row(row).map_err(|message| ParseError { line, message })?;
        if let Some(previous) = table.rows.insert(entry.date, entry) {
            table.duplicates.push(previous.date);
        }
    }

    Ok(table)
}

/// Returns whether the header is a legacy one.
fn parse_header(header: &str) -> Result<bool, String> {
    let expected = header_columns();
    let cells: Vec<&str> = header.split(',').map(str::trim).collect();
    if cells == expected {
        return Ok(false);
    }
    if cells.iter().all(|cell| expected.contains(cell)) {
        return Err(format!(
            "Columns in `{header}` are out of order. Expected `{}`.",
            expected.join(",")
        ));
    }
    let is_legacy = cells.len() == expected.len()
        && cells
            .first()
            .is_some_and(|first| first.eq_ignore_ascii_case("date"));
    if is_legacy {
        Ok(true)
    } else {
        Err(format!(
            "Unrecognised header `{header}`. Expected `{}`.",
            expected.join(",")
        ))
    }
}

fn parse_row(row: &str) -> Result<Entry, String> {
    let cells: Vec<&str> = row.split(',').map(str::trim).collect();
    let expected = header_columns().len();
    if cells.len() != expected {
        return Err(format!(
            "Expected {expected} columns, found {} in `{row}`.",
            cells.len()
        ));
    }

    let date = NaiveDate::parse_from_str(cells[0], DATE_FORMAT)
        .map_err(|_| format!("Invalid date `{}`. Expected YYYY-MM-DD.", cells[0]))?;
    let mut entry = Entry::new(date);

    for (field, cell) in Field::iter().zip(&cells[1..]) {
        if cell.is_empty() {
            continue;
        }
        entry
            .set_field(field, strip_integral_fraction(cell))
            .map_err(|e| e.to_string())?;
    }

    Ok(entry)
}

/// Spreadsheet exports write whole numbers in columns with gaps as `30.0`.
fn strip_integral_fraction(cell: &str) -> &str {
    match cell.split_once('.') {
        Some((whole, fraction))
            if !whole.is_empty()
                && whole.bytes().all(|b| b.is_ascii_digit() || b == b'-')
                && !fraction.is_empty()
                && fraction.bytes().all(|b| b == b'0') =>
        {
            whole
        }
        _ => cell,
    }
}
