use super::entry::{Entry, Field};
use strum::IntoEnumIterator;

pub const DATE_COLUMN: &str = "date";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Column names in table order, starting with the date key.
pub fn header_columns() -> Vec<&'static str> {
    std::iter::once(DATE_COLUMN)
        .chain(Field::iter().map(Field::column))
        .collect()
}

/// `date,meditation_minutes,...,vibe_score`
pub fn format_header() -> String {
    header_columns().join(",")
}

/// `2024-01-01,20,30,0,0,0,neutral,good,120,240,7`
pub fn format_row(entry: &Entry) -> String {
    let mut cells = vec![entry.date.format(DATE_FORMAT).to_string()];
    cells.extend(Field::iter().map(|field| entry.value(field).to_string()));
    cells.join(",")
}

/// Renders the whole table, header first, one line per entry in iteration order.
pub fn format_table<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> String {
    let mut content = format_header();
    content.push('\n');
    for entry in entries {
        content.push_str(&format_row(entry));
        content.push('\n');
    }
    content
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::entry::{Rating, VibeScore};
    use chrono::NaiveDate;

    #[test]
    fn header_lists_columns_in_order() {
        assert_eq!(
            format_header(),
            "date,meditation_minutes,exercise_minutes,time_with_person_a,time_with_person_b,\
time_with_person_c,substance_rating,diet_rating,screen_minutes,productive_minutes,vibe_score"
        );
    }

    #[test]
    fn row_serializes_plain_text_values() {
        let mut e = Entry::new(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        e.meditation_minutes = 20;
        e.diet_rating = Rating::Good;
        e.vibe_score = VibeScore::new(7).unwrap();
        assert_eq!(format_row(&e), "2024-03-09,20,0,0,0,0,neutral,good,0,0,7");
    }

    #[test]
    fn empty_table_is_just_the_header() {
        assert_eq!(format_table(std::iter::empty()), format!("{}\n", format_header()));
    }
}
