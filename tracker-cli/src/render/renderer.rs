use super::calendar::format_calendar;
use super::theme::OneDark;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use termimad::MadSkin;
use tracker_core::{Entry, Field, FieldKind, UpsertOutcome};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
    /// Field labels in column order, with the tracked people's names filled in.
    pub labels: Vec<(Field, String)>,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(opts: RenderOptions) -> Self {
        let skin = if opts.use_color {
            OneDark::default_onedark_skin()
        } else {
            MadSkin::no_style()
        };
        Self { skin, opts }
    }

    pub fn print_md(&self, md: &str) {
        self.skin.print_text(md);
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("tracker: {message}");
    }

    fn label(&self, field: Field) -> &str {
        self.opts
            .labels
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, label)| label.as_str())
            .unwrap_or_else(|| field.label())
    }

    fn format_date(&self, date: NaiveDate) -> String {
        date.format(&self.opts.date_format).to_string()
    }

    /// One field per line, the compact "mobile" layout.
    pub fn print_entry_card(&self, entry: &Entry) {
        let mut md = format!("## {}\n", self.format_date(entry.date));
        for (field, label) in &self.opts.labels {
            let value = entry.value(*field);
            let value = match field.kind() {
                FieldKind::Minutes => format!("{value} min"),
                FieldKind::Rating => value.to_string(),
                FieldKind::Vibe => format!("{value}/10"),
            };
            md.push_str(&format!("* **{label}**: {value}\n"));
        }
        self.print_md(&md);
    }

    /// All entries as a table, the "desktop" layout.
    pub fn print_entries_table(&self, entries: &[Entry]) {
        let columns = self.opts.labels.len() + 1;
        let mut md = format!("|{}\n", ":-:|".repeat(columns));
        let labels: Vec<&str> = self.opts.labels.iter().map(|(_, l)| l.as_str()).collect();
        md.push_str(&format!("|**Date**|**{}**|\n|-\n", labels.join("**|**")));
        for entry in entries {
            let values: Vec<String> = self
                .opts
                .labels
                .iter()
                .map(|(field, _)| entry.value(*field).to_string())
                .collect();
            md.push_str(&format!(
                "|{}|{}|\n",
                entry.date.format("%Y-%m-%d"),
                values.join("|")
            ));
        }
        md.push_str("|-\n");
        self.print_md(&md);
    }

    /// Result of saving a whole entry.
    pub fn print_outcome(&self, date: NaiveDate, outcome: &UpsertOutcome) {
        let date = self.format_date(date);
        match outcome {
            UpsertOutcome::Created => self.print_info(&format!("New entry created for {date}")),
            UpsertOutcome::Updated { changed } => {
                let names: Vec<&str> = changed.iter().map(|f| self.label(*f)).collect();
                self.print_info(&format!("Updated fields for {date}: {}", names.join(", ")))
            }
            UpsertOutcome::Unchanged => {
                self.print_info("No changes detected. No fields were updated.")
            }
        }
    }

    /// Result of saving one field in per-field mode.
    pub fn print_field_outcome(&self, field: Field, outcome: &UpsertOutcome) {
        let label = self.label(field);
        match outcome {
            UpsertOutcome::Created => self.print_info(&format!("{label}: saved (new entry)")),
            UpsertOutcome::Updated { .. } => self.print_info(&format!("{label}: saved")),
            UpsertOutcome::Unchanged => self.print_info(&format!("{label}: unchanged")),
        }
    }

    pub fn print_calendar(
        &self,
        year: i32,
        month: u32,
        marked: &BTreeSet<NaiveDate>,
        today: NaiveDate,
    ) {
        let title = NaiveDate::from_ymd_opt(year, month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{year}-{month:02}"));
        self.print_md(&format!("## {title}\n"));
        self.print_md(&format_calendar(year, month, marked, today));
        self.print_info(&format!("{} days with data.", marked.len()));
    }
}
