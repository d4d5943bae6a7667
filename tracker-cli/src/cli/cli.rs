use clap::{ArgGroup, Parser};
use std::path::PathBuf;

use crate::render::ColorMode;

/// tracker — Daily metrics log
///
/// Save values with `tracker meditation=20 vibe=7`, fields: meditation, exercise,
/// person-a/b/c (or the people's names), substance, diet, screen, productive, vibe.
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    group(ArgGroup::new("read_mode").args(["on", "recent", "calendar"]).conflicts_with("assignments")),
    group(ArgGroup::new("solo").args(["path"]).conflicts_with_all(["read_mode", "assignments"])),
)]
pub struct Cli {
    /// Prints the path of the tracker table
    #[arg(long, short)]
    pub path: bool,
    /// Directory holding `tracker.csv`. Takes precedence over `data_dir` in the config file.
    #[arg(long, env = "TRACKER_DATA_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Date to save values for (e.g., `--date yesterday`, `--date 2025-01-31`). Defaults to today.
    #[arg(long, short, requires = "assignments")]
    pub date: Option<String>,
    /// Save each `field=value` on its own, so one bad value doesn't block the others.
    #[arg(long, requires = "assignments")]
    pub per_field: bool,

    /// View the entry for a specific date (e.g., `tracker --on yesterday`)
    #[arg(long)]
    pub on: Option<String>,
    /// View the most recent entries, newest first. Defaults to `recent_count` from the config.
    #[arg(long, short, num_args = 0..=1, value_name = "N")]
    pub recent: Option<Option<usize>>,
    /// View a month calendar marking days with data (`2025-01`, `this month`, `last month`)
    #[arg(long, short, num_args = 0..=1, value_name = "MONTH")]
    pub calendar: Option<Option<String>>,

    /// Values to save (e.g., `meditation=20 diet=good vibe=7`).
    #[arg(value_name = "FIELD=VALUE")]
    pub assignments: Vec<String>,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn recent_takes_an_optional_count() {
        let cli = Cli::try_parse_from(["tracker", "--recent"]).unwrap();
        assert_eq!(cli.recent, Some(None));
        let cli = Cli::try_parse_from(["tracker", "--recent", "3"]).unwrap();
        assert_eq!(cli.recent, Some(Some(3)));
    }

    #[test]
    fn read_modes_conflict_with_assignments() {
        assert!(Cli::try_parse_from(["tracker", "--on", "today", "vibe=3"]).is_err());
        assert!(Cli::try_parse_from(["tracker", "--path", "vibe=3"]).is_err());
    }

    #[test]
    fn date_requires_assignments() {
        assert!(Cli::try_parse_from(["tracker", "--date", "yesterday"]).is_err());
        let cli = Cli::try_parse_from(["tracker", "-d", "yesterday", "--per-field", "vibe=3"]).unwrap();
        assert!(cli.per_field);
        assert_eq!(cli.assignments, vec!["vibe=3".to_string()]);
    }
}
