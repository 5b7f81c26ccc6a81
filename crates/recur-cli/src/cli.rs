use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Next due dates for recurring tasks.
///
/// Rules: `y` yearly, `d <N>` every N days, `w <1-7,...>` weekdays,
/// `m <days>[ <months>]` days of month (-1 = last day).
#[derive(Parser, Debug)]
#[command(name = "recur", about = "Next due dates for recurring tasks")]
pub struct CliArgs {
    /// Path to a TOML config file
    #[arg(long, env = "RECUR_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the next due date strictly after NOW
    Next {
        /// Anchor date of the task (YYYYMMDD)
        #[arg(long)]
        date: String,

        /// Repetition rule, e.g. "d 7" or "m -1"
        #[arg(long)]
        repeat: String,

        /// Reference date (YYYYMMDD), defaults to today
        #[arg(long)]
        now: Option<String>,
    },

    /// List the next due dates of a rule
    Upcoming {
        /// Anchor date of the task (YYYYMMDD)
        #[arg(long)]
        date: String,

        /// Repetition rule
        #[arg(long)]
        repeat: String,

        /// List dates after this one (YYYYMMDD), defaults to today
        #[arg(long)]
        from: Option<String>,

        /// Number of dates (uses the config default if not set)
        #[arg(long)]
        count: Option<usize>,
    },

    /// Parse a rule and print its canonical form as JSON
    Check {
        /// Repetition rule
        rule: String,
    },

    /// Load tasks from a JSON file, complete some, and print the agenda
    Agenda(AgendaArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct AgendaArgs {
    /// JSON array of tasks: {"date", "title", "comment", "repeat"}
    #[arg(long)]
    pub file: PathBuf,

    /// Treat this date (YYYYMMDD) as today
    #[arg(long)]
    pub today: Option<String>,

    /// Complete the task with this title (repeatable)
    #[arg(long = "complete")]
    pub complete: Vec<String>,

    /// Delete the task with this title (repeatable)
    #[arg(long = "delete")]
    pub delete: Vec<String>,

    /// Text to find in title or comment, or a DD.MM.YYYY date
    #[arg(long)]
    pub search: Option<String>,

    /// Agenda page size
    #[arg(long)]
    pub limit: Option<usize>,

    /// Agenda page, starting at 1
    #[arg(long)]
    pub page: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_next_with_spaced_rule() {
        let args =
            CliArgs::try_parse_from(["recur", "next", "--date", "20240101", "--repeat", "m -1"])
                .unwrap();
        assert_eq!(
            args.command,
            Command::Next {
                date: "20240101".to_string(),
                repeat: "m -1".to_string(),
                now: None,
            }
        );
    }

    #[test]
    fn config_flag_is_global() {
        let args =
            CliArgs::try_parse_from(["recur", "check", "w 1,3", "--config", "recur.toml"]).unwrap();
        assert_eq!(args.config, Some(PathBuf::from("recur.toml")));
        assert_eq!(
            args.command,
            Command::Check {
                rule: "w 1,3".to_string()
            }
        );
    }

    #[test]
    fn agenda_accepts_repeated_complete() {
        let args = CliArgs::try_parse_from([
            "recur",
            "agenda",
            "--file",
            "tasks.json",
            "--complete",
            "rent",
            "--complete",
            "gym",
            "--delete",
            "old",
        ])
        .unwrap();
        let Command::Agenda(agenda) = args.command else {
            panic!("expected agenda");
        };
        assert_eq!(agenda.complete, vec!["rent", "gym"]);
        assert_eq!(agenda.delete, vec!["old"]);
        assert_eq!(agenda.search, None);
    }

    #[test]
    fn agenda_accepts_search_and_paging() {
        let args = CliArgs::try_parse_from([
            "recur", "agenda", "--file", "tasks.json", "--search", "15.01.2024", "--limit", "10",
            "--page", "2",
        ])
        .unwrap();
        let Command::Agenda(agenda) = args.command else {
            panic!("expected agenda");
        };
        assert_eq!(agenda.search.as_deref(), Some("15.01.2024"));
        assert_eq!(agenda.limit, Some(10));
        assert_eq!(agenda.page, Some(2));
    }

    #[test]
    fn next_requires_rule() {
        assert!(CliArgs::try_parse_from(["recur", "next", "--date", "20240101"]).is_err());
    }
}
