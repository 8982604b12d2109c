//! CLI command definitions and subcommands

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;

use crate::domain::WorkType;

/// revtrack - spaced-repetition revision tracker
#[derive(Parser)]
#[command(
    name = "rt",
    author,
    version,
    about = "Spaced-repetition revision tracker for exam preparation",
    long_about = None
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Override the store directory from the config file
    #[arg(short, long, global = true)]
    pub store: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log a study session and start tracking its topic
    Log {
        /// Subject (e.g., Physics)
        subject: String,

        /// Topic studied (matched exactly)
        topic: String,

        /// Session length in hours
        #[arg(long, default_value = "1.5")]
        hours: f64,

        /// Kind of work (theory, module_solving, pyqs, revision)
        #[arg(short = 'w', long, default_value = "theory")]
        work_type: WorkType,

        /// Free-form tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Session date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List topics due for revision
    Due {
        /// Reference date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        as_of: Option<NaiveDate>,
    },

    /// Mark a topic revised
    Revise {
        /// Topic to mark (matched exactly)
        topic: String,

        /// Revision date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<NaiveDate>,
    },

    /// List all tracked topics
    List {
        /// Reference date for due state, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        as_of: Option<NaiveDate>,
    },

    /// Show the next exam and the upcoming schedule
    Exams {
        /// Reference date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        as_of: Option<NaiveDate>,
    },

    /// Show study statistics
    Stats {
        /// Reference date, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        as_of: Option<NaiveDate>,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
}

/// Path of the log file the binary writes to
pub fn get_log_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("revtrack")
        .join("logs")
        .join("revtrack.log")
}

/// Output format for the stats command
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown format: {}. Use: text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_cli_parse_log_defaults() {
        let cli = Cli::parse_from(["rt", "log", "Physics", "Vectors"]);
        if let Command::Log {
            subject,
            topic,
            hours,
            work_type,
            tags,
            date,
        } = cli.command
        {
            assert_eq!(subject, "Physics");
            assert_eq!(topic, "Vectors");
            assert_eq!(hours, 1.5);
            assert_eq!(work_type, WorkType::Theory);
            assert!(tags.is_empty());
            assert!(date.is_none());
        } else {
            panic!("Expected Log command");
        }
    }

    #[test]
    fn test_cli_parse_log_full() {
        let cli = Cli::parse_from([
            "rt",
            "log",
            "Maths",
            "Complex Numbers",
            "--hours",
            "3",
            "-w",
            "pyqs",
            "-t",
            "weak",
            "-t",
            "adv",
            "--date",
            "2026-02-08",
        ]);
        if let Command::Log {
            topic,
            hours,
            work_type,
            tags,
            date: d,
            ..
        } = cli.command
        {
            assert_eq!(topic, "Complex Numbers");
            assert_eq!(hours, 3.0);
            assert_eq!(work_type, WorkType::Pyqs);
            assert_eq!(tags, vec!["weak".to_string(), "adv".to_string()]);
            assert_eq!(d, Some(date("2026-02-08")));
        } else {
            panic!("Expected Log command");
        }
    }

    #[test]
    fn test_cli_rejects_bad_date() {
        assert!(Cli::try_parse_from(["rt", "due", "--as-of", "2026-02-30"]).is_err());
        assert!(Cli::try_parse_from(["rt", "revise", "SHM", "--date", "08-02-2026"]).is_err());
    }

    #[test]
    fn test_cli_parse_revise() {
        let cli = Cli::parse_from(["rt", "revise", "SHM", "-d", "2026-02-09"]);
        assert!(matches!(
            cli.command,
            Command::Revise { ref topic, date: Some(_) } if topic == "SHM"
        ));
    }

    #[test]
    fn test_cli_with_config_and_store() {
        let cli = Cli::parse_from(["rt", "-c", "/path/to/config.yml", "due", "--store", "/tmp/s"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
        assert_eq!(cli.store, Some(PathBuf::from("/tmp/s")));
    }

    #[test]
    fn test_output_format_from_str() {
        assert!(matches!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_log_path() {
        assert!(get_log_path().ends_with("revtrack/logs/revtrack.log"));
    }
}
