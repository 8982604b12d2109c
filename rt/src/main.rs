//! revtrack - spaced-repetition revision tracker
//!
//! CLI entry point: each subcommand is one load-mutate-flush cycle.

use std::fs;

use chrono::{Local, NaiveDate};
use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use revtrack::cli::{Cli, Command, OutputFormat, get_log_path};
use revtrack::config::Config;
use revtrack::domain::{JsonlStore, ReviewState, RevisionItem, SessionLog, WorkType};
use revtrack::exams::{next_exam, upcoming};
use revtrack::tracker::{Tracker, TrackerError};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

/// Surface bad input as a plain message, store failures with context
fn report(err: TrackerError) -> eyre::Report {
    if err.is_user_error() {
        eyre::eyre!("{}", err)
    } else {
        eyre::Report::new(err).wrap_err("Failed to access the revision store")
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }
    info!(store_path = %config.store_path.display(), "revtrack starting");

    let store = JsonlStore::open(&config.store_path)
        .context(format!("Failed to open store at {}", config.store_path.display()))?;
    let mut tracker = Tracker::new(store);

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Log {
            subject,
            topic,
            hours,
            work_type,
            tags,
            date,
        } => cmd_log(&mut tracker, subject, topic, hours, work_type, tags, date.unwrap_or_else(today)),
        Command::Due { as_of } => cmd_due(&tracker, as_of.unwrap_or_else(today)),
        Command::Revise { topic, date } => cmd_revise(&mut tracker, &topic, date.unwrap_or_else(today)),
        Command::List { as_of } => cmd_list(&tracker, as_of.unwrap_or_else(today)),
        Command::Exams { as_of } => cmd_exams(&config, as_of.unwrap_or_else(today)),
        Command::Stats { as_of, format } => cmd_stats(&tracker, as_of.unwrap_or_else(today), format),
    }
}

fn cmd_log(
    tracker: &mut Tracker<JsonlStore>,
    subject: String,
    topic: String,
    hours: f64,
    work_type: WorkType,
    tags: Vec<String>,
    date: NaiveDate,
) -> Result<()> {
    debug!(%subject, %topic, hours, %work_type, %date, "cmd_log: called");
    let mut session = SessionLog::new(date, subject, topic)
        .with_hours(hours)
        .with_work_type(work_type);
    session.tags = tags;

    let outcome = tracker.log_session(session).map_err(report)?;
    println!(
        "{} Logged {}h of {} on {} ({})",
        "✓".green(),
        outcome.session.hours,
        outcome.session.work_type,
        outcome.session.topic.cyan(),
        outcome.session.subject
    );
    if outcome.registered {
        println!("  New topic, first review on {}", outcome.item.next_review.to_string().yellow());
    } else {
        println!(
            "  Already tracked, next review on {} (schedule unchanged)",
            outcome.item.next_review.to_string().yellow()
        );
    }
    Ok(())
}

fn cmd_due(tracker: &Tracker<JsonlStore>, as_of: NaiveDate) -> Result<()> {
    debug!(%as_of, "cmd_due: called");
    let due = tracker.due(as_of).map_err(report)?;
    if due.is_empty() {
        println!("Nothing due for revision on {}", as_of);
        return Ok(());
    }

    println!("{} topic(s) due on {}:", due.len(), as_of);
    for item in &due {
        let overdue = -item.days_until_due(as_of);
        let when = if overdue == 0 {
            "due today".to_string()
        } else {
            format!("overdue by {} day(s)", overdue)
        };
        println!(
            "  {} {} {}",
            item.topic.cyan(),
            format!("(iteration {})", item.iteration).dimmed(),
            when.red()
        );
    }
    Ok(())
}

fn cmd_revise(tracker: &mut Tracker<JsonlStore>, topic: &str, date: NaiveDate) -> Result<()> {
    debug!(%topic, %date, "cmd_revise: called");
    let item = tracker.mark_revised(topic, date).map_err(report)?;
    println!(
        "{} Revised {}: iteration {}, next review on {} (in {} days)",
        "✓".green(),
        item.topic.cyan(),
        item.iteration,
        item.next_review.to_string().yellow(),
        item.days_until_due(date)
    );
    Ok(())
}

fn print_item(item: &RevisionItem, as_of: NaiveDate) {
    let state = match item.state(as_of) {
        ReviewState::Due => "due".red(),
        ReviewState::Pending => "pending".green(),
    };
    println!(
        "  {:<8} {} {}",
        state,
        item.topic.cyan(),
        format!(
            "(iteration {}, last {}, next {})",
            item.iteration, item.last_studied, item.next_review
        )
        .dimmed()
    );
}

fn cmd_list(tracker: &Tracker<JsonlStore>, as_of: NaiveDate) -> Result<()> {
    debug!(%as_of, "cmd_list: called");
    let items = tracker.revisions().map_err(report)?;
    if items.is_empty() {
        println!("No topics tracked yet");
        return Ok(());
    }
    for item in &items {
        print_item(item, as_of);
    }
    Ok(())
}

fn cmd_exams(config: &Config, as_of: NaiveDate) -> Result<()> {
    debug!(%as_of, exam_count = config.exams.len(), "cmd_exams: called");
    if config.exams.is_empty() {
        println!("No exams configured");
        return Ok(());
    }

    match next_exam(&config.exams, as_of) {
        Some(countdown) => println!(
            "Next exam: {} on {} ({} days left)",
            countdown.exam.name.cyan(),
            countdown.exam.date,
            countdown.days_left.to_string().yellow()
        ),
        None => {
            println!("All configured exams are past");
            return Ok(());
        }
    }

    for exam in upcoming(&config.exams, as_of) {
        let pattern = exam.pattern.as_deref().unwrap_or("");
        println!("  {}  {:<20} {}", exam.date, exam.name, pattern.dimmed());
    }
    Ok(())
}

fn cmd_stats(tracker: &Tracker<JsonlStore>, as_of: NaiveDate, format: OutputFormat) -> Result<()> {
    debug!(%as_of, %format, "cmd_stats: called");
    let stats = tracker.stats(as_of).map_err(report)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Text => {
            println!("Topics:   {} ({} due, {} pending)", stats.total_topics, stats.due_topics, stats.pending_topics);
            println!("Deepest:  iteration {}", stats.max_iteration);
            println!("Sessions: {} ({:.1}h total)", stats.total_sessions, stats.total_hours);
            for (subject, hours) in &stats.hours_by_subject {
                println!("  {:<12} {:.1}h", subject, hours);
            }
            println!("Streak:   {} day(s)", stats.streak_days);
        }
    }
    Ok(())
}
