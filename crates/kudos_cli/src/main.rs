//! `kudos` - command-line front end for the accomplishment journal.
//!
//! # Responsibility
//! - Drive core services against a local SQLite journal.
//! - Keep output line-oriented and deterministic for scripting.

use chrono::{Local, TimeZone};
use clap::{Parser, Subcommand};
use kudos_core::db::open_db;
use kudos_core::{
    default_log_level, init_logging, AccomplishmentColor, AccomplishmentService,
    AccomplishmentServiceError, ConstructionError, Preferences, Slide, SortOrder,
    SqliteAccomplishmentRepository, SqlitePreferenceRepository,
};
use log::debug;
use std::error::Error;
use std::path::PathBuf;
use uuid::Uuid;

/// kudos - celebrate your own accomplishments
#[derive(Debug, Parser)]
#[command(name = "kudos")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Journal database file
    #[arg(long, global = true, value_name = "FILE", default_value = "kudos.sqlite3")]
    db: PathBuf,

    /// Absolute directory for rolling log files; logging is off when omitted
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print core linkage and version
    Ping,
    /// Record a text accomplishment
    Add {
        text: String,
        /// Palette color (yellow|orange|pink|green|blue|lavender)
        #[arg(long)]
        color: Option<String>,
    },
    /// Record a photo accomplishment from an image file
    Photo {
        path: PathBuf,
        #[arg(long)]
        caption: Option<String>,
    },
    /// List accomplishments by date
    List {
        #[arg(long)]
        newest_first: bool,
    },
    /// Delete one accomplishment
    Delete { id: Uuid },
    /// Show the Wrapped slides for a year (default: current year)
    Wrapped {
        #[arg(long)]
        year: Option<i32>,
    },
    /// Show or set the interface language (es|en)
    Language { code: Option<String> },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    if let Command::Ping = cli.command {
        println!("kudos_core ping={}", kudos_core::ping());
        println!("kudos_core version={}", kudos_core::core_version());
        return Ok(());
    }

    let conn = open_db(&cli.db)?;
    debug!(
        "event=cli_open module=cli status=ok db={}",
        cli.db.display()
    );
    let preference_store = SqlitePreferenceRepository::new(&conn);
    let system_locale = std::env::var("LANG").unwrap_or_default();
    let preferences = Preferences::load(&preference_store, &system_locale)?;
    let service = AccomplishmentService::new(SqliteAccomplishmentRepository::new(&conn));

    match cli.command {
        Command::Ping => {}
        Command::Add { text, color } => {
            let color = match color.as_deref() {
                Some(name) => Some(
                    AccomplishmentColor::from_name(name)
                        .ok_or_else(|| format!("unknown color `{name}`"))?,
                ),
                None => None,
            };
            let item = service
                .record_text(&text, color)
                .map_err(|err| describe(&preferences, err))?;
            println!("saved id={} color={}", item.id(), item.color());
        }
        Command::Photo { path, caption } => {
            let bytes = std::fs::read(&path)?;
            let item = service
                .record_photo(bytes, caption.as_deref())
                .map_err(|err| describe(&preferences, err))?;
            println!("saved id={} photo=true", item.id());
        }
        Command::List { newest_first } => {
            let order = if newest_first {
                SortOrder::Descending
            } else {
                SortOrder::Ascending
            };
            for item in service.list(order)? {
                println!(
                    "{}\t{}\t{}\t{}{}",
                    item.id(),
                    item.date().with_timezone(&Local).format("%Y-%m-%d %H:%M"),
                    item.color(),
                    if item.has_photo() { "[photo] " } else { "" },
                    item.text()
                );
            }
        }
        Command::Delete { id } => {
            service.delete(id)?;
            println!("deleted id={id}");
        }
        Command::Wrapped { year } => {
            let reference = match year {
                Some(year) => Local
                    .with_ymd_and_hms(year, 6, 1, 12, 0, 0)
                    .single()
                    .ok_or_else(|| format!("invalid year `{year}`"))?,
                None => Local::now(),
            };
            for slide in service.wrapped(&reference)? {
                print_slide(&slide);
            }
        }
        Command::Language { code } => {
            if let Some(code) = code {
                preferences.set_language_code(&preference_store, &code)?;
            }
            println!("language={}", preferences.language().code());
        }
    }

    Ok(())
}

fn describe(preferences: &Preferences, err: AccomplishmentServiceError) -> Box<dyn Error> {
    match err {
        AccomplishmentServiceError::Invalid(ConstructionError::Validation(validation)) => {
            preferences.validation_message(&validation).into()
        }
        other => Box::new(other),
    }
}

fn print_slide(slide: &Slide) {
    match slide {
        Slide::Intro { year, count } => println!("intro year={year} count={count}"),
        Slide::Photo { image, caption } => println!(
            "photo bytes={} caption={}",
            image.len(),
            caption.as_deref().unwrap_or("-")
        ),
        Slide::Text { text, gradient_key } => println!("text gradient={gradient_key} {text}"),
        Slide::Outro => println!("outro"),
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command};
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_add_with_color_and_global_db() {
        let cli = Cli::parse_from([
            "kudos",
            "--db",
            "/tmp/j.sqlite3",
            "add",
            "ran 5k",
            "--color",
            "blue",
        ]);
        assert_eq!(cli.db.to_str(), Some("/tmp/j.sqlite3"));
        match cli.command {
            Command::Add { text, color } => {
                assert_eq!(text, "ran 5k");
                assert_eq!(color.as_deref(), Some("blue"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_wrapped_year() {
        let cli = Cli::parse_from(["kudos", "wrapped", "--year", "2025"]);
        assert!(matches!(cli.command, Command::Wrapped { year: Some(2025) }));
    }
}
