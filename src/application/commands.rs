//! Line-oriented command surface.
//!
//! Each input line parses into a [`Command`], which is then run against the
//! [`ProfileService`] and [`MergeSession`]. Skill positions are 1-based on
//! the command line.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::domain::foundation::{ProfileId, ValidationError};
use crate::domain::skills::{
    MergeError, SkillIndex, SkillSet, SnapshotError, DEFAULT_SKILL_VALUE, MAX_SKILL_VALUE,
    SKILL_COUNT,
};

use super::{MergeSession, ProfileService};

pub const HELP: &str = "\
Commands:
  show                     Show the working skill set
  set <1-8> <value>        Set a skill value (clamped to 1-10)
  name <1-8> <name>        Rename a skill
  reset [value]            Set every skill to one value (default 5)
  randomize                Random values for every skill
  save <name>              Save the working set as a new profile
  load <id>                Load a profile and make it current
  delete <id>              Delete a profile
  new                      Start a fresh working set
  rename <name>            Rename the current profile
  list                     List saved profiles
  export [path]            Export everything as JSON
  import <path>            Import a JSON export
  merge <id-a> <id-b>      Average two profiles
  merge clear              Clear the merge result
  help                     Show this help
  quit                     Exit";

/// Errors from parsing or running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Not a number: {0}")]
    InvalidNumber(String),

    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),

    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error("I/O error: {0}")]
    Io(String),
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Show,
    Set { index: SkillIndex, value: i32 },
    Name { index: SkillIndex, name: String },
    Reset { value: i32 },
    Randomize,
    Save { name: String },
    Load { id: ProfileId },
    Delete { id: ProfileId },
    New,
    Rename { name: String },
    List,
    Export { path: Option<PathBuf> },
    Import { path: PathBuf },
    Merge { first: ProfileId, second: ProfileId },
    MergeClear,
    Help,
    Quit,
}

/// What the caller should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim()))
            .unwrap_or((line, ""));

        match verb.to_ascii_lowercase().as_str() {
            "show" => Ok(Command::Show),
            "set" => {
                let (position, value) = split_pair(rest, "position", "value")?;
                Ok(Command::Set {
                    index: parse_position(position)?,
                    value: parse_number(value)?,
                })
            }
            "name" => {
                let (position, name) = split_pair(rest, "position", "name")?;
                Ok(Command::Name {
                    index: parse_position(position)?,
                    name: name.to_string(),
                })
            }
            "reset" => {
                let value = if rest.is_empty() {
                    DEFAULT_SKILL_VALUE
                } else {
                    parse_number(rest)?
                };
                Ok(Command::Reset { value })
            }
            "randomize" | "random" => Ok(Command::Randomize),
            "save" => Ok(Command::Save {
                name: require(rest, "name")?.to_string(),
            }),
            "load" => Ok(Command::Load {
                id: require(rest, "id")?.parse()?,
            }),
            "delete" => Ok(Command::Delete {
                id: require(rest, "id")?.parse()?,
            }),
            "new" => Ok(Command::New),
            "rename" => Ok(Command::Rename {
                name: require(rest, "name")?.to_string(),
            }),
            "list" => Ok(Command::List),
            "export" => Ok(Command::Export {
                path: (!rest.is_empty()).then(|| PathBuf::from(rest)),
            }),
            "import" => Ok(Command::Import {
                path: PathBuf::from(require(rest, "path")?),
            }),
            "merge" => {
                if rest.eq_ignore_ascii_case("clear") {
                    return Ok(Command::MergeClear);
                }
                let (first, second) = split_pair(rest, "first id", "second id")?;
                Ok(Command::Merge {
                    first: first.parse()?,
                    second: second.parse()?,
                })
            }
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }
}

/// Runs one command.
pub async fn execute(
    command: Command,
    service: &mut ProfileService,
    merge: &mut MergeSession,
    merge_delay: Duration,
) -> Result<Reply, CommandError> {
    let text = match command {
        Command::Show => render_working_set(service),
        Command::Set { index, value } => {
            let stored = service.set_skill_value(index, value).await;
            let name = &service.store().skills()[index].name;
            format!("{} = {}", name, stored)
        }
        Command::Name { index, name } => {
            service.set_skill_name(index, name).await;
            render_working_set(service)
        }
        Command::Reset { value } => {
            service.reset_all(value).await;
            render_working_set(service)
        }
        Command::Randomize => {
            service.randomize().await;
            render_working_set(service)
        }
        Command::Save { name } => {
            let id = service.save_current_profile(&name).await?;
            format!("Saved '{}' as {}", name.trim(), id)
        }
        Command::Load { id } => {
            if service.load_profile(&id).await {
                render_working_set(service)
            } else {
                format!("No profile {}", id)
            }
        }
        Command::Delete { id } => {
            if service.delete_profile(&id).await {
                format!("Deleted {}", id)
            } else {
                format!("No profile {}", id)
            }
        }
        Command::New => {
            service.create_new_profile().await;
            render_working_set(service)
        }
        Command::Rename { name } => {
            if service.rename_current_profile(name.as_str()).await {
                format!("Renamed current profile to '{}'", name)
            } else {
                "No current profile".to_string()
            }
        }
        Command::List => render_profile_list(service),
        Command::Export { path } => {
            let document = service.export_snapshot()?;
            match path {
                Some(path) => {
                    tokio::fs::write(&path, document.as_bytes())
                        .await
                        .map_err(|e| CommandError::Io(e.to_string()))?;
                    format!("Exported to {}", path.display())
                }
                None => document,
            }
        }
        Command::Import { path } => {
            let document = tokio::fs::read_to_string(&path)
                .await
                .map_err(|e| CommandError::Io(e.to_string()))?;
            service.import_snapshot(&document).await?;
            format!(
                "Imported {} profiles from {}",
                service.store().profiles().len(),
                path.display()
            )
        }
        Command::Merge { first, second } => {
            merge.select_first(first)?;
            merge.select_second(second)?;
            merge.start(service.store(), merge_delay)?;
            match merge.wait().await {
                Some(outcome) => render_skills(&outcome.skills),
                None => "Merge cancelled".to_string(),
            }
        }
        Command::MergeClear => {
            merge.reset();
            "Merge result cleared".to_string()
        }
        Command::Help => HELP.to_string(),
        Command::Quit => return Ok(Reply::Quit),
    };
    Ok(Reply::Text(text))
}

/// One line per skill: position, name, bar, value.
pub fn render_skills(skills: &SkillSet) -> String {
    let mut out = String::new();
    for (i, skill) in skills.iter().enumerate() {
        let filled = skill.value.clamp(0, MAX_SKILL_VALUE) as usize;
        let bar = format!(
            "{}{}",
            "#".repeat(filled),
            ".".repeat(MAX_SKILL_VALUE as usize - filled)
        );
        let _ = writeln!(out, "{}. {:<12} {} {:>2}", i + 1, skill.name, bar, skill.value);
    }
    out.truncate(out.trim_end().len());
    out
}

fn render_working_set(service: &ProfileService) -> String {
    let header = match service.store().current_profile() {
        Some(profile) => format!("Current profile: {}", profile.name()),
        None => "No current profile".to_string(),
    };
    format!("{}\n{}", header, render_skills(service.store().skills()))
}

fn render_profile_list(service: &ProfileService) -> String {
    let summaries = service.store().profile_summaries();
    if summaries.is_empty() {
        return "No saved profiles".to_string();
    }
    let mut out = String::new();
    for summary in summaries {
        let marker = if summary.is_current { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{} {}  {}  (updated {})",
            marker,
            summary.id,
            summary.name,
            summary.updated_at.date_label()
        );
    }
    out.truncate(out.trim_end().len());
    out
}

fn require<'a>(rest: &'a str, what: &'static str) -> Result<&'a str, CommandError> {
    if rest.is_empty() {
        Err(CommandError::MissingArgument(what))
    } else {
        Ok(rest)
    }
}

fn split_pair<'a>(
    rest: &'a str,
    first: &'static str,
    second: &'static str,
) -> Result<(&'a str, &'a str), CommandError> {
    let rest = require(rest, first)?;
    let (a, b) = rest
        .split_once(char::is_whitespace)
        .ok_or(CommandError::MissingArgument(second))?;
    Ok((a, require(b.trim(), second)?))
}

fn parse_number(raw: &str) -> Result<i32, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

fn parse_position(raw: &str) -> Result<SkillIndex, CommandError> {
    let position: usize = raw
        .parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))?;
    let index = position
        .checked_sub(1)
        .ok_or_else(|| ValidationError::out_of_range("position", 1, SKILL_COUNT as i64, 0))?;
    Ok(SkillIndex::new(index)?)
}
