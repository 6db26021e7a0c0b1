//! Prompt command parsing.
//!
//! Rows are addressed by their 1-based position on screen.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub const HELP: &str = "\
commands:
  add <text>      add a task
  edit <n>        open the editor on row n
  text <text>     replace the editor contents
  save            save the open editor
  cancel          close the editor without saving
  toggle <n>      mark row n done / not done
  delete <n>      remove row n
  list            show the list
  json            print the list as JSON
  help            show this help
  quit            leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Edit(usize),
    Text(String),
    Save,
    Cancel,
    Toggle(usize),
    Delete(usize),
    List,
    Json,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    MissingRow(&'static str),
    InvalidRow(String),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(word) => {
                write!(f, "unknown command `{word}`; type `help` for commands")
            }
            Self::MissingRow(command) => write!(f, "`{command}` needs a row number"),
            Self::InvalidRow(raw) => write!(f, "`{raw}` is not a row number"),
        }
    }
}

impl Error for ParseError {}

/// Parses one prompt line.
///
/// Text arguments are passed through untrimmed; the store decides what is
/// blank.
pub fn parse(line: &str) -> Result<Command, ParseError> {
    let line = line.trim_end_matches(['\n', '\r']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(Command::Empty);
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "add" | "a" => Ok(Command::Add(rest.to_string())),
        "edit" | "e" => row("edit", rest).map(Command::Edit),
        "text" | "t" => Ok(Command::Text(rest.to_string())),
        "save" | "s" => Ok(Command::Save),
        "cancel" | "c" => Ok(Command::Cancel),
        "toggle" | "x" => row("toggle", rest).map(Command::Toggle),
        "delete" | "del" | "d" => row("delete", rest).map(Command::Delete),
        "list" | "ls" | "l" => Ok(Command::List),
        "json" => Ok(Command::Json),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        _ => Err(ParseError::UnknownCommand(word.to_string())),
    }
}

fn row(command: &'static str, rest: &str) -> Result<usize, ParseError> {
    let raw = rest.trim();
    if raw.is_empty() {
        return Err(ParseError::MissingRow(command));
    }
    match raw.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(ParseError::InvalidRow(raw.to_string())),
    }
}
