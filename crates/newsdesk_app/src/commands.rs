use newsdesk_core::{CategoryFilter, Msg, RefreshTrigger, UnknownCategory};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  refresh              fetch the latest articles
  search <text>        filter by text and use it as the next query
  clear                clear the search filter
  category <name|all>  ai, robotics, cybersecurity, quantum, tech
  page <n>             jump to page n
  next | prev          move one page
  hide | show          simulate the view losing or regaining focus
  help                 show this list
  quit                 exit";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(Msg),
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("{0:?} is not a page number")]
    InvalidPage(String),
    #[error(transparent)]
    Category(#[from] UnknownCategory),
}

/// Blank lines parse to `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "refresh" | "r" => Command::Intent(Msg::RefreshRequested(RefreshTrigger::Manual)),
        "search" | "s" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("search"));
            }
            Command::Intent(Msg::SearchChanged(rest.to_string()))
        }
        "clear" => Command::Intent(Msg::SearchChanged(String::new())),
        "category" | "c" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("category"));
            }
            Command::Intent(Msg::CategorySelected(rest.parse::<CategoryFilter>()?))
        }
        "page" => {
            let page = rest
                .parse::<usize>()
                .map_err(|_| CommandError::InvalidPage(rest.to_string()))?;
            Command::Intent(Msg::GoToPage(page))
        }
        "next" | "n" => Command::Intent(Msg::NextPage),
        "prev" | "p" => Command::Intent(Msg::PrevPage),
        "hide" => Command::Intent(Msg::VisibilityChanged(false)),
        "show" => Command::Intent(Msg::VisibilityChanged(true)),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        _ => return Err(CommandError::Unknown(word.to_string())),
    };
    Ok(Some(command))
}
