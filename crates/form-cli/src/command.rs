use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use form_spec::FieldKind;

/// Field kinds selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CliFieldKind {
    #[default]
    Text,
    Radio,
}

impl From<CliFieldKind> for FieldKind {
    fn from(kind: CliFieldKind) -> Self {
        match kind {
            CliFieldKind::Text => FieldKind::Text,
            CliFieldKind::Radio => FieldKind::Radio,
        }
    }
}

impl fmt::Display for CliFieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliFieldKind::Text => write!(f, "text"),
            CliFieldKind::Radio => write!(f, "radio"),
        }
    }
}

impl FromStr for CliFieldKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "" | "text" | "input" => Ok(CliFieldKind::Text),
            "radio" => Ok(CliFieldKind::Radio),
            other => Err(format!("unknown field kind '{}'", other)),
        }
    }
}

/// One line of shell input while no inline edit is in progress.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Show,
    Help,
    Quit,
    Submit,
    Add {
        label: String,
        placeholder: String,
        kind: CliFieldKind,
    },
    Label(usize),
    Placeholder(usize),
    Menu(usize),
    Delete(usize),
    Move {
        from: usize,
        to: usize,
    },
    Fill {
        index: usize,
        value: String,
    },
}

/// Error produced when a shell line cannot be understood.
#[derive(Debug)]
pub struct CommandParseError {
    pub user_message: String,
    pub debug_message: Option<String>,
}

impl CommandParseError {
    pub fn new(user_message: impl Into<String>, debug_message: Option<String>) -> Self {
        Self {
            user_message: user_message.into(),
            debug_message,
        }
    }
}

impl FromStr for ShellCommand {
    type Err = CommandParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.trim().splitn(2, char::is_whitespace);
        let verb = parts.next().unwrap_or("").to_lowercase();
        let rest = parts.next().unwrap_or("").trim();

        match verb.as_str() {
            "show" => Ok(ShellCommand::Show),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            "submit" => Ok(ShellCommand::Submit),
            "add" => parse_add(rest),
            "label" => Ok(ShellCommand::Label(parse_index(rest, "label")?)),
            "placeholder" => Ok(ShellCommand::Placeholder(parse_index(rest, "placeholder")?)),
            "menu" => Ok(ShellCommand::Menu(parse_index(rest, "menu")?)),
            "delete" => Ok(ShellCommand::Delete(parse_index(rest, "delete")?)),
            "move" => parse_move(rest),
            "fill" => parse_fill(rest),
            other => Err(CommandParseError::new(
                format!("Unknown command '{}'. Type help for the command list.", other),
                None,
            )),
        }
    }
}

fn parse_add(rest: &str) -> Result<ShellCommand, CommandParseError> {
    let mut segments = rest.splitn(3, '|').map(str::trim);
    let label = segments.next().unwrap_or("").to_string();
    let placeholder = segments.next().unwrap_or("").to_string();
    let kind = match segments.next() {
        Some(raw) => raw.parse::<CliFieldKind>().map_err(|err| {
            CommandParseError::new(
                "Field kind must be text or radio.",
                Some(err),
            )
        })?,
        None => CliFieldKind::Text,
    };
    Ok(ShellCommand::Add {
        label,
        placeholder,
        kind,
    })
}

fn parse_index(rest: &str, verb: &str) -> Result<usize, CommandParseError> {
    rest.parse::<usize>().map_err(|_| {
        CommandParseError::new(
            format!("'{}' expects a row index, e.g. '{} 0'.", verb, verb),
            Some(format!("got '{}'", rest)),
        )
    })
}

fn parse_move(rest: &str) -> Result<ShellCommand, CommandParseError> {
    let mut parts = rest.split_whitespace();
    let (Some(from), Some(to), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CommandParseError::new(
            "'move' expects two row indexes, e.g. 'move 0 2'.",
            Some(format!("got '{}'", rest)),
        ));
    };
    let from = parse_index(from, "move")?;
    let to = parse_index(to, "move")?;
    Ok(ShellCommand::Move { from, to })
}

fn parse_fill(rest: &str) -> Result<ShellCommand, CommandParseError> {
    let mut parts = rest.splitn(2, char::is_whitespace);
    let index = parse_index(parts.next().unwrap_or(""), "fill")?;
    let value = parts.next().unwrap_or("").trim().to_string();
    Ok(ShellCommand::Fill { index, value })
}
