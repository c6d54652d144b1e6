use std::str::FromStr;
use sweeper_core::{Coord, Coord2, Mode};
use thiserror::Error;

/// A line typed by the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Move(Mode, Coord2),
    Undo,
    New,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command, type 'h' for help")]
    Empty,
    #[error("Unknown command {0:?}, type 'h' for help")]
    Unknown(String),
    #[error("{0:?} needs two coordinates, e.g. '{0} 3 4'")]
    MissingCoords(String),
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error("Too many arguments for {0:?}")]
    TrailingInput(String),
}

pub const HELP: &str = "\
Commands:
  o X Y   open a cell
  f X Y   toggle a flag
  c X Y   open around a satisfied number (or open a covered cell)
  u       undo the move that lost the game
  n       new game with the same field
  h       this help
  q       quit";

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(ParseCommandError::Empty);
        };

        let mode = match verb.to_ascii_lowercase().as_str() {
            "o" | "open" => Mode::Open,
            "f" | "flag" => Mode::Flag,
            "c" | "chord" => Mode::OpenNearby,
            "u" | "undo" => return no_args(Self::Undo, verb, words),
            "n" | "new" => return no_args(Self::New, verb, words),
            "h" | "help" | "?" => return no_args(Self::Help, verb, words),
            "q" | "quit" | "exit" => return no_args(Self::Quit, verb, words),
            _ => return Err(ParseCommandError::Unknown(verb.to_owned())),
        };

        let (Some(x), Some(y)) = (words.next(), words.next()) else {
            return Err(ParseCommandError::MissingCoords(verb.to_owned()));
        };
        let coords = (parse_coord(x)?, parse_coord(y)?);
        no_args(Self::Move(mode, coords), verb, words)
    }
}

fn no_args<'a>(
    command: Command,
    verb: &str,
    mut rest: impl Iterator<Item = &'a str>,
) -> Result<Command, ParseCommandError> {
    match rest.next() {
        None => Ok(command),
        Some(_) => Err(ParseCommandError::TrailingInput(verb.to_owned())),
    }
}

fn parse_coord(word: &str) -> Result<Coord, ParseCommandError> {
    word.parse()
        .map_err(|_| ParseCommandError::InvalidCoord(word.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!("o 3 4".parse::<Command>(), Ok(Command::Move(Mode::Open, (3, 4))));
        assert_eq!("Flag 0 8".parse::<Command>(), Ok(Command::Move(Mode::Flag, (0, 8))));
        assert_eq!(
            "  c   12 7 ".parse::<Command>(),
            Ok(Command::Move(Mode::OpenNearby, (12, 7)))
        );
    }

    #[test]
    fn parses_single_word_commands() {
        assert_eq!("u".parse::<Command>(), Ok(Command::Undo));
        assert_eq!("new".parse::<Command>(), Ok(Command::New));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("QUIT".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!("".parse::<Command>(), Err(ParseCommandError::Empty));
        assert_eq!(
            "dig 1 1".parse::<Command>(),
            Err(ParseCommandError::Unknown("dig".into()))
        );
        assert_eq!(
            "o 1".parse::<Command>(),
            Err(ParseCommandError::MissingCoords("o".into()))
        );
        assert_eq!(
            "f -1 2".parse::<Command>(),
            Err(ParseCommandError::InvalidCoord("-1".into()))
        );
        assert_eq!(
            "u 1".parse::<Command>(),
            Err(ParseCommandError::TrailingInput("u".into()))
        );
    }
}
