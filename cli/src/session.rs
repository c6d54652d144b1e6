use std::io::{BufRead, Write};
use sweeper_core::{Field, GameConfig, Options, RandomMinefieldGenerator};

use crate::command::{Command, HELP};
use crate::render::Board;

/// A run of games on the same field configuration.
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    options: Options,
    seed: Option<u64>,
    games: u64,
    field: Field,
}

/// What the loop should do after a command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Redraw the field, optionally with a message underneath
    Redraw(Option<String>),
    /// Show text without redrawing
    Message(String),
    Quit,
}

impl Session {
    pub fn new(config: GameConfig, options: Options, seed: Option<u64>) -> Self {
        let field = Self::new_field(config, options, seed, 0);
        Self {
            config,
            options,
            seed,
            games: 0,
            field,
        }
    }

    fn new_field(config: GameConfig, options: Options, seed: Option<u64>, game: u64) -> Field {
        match seed {
            // consecutive games stay reproducible without repeating the same layout
            Some(seed) => Field::with_generator(
                config,
                options,
                RandomMinefieldGenerator::new(seed.wrapping_add(game)),
            ),
            None => Field::new(config, options),
        }
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn apply(&mut self, command: Command) -> Reply {
        match command {
            Command::Move(mode, coords) => match self.field.do_operation(coords, mode) {
                Ok(changed) => {
                    log::debug!("{:?} at {:?} changed {} cells", mode, coords, changed.len());
                    if changed.is_empty() && self.field.status().is_finished() {
                        Reply::Message("The game is over, 'n' for a new one".to_owned())
                    } else {
                        Reply::Redraw(None)
                    }
                }
                Err(err) => Reply::Message(err.to_string()),
            },
            Command::Undo => match self.field.undo() {
                Some(coords) => Reply::Redraw(Some(format!("Took back {:?}", coords))),
                None => Reply::Message("Nothing to undo".to_owned()),
            },
            Command::New => {
                self.games += 1;
                self.field = Self::new_field(self.config, self.options, self.seed, self.games);
                log::info!("New game #{} on {}", self.games + 1, self.config);
                Reply::Redraw(None)
            }
            Command::Help => Reply::Message(HELP.to_owned()),
            Command::Quit => Reply::Quit,
        }
    }

    /// Reads commands line by line until `quit` or end of input.
    pub fn run(&mut self, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
        write!(output, "{}", Board(&self.field))?;
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            let reply = match line.parse::<Command>() {
                Ok(command) => self.apply(command),
                Err(err) => Reply::Message(err.to_string()),
            };

            match reply {
                Reply::Redraw(message) => {
                    write!(output, "{}", Board(&self.field))?;
                    if let Some(message) = message {
                        writeln!(output, "{}", message)?;
                    }
                }
                Reply::Message(message) => writeln!(output, "{}", message)?,
                Reply::Quit => break,
            }
            write!(output, "> ")?;
            output.flush()?;
        }
        writeln!(output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sweeper_core::{GameStatus, Mode, Tile};

    fn session() -> Session {
        Session::new(GameConfig::BEGINNER, Options::default(), Some(5))
    }

    fn run(input: &str) -> (Session, String) {
        let mut session = session();
        let mut output = Vec::new();
        session.run(input.as_bytes(), &mut output).unwrap();
        (session, String::from_utf8(output).unwrap())
    }

    #[test]
    fn flag_round_trip_through_commands() {
        let (session, output) = run("f 0 0\nf 0 0\nq\n");

        assert!(output.contains("mines left: 9"));
        assert_eq!(session.field().mines_left(), 10);
        assert_eq!(session.field().tile_at((0, 0)), Ok(Tile::Covered));
    }

    #[test]
    fn bad_input_is_reported_and_ignored() {
        let (session, output) = run("x 1 2\no 40 0\n");

        assert!(output.contains("Unknown command \"x\""));
        assert!(output.contains("outside the field"));
        assert!(!session.field().is_initialized());
    }

    #[test]
    fn same_seed_replays_the_same_game() {
        let mut first = session();
        let mut second = session();

        first.apply(Command::Move(Mode::Open, (4, 4)));
        second.apply(Command::Move(Mode::Open, (4, 4)));

        assert_eq!(first.field().tiles(), second.field().tiles());
    }

    #[test]
    fn undo_after_loss() {
        let mut session = session();
        session.apply(Command::Move(Mode::Open, (4, 4)));
        let cells = session.field().cells().unwrap();
        let (mine, _) = cells
            .indexed_iter()
            .find(|(_, cell)| cell.value().is_mine())
            .unwrap();
        let mine = (mine.0 as u8, mine.1 as u8);

        session.apply(Command::Move(Mode::Open, mine));
        assert_eq!(session.field().status(), GameStatus::Lost);
        assert_eq!(
            session.apply(Command::Move(Mode::Flag, (0, 0))),
            Reply::Message("The game is over, 'n' for a new one".to_owned())
        );

        let reply = session.apply(Command::Undo);

        assert_eq!(reply, Reply::Redraw(Some(format!("Took back {:?}", mine))));
        assert_eq!(session.field().status(), GameStatus::Running);
        assert_eq!(session.apply(Command::Undo), Reply::Message("Nothing to undo".to_owned()));
    }

    #[test]
    fn new_game_resets_field() {
        let mut session = session();
        session.apply(Command::Move(Mode::Flag, (1, 1)));

        assert_eq!(session.apply(Command::New), Reply::Redraw(None));
        assert!(!session.field().is_initialized());
        assert_eq!(session.field().mines_left(), 10);
        assert_eq!(session.apply(Command::Quit), Reply::Quit);
    }
}
