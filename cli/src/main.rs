use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use sweeper_core::{CellCount, Coord, GameConfig, Options, Preset};

mod command;
mod render;
mod session;
mod settings;

use session::Session;
use settings::Settings;

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// TOML settings file, command line flags take precedence
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Standard field: beginner, intermediate or expert
    #[arg(short, long, conflicts_with_all = ["width", "height", "mines"])]
    preset: Option<Preset>,

    /// Custom field width
    #[arg(long, requires_all = ["height", "mines"])]
    width: Option<Coord>,

    /// Custom field height
    #[arg(long, requires_all = ["width", "mines"])]
    height: Option<Coord>,

    /// Custom mine count
    #[arg(long, requires_all = ["width", "height"])]
    mines: Option<CellCount>,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Only open the neighbors of the chorded cell, do not cascade
    #[arg(long)]
    no_recursive_chord: bool,
}

impl Args {
    fn game_config(&self, settings: &Settings) -> anyhow::Result<GameConfig> {
        if let (Some(width), Some(height), Some(mines)) = (self.width, self.height, self.mines) {
            return GameConfig::new((width, height), mines).with_context(|| {
                format!(
                    "Width and height must be {}..={}, mines {}..={}",
                    GameConfig::MIN_SIZE,
                    GameConfig::MAX_SIZE,
                    GameConfig::MIN_MINES,
                    GameConfig::max_mines((width, height))
                )
            });
        }
        Ok(self
            .preset
            .map(Preset::config)
            .unwrap_or_else(|| settings.game_config()))
    }

    fn options(&self, settings: &Settings) -> Options {
        if self.no_recursive_chord {
            settings.options.with_recursive_chord(false)
        } else {
            settings.options
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let config = args.game_config(&settings)?;
    let options = args.options(&settings);
    let seed = args.seed.or(settings.seed);
    log::debug!("config: {}, options: {:?}, seed: {:?}", config, options, seed);

    let mut session = Session::new(config, options, seed);
    session.run(io::stdin().lock(), io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &[&str]) -> Args {
        Args::try_parse_from(["sweeper"].iter().chain(line)).unwrap()
    }

    #[test]
    fn flags_override_settings() {
        let settings = Settings {
            preset: Some(Preset::Expert),
            ..Settings::default()
        };

        assert_eq!(
            args(&[]).game_config(&settings).unwrap(),
            GameConfig::EXPERT
        );
        assert_eq!(
            args(&["--preset", "intermediate"])
                .game_config(&settings)
                .unwrap(),
            GameConfig::INTERMEDIATE
        );
        assert_eq!(
            args(&["--width", "20", "--height", "10", "--mines", "35"])
                .game_config(&settings)
                .unwrap(),
            GameConfig::new((20, 10), 35).unwrap()
        );
    }

    #[test]
    fn invalid_custom_field_is_an_error() {
        let result = args(&["--width", "20", "--height", "10", "--mines", "500"])
            .game_config(&Settings::default());

        assert!(result.is_err());
    }

    #[test]
    fn partial_custom_field_is_rejected() {
        assert!(Args::try_parse_from(["sweeper", "--width", "20"]).is_err());
        assert!(Args::try_parse_from(["sweeper", "-p", "expert", "--mines", "20"]).is_err());
    }

    #[test]
    fn chord_cascade_can_be_disabled() {
        let settings = Settings::default();

        assert!(args(&[]).options(&settings).recursive_chord);
        assert!(!args(&["--no-recursive-chord"]).options(&settings).recursive_chord);
    }
}
