use std::str::FromStr;

use gemline_core::{Action, Coord, Coord2};
use thiserror::Error;

pub const SWAP_USAGE: &str = "swap x1 y1 x2 y2";
pub const BONUS_USAGE: &str = "bonus x y";

pub const HELP: &str = "\
Commands:
  start               leave the title screen
  play                start playing from the menu
  swap x1 y1 x2 y2    swap two cells, matches are resolved right away
  bonus x y           activate the bonus cell (*) at x y
  resolve             resolve matches without swapping
  shuffle             refill the whole board
  stop                back to the menu
  end                 finish the game
  stats               show statistics
  help                show this help
  exit                quit";

/// One parsed console command.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Swap(Coord2, Coord2),
    Bonus(Coord2),
    Action(Action),
    Resolve,
    Shuffle,
    Stats,
    Help,
    Exit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}', type 'help' for the list of commands")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = parts.collect();
        let name = name.to_ascii_lowercase();

        let command = match name.as_str() {
            "swap" => {
                let [x1, y1, x2, y2] = parse_coords(&args, SWAP_USAGE)?;
                return Ok(Command::Swap((x1, y1), (x2, y2)));
            }
            "bonus" => {
                let [x, y] = parse_coords(&args, BONUS_USAGE)?;
                return Ok(Command::Bonus((x, y)));
            }
            "resolve" => (Command::Resolve, "resolve"),
            "shuffle" => (Command::Shuffle, "shuffle"),
            "stats" => (Command::Stats, "stats"),
            "help" => (Command::Help, "help"),
            "exit" | "quit" => (Command::Exit, "exit"),
            other => match other.parse::<Action>() {
                Ok(action) => (Command::Action(action), action.name()),
                Err(_) => return Err(CommandError::Unknown(other.to_owned())),
            },
        };

        match command {
            (command, _) if args.is_empty() => Ok(command),
            (_, usage) => Err(CommandError::Usage(usage)),
        }
    }
}

fn parse_coords<const N: usize>(
    args: &[&str],
    usage: &'static str,
) -> Result<[Coord; N], CommandError> {
    if args.len() != N {
        return Err(CommandError::Usage(usage));
    }
    let mut coords = [0; N];
    for (coord, arg) in coords.iter_mut().zip(args) {
        *coord = arg.parse().map_err(|_| CommandError::Usage(usage))?;
    }
    Ok(coords)
}
