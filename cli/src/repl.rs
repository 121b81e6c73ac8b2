use gemline_core::{Action, Game, GameError, KindGenerator, Phase, ResolveOutcome};

use crate::command::{Command, CommandError, HELP};
use crate::console::Console;

enum Flow {
    Continue,
    Quit,
}

/// Drives `game` from console input until the player exits, input ends or the game is over.
///
/// Invalid commands and rejected turns are reported to the player and the loop goes on.
pub fn run<G: KindGenerator, C: Console>(game: &mut Game<G>, console: &mut C) -> anyhow::Result<()> {
    console.write_line("Welcome to Gemline! Type 'help' for the list of commands.");
    game.apply_action(Action::Start)?;

    loop {
        console.write_line(&format!("Phase: {}  Score: {}", game.phase(), game.score()));
        if game.phase() == Phase::Playing {
            console.write_line(&game.grid().generate_grid_string());
        }

        let Some(line) = console.read_line() else {
            log::debug!("Input closed");
            break;
        };
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                console.write_line(&err.to_string());
                continue;
            }
        };
        log::debug!("Command: {:?}", command);

        if let Flow::Quit = execute(game, command, console)? {
            break;
        }
        if game.is_finished() {
            break;
        }
        if game.phase() == Phase::Playing && game.check_game_over() {
            console.write_line("No matches left on the board, try a swap, 'shuffle' or 'end'.");
        }
    }

    console.write_line(&game.stats().formatted_stats());
    console.write_line("Thanks for playing!");
    Ok(())
}

fn execute<G: KindGenerator, C: Console>(
    game: &mut Game<G>,
    command: Command,
    console: &mut C,
) -> anyhow::Result<Flow> {
    let result = match command {
        Command::Swap(a, b) => game.swap(a, b).map(|outcome| describe(&outcome)),
        Command::Bonus(coords) => game
            .activate_bonus(coords)
            .map(|outcome| format!("Bonus activated! +{} points", outcome.points)),
        Command::Resolve => game.resolve_matches().map(|outcome| describe(&outcome)),
        Command::Shuffle => game.reshuffle().map(|()| "Board reshuffled".to_owned()),
        Command::Action(action) => game
            .apply_action(action)
            .map(|phase| format!("Phase is now {phase}")),
        Command::Stats => Ok(game.stats().formatted_stats()),
        Command::Help => Ok(HELP.to_owned()),
        Command::Exit => return Ok(Flow::Quit),
    };

    match result {
        Ok(message) => console.write_line(&message),
        Err(err @ GameError::InvalidScoreDelta(_)) => return Err(err.into()),
        Err(err) => console.write_line(&err.to_string()),
    }
    Ok(Flow::Continue)
}

fn describe(outcome: &ResolveOutcome) -> String {
    if !outcome.has_update() {
        return "No matches".to_owned();
    }
    let mut message = String::new();
    for found in &outcome.matches {
        message.push_str(&format!("Match found: {found}\n"));
    }
    message.push_str(&format!("+{} points", outcome.points));
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::TextConsole;
    use gemline_core::{CellKind, CycleKindGenerator, GameConfig, Grid};
    use std::io::Cursor;

    fn game(rows: &[&str]) -> Game<CycleKindGenerator> {
        Game::with_grid(
            &GameConfig::default(),
            Grid::from_rows(rows).unwrap(),
            CycleKindGenerator::new([CellKind::E]),
        )
    }

    fn play(game: &mut Game<CycleKindGenerator>, input: &str) -> String {
        let mut console = TextConsole::new(Cursor::new(input.to_owned()), Vec::new());
        run(game, &mut console).unwrap();
        String::from_utf8_lossy(console.output()).into_owned()
    }

    #[test]
    fn end_of_input_prints_final_stats() {
        let mut game = game(&["AB", "CD"]);

        let output = play(&mut game, "");

        assert_eq!(game.phase(), Phase::Menu);
        assert!(output.starts_with("Welcome to Gemline!"));
        assert!(output.contains("Final statistics:\nScore: 0\nSteps: 0\n"));
    }

    #[test]
    fn swap_scores_and_reports_matches() {
        let mut game = game(&["ABA", "CAE"]);

        let output = play(&mut game, "play\nswap 1 0 1 1\nexit\n");

        assert_eq!(game.score(), 10);
        assert_eq!(game.stats().steps_count(), 1);
        assert_eq!(game.grid(), &Grid::from_rows(&["EEE", "CBE"]).unwrap());
        assert!(output.contains("Match found: Row 0, type=A, length=3\n+10 points"));
        assert!(output.contains("Phase: playing  Score: 10"));
    }

    #[test]
    fn malformed_commands_leave_the_game_untouched() {
        let mut game = game(&["AB", "CD"]);
        let before = game.grid().clone();

        let output = play(
            &mut game,
            "play\nswap 0 0\nswap a b c d\nbonus 1\njump\nswap 0 0 5 5\n\nexit\n",
        );

        assert_eq!(game.grid(), &before);
        assert_eq!(game.score(), 0);
        assert_eq!(game.stats().steps_count(), 0);
        assert!(output.contains("Usage: swap x1 y1 x2 y2"));
        assert!(output.contains("Usage: bonus x y"));
        assert!(output.contains("Unknown command 'jump'"));
        assert!(output.contains("Coordinates (5, 5) are out of range"));
    }

    #[test]
    fn board_commands_are_refused_in_menu() {
        let mut game = game(&["AB", "CD"]);

        let output = play(&mut game, "swap 0 0 1 0\nexit\n");

        assert_eq!(game.stats().steps_count(), 0);
        assert!(output.contains("Board operations are not allowed in phase 'menu'"));
        assert!(!output.contains("+-----+"));
    }

    #[test]
    fn ending_the_game_stops_the_loop() {
        let mut game = game(&["AB", "CD"]);

        let output = play(&mut game, "play\nend\nswap 0 0 1 0\n");

        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.stats().steps_count(), 0);
        assert!(output.contains("Phase is now gameOver"));
        assert!(output.contains("Thanks for playing!"));
    }

    #[test]
    fn dead_board_is_announced() {
        let mut game = game(&["AB", "CD"]);

        let output = play(&mut game, "play\nbonus 0 0\nexit\n");

        assert!(output.contains("Cell is not a bonus cell"));
        assert!(output.contains("No matches left on the board"));
    }
}
