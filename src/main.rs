use crossterm::terminal;
use neonix::{CliRenderer, Game, GameConfig, Input, Renderer};
use std::io;
use std::time::{Duration, Instant};

// Simulation frame cadence; the player tick divisor lives in GameConfig.
const FRAME_TIME: Duration = Duration::from_millis(16);

fn main() -> io::Result<()> {
    // Size the grid from the terminal:
    // - each cell is 2 chars wide, so cols = term_width / 2
    // - reserve 4 lines at the bottom for the info display
    let (term_width, term_height) = terminal::size()?;
    let cols = ((term_width / 2) as i32).max(24);
    let rows = ((term_height - 4) as i32).max(16);

    let config = GameConfig {
        cols,
        rows,
        ..GameConfig::default()
    };
    let mut game = Game::new(config).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let mut renderer = CliRenderer::new();

    renderer.init()?;

    let mut last_frame = Instant::now();

    loop {
        if let Some(input) = renderer.poll_input()? {
            match input {
                Input::Direction(direction) => {
                    game.queue_direction(direction);
                }
                Input::Halt => {
                    game.set_direction_intent(0, 0);
                }
                Input::Restart => {
                    game.restart();
                }
                Input::Quit => {
                    break;
                }
            }
        }

        if last_frame.elapsed() >= FRAME_TIME {
            game.update();
            last_frame = Instant::now();
        }

        // Renderer throttles itself to its own frame rate
        renderer.render(&game.snapshot())?;
    }

    renderer.cleanup()?;
    Ok(())
}
