use crate::entity::Direction;
use crate::game::Snapshot;
use crate::grid::Cell;
use crate::renderer::{Input, Renderer};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::{Duration, Instant};

pub struct CliRenderer {
    last_render: Instant,
    target_frame_time: Duration,
}

impl CliRenderer {
    pub fn new() -> Self {
        Self {
            last_render: Instant::now(),
            // Target 30 FPS for the terminal; the simulation runs faster
            target_frame_time: Duration::from_millis(33),
        }
    }

    fn draw_cell(&self, cell: Cell, stdout: &mut io::Stdout) -> io::Result<()> {
        match cell {
            Cell::Sea => {
                queue!(stdout, SetBackgroundColor(Color::Black), Print("  "))?;
            }
            Cell::Land => {
                queue!(stdout, SetBackgroundColor(Color::DarkBlue), Print("  "))?;
            }
            Cell::Trail => {
                queue!(stdout, SetBackgroundColor(Color::Cyan), Print("  "))?;
            }
        }
        Ok(())
    }

    fn draw_info(&self, snapshot: &Snapshot<'_>, stdout: &mut io::Stdout) -> io::Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, (snapshot.rows() + 1) as u16),
            ResetColor,
            Print(format!(
                "Level: {}  Score: {:06}  Lives: {}  Area: {}% / {}%  Time: {}",
                snapshot.level(),
                snapshot.score(),
                snapshot.lives(),
                snapshot.percent_captured(),
                snapshot.target_percent(),
                snapshot.time_left(),
            ))
        )?;

        queue!(
            stdout,
            cursor::MoveTo(0, (snapshot.rows() + 2) as u16),
            Print("Controls: Arrows/WASD to move | Space to stop | Q to quit | R to restart")
        )?;

        if snapshot.is_game_over() {
            queue!(
                stdout,
                cursor::MoveTo(0, (snapshot.rows() + 3) as u16),
                SetForegroundColor(Color::Red),
                Print(format!(
                    "GAME OVER! Final score: {} -- press R to restart",
                    snapshot.score()
                )),
                ResetColor
            )?;
        }

        Ok(())
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        Ok(())
    }

    fn render(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        // Frame rate limiting: skip rendering if not enough time has passed
        if self.last_render.elapsed() < self.target_frame_time {
            return Ok(());
        }

        self.last_render = Instant::now();

        let mut stdout = io::stdout();

        queue!(stdout, cursor::MoveTo(0, 0))?;

        let player = snapshot.player();
        for y in 0..snapshot.rows() {
            for x in 0..snapshot.cols() {
                if player.x == x && player.y == y {
                    queue!(
                        stdout,
                        SetBackgroundColor(Color::Green),
                        SetForegroundColor(Color::Black),
                        Print("@@")
                    )?;
                    continue;
                }

                if snapshot.sea_enemies().iter().any(|e| {
                    let c = e.cell();
                    c.x == x && c.y == y
                }) {
                    queue!(
                        stdout,
                        SetBackgroundColor(Color::Black),
                        SetForegroundColor(Color::Red),
                        Print("()"),
                        ResetColor
                    )?;
                    continue;
                }

                if snapshot
                    .land_enemies()
                    .iter()
                    .any(|e| e.position.x == x && e.position.y == y)
                {
                    queue!(
                        stdout,
                        SetBackgroundColor(Color::DarkBlue),
                        SetForegroundColor(Color::Magenta),
                        Print("><"),
                        ResetColor
                    )?;
                    continue;
                }

                self.draw_cell(snapshot.cell(x, y), &mut stdout)?;
            }
            queue!(stdout, ResetColor, Print("\r\n"))?;
        }

        self.draw_info(snapshot, &mut stdout)?;

        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        if event::poll(Duration::from_millis(5))? {
            if let Event::Key(KeyEvent { code, .. }) = event::read()? {
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') => {
                        return Ok(Some(Input::Quit));
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        return Ok(Some(Input::Restart));
                    }
                    KeyCode::Char(' ') => {
                        return Ok(Some(Input::Halt));
                    }
                    KeyCode::Up | KeyCode::Char('w') => {
                        return Ok(Some(Input::Direction(Direction::Up)))
                    }
                    KeyCode::Down | KeyCode::Char('s') => {
                        return Ok(Some(Input::Direction(Direction::Down)))
                    }
                    KeyCode::Left | KeyCode::Char('a') => {
                        return Ok(Some(Input::Direction(Direction::Left)))
                    }
                    KeyCode::Right | KeyCode::Char('d') => {
                        return Ok(Some(Input::Direction(Direction::Right)))
                    }
                    _ => {}
                }
            }
        }
        Ok(None)
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
