use crate::entity::Direction;
use crate::game::Snapshot;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Direction(Direction),
    /// Request the player to stop (the (0,0) intent).
    Halt,
    Quit,
    Restart,
}

/// Trait that abstracts the presentation adapter. The core hands it a
/// read-only snapshot once per frame and receives intent commands back.
pub trait Renderer {
    /// Initialize the renderer
    fn init(&mut self) -> io::Result<()>;

    /// Render the current simulation snapshot
    fn render(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()>;

    /// Clean up and restore terminal/display state
    fn cleanup(&mut self) -> io::Result<()>;

    /// Poll for input from the user
    fn poll_input(&mut self) -> io::Result<Option<Input>>;
}
