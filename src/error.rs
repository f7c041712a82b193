use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    /// Invalid dimensions or cadence at setup time. Fatal: the level cannot
    /// be constructed.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Direct cell access outside the grid. Motion logic clamps before
    /// indexing, so this indicates a caller contract violation.
    #[error("cell ({x}, {y}) is outside the {cols}x{rows} grid")]
    OutOfBounds { x: i32, y: i32, cols: i32, rows: i32 },
}
