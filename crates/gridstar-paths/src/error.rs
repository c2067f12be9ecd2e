use gridstar_core::Point;
use thiserror::Error;

/// Convenient result alias for grid and search operations.
pub type Result<T> = std::result::Result<T, PathError>;

/// Errors surfaced by [`Grid`](crate::Grid) and [`AStarSearch`](crate::AStarSearch).
///
/// All of them are recoverable: a caller can retry with other parameters,
/// and [`PathError::NoPathExists`] is a valid negative answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// A grid was requested with a non-positive row or column count.
    #[error("invalid grid dimensions: {rows} rows x {cols} cols")]
    InvalidDimensions { rows: i32, cols: i32 },

    /// A coordinate lookup fell outside the grid.
    #[error("position {0} is outside the grid")]
    OutOfBounds(Point),

    /// A search endpoint lies outside the grid.
    #[error("search endpoint {0} is outside the grid")]
    InvalidStartOrGoal(Point),

    /// The open set ran dry before the goal was reached.
    #[error("no path exists from {start} to {goal}")]
    NoPathExists { start: Point, goal: Point },

    /// A result was requested from a search that has not terminated.
    #[error("search is still running")]
    SearchInProgress,
}
