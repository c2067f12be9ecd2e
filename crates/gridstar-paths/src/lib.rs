//! Step-wise A* search on uniform 4-connected grids.
//!
//! A [`Grid`] owns its nodes in a flat arena and links each one to its
//! in-bounds left, right, up and down neighbours. An [`AStarSearch`] borrows
//! a grid and advances one expansion per [`step`](AStarSearch::step), so a
//! renderer can show the frontier as it grows:
//!
//! ```
//! use gridstar_core::Point;
//! use gridstar_paths::{AStarSearch, Grid, SearchState};
//!
//! let grid = Grid::new(3, 3)?;
//! let mut search = AStarSearch::new(&grid, Point::new(0, 0), Point::new(2, 2))?;
//! while search.step() == SearchState::Running {
//!     // draw search.open_set() / search.closed_set() here
//! }
//! assert_eq!(search.path()?.len(), 5);
//! # Ok::<(), gridstar_paths::PathError>(())
//! ```
//!
//! Edges all cost 1 and the heuristic is [`manhattan`], which is admissible
//! and consistent for this movement model: closed nodes are never reopened
//! and the returned path is always a shortest one.

mod astar;
mod distance;
mod error;
mod grid;
mod neighbors;

pub use astar::{AStarSearch, SearchSnapshot, SearchState, find_path};
pub use distance::{euclidean, manhattan};
pub use error::{PathError, Result};
pub use grid::{Grid, GridNode, NodeId};
pub use neighbors::Neighbors;
