//! Terminal visualizer for the step-wise A* search.
//!
//! Each frame advances the search by a fixed number of expansions, paints
//! the grid into a [`Canvas`](canvas::Canvas) and flushes it with crossterm.
//! Candidates (open set) are blue, evaluated nodes (closed set) green, the
//! final path yellow, and the start and goal cells are outlined in red.

pub mod app;
pub mod canvas;
pub mod config;
pub mod logpane;
pub mod term;
pub mod view;

pub use app::{run_batch, run_interactive};
pub use config::{Cli, ConfigError, DemoConfig};
