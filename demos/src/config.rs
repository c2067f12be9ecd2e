//! Command-line configuration for the visualizer.

use std::time::Duration;

use clap::Parser;
use gridstar_core::Point;
use gridstar_paths::PathError;
use thiserror::Error;

use crate::view::LOG_LINES;

/// Animated A* search on a terminal grid.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Animated A* search on a terminal grid")]
pub struct Cli {
    /// Number of grid rows.
    #[arg(long, default_value_t = 20)]
    pub rows: i32,

    /// Number of grid columns.
    #[arg(long, default_value_t = 20)]
    pub cols: i32,

    /// Start cell as `x,y`.
    #[arg(long, value_parser = parse_point, default_value = "0,0")]
    pub start: Point,

    /// Goal cell as `x,y`. Defaults to the bottom-right corner.
    #[arg(long, value_parser = parse_point)]
    pub goal: Option<Point>,

    /// Frame rate cap; 0 animates as fast as the terminal allows.
    #[arg(long, default_value_t = 30)]
    pub max_fps: u32,

    /// Terminal columns used to draw one grid cell.
    #[arg(long, default_value_t = 2)]
    pub cell_width: u16,

    /// Search expansions per animation frame.
    #[arg(long, default_value_t = 1)]
    pub steps_per_frame: usize,

    /// Run to completion and print the path instead of animating.
    #[arg(long)]
    pub batch: bool,

    /// Show engine debug messages in the log pane.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Errors found while validating a [`Cli`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("cell width must be at least 1")]
    CellWidth,

    #[error("steps per frame must be at least 1")]
    StepsPerFrame,

    #[error("{rows} rows x {cols} cols at cell width {cell_width} does not fit a terminal canvas")]
    TooLarge { rows: i32, cols: i32, cell_width: u16 },
}

/// Validated visualizer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub rows: i32,
    pub cols: i32,
    pub start: Point,
    pub goal: Point,
    pub max_fps: u32,
    pub cell_width: u16,
    pub steps_per_frame: usize,
    pub batch: bool,
    pub verbose: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            rows: 20,
            cols: 20,
            start: Point::new(0, 0),
            goal: Point::new(19, 19),
            max_fps: 30,
            cell_width: 2,
            steps_per_frame: 1,
            batch: false,
            verbose: false,
        }
    }
}

impl DemoConfig {
    /// Time budget of one frame, or `None` when uncapped.
    pub fn frame_interval(&self) -> Option<Duration> {
        (self.max_fps > 0).then(|| Duration::from_secs(1) / self.max_fps)
    }
}

impl TryFrom<Cli> for DemoConfig {
    type Error = ConfigError;

    fn try_from(cli: Cli) -> Result<Self, ConfigError> {
        if cli.rows <= 0 || cli.cols <= 0 {
            return Err(PathError::InvalidDimensions {
                rows: cli.rows,
                cols: cli.cols,
            }
            .into());
        }
        let goal = cli.goal.unwrap_or(Point::new(cli.cols - 1, cli.rows - 1));
        let inside = |p: Point| p.x >= 0 && p.x < cli.cols && p.y >= 0 && p.y < cli.rows;
        for p in [cli.start, goal] {
            if !inside(p) {
                return Err(PathError::InvalidStartOrGoal(p).into());
            }
        }
        if cli.cell_width == 0 {
            return Err(ConfigError::CellWidth);
        }
        if cli.steps_per_frame == 0 {
            return Err(ConfigError::StepsPerFrame);
        }
        let max = i64::from(u16::MAX);
        let width = i64::from(cli.cols) * i64::from(cli.cell_width);
        let height = i64::from(cli.rows) + 1 + i64::from(LOG_LINES);
        if width > max || height > max {
            return Err(ConfigError::TooLarge {
                rows: cli.rows,
                cols: cli.cols,
                cell_width: cli.cell_width,
            });
        }

        Ok(Self {
            rows: cli.rows,
            cols: cli.cols,
            start: cli.start,
            goal,
            max_fps: cli.max_fps,
            cell_width: cli.cell_width,
            steps_per_frame: cli.steps_per_frame,
            batch: cli.batch,
            verbose: cli.verbose,
        })
    }
}

/// Parse a point written as `x,y`.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected `x,y`, got `{s}`"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in `{s}`: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in `{s}`: {e}"))?;
    Ok(Point::new(x, y))
}
