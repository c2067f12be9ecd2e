//! Frame loop and batch mode.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use gridstar_paths::{AStarSearch, Grid, PathError};

use crate::canvas::Canvas;
use crate::config::DemoConfig;
use crate::logpane;
use crate::term::Terminal;
use crate::view::{Action, LOG_LINES, SearchView};

// Key polling interval when the frame rate is uncapped.
const MIN_POLL: Duration = Duration::from_millis(1);

/// Animate the search in the terminal until the user quits.
pub fn run_interactive(config: &DemoConfig) -> Result<()> {
    let grid = Grid::new(config.rows, config.cols).context("building grid")?;
    let search = AStarSearch::new(&grid, config.start, config.goal).context("starting search")?;
    let mut view = SearchView::new(search, config.cell_width);
    let (w, h) = view.canvas_size();
    let mut canvas = Canvas::new(w, h);
    let interval = config.frame_interval();

    log::info!(
        "{}x{} grid, {} -> {}; space pauses, r restarts, q quits",
        config.rows,
        config.cols,
        config.start,
        config.goal
    );

    let mut term = Terminal::enter().context("entering terminal mode")?;
    loop {
        let frame_start = Instant::now();
        view.tick(config.steps_per_frame);
        view.draw(&mut canvas, &logpane::recent(LOG_LINES as usize));
        term.flush(&canvas).context("drawing frame")?;

        let wait = interval
            .map(|i| i.saturating_sub(frame_start.elapsed()))
            .unwrap_or(MIN_POLL);
        if let Some(key) = term.poll_key(wait).context("reading input")? {
            if view.handle_key(key) == Action::Quit {
                break;
            }
        }
    }
    Ok(())
}

/// Run the search to completion and describe the outcome.
pub fn run_batch(config: &DemoConfig) -> Result<String, PathError> {
    let grid = Grid::new(config.rows, config.cols)?;
    let mut search = AStarSearch::new(&grid, config.start, config.goal)?;
    search.run_to_completion();
    let path = search.path()?;

    let steps: Vec<String> = path.iter().map(ToString::to_string).collect();
    Ok(format!(
        "{} -> {}: {} moves, {} nodes evaluated\n{}\n",
        config.start,
        config.goal,
        path.len() - 1,
        search.expansions(),
        steps.join(" ")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstar_core::Point;

    #[test]
    fn batch_report() {
        let config = DemoConfig {
            rows: 3,
            cols: 3,
            start: Point::new(0, 0),
            goal: Point::new(2, 2),
            batch: true,
            ..DemoConfig::default()
        };
        let out = run_batch(&config).unwrap();
        assert_eq!(
            out,
            "(0, 0) -> (2, 2): 4 moves, 9 nodes evaluated\n\
             (0, 0) (1, 0) (2, 0) (2, 1) (2, 2)\n"
        );
    }

    #[test]
    fn batch_rejects_bad_grid() {
        let config = DemoConfig {
            rows: 0,
            ..DemoConfig::default()
        };
        assert!(matches!(
            run_batch(&config),
            Err(PathError::InvalidDimensions { rows: 0, cols: 20 })
        ));
    }
}
