//! The search view: advances an [`AStarSearch`] and draws it on a
//! [`Canvas`].

use crossterm::event::KeyCode;
use crossterm::style::Color;
use gridstar_core::Point;
use gridstar_paths::{AStarSearch, SearchState};

use crate::canvas::{Canvas, Rect};

// Colours
const COL_BG: Color = Color::Rgb {
    r: 255,
    g: 255,
    b: 255,
};
const COL_STROKE: Color = Color::Rgb {
    r: 150,
    g: 150,
    b: 150,
};
const COL_ENDPOINT: Color = Color::Rgb { r: 220, g: 0, b: 0 };
const COL_CANDIDATE: Color = Color::Rgb {
    r: 0x90,
    g: 0xaf,
    b: 0xe0,
};
const COL_EVALUATED: Color = Color::Rgb {
    r: 0x9b,
    g: 0xe0,
    b: 0x90,
};
const COL_PATH: Color = Color::Rgb {
    r: 240,
    g: 200,
    b: 60,
};
const COL_STATUS: Color = Color::Rgb {
    r: 200,
    g: 200,
    b: 200,
};
const COL_LOG: Color = Color::Rgb {
    r: 170,
    g: 170,
    b: 190,
};

/// Number of log lines shown under the status line.
pub const LOG_LINES: u16 = 4;

/// What the driver should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Continue,
    Quit,
}

/// Animated view of one search.
pub struct SearchView<'g> {
    search: AStarSearch<'g>,
    cell_width: u16,
    paused: bool,
}

impl<'g> SearchView<'g> {
    pub fn new(search: AStarSearch<'g>, cell_width: u16) -> Self {
        Self {
            search,
            cell_width: cell_width.max(1),
            paused: false,
        }
    }

    pub fn search(&self) -> &AStarSearch<'g> {
        &self.search
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Canvas size needed for the grid plus status and log lines.
    pub fn canvas_size(&self) -> (u16, u16) {
        let grid = self.search.grid();
        let width = to_u16(grid.cols()).saturating_mul(self.cell_width);
        let height = to_u16(grid.rows()).saturating_add(1 + LOG_LINES);
        (width.max(40), height)
    }

    /// Advance the search by up to `steps` expansions unless paused.
    pub fn tick(&mut self, steps: usize) -> SearchState {
        if self.paused {
            return self.search.state();
        }
        let before = self.search.state();
        let after = self.search.run_steps(steps);
        if after != before {
            self.report();
        }
        after
    }

    fn report(&self) {
        match self.search.path() {
            Ok(path) => log::info!(
                "path found: {} moves, {} nodes evaluated",
                path.len() - 1,
                self.search.expansions()
            ),
            Err(e) => log::warn!("{e}"),
        }
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Action {
        match key {
            KeyCode::Esc | KeyCode::Char('q') => return Action::Quit,
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
                log::info!("{}", if self.paused { "paused" } else { "resumed" });
            }
            KeyCode::Char('r') => {
                let (start, goal) = (self.search.start(), self.search.goal());
                match self.search.reset(start, goal) {
                    Ok(()) => log::info!("restarted {start} -> {goal}"),
                    Err(e) => log::error!("restart failed: {e}"),
                }
            }
            _ => {}
        }
        Action::Continue
    }

    /// Draw the grid, status line and the given log lines.
    pub fn draw(&self, canvas: &mut Canvas, log_lines: &[String]) {
        canvas.clear(Color::Reset);
        let grid = self.search.grid();
        let path = self.search.path().unwrap_or_default();

        for node in grid.iter() {
            let p = node.position();
            let fill = if path.contains(&p) {
                COL_PATH
            } else if self.search.is_closed(p) {
                COL_EVALUATED
            } else if self.search.is_open(p) {
                COL_CANDIDATE
            } else {
                COL_BG
            };
            let stroke = if p == self.search.start() || p == self.search.goal() {
                COL_ENDPOINT
            } else {
                COL_STROKE
            };
            canvas.rect(self.cell_rect(p), Some(fill), Some(stroke));
        }

        let status_y = to_u16(grid.rows());
        let status = format!(
            "{}{}  evaluated {}  candidates {}",
            self.search.state(),
            if self.paused { " (paused)" } else { "" },
            self.search.expansions(),
            self.search.open_set().len(),
        );
        canvas.text(0, status_y, &status, COL_STATUS);
        for (i, line) in log_lines.iter().take(LOG_LINES as usize).enumerate() {
            let y = status_y.saturating_add(1).saturating_add(i as u16);
            canvas.text(0, y, line, COL_LOG);
        }
    }

    fn cell_rect(&self, p: Point) -> Rect {
        Rect {
            x: to_u16(p.x).saturating_mul(self.cell_width),
            y: to_u16(p.y),
            width: self.cell_width,
            height: 1,
        }
    }
}

// Grid coordinates past the terminal's range clamp to the far edge, where
// the canvas clips them.
fn to_u16(v: i32) -> u16 {
    u16::try_from(v.max(0)).unwrap_or(u16::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridstar_paths::Grid;

    fn view(grid: &Grid, start: Point, goal: Point) -> SearchView<'_> {
        SearchView::new(AStarSearch::new(grid, start, goal).unwrap(), 2)
    }

    fn bg_at(canvas: &Canvas, p: Point) -> Option<Color> {
        canvas.get(p.x as u16 * 2, p.y as u16).map(|c| c.bg)
    }

    #[test]
    fn canvas_fits_grid_and_panes() {
        let grid = Grid::new(20, 25).unwrap();
        let v = view(&grid, Point::new(0, 0), Point::new(24, 19));
        assert_eq!(v.canvas_size(), (50, 20 + 1 + LOG_LINES));
    }

    #[test]
    fn oversized_grid_is_clipped_not_overflowed() {
        let grid = Grid::new(1, 40000).unwrap();
        let mut v = view(&grid, Point::new(0, 0), Point::new(39999, 0));
        v.tick(3);
        let (w, h) = v.canvas_size();
        assert_eq!((w, h), (u16::MAX, 1 + 1 + LOG_LINES));
        let mut canvas = Canvas::new(w, h);
        v.draw(&mut canvas, &[]);
        assert_eq!(bg_at(&canvas, Point::new(0, 0)), Some(COL_EVALUATED));
        assert_eq!(canvas.get(u16::MAX - 1, 0).map(|c| c.bg), Some(COL_BG));
    }

    #[test]
    fn draws_frontier_and_evaluated() {
        let grid = Grid::new(3, 3).unwrap();
        let mut v = view(&grid, Point::new(0, 0), Point::new(2, 2));
        v.tick(1);
        let (w, h) = v.canvas_size();
        let mut canvas = Canvas::new(w, h);
        v.draw(&mut canvas, &[]);

        assert_eq!(bg_at(&canvas, Point::new(0, 0)), Some(COL_EVALUATED));
        assert_eq!(bg_at(&canvas, Point::new(1, 0)), Some(COL_CANDIDATE));
        assert_eq!(bg_at(&canvas, Point::new(0, 1)), Some(COL_CANDIDATE));
        assert_eq!(bg_at(&canvas, Point::new(1, 1)), Some(COL_BG));
        // Start and goal are outlined in red.
        assert_eq!(canvas.get(0, 0).map(|c| c.fg), Some(COL_ENDPOINT));
        assert_eq!(canvas.get(5, 2).map(|c| (c.ch, c.fg)), Some((']', COL_ENDPOINT)));
        assert_eq!(canvas.get(2, 0).map(|c| c.fg), Some(COL_STROKE));
    }

    #[test]
    fn draws_path_after_success() {
        let grid = Grid::new(3, 3).unwrap();
        let mut v = view(&grid, Point::new(0, 0), Point::new(2, 2));
        assert_eq!(v.tick(100), SearchState::Succeeded);
        let (w, h) = v.canvas_size();
        let mut canvas = Canvas::new(w, h);
        v.draw(&mut canvas, &["INFO  path found".to_string()]);

        for p in v.search().path().unwrap() {
            assert_eq!(bg_at(&canvas, p), Some(COL_PATH), "{p}");
        }
        assert_eq!(bg_at(&canvas, Point::new(0, 2)), Some(COL_EVALUATED));

        let status: String = (0..9).filter_map(|x| canvas.get(x, 3)).map(|c| c.ch).collect();
        assert_eq!(status, "succeeded");
        let log: String = (0..5).filter_map(|x| canvas.get(x, 4)).map(|c| c.ch).collect();
        assert_eq!(log, "INFO ");
    }

    #[test]
    fn pause_freezes_ticks() {
        let grid = Grid::new(4, 4).unwrap();
        let mut v = view(&grid, Point::new(0, 0), Point::new(3, 3));
        assert_eq!(v.handle_key(KeyCode::Char(' ')), Action::Continue);
        assert!(v.is_paused());
        v.tick(5);
        assert_eq!(v.search().expansions(), 0);
        v.handle_key(KeyCode::Char(' '));
        v.tick(5);
        assert_eq!(v.search().expansions(), 5);
    }

    #[test]
    fn restart_and_quit_keys() {
        let grid = Grid::new(4, 4).unwrap();
        let mut v = view(&grid, Point::new(0, 0), Point::new(3, 3));
        v.tick(100);
        assert_eq!(v.search().state(), SearchState::Succeeded);
        v.handle_key(KeyCode::Char('r'));
        assert_eq!(v.search().state(), SearchState::Running);
        assert_eq!(v.search().expansions(), 0);
        assert_eq!(v.handle_key(KeyCode::Char('q')), Action::Quit);
        assert_eq!(v.handle_key(KeyCode::Esc), Action::Quit);
    }
}
