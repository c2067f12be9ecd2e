use std::fmt;

use gridstar_core::Point;

use crate::distance::manhattan;
use crate::error::{PathError, Result};
use crate::grid::{Grid, NodeId};

/// Cost of moving between two adjacent cells.
const STEP_COST: i32 = 1;

/// Run-state of an [`AStarSearch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    /// The frontier is non-empty and the goal has not been finalized.
    Running,
    /// The goal was moved to the closed set; a path is available.
    Succeeded,
    /// The frontier emptied before the goal was reached.
    Failed,
}

impl SearchState {
    /// Whether the search has stopped, successfully or not.
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Self::Running
    }
}

impl fmt::Display for SearchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Running => "running",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Membership {
    #[default]
    Unseen,
    Open,
    Closed,
}

// Per-node bookkeeping, indexed like the grid's node arena.
#[derive(Debug, Clone, Copy, Default)]
struct Scores {
    g: i32,
    f: i32,
    came_from: Option<NodeId>,
    membership: Membership,
}

/// An incremental A* search over a [`Grid`].
///
/// Each call to [`step`](Self::step) expands exactly one node, so a driver
/// can render the frontier between expansions. Batch callers use
/// [`run_to_completion`](Self::run_to_completion) instead.
///
/// The open set keeps insertion order. Selection scans it and keeps the
/// first node with a strictly smaller `f`, so ties go to the node that was
/// discovered earliest. The heuristic is [`manhattan`].
#[derive(Debug, Clone)]
pub struct AStarSearch<'g> {
    grid: &'g Grid,
    start: Point,
    goal: Point,
    goal_id: NodeId,
    nodes: Vec<Scores>,
    open: Vec<NodeId>,
    closed: Vec<NodeId>,
    state: SearchState,
}

impl<'g> AStarSearch<'g> {
    /// Prepare a search from `start` to `goal`, with only `start` open.
    ///
    /// Fails with [`PathError::InvalidStartOrGoal`] if either endpoint lies
    /// outside the grid.
    pub fn new(grid: &'g Grid, start: Point, goal: Point) -> Result<Self> {
        let goal_id = grid.id(goal).ok_or(PathError::InvalidStartOrGoal(goal))?;
        let mut search = Self {
            grid,
            start,
            goal,
            goal_id,
            nodes: vec![Scores::default(); grid.len()],
            open: Vec::new(),
            closed: Vec::new(),
            state: SearchState::Running,
        };
        search.reset(start, goal)?;
        Ok(search)
    }

    /// Restart the search over the same grid with new endpoints.
    ///
    /// On error the search is left untouched.
    pub fn reset(&mut self, start: Point, goal: Point) -> Result<()> {
        let start_id = self
            .grid
            .id(start)
            .ok_or(PathError::InvalidStartOrGoal(start))?;
        let goal_id = self
            .grid
            .id(goal)
            .ok_or(PathError::InvalidStartOrGoal(goal))?;

        self.nodes.fill(Scores::default());
        self.open.clear();
        self.closed.clear();
        self.start = start;
        self.goal = goal;
        self.goal_id = goal_id;
        self.state = SearchState::Running;

        self.nodes[start_id.index()] = Scores {
            g: 0,
            f: manhattan(start, goal),
            came_from: None,
            membership: Membership::Open,
        };
        self.open.push(start_id);

        log::debug!("search reset: {start} -> {goal}");
        Ok(())
    }

    /// Expand one node and return the resulting state.
    ///
    /// Once the search is terminal this does nothing and returns the
    /// terminal state again.
    pub fn step(&mut self) -> SearchState {
        if self.state.is_terminal() {
            return self.state;
        }

        let Some(slot) = self.cheapest_open() else {
            self.state = SearchState::Failed;
            log::debug!(
                "search failed after {} expansions: {} unreachable from {}",
                self.closed.len(),
                self.goal,
                self.start
            );
            return self.state;
        };

        // `Vec::remove` keeps the remaining entries in insertion order.
        let current = self.open.remove(slot);
        self.nodes[current.index()].membership = Membership::Closed;
        self.closed.push(current);

        let grid = self.grid;
        let current_pos = grid.node(current).position();
        let current_g = self.nodes[current.index()].g;
        log::trace!(
            "expand {current_pos} g={current_g} f={}",
            self.nodes[current.index()].f
        );

        if current == self.goal_id {
            self.state = SearchState::Succeeded;
            log::debug!(
                "search reached {} in {} expansions (cost {current_g})",
                self.goal,
                self.closed.len()
            );
            return self.state;
        }

        let tentative = current_g + STEP_COST;
        for &n in grid.node(current).neighbors() {
            let scores = &mut self.nodes[n.index()];
            match scores.membership {
                Membership::Closed => continue,
                Membership::Open if tentative >= scores.g => continue,
                Membership::Open => {}
                Membership::Unseen => self.open.push(n),
            }
            scores.g = tentative;
            scores.f = tentative + manhattan(grid.node(n).position(), self.goal);
            scores.came_from = Some(current);
            scores.membership = Membership::Open;
        }

        self.state
    }

    /// Step until the search succeeds or fails.
    pub fn run_to_completion(&mut self) -> SearchState {
        while !self.step().is_terminal() {}
        self.state
    }

    /// Step at most `budget` times, stopping early on a terminal state.
    pub fn run_steps(&mut self, budget: usize) -> SearchState {
        for _ in 0..budget {
            if self.step().is_terminal() {
                break;
            }
        }
        self.state
    }

    /// The path from start to goal, both included.
    ///
    /// Returns [`PathError::SearchInProgress`] while running and
    /// [`PathError::NoPathExists`] after a failed search.
    pub fn path(&self) -> Result<Vec<Point>> {
        match self.state {
            SearchState::Running => Err(PathError::SearchInProgress),
            SearchState::Failed => Err(PathError::NoPathExists {
                start: self.start,
                goal: self.goal,
            }),
            SearchState::Succeeded => {
                let mut path = Vec::new();
                let mut cur = Some(self.goal_id);
                while let Some(id) = cur {
                    path.push(self.grid.node(id).position());
                    cur = self.nodes[id.index()].came_from;
                }
                path.reverse();
                Ok(path)
            }
        }
    }

    /// Current run-state.
    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// The grid being searched.
    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// Number of nodes finalized so far.
    #[inline]
    pub fn expansions(&self) -> usize {
        self.closed.len()
    }

    /// Frontier positions, in insertion order.
    pub fn open_set(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.open.iter().map(|&id| self.grid.node(id).position())
    }

    /// Finalized positions, in expansion order.
    pub fn closed_set(&self) -> impl ExactSizeIterator<Item = Point> + '_ {
        self.closed.iter().map(|&id| self.grid.node(id).position())
    }

    pub fn is_open(&self, p: Point) -> bool {
        self.scores(p)
            .is_some_and(|s| s.membership == Membership::Open)
    }

    pub fn is_closed(&self, p: Point) -> bool {
        self.scores(p)
            .is_some_and(|s| s.membership == Membership::Closed)
    }

    /// Best known cost from start to `p`, if `p` has been reached.
    pub fn g_score(&self, p: Point) -> Option<i32> {
        self.scores(p).map(|s| s.g)
    }

    /// `g + manhattan(p, goal)`, if `p` has been reached.
    pub fn f_score(&self, p: Point) -> Option<i32> {
        self.scores(p).map(|s| s.f)
    }

    /// The predecessor of `p` on its best known path.
    pub fn came_from(&self, p: Point) -> Option<Point> {
        self.scores(p)
            .and_then(|s| s.came_from)
            .map(|id| self.grid.node(id).position())
    }

    /// Owned copy of the open/closed sets and path, for renderers.
    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            state: self.state,
            start: self.start,
            goal: self.goal,
            open: self.open_set().collect(),
            closed: self.closed_set().collect(),
            path: self.path().ok(),
        }
    }

    fn scores(&self, p: Point) -> Option<&Scores> {
        let id = self.grid.id(p)?;
        let s = &self.nodes[id.index()];
        (s.membership != Membership::Unseen).then_some(s)
    }

    // Slot in `open` of the first node with minimal f.
    fn cheapest_open(&self) -> Option<usize> {
        let mut best: Option<(usize, i32)> = None;
        for (slot, id) in self.open.iter().enumerate() {
            let f = self.nodes[id.index()].f;
            if best.is_none_or(|(_, best_f)| f < best_f) {
                best = Some((slot, f));
            }
        }
        best.map(|(slot, _)| slot)
    }
}

/// A point-in-time view of a search, detached from the grid borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchSnapshot {
    pub state: SearchState,
    pub start: Point,
    pub goal: Point,
    /// Frontier, in insertion order.
    pub open: Vec<Point>,
    /// Finalized nodes, in expansion order.
    pub closed: Vec<Point>,
    /// Present only after success.
    pub path: Option<Vec<Point>>,
}

/// Run a complete search from `start` to `goal` and return the path.
pub fn find_path(grid: &Grid, start: Point, goal: Point) -> Result<Vec<Point>> {
    let mut search = AStarSearch::new(grid, start, goal)?;
    search.run_to_completion();
    search.path()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().copied().map(Point::from).collect()
    }

    #[test]
    fn start_equals_goal_succeeds_immediately() {
        let grid = Grid::new(3, 3).unwrap();
        let mut s = AStarSearch::new(&grid, Point::new(1, 1), Point::new(1, 1)).unwrap();
        assert_eq!(s.step(), SearchState::Succeeded);
        assert_eq!(s.expansions(), 1);
        assert_eq!(s.path().unwrap(), vec![Point::new(1, 1)]);
    }

    #[test]
    fn single_cell_grid() {
        let grid = Grid::new(1, 1).unwrap();
        assert_eq!(find_path(&grid, Point::ZERO, Point::ZERO).unwrap(), vec![Point::ZERO]);
    }

    #[test]
    fn initial_state() {
        let grid = Grid::new(3, 3).unwrap();
        let s = AStarSearch::new(&grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(s.state(), SearchState::Running);
        assert_eq!(s.open_set().collect::<Vec<_>>(), vec![Point::new(0, 0)]);
        assert_eq!(s.closed_set().count(), 0);
        assert_eq!(s.g_score(Point::new(0, 0)), Some(0));
        assert_eq!(s.f_score(Point::new(0, 0)), Some(4));
        assert_eq!(s.g_score(Point::new(1, 1)), None);
        assert_eq!(s.path().unwrap_err(), PathError::SearchInProgress);
    }

    #[test]
    fn first_step_relaxes_neighbors() {
        let grid = Grid::new(3, 3).unwrap();
        let mut s = AStarSearch::new(&grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(s.step(), SearchState::Running);
        assert_eq!(s.closed_set().collect::<Vec<_>>(), pts(&[(0, 0)]));
        assert_eq!(s.open_set().collect::<Vec<_>>(), pts(&[(1, 0), (0, 1)]));
        for p in pts(&[(1, 0), (0, 1)]) {
            assert!(s.is_open(p));
            assert_eq!(s.g_score(p), Some(1));
            assert_eq!(s.f_score(p), Some(4));
            assert_eq!(s.came_from(p), Some(Point::new(0, 0)));
        }
        assert!(s.is_closed(Point::new(0, 0)));
    }

    #[test]
    fn three_by_three_baseline() {
        let grid = Grid::new(3, 3).unwrap();
        let mut s = AStarSearch::new(&grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        assert_eq!(s.run_to_completion(), SearchState::Succeeded);
        assert_eq!(s.expansions(), 9);
        assert_eq!(
            s.closed_set().collect::<Vec<_>>(),
            pts(&[
                (0, 0),
                (1, 0),
                (0, 1),
                (2, 0),
                (1, 1),
                (0, 2),
                (2, 1),
                (1, 2),
                (2, 2),
            ])
        );
        let path = s.path().unwrap();
        assert_eq!(path, pts(&[(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]));
        assert_eq!(path.len() as i32, 1 + s.g_score(Point::new(2, 2)).unwrap());
    }

    #[test]
    fn five_by_five_expansion_count() {
        let grid = Grid::new(5, 5).unwrap();
        let mut s = AStarSearch::new(&grid, Point::new(0, 0), Point::new(4, 4)).unwrap();
        let mut calls = 0;
        while s.state() == SearchState::Running {
            s.step();
            calls += 1;
        }
        assert_eq!(calls, 25);
        assert_eq!(s.expansions(), 25);
        assert_eq!(s.path().unwrap().len(), 9);
    }

    #[test]
    fn goal_closer_than_corner_expands_fewer() {
        let grid = Grid::new(5, 5).unwrap();
        let mut s = AStarSearch::new(&grid, Point::new(2, 2), Point::new(0, 4)).unwrap();
        s.run_to_completion();
        assert_eq!(s.expansions(), 9);
        assert_eq!(
            s.path().unwrap(),
            pts(&[(2, 2), (1, 2), (0, 2), (0, 3), (0, 4)])
        );
    }

    #[test]
    fn single_row_grid() {
        let grid = Grid::new(1, 5).unwrap();
        let path = find_path(&grid, Point::new(0, 0), Point::new(4, 0)).unwrap();
        assert_eq!(path, pts(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]));
    }

    #[test]
    fn reverse_direction_search() {
        let grid = Grid::new(4, 6).unwrap();
        let path = find_path(&grid, Point::new(5, 3), Point::new(0, 0)).unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path.first(), Some(&Point::new(5, 3)));
        assert_eq!(path.last(), Some(&Point::new(0, 0)));
        assert!(path.windows(2).all(|w| w[0].is_adjacent(w[1])));
    }

    #[test]
    fn step_after_success_is_noop() {
        let grid = Grid::new(3, 3).unwrap();
        let mut s = AStarSearch::new(&grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        s.run_to_completion();
        let before = s.snapshot();
        assert_eq!(s.step(), SearchState::Succeeded);
        assert_eq!(s.run_to_completion(), SearchState::Succeeded);
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn exhausted_frontier_fails() {
        let grid = Grid::new(3, 3).unwrap();
        let mut s = AStarSearch::new(&grid, Point::new(0, 0), Point::new(2, 2)).unwrap();
        s.step();
        // A connected grid always reaches its goal, so drain the frontier
        // by hand to reach the failure branch.
        for id in s.open.drain(..) {
            s.nodes[id.index()].membership = Membership::Unseen;
        }
        assert_eq!(s.step(), SearchState::Failed);
        assert_eq!(
            s.path().unwrap_err(),
            PathError::NoPathExists {
                start: Point::new(0, 0),
                goal: Point::new(2, 2),
            }
        );
        let closed = s.expansions();
        assert_eq!(s.step(), SearchState::Failed);
        assert_eq!(s.expansions(), closed);
        assert!(s.snapshot().path.is_none());
    }

    #[test]
    fn endpoints_outside_grid_are_rejected() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(
            AStarSearch::new(&grid, Point::new(3, 0), Point::new(0, 0)).unwrap_err(),
            PathError::InvalidStartOrGoal(Point::new(3, 0))
        );
        assert_eq!(
            find_path(&grid, Point::new(0, 0), Point::new(0, -1)).unwrap_err(),
            PathError::InvalidStartOrGoal(Point::new(0, -1))
        );
    }

    #[test]
    fn run_steps_respects_budget() {
        let grid = Grid::new(5, 5).unwrap();
        let mut s = AStarSearch::new(&grid, Point::new(0, 0), Point::new(4, 4)).unwrap();
        assert_eq!(s.run_steps(10), SearchState::Running);
        assert_eq!(s.expansions(), 10);
        assert_eq!(s.run_steps(100), SearchState::Succeeded);
        assert_eq!(s.expansions(), 25);
    }

    #[test]
    fn reset_reuses_grid() {
        let grid = Grid::new(5, 5).unwrap();
        let mut s = AStarSearch::new(&grid, Point::new(0, 0), Point::new(4, 4)).unwrap();
        s.run_to_completion();

        s.reset(Point::new(4, 0), Point::new(4, 2)).unwrap();
        assert_eq!(s.state(), SearchState::Running);
        assert_eq!(s.expansions(), 0);
        assert_eq!(s.g_score(Point::new(0, 0)), None);
        s.run_to_completion();
        assert_eq!(s.path().unwrap(), pts(&[(4, 0), (4, 1), (4, 2)]));
    }

    #[test]
    fn failed_reset_keeps_search() {
        let grid = Grid::new(2, 2).unwrap();
        let mut s = AStarSearch::new(&grid, Point::new(0, 0), Point::new(1, 1)).unwrap();
        s.step();
        let before = s.snapshot();
        assert!(s.reset(Point::new(0, 0), Point::new(9, 9)).is_err());
        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn snapshot_reports_path_on_success() {
        let grid = Grid::new(2, 2).unwrap();
        let mut s = AStarSearch::new(&grid, Point::new(0, 0), Point::new(1, 0)).unwrap();
        s.run_to_completion();
        let snap = s.snapshot();
        assert_eq!(snap.state, SearchState::Succeeded);
        assert_eq!(snap.path, Some(pts(&[(0, 0), (1, 0)])));
        assert_eq!(snap.closed, pts(&[(0, 0), (1, 0)]));
        assert_eq!(snap.open, pts(&[(0, 1)]));
    }

    #[test]
    fn searches_share_a_grid() {
        let grid = Grid::new(4, 4).unwrap();
        let mut a = AStarSearch::new(&grid, Point::new(0, 0), Point::new(3, 3)).unwrap();
        let mut b = AStarSearch::new(&grid, Point::new(3, 3), Point::new(0, 0)).unwrap();
        a.run_to_completion();
        b.run_to_completion();
        assert_eq!(a.path().unwrap().len(), b.path().unwrap().len());
    }

    #[test]
    fn state_display() {
        assert_eq!(SearchState::Running.to_string(), "running");
        assert!(SearchState::Failed.is_terminal());
        assert!(!SearchState::Running.is_terminal());
    }
}
