use gridstar_core::Point;

/// Manhattan (L1) distance between two points.
///
/// This is the heuristic [`AStarSearch`](crate::AStarSearch) uses: with
/// unit-cost 4-directional moves it is both admissible and consistent.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Euclidean (L2) straight-line distance between two points.
///
/// Not used by the search. It underestimates the 4-directional cost more
/// loosely than [`manhattan`], so it would expand more nodes.
#[inline]
pub fn euclidean(a: Point, b: Point) -> f64 {
    let dx = f64::from(a.x - b.x);
    let dy = f64::from(a.y - b.y);
    dx.hypot(dy)
}
