use gridstar_core::{Point, Range};

use crate::error::{PathError, Result};
use crate::neighbors::Neighbors;

/// Index of a [`GridNode`] inside its owning [`Grid`].
///
/// Nodes refer to each other through these indices rather than through
/// references, so the adjacency graph holds no ownership cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Flat row-major index of the node.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single cell of the search space.
#[derive(Debug, Clone)]
pub struct GridNode {
    position: Point,
    neighbors: Vec<NodeId>,
}

impl GridNode {
    /// The node's `(col, row)` position. Fixed at construction.
    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Adjacent nodes in left, right, up, down order, in-bounds only.
    #[inline]
    pub fn neighbors(&self) -> &[NodeId] {
        &self.neighbors
    }
}

/// A `rows x cols` grid of nodes with 4-directional unit-cost adjacency.
///
/// Node `(col, row)` lives at flat index `row * cols + col`. The grid is
/// immutable once built; searches keep their own per-node bookkeeping and
/// only borrow it.
#[derive(Debug, Clone)]
pub struct Grid {
    rng: Range,
    width: usize,
    nodes: Vec<GridNode>,
}

impl Grid {
    /// Build a grid with `rows * cols` nodes and link their neighbors.
    ///
    /// Fails with [`PathError::InvalidDimensions`] if either dimension is
    /// not positive.
    pub fn new(rows: i32, cols: i32) -> Result<Self> {
        if rows <= 0 || cols <= 0 {
            return Err(PathError::InvalidDimensions { rows, cols });
        }
        let rng = Range::new(0, 0, cols, rows);

        // Allocate every node first; linking needs all of them in place.
        let nodes = rng
            .iter()
            .map(|position| GridNode {
                position,
                neighbors: Vec::with_capacity(4),
            })
            .collect();
        let mut grid = Self {
            rng,
            width: cols as usize,
            nodes,
        };
        grid.link();

        log::debug!("built {rows}x{cols} grid ({} nodes)", grid.nodes.len());
        Ok(grid)
    }

    fn link(&mut self) {
        let rng = self.rng;
        let mut nb = Neighbors::new();
        for i in 0..self.nodes.len() {
            let p = self.point(i);
            let ids: Vec<NodeId> = nb
                .cardinal(p, |q| rng.contains(q))
                .iter()
                .map(|&q| NodeId(self.flat(q)))
                .collect();
            self.nodes[i].neighbors = ids;
        }
    }

    /// Number of rows (the grid's height).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rng.height()
    }

    /// Number of columns (the grid's width).
    #[inline]
    pub fn cols(&self) -> i32 {
        self.rng.width()
    }

    /// The rectangle of valid positions, `[0, cols) x [0, rows)`.
    #[inline]
    pub fn range(&self) -> Range {
        self.rng
    }

    /// Total number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: construction rejects empty grids.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `p` lies inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.rng.contains(p)
    }

    /// Id of the node at `p`, or `None` if out of bounds.
    #[inline]
    pub fn id(&self, p: Point) -> Option<NodeId> {
        self.contains(p).then(|| NodeId(self.flat(p)))
    }

    /// The node with the given id.
    ///
    /// Ids are only minted by this grid, so they are always in range for it.
    #[inline]
    pub fn node(&self, id: NodeId) -> &GridNode {
        &self.nodes[id.0]
    }

    /// The node at `p`.
    pub fn node_at(&self, p: Point) -> Result<&GridNode> {
        self.id(p)
            .map(|id| self.node(id))
            .ok_or(PathError::OutOfBounds(p))
    }

    /// The up-to-4 nodes adjacent to `p`, in left, right, up, down order.
    pub fn neighbors_of(&self, p: Point) -> Result<impl Iterator<Item = &GridNode> + '_> {
        let node = self.node_at(p)?;
        Ok(node.neighbors.iter().map(|&id| self.node(id)))
    }

    /// Row-major iterator over all nodes.
    pub fn iter(&self) -> impl Iterator<Item = &GridNode> + '_ {
        self.nodes.iter()
    }

    #[inline]
    fn flat(&self, p: Point) -> usize {
        p.y as usize * self.width + p.x as usize
    }

    #[inline]
    fn point(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }
}
