//! Pixel-space projection of a packed layout.
//!
//! A pure geometric pass over the positioned forest: one vertex per commit,
//! one edge per parent-child pair, with cubic-bezier control points at the
//! horizontal midpoint between the two columns. When parent and child share
//! a row the curve degenerates to a straight line. The pass never mutates
//! layout state, so it can be re-run with different spacings for free.

use crate::domain::Sha;
use crate::layout::grid::Placement;
use crate::layout::index::{CommitIndex, NodeId};
use serde::Serialize;

/// Pixel distances between adjacent grid columns and rows.
///
/// Defaults are a rendering convenience, not a layout invariant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spacing {
    /// Horizontal distance between adjacent columns.
    pub column_distance: f64,
    /// Vertical distance between adjacent rows.
    pub row_distance: f64,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            column_distance: 100.0,
            row_distance: 60.0,
        }
    }
}

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

/// One positioned commit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vertex {
    /// The commit this vertex renders.
    pub sha: Sha,
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub column: usize,
    /// Pixel position.
    pub position: Point,
    /// Whether the commit is on the current lineage.
    pub in_current_lineage: bool,
}

/// One parent-to-child connection with bezier control points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    /// Sha of the parent commit.
    pub parent: Sha,
    /// Sha of the child commit.
    pub child: Sha,
    /// Pixel position of the parent endpoint.
    pub start: Point,
    /// Pixel position of the child endpoint.
    pub end: Point,
    /// Control point next to `start`.
    pub bezier_start: Point,
    /// Control point next to `end`.
    pub bezier_end: Point,
}

/// Flat vertex and edge lists for one spacing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Geometry {
    /// Every commit, in depth-first order over the roots.
    pub vertices: Vec<Vertex>,
    /// Every parent-child pair, in the same traversal order.
    pub edges: Vec<Edge>,
}

/// Project the packed forest into pixel space.
pub(crate) fn extract(
    index: &CommitIndex,
    placement: &Placement,
    lineage: &[bool],
    spacing: Spacing,
) -> Geometry {
    let mut geometry = Geometry::default();
    let point_of = |id: NodeId| Point {
        x: placement.column[id.index()] as f64 * spacing.column_distance,
        y: placement.row[id.index()] as f64 * spacing.row_distance,
    };

    for &root in index.roots() {
        for id in index.subtree(root) {
            let node = index.node(id);
            geometry.vertices.push(Vertex {
                sha: node.sha.clone(),
                row: placement.row[id.index()],
                column: placement.column[id.index()],
                position: point_of(id),
                in_current_lineage: lineage[id.index()],
            });
            for &child in &node.children {
                let start = point_of(id);
                let end = point_of(child);
                let mid_x = (start.x + end.x) / 2.0;
                geometry.edges.push(Edge {
                    parent: node.sha.clone(),
                    child: index.node(child).sha.clone(),
                    start,
                    end,
                    bezier_start: Point { x: mid_x, y: start.y },
                    bezier_end: Point { x: mid_x, y: end.y },
                });
            }
        }
    }
    geometry
}
