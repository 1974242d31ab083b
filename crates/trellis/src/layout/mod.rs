//! The commit-graph layout pipeline.
//!
//! One synchronous pass over the input forest:
//!
//! 1. [`filter`] (optional) prunes branchless subtrees;
//! 2. [`index`] flattens the forest into an arena with a sha lookup;
//! 3. [`rank`] scores branches by topological depth;
//! 4. [`mainline`] picks each root subgraph's target leaf;
//! 5. [`grid`] packs every commit into a `(row, column)` cell;
//! 6. [`lineage`] marks the current commit's ancestor chain;
//! 7. [`geometry`] projects the result into pixel space on demand.
//!
//! Inputs are never mutated; all layout state lives in side tables inside
//! [`Layout`]. Identical inputs (values and order) always produce identical
//! layouts — every tie-break is deterministic.
//!
//! The pipeline assumes a well-formed forest and branch DAG and does not
//! validate them; see [`crate::source::validate`] for a caller-side guard.

pub mod filter;
pub mod geometry;
pub mod grid;
pub mod index;
pub mod lineage;
pub mod mainline;
pub mod rank;

use crate::domain::{Branch, BranchId, CommitNode, Sha};
use crate::layout::geometry::{Geometry, Spacing};
use crate::layout::grid::{Grid, Placement};
use crate::layout::index::{CommitIndex, IndexedCommit, NodeId, NodeMetrics};
use crate::layout::rank::BranchRanks;
use std::collections::HashMap;

/// Options for one layout computation.
#[derive(Debug, Clone, Default)]
pub struct LayoutOptions {
    /// Commit whose ancestor chain should be highlighted, if any.
    pub current_sha: Option<Sha>,
    /// Drop commits with no branch memberships (and their subtrees) before
    /// layout.
    pub filter_branchless: bool,
}

/// A complete, internally consistent layout of one forest.
#[derive(Debug)]
pub struct Layout {
    index: CommitIndex,
    metrics: NodeMetrics,
    placement: Placement,
    grid: Grid,
    lineage: Vec<bool>,
}

/// Lay out the forest against the given branch records.
///
/// An empty forest yields an empty layout: zero grid dimensions, no
/// vertices, no edges.
#[must_use]
pub fn compute_layout(roots: &[CommitNode], branches: &[Branch], options: &LayoutOptions) -> Layout {
    let filtered;
    let roots = if options.filter_branchless {
        filtered = filter::prune_branchless(roots);
        filtered.as_slice()
    } else {
        roots
    };

    let index = CommitIndex::build(roots);
    let metrics = index.metrics();
    let ranks = BranchRanks::resolve(branches);
    let branches_by_id: HashMap<&BranchId, &Branch> =
        branches.iter().map(|branch| (&branch.id, branch)).collect();

    let (grid, placement) = grid::pack(&index, &ranks, &metrics, &branches_by_id);

    let mut lineage = vec![false; index.len()];
    lineage::apply(&index, options.current_sha.as_ref(), &mut lineage);

    tracing::debug!(
        commits = index.len(),
        rows = grid.row_count(),
        columns = grid.column_count(),
        "layout computed"
    );

    Layout {
        index,
        metrics,
        placement,
        grid,
        lineage,
    }
}

impl Layout {
    /// The packed grid.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of grid rows.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.grid.row_count()
    }

    /// Number of grid columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.grid.column_count()
    }

    /// Number of laid-out commits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the layout is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Ids of the forest roots, in input order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        self.index.roots()
    }

    /// The commit stored under `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &IndexedCommit {
        self.index.node(id)
    }

    /// Resolve a sha to its node, if it survived filtering.
    #[must_use]
    pub fn lookup(&self, sha: &Sha) -> Option<NodeId> {
        self.index.lookup(sha)
    }

    /// Grid cell assigned to `id`.
    #[must_use]
    pub fn cell(&self, id: NodeId) -> (usize, usize) {
        (self.placement.row[id.index()], self.placement.column[id.index()])
    }

    /// Longest chain of commits in the subtree rooted at `id`, counting the
    /// node itself.
    #[must_use]
    pub fn max_chain(&self, id: NodeId) -> usize {
        self.metrics.max_chain[id.index()]
    }

    /// Whether `id` is on the current commit's ancestor chain.
    #[must_use]
    pub fn is_in_current_lineage(&self, id: NodeId) -> bool {
        self.lineage[id.index()]
    }

    /// Re-run the lineage query for a different current commit.
    ///
    /// All marks are reset first, so marks from an earlier query never
    /// survive. `None` (or a sha missing from the index) leaves every
    /// commit unmarked. The grid is untouched.
    pub fn set_current(&mut self, current: Option<&Sha>) {
        lineage::apply(&self.index, current, &mut self.lineage);
    }

    /// Project the layout into pixel space with the given spacing.
    #[must_use]
    pub fn geometry(&self, spacing: Spacing) -> Geometry {
        geometry::extract(&self.index, &self.placement, &self.lineage, spacing)
    }
}
