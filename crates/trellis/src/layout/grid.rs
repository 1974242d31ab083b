//! The placement grid and the packing pass.
//!
//! Packing assigns every commit a `(row, column)` cell. Columns advance by
//! one per parent-child hop (starting from the root's lineage index); rows
//! are found by scanning downward for the first row whose relevant column
//! range is free. The mainline path gets priority: its commits may inherit
//! the parent's row even when siblings are forced down.

use crate::domain::{Branch, BranchId};
use crate::layout::index::{CommitIndex, NodeId, NodeMetrics};
use crate::layout::mainline::{mainline_path, select_target_leaf};
use crate::layout::rank::{placement_order, BranchRanks};
use std::collections::{HashMap, HashSet};
use std::ops::Range;

/// Sparse 2D cell grid. Each cell holds at most one commit.
#[derive(Debug, Default)]
pub struct Grid {
    rows: Vec<Vec<Option<NodeId>>>,
    columns: usize,
}

impl Grid {
    /// The grid rows. After packing, every row is padded to
    /// [`Grid::column_count`] cells.
    #[must_use]
    pub fn rows(&self) -> &[Vec<Option<NodeId>>] {
        &self.rows
    }

    /// Number of rows in use.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in use (one past the rightmost occupied column).
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns
    }

    /// The occupant of a cell, tolerating out-of-bounds coordinates.
    #[must_use]
    pub fn cell(&self, row: usize, column: usize) -> Option<NodeId> {
        self.rows.get(row).and_then(|r| r.get(column)).copied().flatten()
    }

    /// Whether every cell of `cols` in `row` is free.
    ///
    /// Rows and columns that do not exist yet are free by definition.
    fn is_range_free(&self, row: usize, cols: Range<usize>) -> bool {
        cols.into_iter().all(|col| self.cell(row, col).is_none())
    }

    /// Occupy a cell, growing rows and columns on demand.
    ///
    /// New cells are initialized empty before any write; a cell is only
    /// ever written once per layout computation.
    fn place(&mut self, row: usize, column: usize, id: NodeId) {
        while self.rows.len() <= row {
            self.rows.push(Vec::new());
        }
        let cells = &mut self.rows[row];
        if cells.len() <= column {
            cells.resize(column + 1, None);
        }
        debug_assert!(cells[column].is_none(), "grid cell occupied twice");
        cells[column] = Some(id);
        self.columns = self.columns.max(column + 1);
    }

    /// Pad every row to the final column count so consumers can index
    /// `[row][column]` without bounds juggling.
    fn normalize(&mut self) {
        for row in &mut self.rows {
            row.resize(self.columns, None);
        }
    }
}

/// Side table of assigned grid coordinates, indexed by arena id.
#[derive(Debug, Default)]
pub(crate) struct Placement {
    pub row: Vec<usize>,
    pub column: Vec<usize>,
}

/// Pack the whole forest into a grid.
///
/// Roots are packed in input order; within a subgraph, children are visited
/// in shared placement order and positioned depth-first, so an earlier
/// sibling's entire subtree is on the grid before the next sibling looks
/// for a row.
pub(crate) fn pack(
    index: &CommitIndex,
    ranks: &BranchRanks,
    metrics: &NodeMetrics,
    branches_by_id: &HashMap<&BranchId, &Branch>,
) -> (Grid, Placement) {
    let mut grid = Grid::default();
    let mut placement = Placement {
        row: vec![0; index.len()],
        column: vec![0; index.len()],
    };

    for &root in index.roots() {
        let target_leaf = select_target_leaf(root, index, ranks, metrics, branches_by_id);
        let mainline = mainline_path(target_leaf, index);

        let column = index.node(root).idx;
        let width = metrics.width[root.index()];
        let mut row = 0;
        while !grid.is_range_free(row, column..column + width) {
            row += 1;
        }
        grid.place(row, column, root);
        placement.row[root.index()] = row;
        placement.column[root.index()] = column;
        tracing::debug!(root = %index.node(root).sha, row, column, "packing subgraph");

        // Depth-first worklist; a node's position is assigned when it is
        // popped, and its children are pushed best-ranked last so the
        // mainline side of the tree settles first.
        let mut stack: Vec<NodeId> = vec![root];
        while let Some(id) = stack.pop() {
            if id != root {
                let (row, column) = position_child(id, index, metrics, &placement, &grid, &mainline);
                grid.place(row, column, id);
                placement.row[id.index()] = row;
                placement.column[id.index()] = column;
            }
            let mut children = index.node(id).children.clone();
            children.sort_by(|a, b| placement_order(*a, *b, index, ranks, metrics));
            for child in children.into_iter().rev() {
                stack.push(child);
            }
        }
    }

    grid.normalize();
    (grid, placement)
}

/// Choose the cell for `id` given its already-placed parent.
fn position_child(
    id: NodeId,
    index: &CommitIndex,
    metrics: &NodeMetrics,
    placement: &Placement,
    grid: &Grid,
    mainline: &HashSet<NodeId>,
) -> (usize, usize) {
    let node = index.node(id);
    // Reachable only for non-roots.
    let parent = node.parent.expect("child node has a parent");
    let column = placement.column[parent.index()] + 1;
    let mut row = placement.row[parent.index()];

    // A branch change off the mainline must not inherit the parent's row,
    // even when that row happens to be free.
    if !mainline.contains(&id) && !same_branches(&node.branch_ids, &index.node(parent).branch_ids) {
        row += 1;
    }

    let width = metrics.width[id.index()];
    while !grid.is_range_free(row, column..column + width) {
        row += 1;
    }
    (row, column)
}

/// Set equality over branch memberships, ignoring order.
fn same_branches(a: &[BranchId], b: &[BranchId]) -> bool {
    a.len() == b.len() && a.iter().all(|id| b.contains(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sha;
    use crate::layout::testutil::{branch, commit, leaf};

    fn pack_all(roots: &[crate::domain::CommitNode], branches: &[Branch]) -> (CommitIndex, Grid, Placement) {
        let index = CommitIndex::build(roots);
        let ranks = BranchRanks::resolve(branches);
        let metrics = index.metrics();
        let by_id: HashMap<_, _> = branches.iter().map(|b| (&b.id, b)).collect();
        let (grid, placement) = pack(&index, &ranks, &metrics, &by_id);
        (index, grid, placement)
    }

    fn cell_of(index: &CommitIndex, placement: &Placement, sha: &str) -> (usize, usize) {
        let id = index.lookup(&Sha::new(sha)).unwrap();
        (placement.row[id.index()], placement.column[id.index()])
    }

    #[test]
    fn mainline_stays_in_row_and_fork_drops_down() {
        let roots = vec![commit(
            "a",
            0,
            &["main"],
            vec![leaf("b", 1, &["main"]), leaf("c", 1, &["feature"])],
        )];
        let branches = vec![
            branch("main", None, Some("b")),
            branch("feature", Some("main"), Some("c")),
        ];
        let (index, grid, placement) = pack_all(&roots, &branches);

        assert_eq!(cell_of(&index, &placement, "a"), (0, 0));
        assert_eq!(cell_of(&index, &placement, "b"), (0, 1));
        assert_eq!(cell_of(&index, &placement, "c"), (1, 1));
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.column_count(), 2);
    }

    #[test]
    fn every_node_lands_in_exactly_one_cell() {
        let roots = vec![commit(
            "a",
            0,
            &["main"],
            vec![
                commit("b", 1, &["main"], vec![leaf("d", 2, &["main"])]),
                commit("c", 1, &["feature"], vec![leaf("e", 2, &["feature"])]),
            ],
        )];
        let branches = vec![
            branch("main", None, Some("d")),
            branch("feature", Some("main"), Some("e")),
        ];
        let (index, grid, _) = pack_all(&roots, &branches);

        let mut seen = 0;
        for row in grid.rows() {
            assert_eq!(row.len(), grid.column_count());
            seen += row.iter().flatten().count();
        }
        assert_eq!(seen, index.len());
    }

    #[test]
    fn second_root_starts_below_the_first_subgraph() {
        let roots = vec![
            commit("a", 0, &["main"], vec![leaf("b", 1, &["main"])]),
            leaf("x", 0, &["other"]),
        ];
        let branches = vec![branch("main", None, Some("b")), branch("other", None, Some("x"))];
        let (index, _, placement) = pack_all(&roots, &branches);

        assert_eq!(cell_of(&index, &placement, "a"), (0, 0));
        assert_eq!(cell_of(&index, &placement, "x"), (1, 0));
    }

    #[test]
    fn branchless_child_settles_into_first_free_row() {
        let roots = vec![commit(
            "a",
            0,
            &["main"],
            vec![leaf("b", 1, &["main"]), leaf("orphan", 1, &[])],
        )];
        let branches = vec![branch("main", None, Some("b"))];
        let (index, _, placement) = pack_all(&roots, &branches);

        assert_eq!(cell_of(&index, &placement, "b"), (0, 1));
        // Branch set differs from the parent and the orphan is off the
        // mainline, so it is forced past the parent's row.
        assert_eq!(cell_of(&index, &placement, "orphan"), (1, 1));
    }

    #[test]
    fn sibling_rows_never_collide() {
        let roots = vec![commit(
            "a",
            0,
            &["main"],
            vec![
                leaf("b", 1, &["main"]),
                leaf("c", 1, &["f1"]),
                leaf("d", 1, &["f2"]),
                leaf("e", 1, &["f3"]),
            ],
        )];
        let branches = vec![
            branch("main", None, Some("b")),
            branch("f1", Some("main"), Some("c")),
            branch("f2", Some("main"), Some("d")),
            branch("f3", Some("main"), Some("e")),
        ];
        let (index, _, placement) = pack_all(&roots, &branches);

        let mut cells: Vec<(usize, usize)> = ["b", "c", "d", "e"]
            .iter()
            .map(|sha| cell_of(&index, &placement, sha))
            .collect();
        cells.sort_unstable();
        cells.dedup();
        assert_eq!(cells.len(), 4, "each sibling occupies a distinct cell");
    }
}
