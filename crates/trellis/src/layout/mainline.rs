//! Mainline selection: picking each root subgraph's target leaf.
//!
//! The target leaf is the commit whose path back to the root becomes the
//! subgraph's priority lineage; the packer keeps that path as straight as
//! possible. Selection prefers a recorded branch tip and falls back to a
//! deterministic leaf-ranking heuristic when no branch stands out.

use crate::domain::{Branch, BranchId};
use crate::layout::index::{CommitIndex, NodeId, NodeMetrics};
use crate::layout::rank::{placement_order, BranchRanks};
use std::collections::{HashMap, HashSet};

/// Pick the target leaf for the subgraph rooted at `root`.
///
/// 1. Among the root's branches, a "target branch" is one whose topological
///    depth is the minimum present and strictly below the maximum present;
///    when all are equidistant there is no target branch. Several branches
///    can share the minimum, in which case the first in the root's branch
///    order wins.
/// 2. If the target branch records a tip commit that resolves in the
///    pointer index, that commit is the target leaf.
/// 3. Otherwise, the best-ranked childless commit of the subgraph wins,
///    under the shared placement ordering.
pub(crate) fn select_target_leaf(
    root: NodeId,
    index: &CommitIndex,
    ranks: &BranchRanks,
    metrics: &NodeMetrics,
    branches_by_id: &HashMap<&BranchId, &Branch>,
) -> NodeId {
    if let Some(target_branch) = target_branch(root, index, ranks) {
        if let Some(leaf) = branches_by_id
            .get(target_branch)
            .and_then(|branch| branch.last_commit.as_ref())
            .and_then(|tip| index.lookup(tip))
        {
            tracing::trace!(branch = %target_branch, leaf = %index.node(leaf).sha, "target leaf from branch tip");
            return leaf;
        }
    }

    let mut leaves: Vec<NodeId> = index
        .subtree(root)
        .into_iter()
        .filter(|id| index.node(*id).children.is_empty())
        .collect();
    leaves.sort_by(|a, b| placement_order(*a, *b, index, ranks, metrics));
    // A childless root is its own leaf, so the list is never empty.
    let leaf = leaves[0];
    tracing::trace!(leaf = %index.node(leaf).sha, "target leaf from leaf ranking");
    leaf
}

/// The root's branch with the strictly-shortest topological depth, if any.
fn target_branch<'a>(
    root: NodeId,
    index: &'a CommitIndex,
    ranks: &BranchRanks,
) -> Option<&'a BranchId> {
    let node = index.node(root);
    let depths: Vec<(&BranchId, usize)> = node
        .branch_ids
        .iter()
        .filter_map(|id| ranks.depth(id).map(|d| (id, d)))
        .collect();
    let min = depths.iter().map(|(_, d)| *d).min()?;
    let max = depths.iter().map(|(_, d)| *d).max()?;
    if min == max {
        // All present branches are equidistant; no unambiguous target.
        return None;
    }
    depths.iter().find(|(_, d)| *d == min).map(|(id, _)| *id)
}

/// The set of commits on the path from `leaf` back to its root.
pub(crate) fn mainline_path(leaf: NodeId, index: &CommitIndex) -> HashSet<NodeId> {
    let mut path = HashSet::new();
    let mut cursor = Some(leaf);
    while let Some(id) = cursor {
        path.insert(id);
        cursor = index.node(id).parent;
    }
    path
}
