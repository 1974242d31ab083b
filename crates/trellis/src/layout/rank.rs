//! Branch ranking and the shared placement comparator.
//!
//! A branch's rank is its topological depth: the number of `base_branch_id`
//! hops to a branch with no base. Lower rank means "more upstream". Ranks
//! are ordering keys only, never absolute scores.
//!
//! Every placement decision that orders commits against each other (child
//! visit order in the packer, leaf selection in the mainline pass) goes
//! through [`placement_order`], so tie-break behavior cannot drift between
//! call sites.

use crate::domain::{Branch, BranchId};
use crate::layout::index::{CommitIndex, IndexedCommit, NodeId, NodeMetrics};
use std::cmp::Ordering;
use std::collections::HashMap;

/// Topological depth per branch, over the full branch list.
#[derive(Debug, Default)]
pub struct BranchRanks {
    depth: HashMap<BranchId, usize>,
}

impl BranchRanks {
    /// Resolve depths by walking each branch's base chain.
    ///
    /// The walk is clamped to the branch count, so a malformed ancestry
    /// cycle yields arbitrary (but finite and deterministic) depths instead
    /// of hanging; rejecting cycles up front is the loader's job.
    #[must_use]
    pub fn resolve(branches: &[Branch]) -> Self {
        let base_of: HashMap<&BranchId, &Option<BranchId>> =
            branches.iter().map(|b| (&b.id, &b.base_branch_id)).collect();

        let mut depth = HashMap::with_capacity(branches.len());
        for branch in branches {
            let mut hops = 0usize;
            let mut cursor = branch.base_branch_id.as_ref();
            while let Some(base) = cursor {
                hops += 1;
                if hops > branches.len() {
                    break;
                }
                cursor = base_of.get(base).and_then(|next| next.as_ref());
            }
            depth.insert(branch.id.clone(), hops);
        }
        Self { depth }
    }

    /// Topological depth of `id`, if the branch is known.
    #[must_use]
    pub fn depth(&self, id: &BranchId) -> Option<usize> {
        self.depth.get(id).copied()
    }

    /// Rank score of a commit: the sum of depths over its branch
    /// memberships. Commits with no branches rank worst.
    ///
    /// Branch ids missing from the branch list contribute nothing.
    #[must_use]
    pub fn node_score(&self, node: &IndexedCommit) -> u64 {
        if node.branch_ids.is_empty() {
            return u64::MAX;
        }
        node.branch_ids
            .iter()
            .filter_map(|id| self.depth(id))
            .map(|d| d as u64)
            .sum()
    }
}

/// The shared placement ordering: "closer to the mainline" sorts first.
///
/// Keys, in order:
/// 1. branch rank score ascending (branchless commits last);
/// 2. branch-membership count descending;
/// 3. longest descendant chain descending;
/// 4. lineage index descending;
/// 5. timestamp descending (most recent first).
///
/// Full ties are left to the caller's stable sort, which preserves input
/// order — the final determinism anchor.
#[must_use]
pub(crate) fn placement_order(
    a: NodeId,
    b: NodeId,
    index: &CommitIndex,
    ranks: &BranchRanks,
    metrics: &NodeMetrics,
) -> Ordering {
    let na = index.node(a);
    let nb = index.node(b);
    ranks
        .node_score(na)
        .cmp(&ranks.node_score(nb))
        .then_with(|| nb.branch_ids.len().cmp(&na.branch_ids.len()))
        .then_with(|| metrics.max_chain[b.index()].cmp(&metrics.max_chain[a.index()]))
        .then_with(|| nb.idx.cmp(&na.idx))
        .then_with(|| nb.timestamp.cmp(&na.timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sha;
    use crate::layout::testutil::{branch, commit, leaf};

    fn branches() -> Vec<Branch> {
        vec![
            branch("main", None, None),
            branch("feature", Some("main"), None),
            branch("fixup", Some("feature"), None),
        ]
    }

    #[test]
    fn depth_counts_base_hops() {
        let ranks = BranchRanks::resolve(&branches());
        assert_eq!(ranks.depth(&BranchId::new("main")), Some(0));
        assert_eq!(ranks.depth(&BranchId::new("feature")), Some(1));
        assert_eq!(ranks.depth(&BranchId::new("fixup")), Some(2));
        assert_eq!(ranks.depth(&BranchId::new("unknown")), None);
    }

    #[test]
    fn depth_survives_ancestry_cycle() {
        let looped = vec![
            branch("a", Some("b"), None),
            branch("b", Some("a"), None),
        ];
        let ranks = BranchRanks::resolve(&looped);
        // Clamped, not hung; exact values are unspecified.
        assert!(ranks.depth(&BranchId::new("a")).is_some());
        assert!(ranks.depth(&BranchId::new("b")).is_some());
    }

    #[test]
    fn branchless_commits_score_worst() {
        let roots = vec![commit(
            "a",
            0,
            &["main"],
            vec![leaf("b", 1, &["feature"]), leaf("c", 1, &[])],
        )];
        let index = CommitIndex::build(&roots);
        let ranks = BranchRanks::resolve(&branches());

        let b = index.lookup(&Sha::new("b")).unwrap();
        let c = index.lookup(&Sha::new("c")).unwrap();
        assert!(ranks.node_score(index.node(b)) < ranks.node_score(index.node(c)));
        assert_eq!(ranks.node_score(index.node(c)), u64::MAX);
    }

    #[test]
    fn placement_order_prefers_upstream_branch() {
        let roots = vec![commit(
            "a",
            0,
            &["main", "feature"],
            vec![leaf("b", 1, &["main"]), leaf("c", 1, &["feature"])],
        )];
        let index = CommitIndex::build(&roots);
        let ranks = BranchRanks::resolve(&branches());
        let metrics = index.metrics();

        let b = index.lookup(&Sha::new("b")).unwrap();
        let c = index.lookup(&Sha::new("c")).unwrap();
        assert_eq!(placement_order(b, c, &index, &ranks, &metrics), Ordering::Less);
        assert_eq!(placement_order(c, b, &index, &ranks, &metrics), Ordering::Greater);
    }

    #[test]
    fn equal_scores_fall_back_to_chain_length() {
        let roots = vec![commit(
            "a",
            0,
            &["main"],
            vec![
                commit("b", 1, &["main"], vec![leaf("d", 2, &["main"])]),
                leaf("c", 1, &["main"]),
            ],
        )];
        let index = CommitIndex::build(&roots);
        let ranks = BranchRanks::resolve(&branches());
        let metrics = index.metrics();

        let b = index.lookup(&Sha::new("b")).unwrap();
        let c = index.lookup(&Sha::new("c")).unwrap();
        // Same branch set, but b heads the longer chain.
        assert_eq!(placement_order(b, c, &index, &ranks, &metrics), Ordering::Less);
    }
}
