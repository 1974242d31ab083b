//! Optional pre-pass that prunes branchless subtrees.
//!
//! A commit with no branch memberships, together with its entire subtree,
//! is dropped before indexing. This is a pure tree rewrite over a copy of
//! the input; without the option it is the identity function and the input
//! forest is used as-is.

use crate::domain::CommitNode;

/// Copy the forest, dropping every branchless node and its subtree.
///
/// Traversal is worklist-based so deep histories cannot exhaust the stack:
/// surviving nodes are cloned into a pre-order arena and reassembled into
/// trees in one reverse sweep.
#[must_use]
pub fn prune_branchless(roots: &[CommitNode]) -> Vec<CommitNode> {
    struct Slot {
        node: CommitNode,
        parent: Option<usize>,
    }

    let mut arena: Vec<Slot> = Vec::new();
    let mut stack: Vec<(&CommitNode, Option<usize>)> =
        roots.iter().rev().map(|root| (root, None)).collect();
    while let Some((source, parent)) = stack.pop() {
        if source.is_branchless() {
            continue;
        }
        let slot = arena.len();
        arena.push(Slot {
            node: CommitNode {
                sha: source.sha.clone(),
                parent: source.parent.clone(),
                children: Vec::new(),
                branch_ids: source.branch_ids.clone(),
                idx: source.idx,
                timestamp: source.timestamp,
            },
            parent,
        });
        for child in source.children.iter().rev() {
            stack.push((child, Some(slot)));
        }
    }

    // Reverse sweep: every node's surviving children are complete before
    // the node itself is attached to its parent. Sibling order is restored
    // with a reverse, since later siblings attach first.
    let mut out = Vec::new();
    while let Some(mut slot) = arena.pop() {
        slot.node.children.reverse();
        match slot.parent {
            Some(parent) => arena[parent].node.children.push(slot.node),
            None => out.push(slot.node),
        }
    }
    out.reverse();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sha;
    use crate::layout::testutil::{commit, leaf};

    #[test]
    fn keeps_branch_bearing_nodes_in_order() {
        let roots = vec![commit(
            "a",
            0,
            &["main"],
            vec![leaf("b", 1, &["main"]), leaf("c", 1, &["feature"])],
        )];
        let pruned = prune_branchless(&roots);
        assert_eq!(pruned, roots);
    }

    #[test]
    fn drops_branchless_subtree_wholesale() {
        // The orphan's child has branches, but falls with its parent.
        let roots = vec![commit(
            "a",
            0,
            &["main"],
            vec![
                leaf("b", 1, &["main"]),
                commit("orphan", 1, &[], vec![leaf("d", 2, &["feature"])]),
            ],
        )];
        let pruned = prune_branchless(&roots);

        assert_eq!(pruned.len(), 1);
        let children: Vec<&Sha> = pruned[0].children.iter().map(|c| &c.sha).collect();
        assert_eq!(children, vec![&Sha::new("b")]);
    }

    #[test]
    fn drops_branchless_root_entirely() {
        let roots = vec![
            leaf("kept", 0, &["main"]),
            commit("gone", 0, &[], vec![leaf("also-gone", 1, &["main"])]),
        ];
        let pruned = prune_branchless(&roots);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].sha, Sha::new("kept"));
    }
}
