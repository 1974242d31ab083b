//! Pointer index: a flat arena over the nested input forest.
//!
//! The input forest arrives as recursively nested [`CommitNode`] trees. The
//! rest of the pipeline wants cheap id-based lookups and side tables, so the
//! first stage flattens every reachable node into a dense arena and builds
//! the sha-to-node map. Input nodes are copied, never mutated.

use crate::domain::{BranchId, CommitNode, Sha};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Dense identifier of a commit within one [`CommitIndex`].
///
/// Ids are assigned in depth-first pre-order over the input roots, so a
/// parent's id is always smaller than any of its descendants'.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    /// The raw arena offset.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One commit in the flattened arena.
#[derive(Debug, Clone)]
pub struct IndexedCommit {
    /// Unique identifier for this commit.
    pub sha: Sha,
    /// Parent commit, absent for a root.
    pub parent: Option<NodeId>,
    /// Child commits in input order.
    pub children: Vec<NodeId>,
    /// Branches whose tip lineage includes this commit.
    pub branch_ids: Vec<BranchId>,
    /// Sequence position within the commit's own branch lineage.
    pub idx: usize,
    /// Creation time, used only for tie-breaking.
    pub timestamp: DateTime<Utc>,
}

impl IndexedCommit {
    /// Whether this commit belongs to no branch at all.
    #[must_use]
    pub fn is_branchless(&self) -> bool {
        self.branch_ids.is_empty()
    }
}

/// Arena plus sha lookup covering every node reachable from the input roots.
#[derive(Debug, Default)]
pub struct CommitIndex {
    nodes: Vec<IndexedCommit>,
    by_sha: HashMap<Sha, NodeId>,
    roots: Vec<NodeId>,
}

impl CommitIndex {
    /// Flatten the forest, assigning ids in depth-first pre-order.
    ///
    /// If a sha appears twice (malformed forest; callers are expected to
    /// guarantee true forest shape), the last-visited occurrence wins in the
    /// sha lookup. Both occurrences still receive arena entries.
    #[must_use]
    pub fn build(roots: &[CommitNode]) -> Self {
        let mut index = Self::default();
        for root in roots {
            let id = index.insert_subtree(root);
            index.roots.push(id);
        }
        tracing::trace!(nodes = index.nodes.len(), roots = index.roots.len(), "indexed forest");
        index
    }

    fn insert_subtree(&mut self, root: &CommitNode) -> NodeId {
        let root_id = NodeId(self.nodes.len());
        // Explicit worklist; history depth must not bound the stack.
        let mut stack: Vec<(&CommitNode, Option<NodeId>)> = vec![(root, None)];
        while let Some((node, parent)) = stack.pop() {
            let id = self.insert_node(node, parent);
            if let Some(parent) = parent {
                self.nodes[parent.0].children.push(id);
            }
            // Reversed so pre-order pops children in input order.
            for child in node.children.iter().rev() {
                stack.push((child, Some(id)));
            }
        }
        root_id
    }

    fn insert_node(&mut self, node: &CommitNode, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(IndexedCommit {
            sha: node.sha.clone(),
            parent,
            children: Vec::with_capacity(node.children.len()),
            branch_ids: node.branch_ids.clone(),
            idx: node.idx,
            timestamp: node.timestamp,
        });
        self.by_sha.insert(node.sha.clone(), id);
        id
    }

    /// Number of indexed commits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the forest was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The commit stored under `id`.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &IndexedCommit {
        &self.nodes[id.0]
    }

    /// Resolve a sha to its arena id, if present.
    #[must_use]
    pub fn lookup(&self, sha: &Sha) -> Option<NodeId> {
        self.by_sha.get(sha).copied()
    }

    /// Ids of the forest roots, in input order.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// All ids in arena order (depth-first pre-order).
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    /// Per-node structural metrics, computed in one reverse pass.
    ///
    /// Pre-order id assignment puts every child after its parent, so a
    /// single reverse sweep sees children before parents.
    #[must_use]
    pub(crate) fn metrics(&self) -> NodeMetrics {
        let mut max_chain = vec![1usize; self.nodes.len()];
        let mut width = vec![0usize; self.nodes.len()];
        for i in (0..self.nodes.len()).rev() {
            let node = &self.nodes[i];
            width[i] = node.idx + 1;
            for child in &node.children {
                max_chain[i] = max_chain[i].max(max_chain[child.0] + 1);
                width[i] = width[i].max(width[child.0]);
            }
        }
        NodeMetrics { max_chain, width }
    }

    /// Ids of the subtree rooted at `root`, in depth-first pre-order.
    pub(crate) fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            for child in self.nodes[id.0].children.iter().rev() {
                stack.push(*child);
            }
        }
        out
    }
}

/// Structural side tables derived from the forest shape alone.
#[derive(Debug)]
pub(crate) struct NodeMetrics {
    /// Longest chain of commits in the subtree rooted here, counting the
    /// node itself (a leaf has chain 1).
    pub max_chain: Vec<usize>,
    /// Number of grid columns the subtree may need starting at the node's
    /// column: the maximum `idx + 1` over the node and its descendants.
    pub width: Vec<usize>,
}
