//! Domain types for commit-graph layout.
//!
//! These are the input records the layout engine consumes: a forest of
//! [`CommitNode`] trees plus the [`Branch`] records describing how branches
//! fork from one another. The engine never mutates them; all layout state
//! lives in side tables keyed by commit sha.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a commit.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Sha(pub String);

impl Sha {
    /// Create a new commit sha.
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }

    /// The sha as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Sha {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Sha {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Unique identifier for a branch.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BranchId(pub String);

impl BranchId {
    /// Create a new branch identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BranchId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BranchId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One entry in the version history forest.
///
/// A commit has at most one parent; commits with no parent are forest roots.
/// Children are ordered, and a commit with several children is a branch
/// point. The forest shape (no cycles, each node reachable from exactly one
/// root) is a documented precondition of the engine, checked only by the
/// optional [`crate::source::validate`] pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitNode {
    /// Unique identifier for this commit.
    pub sha: Sha,

    /// Sha of the single parent commit, absent for a root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<Sha>,

    /// Child commits, in branch-creation order.
    #[serde(default)]
    pub children: Vec<CommitNode>,

    /// Branches whose tip lineage includes this commit. May be empty.
    #[serde(default)]
    pub branch_ids: Vec<BranchId>,

    /// Sequence position within the commit's own branch lineage.
    ///
    /// Used by the layout as a column hint: a subtree rooted at a commit
    /// with index `i` may need columns up to the largest index among its
    /// descendants.
    pub idx: usize,

    /// Creation time. Used only as a deterministic tie-breaker.
    pub timestamp: DateTime<Utc>,
}

impl CommitNode {
    /// Whether this commit belongs to no branch lineage at all.
    #[must_use]
    pub fn is_branchless(&self) -> bool {
        self.branch_ids.is_empty()
    }
}

/// A named branch with a tip pointer and an optional base branch.
///
/// The `base_branch_id` relation over all branches forms a DAG; the number of
/// hops from a branch to a base-less ancestor is its topological depth, which
/// drives child-ordering and mainline selection in the layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Unique identifier for this branch.
    pub id: BranchId,

    /// Branch this one forked from, absent for a root branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_branch_id: Option<BranchId>,

    /// Sha of the commit currently at the branch tip, absent if unborn.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_commit: Option<Sha>,

    /// Display name. Consumed only by renderers.
    pub name: String,
}
