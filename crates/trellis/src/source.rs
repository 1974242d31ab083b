//! Input document loading and validation.
//!
//! The engine consumes a forest of [`CommitNode`] trees plus [`Branch`]
//! records. This module reads them from a single JSON document:
//!
//! ```json
//! {
//!   "roots": [ { "sha": "a", "idx": 0, "timestamp": "...", "children": [] } ],
//!   "branches": [ { "id": "main", "name": "main" } ]
//! }
//! ```
//!
//! [`validate`] is a caller-side guard for the engine's preconditions
//! (forest shape, acyclic branch ancestry). The layout pipeline never
//! validates on its own; callers that trust their input may skip it.

use crate::domain::{Branch, BranchId, CommitNode, Sha};
use crate::error::{Error, Result};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// A complete layout input: forest roots plus branch records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Forest roots, each with recursively nested children.
    #[serde(default)]
    pub roots: Vec<CommitNode>,

    /// All branch records, including unborn branches.
    #[serde(default)]
    pub branches: Vec<Branch>,
}

/// Parse a document from a JSON string.
///
/// # Errors
///
/// Returns [`Error::Parse`] if the string is not valid JSON or does not
/// match the document schema.
pub fn parse_document(input: &str) -> Result<Document> {
    Ok(serde_json::from_str(input)?)
}

/// Load and parse a document from a file.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, or [`Error::Parse`]
/// if its contents do not parse.
pub fn load_document(path: &Path) -> Result<Document> {
    let contents = fs::read_to_string(path)?;
    let doc = parse_document(&contents)?;
    tracing::debug!(
        roots = doc.roots.len(),
        branches = doc.branches.len(),
        "loaded layout document"
    );
    Ok(doc)
}

/// Check the engine's documented preconditions on a document.
///
/// Rejects:
/// - duplicate commit shas anywhere in the forest (the layout index would
///   silently keep the last occurrence);
/// - branch-ancestry cycles in the `base_branch_id` relation (the rank
///   resolver would clamp the walk, producing arbitrary depths).
///
/// # Errors
///
/// Returns [`Error::DuplicateSha`] or [`Error::BranchCycle`] on the first
/// violation found.
pub fn validate(doc: &Document) -> Result<()> {
    let mut seen: HashSet<&Sha> = HashSet::new();
    let mut stack: Vec<&CommitNode> = doc.roots.iter().collect();
    while let Some(node) = stack.pop() {
        if !seen.insert(&node.sha) {
            return Err(Error::DuplicateSha(node.sha.clone()));
        }
        stack.extend(node.children.iter());
    }

    // Branch ancestry must be a DAG. Build it in petgraph and toposort;
    // a cycle error names one branch on the cycle.
    let mut graph: DiGraph<&BranchId, ()> = DiGraph::new();
    let mut node_map: HashMap<&BranchId, NodeIndex> = HashMap::new();
    for branch in &doc.branches {
        let idx = *node_map
            .entry(&branch.id)
            .or_insert_with(|| graph.add_node(&branch.id));
        if let Some(base) = &branch.base_branch_id {
            let base_idx = *node_map
                .entry(base)
                .or_insert_with(|| graph.add_node(base));
            graph.add_edge(idx, base_idx, ());
        }
    }
    if let Err(cycle) = toposort(&graph, None) {
        return Err(Error::BranchCycle((*graph[cycle.node_id()]).clone()));
    }

    Ok(())
}
