//! Current-lineage tracking.
//!
//! Marks the ancestor chain of a "current" commit: the commit itself plus
//! every transitive parent. Marks are reset in full before each query so a
//! previous current commit never leaks stale highlights; a missing or
//! unknown sha degrades to a plain reset.

use crate::domain::Sha;
use crate::layout::index::CommitIndex;

/// Recompute the lineage flags in `flags` for `current`.
///
/// `flags` is indexed by arena id and must cover the whole index.
pub(crate) fn apply(index: &CommitIndex, current: Option<&Sha>, flags: &mut [bool]) {
    flags.fill(false);

    let Some(start) = current.and_then(|sha| index.lookup(sha)) else {
        return;
    };
    let mut cursor = Some(start);
    while let Some(id) = cursor {
        flags[id.index()] = true;
        cursor = index.node(id).parent;
    }
}
