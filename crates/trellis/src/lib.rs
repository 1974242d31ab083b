//! Trellis - a commit-graph grid layout engine.
//!
//! Trellis takes a forest of commit trees plus branch records and assigns
//! every commit a stable `(row, column)` grid cell, together with the edge
//! geometry and current-lineage highlighting a renderer needs to draw a
//! branching commit graph. The engine is a pure, synchronous function of
//! its inputs: no I/O, no shared state, deterministic down to every
//! tie-break.
//!
//! ```
//! use trellis::domain::{Branch, BranchId, CommitNode, Sha};
//! use trellis::layout::{compute_layout, LayoutOptions};
//! use chrono::{TimeZone, Utc};
//!
//! let root = CommitNode {
//!     sha: Sha::new("a"),
//!     parent: None,
//!     children: vec![],
//!     branch_ids: vec![BranchId::new("main")],
//!     idx: 0,
//!     timestamp: Utc.timestamp_opt(0, 0).unwrap(),
//! };
//! let main = Branch {
//!     id: BranchId::new("main"),
//!     base_branch_id: None,
//!     last_commit: Some(Sha::new("a")),
//!     name: "main".to_string(),
//! };
//!
//! let layout = compute_layout(&[root], &[main], &LayoutOptions::default());
//! assert_eq!(layout.cell(layout.lookup(&Sha::new("a")).unwrap()), (0, 0));
//! ```

#![forbid(unsafe_code)]

pub mod domain;
pub mod error;
pub mod layout;
pub mod source;

pub use error::{Error, Result};
pub use layout::{compute_layout, Layout, LayoutOptions};
