//! Subgraph isomorphism existence test.
//!
//! Both graphs are built into CSR form from re-derivable vertex and edge
//! streams. Candidates are filtered by label and degree, refined along a BFS
//! matching tree by semi-joins, then searched by backtracking until the first
//! embedding is found.

pub mod config;
pub mod data;
pub mod error;
pub mod executor;
pub mod front_end;
pub mod planner;
pub mod task;
pub mod types;
