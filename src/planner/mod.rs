//! The planner: candidate sets and the matching order.

pub use candidates::Candidates;
pub use order::{MatchingTree, TreeNode};

pub(crate) use order::undirected_adjacency;

mod candidates;
mod order;
