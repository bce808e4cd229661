//! Various types related to graph matching.

/// The vertex id type used by the input streams.
pub type VId = i64;

/// The vertex label type.
pub type VLabel = i64;
