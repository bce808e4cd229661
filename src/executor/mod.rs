//! The executor.
//!
//! Refines the candidate sets along the matching tree, then backtracks over
//! the matching order until one embedding is found.

pub use backtrack::{exists_embedding, find_embedding, SearchOutcome};
pub use interrupt::{CancelFlag, Deadline, Interrupt, Never};
pub use provenance::{EdgeProvenance, Provenance};

mod backtrack;
mod interrupt;
mod provenance;
