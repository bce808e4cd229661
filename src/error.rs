//! Error management.

use derive_more::Display;

#[derive(Debug, Display, PartialEq, Clone)]
pub enum Error {
    /// Malformed vertex or edge stream.
    #[display(fmt = "invalid graph input: {}", _0)]
    InvalidGraphInput(String),
    #[display(
        fmt = "disconnected query graph: {} of {} vertices reachable from the root",
        reached,
        total
    )]
    DisconnectedQueryGraph { reached: usize, total: usize },
    #[display(fmt = "matching cancelled")]
    MatchingCancelled,
    /// The query vertex has no candidate left.
    ///
    /// This is not a failure: [`subgraph_exists`](crate::task::subgraph_exists)
    /// turns it into `Ok(false)`.
    #[display(fmt = "query vertex {} has no candidates", _0)]
    EmptyCandidateSet(usize),
    #[display(fmt = "storage error: {}", _0)]
    Storage(String),
}

impl std::error::Error for Error {}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        Error::Storage(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
