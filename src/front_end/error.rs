//! Error management.

use super::parser::Rule;
use derive_more::Display;

#[derive(Debug, Display, PartialEq)]
pub enum Error {
    ParseError(pest::error::Error<Rule>),
    #[display(fmt = "duplicate vertex {}", _0)]
    DuplicateVertex(String),
    #[display(fmt = "unknown vertex {}", _0)]
    UnknownVertex(String),
}

impl std::error::Error for Error {}

impl From<pest::error::Error<Rule>> for Error {
    fn from(e: pest::error::Error<Rule>) -> Self {
        Error::ParseError(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
