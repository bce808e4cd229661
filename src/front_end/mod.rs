//! The query pattern language.
//!
//! ```text
//! (match (vertices (a 1) (b 1) (c 2))
//!        (edges (a b) (b c))
//!        (arcs (c a)))
//! ```
//!
//! Vertices get dense ids in declaration order. `edges` are undirected and
//! stand for one arc in each direction, `arcs` are directed.

pub use ast::Pattern;
pub use parser::parse;

pub use parser::Rule;

pub mod error;

mod ast;
mod parser;
