//! The graphs: input streams, the CSR representation and its builder.

pub use builder::GraphBuilder;
pub use graph::Graph;
pub use info::GraphInfo;
pub use sqlite::SqliteGraph;
pub use stream::{RowCursor, Undirected};
pub use view::GraphView;

use crate::{
    error::Result,
    types::{VId, VLabel},
};

mod builder;
mod graph;
mod info;
mod sqlite;
mod stream;
mod view;

/// A cursor over vertex records.
///
/// Accessors must only be called while [`valid`](VertexStream::valid) holds.
pub trait VertexStream {
    /// The number of vertices the stream describes.
    fn size(&self) -> usize;

    fn valid(&self) -> bool;

    fn next(&mut self);

    fn get_id(&self) -> VId;

    fn get_label(&self) -> VLabel;
}

/// A cursor over arc records.
pub trait EdgeStream {
    fn valid(&self) -> bool;

    fn next(&mut self);

    fn get_source(&self) -> VId;

    fn get_destination(&self) -> VId;
}

/// Something that can hand out a fresh [`VertexStream`] on every call.
pub trait VertexSource {
    fn vertices(&self) -> Result<Box<dyn VertexStream + '_>>;
}

/// Something that can hand out a fresh [`EdgeStream`] on every call.
///
/// The builder reads the edges twice, so every call must yield the same arcs.
pub trait EdgeSource {
    fn edges(&self) -> Result<Box<dyn EdgeStream + '_>>;
}
