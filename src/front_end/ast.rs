use crate::{
    data::{EdgeSource, EdgeStream, VertexSource, VertexStream},
    error::Result,
    types::{VId, VLabel},
};
use std::convert::TryFrom;

/// A parsed query pattern.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pattern {
    names: Vec<String>,
    vertices: Vec<(VId, VLabel)>,
    arcs: Vec<(VId, VId)>,
}

impl Pattern {
    pub(crate) fn new(
        names: Vec<String>,
        vertices: Vec<(VId, VLabel)>,
        arcs: Vec<(VId, VId)>,
    ) -> Self {
        Self {
            names,
            vertices,
            arcs,
        }
    }

    /// The vertex names, indexed by vertex id.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, vid: VId) -> Option<&str> {
        usize::try_from(vid)
            .ok()
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    pub fn vertices(&self) -> &[(VId, VLabel)] {
        &self.vertices
    }

    /// The arcs in declaration order, both directions of an edge included.
    pub fn arcs(&self) -> &[(VId, VId)] {
        &self.arcs
    }
}

impl VertexSource for Pattern {
    fn vertices(&self) -> Result<Box<dyn VertexStream + '_>> {
        self.vertices.as_slice().vertices()
    }
}

impl EdgeSource for Pattern {
    fn edges(&self) -> Result<Box<dyn EdgeStream + '_>> {
        self.arcs.as_slice().edges()
    }
}
