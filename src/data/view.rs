use crate::types::{VId, VLabel};
use std::fmt;

/// A sorted, printable copy of a graph.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct GraphView {
    vertices: Vec<(VId, VLabel)>,
    arcs: Vec<(VId, VId)>,
}

impl GraphView {
    pub fn new(mut vertices: Vec<(VId, VLabel)>, mut arcs: Vec<(VId, VId)>) -> Self {
        vertices.sort();
        arcs.sort();
        Self { vertices, arcs }
    }

    pub fn vertices(&self) -> &[(VId, VLabel)] {
        &self.vertices
    }

    pub fn arcs(&self) -> &[(VId, VId)] {
        &self.arcs
    }
}

impl fmt::Display for GraphView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "vertices:")?;
        for (vid, vlabel) in &self.vertices {
            writeln!(f, "  {} {}", vid, vlabel)?;
        }
        writeln!(f, "arcs:")?;
        for (src, dst) in &self.arcs {
            writeln!(f, "  {} {}", src, dst)?;
        }
        Ok(())
    }
}
