use derive_more::Display;

#[derive(Debug, Display, PartialEq, Eq)]
#[display(fmt = "{} {} {}", num_vertices, num_edges, num_vlabels)]
pub struct GraphInfo {
    num_vertices: usize,
    num_edges: usize,
    num_vlabels: usize,
}

impl GraphInfo {
    pub fn new(num_vertices: usize, num_edges: usize, num_vlabels: usize) -> Self {
        Self {
            num_vertices,
            num_edges,
            num_vlabels,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.num_vertices
    }

    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn num_vlabels(&self) -> usize {
        self.num_vlabels
    }
}
