use super::{GraphInfo, GraphView};
use crate::types::{VId, VLabel};
use std::collections::BTreeSet;

/// The CSR graph.
///
/// ```text
/// labels:    | l(0) | l(1) | ... | l(n-1) |
/// offsets:   |  0   | o(1) | ... | o(n-1) | m |
/// neighbors: | out(0) ... | out(1) ... | ... | out(n-1) ... |
/// ```
///
/// The out-neighbors of `v` are `neighbors[offsets[v]..offsets[v + 1]]`,
/// sorted by id, each at most once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    labels: Vec<VLabel>,
    offsets: Vec<usize>,
    neighbors: Vec<usize>,
}

impl Graph {
    pub(crate) fn from_parts(labels: Vec<VLabel>, offsets: Vec<usize>, neighbors: Vec<usize>) -> Self {
        debug_assert_eq!(offsets.len(), labels.len() + 1);
        debug_assert_eq!(offsets.last().copied(), Some(neighbors.len()));
        Self {
            labels,
            offsets,
            neighbors,
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.labels.len()
    }

    pub fn num_edges(&self) -> usize {
        self.neighbors.len()
    }

    pub fn label(&self, v: usize) -> VLabel {
        self.labels[v]
    }

    pub fn out_deg(&self, v: usize) -> usize {
        self.offsets[v + 1] - self.offsets[v]
    }

    pub fn neighbors(&self, v: usize) -> &[usize] {
        &self.neighbors[self.offsets[v]..self.offsets[v + 1]]
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    /// Returns `true` if the arc `src -> dst` exists.
    pub fn has_arc(&self, src: usize, dst: usize) -> bool {
        self.neighbors(src).binary_search(&dst).is_ok()
    }

    pub fn vertices(&self) -> std::ops::Range<usize> {
        0..self.num_vertices()
    }

    pub fn arcs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.vertices()
            .flat_map(move |v| self.neighbors(v).iter().map(move |&n| (v, n)))
    }

    pub fn info(&self) -> GraphInfo {
        GraphInfo::new(
            self.num_vertices(),
            self.num_edges(),
            self.labels.iter().collect::<BTreeSet<_>>().len(),
        )
    }

    pub fn view(&self) -> GraphView {
        GraphView::new(
            self.labels
                .iter()
                .enumerate()
                .map(|(v, &l)| (v as VId, l))
                .collect(),
            self.arcs().map(|(v, n)| (v as VId, n as VId)).collect(),
        )
    }
}
