use super::{EdgeSource, EdgeStream, Graph, VertexSource, VertexStream};
use crate::{
    error::{Error, Result},
    types::{VId, VLabel},
};
use log::debug;
use std::convert::TryFrom;

/// Builds CSR graphs out of vertex and arc streams.
///
/// The data graph and the query graph go through exactly the same steps:
///
/// 1. read the labels from the vertex stream;
/// 2. count the out-degrees with a first pass over the arcs;
/// 3. prefix-sum the degrees into the offsets;
/// 4. place the destinations with a second pass over a fresh arc stream;
/// 5. sort each neighbor segment and drop repeated arcs.
pub struct GraphBuilder;

impl GraphBuilder {
    pub fn build<V, E>(vertices: &V, edges: &E) -> Result<Graph>
    where
        V: VertexSource + ?Sized,
        E: EdgeSource + ?Sized,
    {
        let labels = load_labels(vertices.vertices()?.as_mut())?;
        let degrees = count_degrees(edges.edges()?.as_mut(), labels.len())?;
        let offsets = prefix_sum(&degrees);
        let neighbors = place_neighbors(edges.edges()?.as_mut(), &offsets)?;
        let (offsets, neighbors) = dedup_neighbors(&offsets, neighbors);
        debug!(
            "built graph: {} vertices, {} arcs",
            labels.len(),
            neighbors.len()
        );
        Ok(Graph::from_parts(labels, offsets, neighbors))
    }
}

fn invalid(message: String) -> Error {
    Error::InvalidGraphInput(message)
}

fn to_index(vid: VId, num_vertices: usize) -> Option<usize> {
    usize::try_from(vid).ok().filter(|&v| v < num_vertices)
}

fn load_labels(stream: &mut dyn VertexStream) -> Result<Vec<VLabel>> {
    let num_vertices = stream.size();
    let mut labels: Vec<Option<VLabel>> = vec![None; num_vertices];
    while stream.valid() {
        let vid = stream.get_id();
        let v = to_index(vid, num_vertices).ok_or_else(|| {
            invalid(format!(
                "vertex id {} out of range 0..{}",
                vid, num_vertices
            ))
        })?;
        if labels[v].replace(stream.get_label()).is_some() {
            return Err(invalid(format!("duplicate vertex id {}", vid)));
        }
        stream.next();
    }
    labels
        .into_iter()
        .enumerate()
        .map(|(v, label)| label.ok_or_else(|| invalid(format!("missing vertex id {}", v))))
        .collect()
}

fn arc_endpoints(stream: &dyn EdgeStream, num_vertices: usize) -> Result<(usize, usize)> {
    let (src, dst) = (stream.get_source(), stream.get_destination());
    match (to_index(src, num_vertices), to_index(dst, num_vertices)) {
        (Some(s), Some(d)) => Ok((s, d)),
        _ => Err(invalid(format!(
            "arc ({}, {}) references an unknown vertex",
            src, dst
        ))),
    }
}

fn count_degrees(stream: &mut dyn EdgeStream, num_vertices: usize) -> Result<Vec<usize>> {
    let mut degrees = vec![0; num_vertices];
    while stream.valid() {
        let (src, _) = arc_endpoints(stream, num_vertices)?;
        degrees[src] += 1;
        stream.next();
    }
    Ok(degrees)
}

/// Returns `offsets` with `offsets[0] == 0` and `offsets[i + 1] == offsets[i] + degrees[i]`.
fn prefix_sum(degrees: &[usize]) -> Vec<usize> {
    let mut offsets = vec![0; degrees.len() + 1];
    for (i, &deg) in degrees.iter().enumerate() {
        offsets[i + 1] = offsets[i] + deg;
    }
    offsets
}

fn place_neighbors(stream: &mut dyn EdgeStream, offsets: &[usize]) -> Result<Vec<usize>> {
    let num_vertices = offsets.len() - 1;
    let mut neighbors = vec![0; offsets[num_vertices]];
    let mut cursors = offsets[..num_vertices].to_vec();
    while stream.valid() {
        let (src, dst) = arc_endpoints(stream, num_vertices)?;
        if cursors[src] == offsets[src + 1] {
            return Err(invalid(String::from("arc stream changed between passes")));
        }
        neighbors[cursors[src]] = dst;
        cursors[src] += 1;
        stream.next();
    }
    if cursors.iter().zip(&offsets[1..]).any(|(c, end)| c != end) {
        return Err(invalid(String::from("arc stream changed between passes")));
    }
    for v in 0..num_vertices {
        neighbors[offsets[v]..offsets[v + 1]].sort_unstable();
    }
    Ok(neighbors)
}

/// Removes repeated arcs from sorted segments, shrinking the offsets to match.
fn dedup_neighbors(offsets: &[usize], mut neighbors: Vec<usize>) -> (Vec<usize>, Vec<usize>) {
    let mut deduped = vec![0; offsets.len()];
    let mut len = 0;
    for v in 0..offsets.len() - 1 {
        let mut prev = None;
        for i in offsets[v]..offsets[v + 1] {
            if prev != Some(neighbors[i]) {
                prev = Some(neighbors[i]);
                neighbors[len] = neighbors[i];
                len += 1;
            }
        }
        deduped[v + 1] = len;
    }
    neighbors.truncate(len);
    (deduped, neighbors)
}
