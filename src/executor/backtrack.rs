use super::{Interrupt, Provenance};
use crate::{
    data::Graph,
    error::{Error, Result},
    planner::{undirected_adjacency, Candidates, MatchingTree},
};
use log::trace;

/// How a search ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// `embedding[u]` is the data vertex matched to the query vertex `u`.
    Found(Vec<usize>),
    Exhausted,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

/// The query vertices matched so far and the data vertices they use.
struct PartialEmbedding {
    mapping: Vec<Option<usize>>,
    used: Vec<bool>,
}

impl PartialEmbedding {
    fn new(num_query_vertices: usize, num_data_vertices: usize) -> Self {
        Self {
            mapping: vec![None; num_query_vertices],
            used: vec![false; num_data_vertices],
        }
    }

    fn get(&self, u: usize) -> Option<usize> {
        self.mapping[u]
    }

    fn is_used(&self, v: usize) -> bool {
        self.used[v]
    }

    fn push(&mut self, u: usize, v: usize) {
        self.mapping[u] = Some(v);
        self.used[v] = true;
    }

    fn pop(&mut self, u: usize) {
        if let Some(v) = self.mapping[u].take() {
            self.used[v] = false;
        }
    }

    fn into_vec(self) -> Vec<usize> {
        self.mapping.into_iter().flatten().collect()
    }
}

/// An already matched query neighbor `w` of the vertex being extended.
struct BackwardArc {
    w: usize,
    /// `u -> w` is a query arc.
    out: bool,
    /// `w -> u` is a query arc.
    inc: bool,
}

struct Matcher<'a, I: ?Sized> {
    data: &'a Graph,
    tree: &'a MatchingTree,
    candidates: &'a Candidates,
    provenance: &'a Provenance,
    interrupt: &'a I,
    /// `backward_arcs[i]`: the non-tree arcs between `order[i]` and `order[..i]`.
    backward_arcs: Vec<Vec<BackwardArc>>,
    self_loops: Vec<bool>,
}

impl<'a, I: Interrupt + ?Sized> Matcher<'a, I> {
    fn new(
        data: &'a Graph,
        query: &'a Graph,
        tree: &'a MatchingTree,
        candidates: &'a Candidates,
        provenance: &'a Provenance,
        interrupt: &'a I,
    ) -> Self {
        let order = tree.order();
        let mut position = vec![0; query.num_vertices()];
        for (i, &u) in order.iter().enumerate() {
            position[u] = i;
        }
        let adjacency = undirected_adjacency(query);
        let backward_arcs = order
            .iter()
            .enumerate()
            .map(|(i, &u)| {
                adjacency[u]
                    .iter()
                    .filter(|&&w| position[w] < i && tree.parent(u) != Some(w))
                    .map(|&w| BackwardArc {
                        w,
                        out: query.has_arc(u, w),
                        inc: query.has_arc(w, u),
                    })
                    .collect()
            })
            .collect();
        Self {
            data,
            tree,
            candidates,
            provenance,
            interrupt,
            backward_arcs,
            self_loops: query.vertices().map(|u| query.has_arc(u, u)).collect(),
        }
    }

    fn pool(&self, u: usize, embedding: &PartialEmbedding) -> &'a [usize] {
        let (candidates, provenance) = (self.candidates, self.provenance);
        match self.tree.parent(u) {
            None => candidates.get(u),
            Some(p) => embedding
                .get(p)
                .map_or(&[][..], |v_p| provenance.forward(u, v_p)),
        }
    }

    fn is_joinable(&self, pos: usize, u: usize, v: usize, embedding: &PartialEmbedding) -> bool {
        let data = self.data;
        self.candidates.contains(u, v)
            && (!self.self_loops[u] || data.has_arc(v, v))
            && self.backward_arcs[pos].iter().all(|arc| {
                embedding.get(arc.w).map_or(false, |x| {
                    (!arc.out || data.has_arc(v, x)) && (!arc.inc || data.has_arc(x, v))
                })
            })
    }

    /// Returns the next candidate of `frame` that extends `embedding` with the
    /// query vertex at `pos` of the order.
    fn next_candidate(
        &self,
        pos: usize,
        frame: &mut Frame<'a>,
        embedding: &PartialEmbedding,
    ) -> Result<Option<usize>> {
        let u = self.tree.order()[pos];
        while let Some(&v) = frame.pool.get(frame.next) {
            frame.next += 1;
            if self.interrupt.interrupted() {
                return Err(Error::MatchingCancelled);
            }
            if !embedding.is_used(v) && self.is_joinable(pos, u, v, embedding) {
                return Ok(Some(v));
            }
        }
        Ok(None)
    }

    /// Walks the matching order depth-first with an explicit stack of frames,
    /// one per matched query vertex.
    ///
    /// Returns `Ok(true)` with a complete embedding left in place.
    fn extend(&self, embedding: &mut PartialEmbedding) -> Result<bool> {
        let order = self.tree.order();
        if order.is_empty() {
            return Ok(true);
        }
        let mut frames = Vec::with_capacity(order.len());
        frames.push(Frame::new(self.pool(order[0], embedding)));
        while !frames.is_empty() {
            let pos = frames.len() - 1;
            match self.next_candidate(pos, &mut frames[pos], embedding)? {
                Some(v) => {
                    trace!("u{} -> v{} at depth {}", order[pos], v, pos);
                    embedding.push(order[pos], v);
                    if pos + 1 == order.len() {
                        return Ok(true);
                    }
                    frames.push(Frame::new(self.pool(order[pos + 1], embedding)));
                }
                None => {
                    frames.pop();
                    if pos > 0 {
                        embedding.pop(order[pos - 1]);
                    }
                }
            }
        }
        Ok(false)
    }
}

/// The pool of one query vertex and the position of its next candidate.
struct Frame<'a> {
    pool: &'a [usize],
    next: usize,
}

impl<'a> Frame<'a> {
    fn new(pool: &'a [usize]) -> Self {
        Self { pool, next: 0 }
    }
}

/// Backtracks over the matching order and stops at the first embedding.
pub fn find_embedding<I: Interrupt + ?Sized>(
    data: &Graph,
    query: &Graph,
    tree: &MatchingTree,
    candidates: &Candidates,
    provenance: &Provenance,
    interrupt: &I,
) -> Result<SearchOutcome> {
    let matcher = Matcher::new(data, query, tree, candidates, provenance, interrupt);
    let mut embedding = PartialEmbedding::new(query.num_vertices(), data.num_vertices());
    Ok(if matcher.extend(&mut embedding)? {
        SearchOutcome::Found(embedding.into_vec())
    } else {
        SearchOutcome::Exhausted
    })
}

pub fn exists_embedding<I: Interrupt + ?Sized>(
    data: &Graph,
    query: &Graph,
    tree: &MatchingTree,
    candidates: &Candidates,
    provenance: &Provenance,
    interrupt: &I,
) -> Result<bool> {
    find_embedding(data, query, tree, candidates, provenance, interrupt).map(|o| o.is_found())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::MatchConfig,
        data::GraphBuilder,
        executor::{CancelFlag, Never},
        types::{VId, VLabel},
    };
    use std::cell::Cell;

    fn graph(vertices: &[(VId, VLabel)], arcs: &[(VId, VId)]) -> Graph {
        GraphBuilder::build(vertices, arcs).unwrap()
    }

    fn undirected(num_vertices: usize, edges: &[(VId, VId)]) -> Graph {
        let vertices: Vec<_> = (0..num_vertices as VId).map(|v| (v, 0)).collect();
        let arcs: Vec<_> = edges
            .iter()
            .flat_map(|&(a, b)| vec![(a, b), (b, a)])
            .collect();
        graph(&vertices, &arcs)
    }

    fn search<I: Interrupt + ?Sized>(
        data: &Graph,
        query: &Graph,
        interrupt: &I,
    ) -> Result<SearchOutcome> {
        let mut candidates = Candidates::generate(data, query, &MatchConfig::default());
        let tree = MatchingTree::plan(query, &candidates)?;
        let provenance = Provenance::refine(data, query, &tree, &mut candidates)?;
        find_embedding(data, query, &tree, &candidates, &provenance, interrupt)
    }

    #[test]
    fn test_square_in_square_with_diagonal() {
        let data = undirected(4, &[(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
        let query = undirected(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        match search(&data, &query, &Never).unwrap() {
            SearchOutcome::Found(embedding) => {
                assert_eq!(embedding.len(), 4);
                for u in 0..4 {
                    let v = (u + 1) % 4;
                    assert!(data.has_arc(embedding[u], embedding[v]));
                }
            }
            SearchOutcome::Exhausted => panic!("expected an embedding"),
        }
    }

    #[test]
    fn test_non_tree_edge_is_checked() {
        // A path of three vertices has no triangle even though every tree edge
        // of a triangle query finds support.
        let data = undirected(3, &[(0, 1), (1, 2)]);
        let query = undirected(3, &[(0, 1), (1, 2), (2, 0)]);
        assert!(matches!(
            search(&data, &query, &Never),
            Err(Error::EmptyCandidateSet(_)) | Ok(SearchOutcome::Exhausted)
        ));
        // The same holds with degrees satisfied everywhere: a 4-cycle.
        let data = undirected(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        assert_eq!(search(&data, &query, &Never), Ok(SearchOutcome::Exhausted));
    }

    #[test]
    fn test_injectivity() {
        // The star with two leaves needs two distinct neighbors.
        let data = undirected(2, &[(0, 1)]);
        let query = graph(&[(0, 0), (1, 0), (2, 0)], &[(0, 1), (0, 2)]);
        assert!(!matches!(
            search(&data, &query, &Never),
            Ok(SearchOutcome::Found(_))
        ));
    }

    #[test]
    fn test_directed_cycle() {
        let data = graph(&[(0, 0), (1, 0), (2, 0)], &[(0, 1), (1, 2), (2, 0)]);
        let query = graph(&[(0, 0), (1, 0), (2, 0)], &[(0, 1), (1, 2), (2, 0)]);
        assert!(search(&data, &query, &Never).unwrap().is_found());
        let reversed = graph(&[(0, 0), (1, 0), (2, 0)], &[(1, 0), (2, 1), (0, 2)]);
        assert!(search(&data, &reversed, &Never).unwrap().is_found());
        // An extra arc 0 -> 3 gives vertex 0 the out-degree of the transitive
        // triangle's source, but the cycle still has no shortcut.
        let data = graph(
            &[(0, 0), (1, 0), (2, 0), (3, 0)],
            &[(0, 1), (1, 2), (2, 0), (0, 3)],
        );
        let transitive = graph(&[(0, 0), (1, 0), (2, 0)], &[(0, 1), (1, 2), (0, 2)]);
        assert_eq!(
            search(&data, &transitive, &Never),
            Ok(SearchOutcome::Exhausted)
        );
    }

    #[test]
    fn test_long_path_on_small_stack() {
        let n: VId = 3000;
        let vertices: Vec<(VId, VLabel)> = (0..n).map(|v| (v, v)).collect();
        let arcs: Vec<(VId, VId)> = (1..n).map(|v| (v - 1, v)).collect();
        let outcome = std::thread::Builder::new()
            .stack_size(128 * 1024)
            .spawn(move || {
                let path = graph(&vertices, &arcs);
                search(&path, &path, &Never)
            })
            .unwrap()
            .join()
            .unwrap();
        assert_eq!(
            outcome,
            Ok(SearchOutcome::Found((0..n as usize).collect()))
        );
    }

    #[test]
    fn test_cancelled() {
        let data = undirected(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let query = undirected(2, &[(0, 1)]);
        let flag = CancelFlag::new();
        flag.cancel();
        assert_eq!(search(&data, &query, &flag), Err(Error::MatchingCancelled));
    }

    #[test]
    fn test_cancelled_mid_search() {
        // The triangle query explores the 4-cycle before giving up.
        let data = undirected(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let query = undirected(3, &[(0, 1), (1, 2), (2, 0)]);
        let polls = Cell::new(0);
        let interrupt = || {
            polls.set(polls.get() + 1);
            polls.get() > 3
        };
        assert_eq!(
            search(&data, &query, &interrupt),
            Err(Error::MatchingCancelled)
        );
    }
}
