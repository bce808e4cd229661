use crate::{
    data::Graph,
    error::{Error, Result},
    planner::{Candidates, MatchingTree},
};
use itertools::{EitherOrBoth, Itertools};
use log::debug;
use std::collections::{BTreeMap, VecDeque};

/// Which arcs the query graph puts between a tree parent `p` and its child `c`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Direction {
    /// `p -> c`
    down: bool,
    /// `c -> p`
    up: bool,
}

impl Direction {
    fn new(query: &Graph, p: usize, c: usize) -> Self {
        Self {
            down: query.has_arc(p, c),
            up: query.has_arc(c, p),
        }
    }

    fn children_of(self, data: &Graph, v_p: usize, child_cands: &[usize]) -> Vec<usize> {
        if self.down {
            data.neighbors(v_p)
                .iter()
                .merge_join_by(child_cands, |a, b| a.cmp(b))
                .filter_map(|x| match x {
                    EitherOrBoth::Both(&v_c, _) => Some(v_c),
                    _ => None,
                })
                .filter(|&v_c| !self.up || data.has_arc(v_c, v_p))
                .collect()
        } else {
            child_cands
                .iter()
                .copied()
                .filter(|&v_c| data.has_arc(v_c, v_p))
                .collect()
        }
    }
}

/// The provenance of one tree edge `(p, c)`.
///
/// `forward[v_p]` lists the candidates of `c` connected to `v_p`, and
/// `backward[v_c]` the candidates of `p` connected to `v_c`. Only non-empty
/// entries are kept, all lists are sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeProvenance {
    forward: BTreeMap<usize, Vec<usize>>,
    backward: BTreeMap<usize, Vec<usize>>,
}

impl EdgeProvenance {
    fn compute(data: &Graph, dir: Direction, parent_cands: &[usize], child_cands: &[usize]) -> Self {
        let mut provenance = Self::default();
        for &v_p in parent_cands {
            let children = dir.children_of(data, v_p, child_cands);
            if children.is_empty() {
                continue;
            }
            for &v_c in &children {
                provenance.backward.entry(v_c).or_default().push(v_p);
            }
            provenance.forward.insert(v_p, children);
        }
        provenance
    }

    pub fn forward(&self, v_p: usize) -> &[usize] {
        self.forward.get(&v_p).map_or(&[][..], Vec::as_slice)
    }

    pub fn backward(&self, v_c: usize) -> &[usize] {
        self.backward.get(&v_c).map_or(&[][..], Vec::as_slice)
    }
}

/// The provenance of every tree edge, indexed by the child query vertex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provenance {
    edges: Vec<Option<EdgeProvenance>>,
}

impl Provenance {
    /// Computes the provenance of the tree edges and removes from `candidates`
    /// every vertex left without support, until nothing changes.
    ///
    /// Fails with [`Error::EmptyCandidateSet`] as soon as a query vertex runs
    /// out of candidates.
    pub fn refine(
        data: &Graph,
        query: &Graph,
        tree: &MatchingTree,
        candidates: &mut Candidates,
    ) -> Result<Self> {
        for u in query.vertices().filter(|&u| query.has_arc(u, u)) {
            candidates.retain(u, |v| data.has_arc(v, v));
        }
        if let Some(u) = candidates.first_empty() {
            return Err(Error::EmptyCandidateSet(u));
        }
        let mut edges = vec![None; query.num_vertices()];
        let mut queued = vec![false; query.num_vertices()];
        let mut queue: VecDeque<(usize, usize)> = tree.edges().collect();
        for &(_, c) in &queue {
            queued[c] = true;
        }
        let mut num_rounds = 0;
        while let Some((p, c)) = queue.pop_front() {
            queued[c] = false;
            num_rounds += 1;
            let edge = EdgeProvenance::compute(
                data,
                Direction::new(query, p, c),
                candidates.get(p),
                candidates.get(c),
            );
            let removed_p = candidates.retain(p, |v| edge.forward.contains_key(&v));
            let removed_c = candidates.retain(c, |v| edge.backward.contains_key(&v));
            edges[c] = Some(edge);
            for &(u, removed) in &[(p, removed_p), (c, removed_c)] {
                if removed == 0 {
                    continue;
                }
                if candidates.len(u) == 0 {
                    return Err(Error::EmptyCandidateSet(u));
                }
                let touching = tree
                    .parent(u)
                    .map(|pu| (pu, u))
                    .into_iter()
                    .chain(tree.children(u).iter().map(|&cu| (u, cu)));
                for (tp, tc) in touching {
                    if tc != c && !queued[tc] {
                        queued[tc] = true;
                        queue.push_back((tp, tc));
                    }
                }
            }
        }
        debug!(
            "refined candidates in {} rounds: {:?}",
            num_rounds,
            candidates.sizes()
        );
        Ok(Self { edges })
    }

    /// The provenance of the tree edge ending at `child`, `None` for the root.
    pub fn edge(&self, child: usize) -> Option<&EdgeProvenance> {
        self.edges[child].as_ref()
    }

    /// The candidates of `child` supported by its tree parent mapped to `v_p`.
    pub fn forward(&self, child: usize, v_p: usize) -> &[usize] {
        self.edge(child).map_or(&[][..], |edge| edge.forward(v_p))
    }
}
