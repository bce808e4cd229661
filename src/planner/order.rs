use super::Candidates;
use crate::{
    data::Graph,
    error::{Error, Result},
};
use itertools::Itertools;
use log::debug;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    parent: Option<usize>,
    children: Vec<usize>,
}

impl TreeNode {
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    pub fn children(&self) -> &[usize] {
        &self.children
    }
}

/// The BFS spanning tree of the query graph which drives the search.
///
/// Nodes are indexed by query vertex id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchingTree {
    root: usize,
    nodes: Vec<TreeNode>,
    order: Vec<usize>,
}

impl MatchingTree {
    /// Roots the tree at the query vertex with the fewest candidates (smallest id
    /// first) and grows it breadth-first, ignoring arc directions.
    pub fn plan(query: &Graph, candidates: &Candidates) -> Result<Self> {
        let root = query
            .vertices()
            .min_by_key(|&u| (candidates.len(u), u))
            .ok_or_else(|| Error::InvalidGraphInput(String::from("empty query graph")))?;
        let adjacency = undirected_adjacency(query);
        let mut nodes = vec![
            TreeNode {
                parent: None,
                children: vec![],
            };
            query.num_vertices()
        ];
        let mut visited = vec![false; query.num_vertices()];
        let mut order = Vec::with_capacity(query.num_vertices());
        let mut queue = VecDeque::new();
        visited[root] = true;
        queue.push_back(root);
        while let Some(u) = queue.pop_front() {
            order.push(u);
            for &n in &adjacency[u] {
                if !visited[n] {
                    visited[n] = true;
                    nodes[n].parent = Some(u);
                    nodes[u].children.push(n);
                    queue.push_back(n);
                }
            }
        }
        if order.len() < query.num_vertices() {
            return Err(Error::DisconnectedQueryGraph {
                reached: order.len(),
                total: query.num_vertices(),
            });
        }
        debug!("matching order: [{}]", order.iter().join(", "));
        Ok(Self { root, nodes, order })
    }

    pub fn root(&self) -> usize {
        self.root
    }

    /// The BFS discovery order, starting with the root.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn node(&self, u: usize) -> &TreeNode {
        &self.nodes[u]
    }

    pub fn parent(&self, u: usize) -> Option<usize> {
        self.nodes[u].parent
    }

    pub fn children(&self, u: usize) -> &[usize] {
        &self.nodes[u].children
    }

    /// Tree edges `(parent, child)` in BFS order of the children.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.order
            .iter()
            .filter_map(move |&c| self.nodes[c].parent.map(|p| (p, c)))
    }
}

/// Returns the sorted, deduplicated neighbors of each vertex regardless of
/// arc direction. Self-loops are dropped.
pub(crate) fn undirected_adjacency(graph: &Graph) -> Vec<Vec<usize>> {
    let mut adjacency = vec![vec![]; graph.num_vertices()];
    for (src, dst) in graph.arcs() {
        if src != dst {
            adjacency[src].push(dst);
            adjacency[dst].push(src);
        }
    }
    for neighbors in &mut adjacency {
        neighbors.sort_unstable();
        neighbors.dedup();
    }
    adjacency
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::MatchConfig,
        data::GraphBuilder,
        types::{VId, VLabel},
    };

    fn graph(vertices: &[(VId, VLabel)], arcs: &[(VId, VId)]) -> Graph {
        GraphBuilder::build(vertices, arcs).unwrap()
    }

    fn plan(data: &Graph, query: &Graph) -> Result<MatchingTree> {
        MatchingTree::plan(
            query,
            &Candidates::generate(data, query, &MatchConfig::default()),
        )
    }

    #[test]
    fn test_root_has_fewest_candidates() {
        // Only data vertex 3 carries label 2.
        let data = graph(
            &[(0, 1), (1, 1), (2, 1), (3, 2)],
            &[(0, 1), (1, 2), (2, 3), (3, 0)],
        );
        let query = graph(&[(0, 1), (1, 1), (2, 2)], &[(0, 1), (1, 2)]);
        let tree = plan(&data, &query).unwrap();
        assert_eq!(tree.root(), 2);
        assert_eq!(tree.order(), [2, 1, 0]);
        assert_eq!(tree.parent(2), None);
        assert_eq!(tree.parent(1), Some(2));
        assert_eq!(tree.parent(0), Some(1));
        assert_eq!(tree.edges().collect::<Vec<_>>(), [(2, 1), (1, 0)]);
    }

    #[test]
    fn test_ties_break_on_smallest_id() {
        let data = graph(
            &[(0, 0), (1, 0), (2, 0), (3, 0)],
            &[(0, 1), (1, 0), (1, 2), (2, 1), (2, 3), (3, 2), (3, 0), (0, 3)],
        );
        let query = graph(
            &[(0, 0), (1, 0), (2, 0)],
            &[(1, 0), (0, 1), (1, 2), (2, 1)],
        );
        let tree = plan(&data, &query).unwrap();
        assert_eq!(tree.root(), 0);
        assert_eq!(tree.order(), [0, 1, 2]);
        assert_eq!(tree.children(0), [1]);
        assert_eq!(tree.node(1).children(), [2]);
    }

    #[test]
    fn test_star_children_ascending() {
        let data = graph(&[(0, 0)], &[]);
        let query = graph(
            &[(0, 5), (1, 5), (2, 5), (3, 0)],
            &[(3, 2), (3, 0), (1, 3)],
        );
        let tree = plan(&data, &query).unwrap();
        assert_eq!(tree.root(), 0);
        assert_eq!(tree.order(), [0, 3, 1, 2]);
        assert_eq!(tree.children(3), [1, 2]);
    }

    #[test]
    fn test_disconnected() {
        let data = graph(&[(0, 0), (1, 0)], &[(0, 1)]);
        let query = graph(&[(0, 0), (1, 0), (2, 0)], &[(1, 2)]);
        assert_eq!(
            plan(&data, &query),
            Err(Error::DisconnectedQueryGraph {
                reached: 2,
                total: 3
            })
        );
    }

    #[test]
    fn test_undirected_adjacency() {
        let g = graph(&[(0, 0), (1, 0), (2, 0)], &[(0, 1), (1, 0), (2, 2), (2, 0)]);
        assert_eq!(undirected_adjacency(&g), [vec![1, 2], vec![0], vec![0]]);
    }
}
