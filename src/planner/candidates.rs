use crate::{config::MatchConfig, data::Graph};
use log::debug;

/// The candidate sets of the query vertices.
///
/// `candidates[u]` holds the data vertices that may be mapped to the query
/// vertex `u`, in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidates {
    sets: Vec<Vec<usize>>,
}

impl Candidates {
    /// Scans the data graph once per query vertex and keeps the vertices with
    /// the same label and at least the same out-degree.
    pub fn generate(data: &Graph, query: &Graph, config: &MatchConfig) -> Self {
        let sets: Vec<Vec<usize>> = query
            .vertices()
            .map(|u| {
                data.vertices()
                    .filter(|&v| {
                        data.label(v) == query.label(u)
                            && (!config.degree_filter || data.out_deg(v) >= query.out_deg(u))
                    })
                    .collect()
            })
            .collect();
        debug!(
            "candidates by {:?}{}: {:?}",
            config.label_property,
            if config.degree_filter { " and degree" } else { "" },
            sets.iter().map(Vec::len).collect::<Vec<_>>()
        );
        Self { sets }
    }

    pub fn num_query_vertices(&self) -> usize {
        self.sets.len()
    }

    pub fn get(&self, u: usize) -> &[usize] {
        &self.sets[u]
    }

    pub fn len(&self, u: usize) -> usize {
        self.sets[u].len()
    }

    pub fn contains(&self, u: usize, v: usize) -> bool {
        self.sets[u].binary_search(&v).is_ok()
    }

    /// Returns the first query vertex without candidates.
    pub fn first_empty(&self) -> Option<usize> {
        self.sets.iter().position(Vec::is_empty)
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.sets.iter().map(Vec::len).collect()
    }

    /// Keeps the candidates of `u` satisfying `f`, returns the number removed.
    pub(crate) fn retain<F: FnMut(usize) -> bool>(&mut self, u: usize, mut f: F) -> usize {
        let before = self.sets[u].len();
        self.sets[u].retain(|&v| f(v));
        before - self.sets[u].len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::GraphBuilder,
        types::{VId, VLabel},
    };

    fn graph(vertices: &[(VId, VLabel)], arcs: &[(VId, VId)]) -> Graph {
        GraphBuilder::build(vertices, arcs).unwrap()
    }

    fn create_data_graph() -> Graph {
        // 0(1) -> 1(2), 0(1) -> 2(2), 1(2) -> 2(2), 3(1) -> 1(2)
        graph(
            &[(0, 1), (1, 2), (2, 2), (3, 1)],
            &[(0, 1), (0, 2), (1, 2), (3, 1)],
        )
    }

    fn create_query_graph() -> Graph {
        // 0(1) -> 1(2), 0(1) -> 2(2)
        graph(&[(0, 1), (1, 2), (2, 2)], &[(0, 1), (0, 2)])
    }

    #[test]
    fn test_generate() {
        let c = Candidates::generate(
            &create_data_graph(),
            &create_query_graph(),
            &MatchConfig::default(),
        );
        assert_eq!(c.num_query_vertices(), 3);
        assert_eq!(c.get(0), [0]);
        assert_eq!(c.get(1), [1, 2]);
        assert_eq!(c.get(2), [1, 2]);
        assert!(c.contains(1, 2));
        assert!(!c.contains(0, 3));
        assert_eq!(c.first_empty(), None);
    }

    #[test]
    fn test_generate_without_degree_filter() {
        let c = Candidates::generate(
            &create_data_graph(),
            &create_query_graph(),
            &MatchConfig::default().degree_filter(false),
        );
        assert_eq!(c.get(0), [0, 3]);
        assert_eq!(c.sizes(), [2, 2, 2]);
    }

    #[test]
    fn test_first_empty() {
        let query = graph(&[(0, 1), (1, 3)], &[(0, 1)]);
        let c = Candidates::generate(&create_data_graph(), &query, &MatchConfig::default());
        assert_eq!(c.first_empty(), Some(1));
    }

    #[test]
    fn test_retain() {
        let mut c = Candidates::generate(
            &create_data_graph(),
            &create_query_graph(),
            &MatchConfig::default(),
        );
        assert_eq!(c.retain(1, |v| v != 2), 1);
        assert_eq!(c.get(1), [1]);
        assert_eq!(c.retain(1, |_| true), 0);
    }
}
