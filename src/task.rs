use crate::{
    config::MatchConfig,
    data::{EdgeSource, Graph, GraphBuilder, VertexSource},
    error::{Error, Result},
    executor::{find_embedding, Interrupt, Provenance},
    planner::{Candidates, MatchingTree},
};
use itertools::Itertools;
use log::{debug, info};
pub use crate::executor::SearchOutcome;
use std::{
    fmt,
    time::{Duration, Instant},
};

/// Returns `true` if `query` occurs as a subgraph of `data`.
///
/// A query vertex without candidates ends the test with `false` before any
/// search takes place.
pub fn subgraph_exists<I: Interrupt + ?Sized>(
    data: &Graph,
    query: &Graph,
    config: &MatchConfig,
    interrupt: &I,
) -> Result<bool> {
    find_subgraph(data, query, config, interrupt).map(|outcome| outcome.is_found())
}

/// Like [`subgraph_exists`], but returns the embedding found.
pub fn find_subgraph<I: Interrupt + ?Sized>(
    data: &Graph,
    query: &Graph,
    config: &MatchConfig,
    interrupt: &I,
) -> Result<SearchOutcome> {
    match search(data, query, config, interrupt) {
        Err(Error::EmptyCandidateSet(u)) => {
            debug!("u{} has no candidates", u);
            Ok(SearchOutcome::Exhausted)
        }
        outcome => outcome,
    }
}

fn search<I: Interrupt + ?Sized>(
    data: &Graph,
    query: &Graph,
    config: &MatchConfig,
    interrupt: &I,
) -> Result<SearchOutcome> {
    if query.num_vertices() == 0 {
        return Ok(SearchOutcome::Found(vec![]));
    }
    let mut candidates = Candidates::generate(data, query, config);
    if let Some(u) = candidates.first_empty() {
        return Err(Error::EmptyCandidateSet(u));
    }
    let tree = MatchingTree::plan(query, &candidates)?;
    let provenance = Provenance::refine(data, query, &tree, &mut candidates)?;
    find_embedding(data, query, &tree, &candidates, &provenance, interrupt)
}

/// What the pipeline does with a query, short of searching.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    candidates: Vec<usize>,
    order: Vec<usize>,
    refined: Result<Vec<usize>>,
}

impl Plan {
    pub fn new(data: &Graph, query: &Graph, config: &MatchConfig) -> Result<Self> {
        if query.num_vertices() == 0 {
            return Ok(Self {
                candidates: vec![],
                order: vec![],
                refined: Ok(vec![]),
            });
        }
        let mut candidates = Candidates::generate(data, query, config);
        let sizes = candidates.sizes();
        let tree = MatchingTree::plan(query, &candidates)?;
        let refined = match Provenance::refine(data, query, &tree, &mut candidates) {
            Ok(_) => Ok(candidates.sizes()),
            Err(e @ Error::EmptyCandidateSet(_)) => Err(e),
            Err(e) => return Err(e),
        };
        Ok(Self {
            candidates: sizes,
            order: tree.order().to_vec(),
            refined,
        })
    }

    pub fn candidates(&self) -> &[usize] {
        &self.candidates
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// The refined candidate sizes, or the error that stopped the refinement.
    pub fn refined(&self) -> std::result::Result<&[usize], &Error> {
        self.refined.as_ref().map(Vec::as_slice)
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "candidates: [{}]", self.candidates.iter().join(", "))?;
        writeln!(
            f,
            "order: [{}]",
            self.order.iter().map(|u| format!("u{}", u)).join(", ")
        )?;
        match &self.refined {
            Ok(sizes) => write!(f, "refined: [{}]", sizes.iter().join(", ")),
            Err(e) => write!(f, "refined: {}", e),
        }
    }
}

/// The result table handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSet {
    col_names: Vec<String>,
    rows: Vec<Vec<bool>>,
}

impl DataSet {
    pub fn new(col_names: Vec<String>, rows: Vec<Vec<bool>>) -> Self {
        Self { col_names, rows }
    }

    pub fn col_names(&self) -> &[String] {
        &self.col_names
    }

    pub fn rows(&self) -> &[Vec<bool>] {
        &self.rows
    }
}

impl fmt::Display for DataSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.col_names.iter().join("\t"))?;
        for row in &self.rows {
            write!(f, "\n{}", row.iter().join("\t"))?;
        }
        Ok(())
    }
}

/// Builds both graphs from their sources and runs the test.
pub struct IsomorTask<'a> {
    data_vertices: &'a dyn VertexSource,
    data_edges: &'a dyn EdgeSource,
    query_vertices: &'a dyn VertexSource,
    query_edges: &'a dyn EdgeSource,
    col_names: Vec<String>,
    config: MatchConfig,
    exec_time: Option<Duration>,
}

impl<'a> IsomorTask<'a> {
    pub fn new(
        data_vertices: &'a dyn VertexSource,
        data_edges: &'a dyn EdgeSource,
        query_vertices: &'a dyn VertexSource,
        query_edges: &'a dyn EdgeSource,
    ) -> Self {
        Self {
            data_vertices,
            data_edges,
            query_vertices,
            query_edges,
            col_names: vec![String::from("isomor")],
            config: MatchConfig::default(),
            exec_time: None,
        }
    }

    pub fn col_names(mut self, col_names: Vec<String>) -> Self {
        self.col_names = col_names;
        self
    }

    pub fn config(mut self, config: MatchConfig) -> Self {
        self.config = config;
        self
    }

    /// The duration of the last successful [`execute`](Self::execute).
    pub fn exec_time(&self) -> Option<Duration> {
        self.exec_time
    }

    /// Returns a single row holding the result once per column.
    pub fn execute<I: Interrupt + ?Sized>(&mut self, interrupt: &I) -> Result<DataSet> {
        let start_time = Instant::now();
        let data = GraphBuilder::build(self.data_vertices, self.data_edges)?;
        let query = GraphBuilder::build(self.query_vertices, self.query_edges)?;
        info!("data graph: {}", data.info());
        info!("query graph: {}", query.info());
        let found = subgraph_exists(&data, &query, &self.config, interrupt)?;
        let exec_time = start_time.elapsed();
        info!("result: {}, exec_time: {}", found, exec_time.as_millis());
        self.exec_time = Some(exec_time);
        Ok(DataSet::new(
            self.col_names.clone(),
            vec![vec![found; self.col_names.len()]],
        ))
    }
}
