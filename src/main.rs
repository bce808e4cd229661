use clap::{crate_version, load_yaml, App, ArgMatches};
use derive_more::Display;
use isomor::{
    config::{MatchConfig, DEFAULT_LABEL_PROPERTY},
    data::{EdgeSource, GraphBuilder, SqliteGraph, Undirected},
    executor::{Deadline, Interrupt, Never},
    front_end::parse,
    task::{DataSet, IsomorTask, Plan},
};
use log::{error, info};
use rayon::prelude::*;
use std::{error::Error, time::Duration};

#[derive(Debug, Display, PartialEq)]
enum Err {
    #[display(fmt = "{} of {} queries failed", _0, _1)]
    QueriesFailed(usize, usize),
}

impl std::error::Error for Err {}

fn match_config(matches: &ArgMatches) -> MatchConfig {
    MatchConfig::default()
        .label_property(
            matches
                .value_of("label-property")
                .unwrap_or(DEFAULT_LABEL_PROPERTY),
        )
        .degree_filter(!matches.is_present("no-degree-filter"))
}

fn open_data_graph(matches: &ArgMatches, config: &MatchConfig) -> isomor::error::Result<SqliteGraph> {
    SqliteGraph::open(
        matches.value_of("DATAGRAPH").unwrap(),
        &config.label_property,
    )
}

fn run_query(
    matches: &ArgMatches,
    config: &MatchConfig,
    query: &str,
) -> Result<DataSet, Box<dyn Error>> {
    let data = open_data_graph(matches, config)?;
    let pattern = parse(&std::fs::read_to_string(query)?)?;
    let undirected = Undirected::new(&data);
    let data_edges: &dyn EdgeSource = if matches.is_present("undirected") {
        &undirected
    } else {
        &data
    };
    let interrupt: Box<dyn Interrupt> = match matches.value_of("timeout-ms") {
        Some(ms) => Box::new(Deadline::after(Duration::from_millis(ms.parse()?))),
        None => Box::new(Never),
    };
    let mut task = IsomorTask::new(&data, data_edges, &pattern, &pattern)
        .col_names(vec![String::from(
            matches.value_of("column").unwrap_or("isomor"),
        )])
        .config(config.clone());
    let result = task.execute(interrupt.as_ref())?;
    if let Some(exec_time) = task.exec_time() {
        info!("{}: exec_time: {}", query, exec_time.as_millis());
    }
    Ok(result)
}

fn handle_match(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let config = match_config(matches);
    let queries: Vec<_> = matches.values_of("QUERY").unwrap().collect();
    let results: Vec<_> = queries
        .par_iter()
        .map(|query| run_query(matches, &config, query).map_err(|e| e.to_string()))
        .collect();
    let mut num_failed = 0;
    for (query, result) in queries.iter().zip(results) {
        match result {
            Ok(dataset) => println!("{}\n{}", query, dataset),
            Err(e) => {
                error!("{}: {}", query, e);
                num_failed += 1;
            }
        }
    }
    if num_failed > 0 {
        return Err(Box::new(Err::QueriesFailed(num_failed, queries.len())));
    }
    Ok(())
}

fn handle_plan(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let config = match_config(matches);
    let data = open_data_graph(matches, &config)?;
    let pattern = parse(&std::fs::read_to_string(
        matches.value_of("QUERY").unwrap(),
    )?)?;
    let data_graph = if matches.is_present("undirected") {
        GraphBuilder::build(&data, &Undirected::new(&data))?
    } else {
        GraphBuilder::build(&data, &data)?
    };
    let query_graph = GraphBuilder::build(&pattern, &pattern)?;
    println!("data: {}", data_graph.info());
    println!("query: {}", query_graph.info());
    println!("{}", Plan::new(&data_graph, &query_graph, &config)?);
    Ok(())
}

fn handle_displaydb(matches: &ArgMatches) -> Result<(), Box<dyn Error>> {
    let data = open_data_graph(matches, &match_config(matches))?;
    let graph = GraphBuilder::build(&data, &data)?;
    println!("{}", graph.info());
    print!("{}", graph.view());
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let yaml = load_yaml!("cli.yml");
    let matches = App::from_yaml(yaml)
        .version(crate_version!())
        .get_matches();
    if let Some(matches) = matches.subcommand_matches("match") {
        handle_match(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("plan") {
        handle_plan(matches)?;
    } else if let Some(matches) = matches.subcommand_matches("displaydb") {
        handle_displaydb(matches)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_args() {
        let yaml = load_yaml!("cli.yml");
        let matches = App::from_yaml(yaml)
            .get_matches_from_safe(vec![
                "isomor",
                "match",
                "data.sqlite3",
                "q1.pat",
                "q2.pat",
                "--timeout-ms",
                "50",
                "--label-property",
                "kind",
                "--no-degree-filter",
            ])
            .unwrap();
        let matches = matches.subcommand_matches("match").unwrap();
        assert_eq!(matches.value_of("DATAGRAPH"), Some("data.sqlite3"));
        assert_eq!(
            matches.values_of("QUERY").unwrap().collect::<Vec<_>>(),
            ["q1.pat", "q2.pat"]
        );
        assert_eq!(matches.value_of("timeout-ms"), Some("50"));
        assert!(!matches.is_present("undirected"));
        assert_eq!(
            match_config(matches),
            MatchConfig::default()
                .label_property("kind")
                .degree_filter(false)
        );
    }

    #[test]
    fn test_subcommand_required() {
        let yaml = load_yaml!("cli.yml");
        assert!(App::from_yaml(yaml)
            .get_matches_from_safe(vec!["isomor"])
            .is_err());
        let yaml = load_yaml!("cli.yml");
        let matches = App::from_yaml(yaml)
            .get_matches_from_safe(vec!["isomor", "displaydb", "data.sqlite3"])
            .unwrap();
        let matches = matches.subcommand_matches("displaydb").unwrap();
        assert_eq!(match_config(matches), MatchConfig::default());
    }
}
