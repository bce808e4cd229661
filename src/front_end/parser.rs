use super::{
    error::{Error, Result},
    Pattern,
};
use crate::types::{VId, VLabel};
use itertools::Itertools;
use pest::{
    error::ErrorVariant,
    iterators::{Pair, Pairs},
    Parser,
};
use pest_derive::Parser;
use std::collections::HashMap;

#[derive(Parser)]
#[grammar = "front_end/grammar.pest"]
struct PatternParser;

/// Parses a pattern; names are assigned ids in declaration order.
pub fn parse(input: &str) -> Result<Pattern> {
    let mut ids = HashMap::new();
    let mut names = vec![];
    let mut vertices = vec![];
    let mut arcs = vec![];
    for pair in PatternParser::parse(Rule::pattern, input)?.flat_map(Pair::into_inner) {
        match pair.as_rule() {
            Rule::vertices_stat => {
                for (name, label) in pair.into_inner().tuples() {
                    let vid = names.len() as VId;
                    if ids.insert(name.as_str(), vid).is_some() {
                        return Err(Error::DuplicateVertex(name.as_str().to_owned()));
                    }
                    names.push(name.as_str().to_owned());
                    vertices.push((vid, parse_label(label)?));
                }
            }
            Rule::edges_stat => {
                for (src, dst) in parse_pairs(&ids, pair.into_inner())? {
                    arcs.push((src, dst));
                    if src != dst {
                        arcs.push((dst, src));
                    }
                }
            }
            Rule::arcs_stat => arcs.extend(parse_pairs(&ids, pair.into_inner())?),
            Rule::EOI => {}
            _ => unreachable!(),
        }
    }
    Ok(Pattern::new(names, vertices, arcs))
}

fn parse_label(pair: Pair<Rule>) -> Result<VLabel> {
    pair.as_str().parse().map_err(|_| {
        Error::ParseError(pest::error::Error::new_from_span(
            ErrorVariant::CustomError {
                message: String::from("label out of range"),
            },
            pair.as_span(),
        ))
    })
}

fn parse_pairs(ids: &HashMap<&str, VId>, pairs: Pairs<Rule>) -> Result<Vec<(VId, VId)>> {
    let lookup = |pair: Pair<Rule>| {
        ids.get(pair.as_str())
            .copied()
            .ok_or_else(|| Error::UnknownVertex(pair.as_str().to_owned()))
    };
    pairs
        .tuples()
        .map(|(src, dst)| -> Result<(VId, VId)> { Ok((lookup(src)?, lookup(dst)?)) })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::GraphBuilder;

    #[test]
    fn test_parse() {
        let pattern = parse(
            "(match (vertices (a 1) (b 1) (c 2))
                    (edges (a b) (b c))
                    (arcs (c a)))",
        )
        .unwrap();
        assert_eq!(pattern.names(), ["a", "b", "c"]);
        assert_eq!(pattern.vertices(), [(0, 1), (1, 1), (2, 2)]);
        assert_eq!(pattern.arcs(), [(0, 1), (1, 0), (1, 2), (2, 1), (2, 0)]);
        assert_eq!(pattern.name(2), Some("c"));
        assert_eq!(pattern.name(3), None);
    }

    #[test]
    fn test_parse_comments_and_negative_labels() {
        let pattern = parse(
            "; a single loop
             (match (vertices (x_1 -3)) (arcs (x_1 x_1)) (edges (x_1 x_1)))",
        )
        .unwrap();
        assert_eq!(pattern.vertices(), [(0, -3)]);
        assert_eq!(pattern.arcs(), [(0, 0), (0, 0)]);
    }

    #[test]
    fn test_parse_empty() {
        let pattern = parse("(match (vertices))").unwrap();
        assert!(pattern.vertices().is_empty());
        assert!(pattern.arcs().is_empty());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(parse("(match)"), Err(Error::ParseError(_))));
        assert!(matches!(
            parse("(match (vertices (a 1)) (edges (a)))"),
            Err(Error::ParseError(_))
        ));
        assert!(matches!(
            parse("(match (vertices (a 99999999999999999999)))"),
            Err(Error::ParseError(_))
        ));
        assert_eq!(
            parse("(match (vertices (a 1) (a 2)))"),
            Err(Error::DuplicateVertex(String::from("a")))
        );
        assert_eq!(
            parse("(match (vertices (a 1)) (arcs (a b)))"),
            Err(Error::UnknownVertex(String::from("b")))
        );
    }

    #[test]
    fn test_pattern_as_graph() {
        let pattern = parse("(match (vertices (a 7) (b 8)) (edges (a b)))").unwrap();
        let graph = GraphBuilder::build(&pattern, &pattern).unwrap();
        assert_eq!(graph.num_vertices(), 2);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.label(1), 8);
        assert!(graph.has_arc(0, 1) && graph.has_arc(1, 0));
    }
}
