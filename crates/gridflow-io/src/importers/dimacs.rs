//! DIMACS maximum-flow file parser
//!
//! Parses the classic DIMACS `max` interchange format:
//!
//! ```text
//! c comment lines
//! p max <nodes> <arcs>
//! n <id> s          (exactly one source descriptor)
//! n <id> t          (exactly one sink descriptor)
//! a <from> <to> <capacity>
//! ```
//!
//! Node ids are 1-based and dense per the problem line; nodes are named
//! after their ids.

use anyhow::{anyhow, bail, Context, Result};
use gridflow_core::{Network, NodeId};
use std::fs;
use std::path::Path;

/// Parse a DIMACS max-flow file
pub fn parse_dimacs_file(path: &Path) -> Result<Network> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading DIMACS file: {}", path.display()))?;
    parse_dimacs_string(&content)
}

/// Parse DIMACS max-flow content from a string
pub fn parse_dimacs_string(content: &str) -> Result<Network> {
    let mut network = Network::new();
    let mut node_count: Option<usize> = None;
    let mut declared_arcs: Option<usize> = None;
    let mut source: Option<NodeId> = None;
    let mut sink: Option<NodeId> = None;
    let mut arc_lines = 0usize;

    for (lineno, line) in content.lines().enumerate() {
        let lineno = lineno + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let mut fields = trimmed.split_whitespace();
        match fields.next() {
            Some("c") => continue,
            Some("p") => {
                if node_count.is_some() {
                    bail!("line {}: duplicate problem line", lineno);
                }
                let kind = fields
                    .next()
                    .ok_or_else(|| anyhow!("line {}: problem line missing type", lineno))?;
                if kind != "max" {
                    bail!("line {}: unsupported problem type '{}'", lineno, kind);
                }
                let nodes: usize = parse_field(fields.next(), "node count", lineno)?;
                let arcs: usize = parse_field(fields.next(), "arc count", lineno)?;
                for id in 1..=nodes {
                    network.add_node(id.to_string());
                }
                node_count = Some(nodes);
                declared_arcs = Some(arcs);
            }
            Some("n") => {
                let nodes = node_count
                    .ok_or_else(|| anyhow!("line {}: node descriptor before problem line", lineno))?;
                let id: usize = parse_field(fields.next(), "node id", lineno)?;
                if id == 0 || id > nodes {
                    bail!("line {}: node id {} out of range 1..={}", lineno, id, nodes);
                }
                let node = NodeId::new(id - 1);
                match fields.next() {
                    Some("s") => {
                        if source.is_some() {
                            bail!("line {}: duplicate source descriptor", lineno);
                        }
                        source = Some(node);
                    }
                    Some("t") => {
                        if sink.is_some() {
                            bail!("line {}: duplicate sink descriptor", lineno);
                        }
                        sink = Some(node);
                    }
                    other => bail!(
                        "line {}: expected 's' or 't' designator, got {:?}",
                        lineno,
                        other
                    ),
                }
            }
            Some("a") => {
                let nodes = node_count
                    .ok_or_else(|| anyhow!("line {}: arc descriptor before problem line", lineno))?;
                let from: usize = parse_field(fields.next(), "from node", lineno)?;
                let to: usize = parse_field(fields.next(), "to node", lineno)?;
                let capacity: f64 = parse_field(fields.next(), "capacity", lineno)?;
                if from == 0 || from > nodes || to == 0 || to > nodes {
                    bail!(
                        "line {}: arc {} -> {} references a node outside 1..={}",
                        lineno,
                        from,
                        to,
                        nodes
                    );
                }
                network
                    .add_arc(NodeId::new(from - 1), NodeId::new(to - 1), capacity)
                    .with_context(|| format!("line {}: invalid arc descriptor", lineno))?;
                arc_lines += 1;
            }
            Some(other) => bail!("line {}: unknown line type '{}'", lineno, other),
            None => unreachable!("empty lines were skipped"),
        }
    }

    if node_count.is_none() {
        bail!("problem line 'p max <nodes> <arcs>' not found");
    }
    if let Some(declared) = declared_arcs {
        if declared != arc_lines {
            bail!(
                "problem line declares {} arcs but {} were found",
                declared,
                arc_lines
            );
        }
    }
    let source = source.ok_or_else(|| anyhow!("no source descriptor ('n <id> s') found"))?;
    let sink = sink.ok_or_else(|| anyhow!("no sink descriptor ('n <id> t') found"))?;
    network
        .set_source(source)
        .map_err(|e| anyhow!("{}", e))?;
    network.set_sink(sink).map_err(|e| anyhow!("{}", e))?;

    Ok(network)
}

fn parse_field<T: std::str::FromStr>(field: Option<&str>, what: &str, lineno: usize) -> Result<T> {
    let raw = field.ok_or_else(|| anyhow!("line {}: missing {}", lineno, what))?;
    raw.parse()
        .map_err(|_| anyhow!("line {}: invalid {} '{}'", lineno, what, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_small_instance() {
        let content = r#"
c Three-node example
p max 3 3
n 1 s
n 3 t
a 1 2 5
a 2 3 3
a 1 3 2
"#;
        let network = parse_dimacs_string(content).expect("parse dimacs string");

        assert_eq!(network.node_count(), 3);
        assert_eq!(network.arc_count(), 3);
        assert_eq!(network.source(), network.node_by_name("1"));
        assert_eq!(network.sink(), network.node_by_name("3"));
        assert!(network.validate().is_ok());

        let arc = network
            .arc_between(NodeId::new(0), NodeId::new(1))
            .expect("arc 1 -> 2");
        assert_eq!(arc.capacity, 5.0);
    }

    #[test]
    fn test_fractional_capacities() {
        let content = "p max 2 1\nn 1 s\nn 2 t\na 1 2 0.75\n";
        let network = parse_dimacs_string(content).unwrap();
        assert_eq!(
            network
                .arc_between(NodeId::new(0), NodeId::new(1))
                .unwrap()
                .capacity,
            0.75
        );
    }

    #[test]
    fn test_missing_problem_line() {
        let result = parse_dimacs_string("n 1 s\n");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("before problem line"));
    }

    #[test]
    fn test_missing_terminals() {
        let err = parse_dimacs_string("p max 2 1\na 1 2 1\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("no source descriptor"));

        let err = parse_dimacs_string("p max 2 1\nn 1 s\na 1 2 1\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("no sink descriptor"));
    }

    #[test]
    fn test_duplicate_source_rejected() {
        let err = parse_dimacs_string("p max 3 0\nn 1 s\nn 2 s\nn 3 t\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("duplicate source"));
    }

    #[test]
    fn test_arc_out_of_range() {
        let err = parse_dimacs_string("p max 2 1\nn 1 s\nn 2 t\na 1 5 1\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("outside 1..=2"));
    }

    #[test]
    fn test_negative_capacity_rejected() {
        let result = parse_dimacs_string("p max 2 1\nn 1 s\nn 2 t\na 1 2 -4\n");
        assert!(result.is_err());
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("line 4"));
        assert!(err.contains("invalid capacity"));
    }

    #[test]
    fn test_self_loop_arc_rejected() {
        let result = parse_dimacs_string("p max 3 2\nn 1 s\nn 3 t\na 1 3 1\na 2 2 5\n");
        assert!(result.is_err());
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("line 5"));
        assert!(err.contains("self-loop"));
    }

    #[test]
    fn test_arc_count_mismatch() {
        let err = parse_dimacs_string("p max 2 2\nn 1 s\nn 2 t\na 1 2 1\n")
            .unwrap_err()
            .to_string();
        assert!(err.contains("declares 2 arcs but 1"));
    }

    #[test]
    fn test_unsupported_problem_type() {
        let err = parse_dimacs_string("p sp 2 1\n").unwrap_err().to_string();
        assert!(err.contains("unsupported problem type"));
    }
}
