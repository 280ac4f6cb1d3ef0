//! CSV arc-list parser
//!
//! Parses `from,to,capacity` tables into a network. Node names are
//! interned in first-appearance order. The format carries no terminal
//! markers, so the caller names the source and sink.

use anyhow::{anyhow, Context, Result};
use gridflow_core::{Network, NodeId};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Deserialize, Debug)]
struct ArcRecord {
    from: String,
    to: String,
    capacity: f64,
}

/// Parse a CSV arc list file, designating `source` and `sink` by node name.
pub fn parse_arclist_file(path: &Path, source: &str, sink: &str) -> Result<Network> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading arc list file: {}", path.display()))?;
    parse_arclist_string(&content, source, sink)
}

/// Parse CSV arc list content from a string.
pub fn parse_arclist_string(content: &str, source: &str, sink: &str) -> Result<Network> {
    let mut network = Network::new();
    let mut ids: HashMap<String, NodeId> = HashMap::new();

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    for (row, record) in reader.deserialize().enumerate() {
        let record: ArcRecord =
            record.with_context(|| format!("parsing arc list row {}", row + 1))?;
        let from = intern(&mut network, &mut ids, &record.from);
        let to = intern(&mut network, &mut ids, &record.to);
        network
            .add_arc(from, to, record.capacity)
            .with_context(|| format!("arc list row {}", row + 1))?;
    }

    let source_id = *ids
        .get(source)
        .ok_or_else(|| anyhow!("source node '{}' does not appear in the arc list", source))?;
    let sink_id = *ids
        .get(sink)
        .ok_or_else(|| anyhow!("sink node '{}' does not appear in the arc list", sink))?;
    network.set_source(source_id).map_err(|e| anyhow!("{}", e))?;
    network.set_sink(sink_id).map_err(|e| anyhow!("{}", e))?;

    Ok(network)
}

fn intern(network: &mut Network, ids: &mut HashMap<String, NodeId>, name: &str) -> NodeId {
    if let Some(&id) = ids.get(name) {
        return id;
    }
    let id = network.add_node(name);
    ids.insert(name.to_string(), id);
    id
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_node_list() {
        let content = r#"from,to,capacity
A,B,5.0
B,C,3.0
A,C,2.0
"#;
        let network = parse_arclist_string(content, "A", "C").expect("parse arc list");

        assert_eq!(network.node_count(), 3);
        assert_eq!(network.arc_count(), 3);
        // Interned in first-appearance order
        assert_eq!(network.node_name(NodeId::new(0)), Some("A"));
        assert_eq!(network.node_name(NodeId::new(1)), Some("B"));
        assert_eq!(network.node_name(NodeId::new(2)), Some("C"));
        assert_eq!(network.source(), network.node_by_name("A"));
        assert_eq!(network.sink(), network.node_by_name("C"));
        assert!(network.validate().is_ok());
    }

    #[test]
    fn test_whitespace_trimmed() {
        let content = "from,to,capacity\n A , B , 4.5 \n";
        let network = parse_arclist_string(content, "A", "B").unwrap();
        let arc = network
            .arc_between(NodeId::new(0), NodeId::new(1))
            .unwrap();
        assert_eq!(arc.capacity, 4.5);
    }

    #[test]
    fn test_unknown_terminal_rejected() {
        let content = "from,to,capacity\nA,B,1.0\n";
        let err = parse_arclist_string(content, "A", "Z")
            .unwrap_err()
            .to_string();
        assert!(err.contains("sink node 'Z'"));
    }

    #[test]
    fn test_malformed_capacity_rejected() {
        let content = "from,to,capacity\nA,B,lots\n";
        let result = parse_arclist_string(content, "A", "B");
        assert!(result.is_err());
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("row 1"));
    }

    #[test]
    fn test_duplicate_arc_rejected() {
        let content = "from,to,capacity\nA,B,1.0\nA,B,2.0\n";
        let result = parse_arclist_string(content, "A", "B");
        assert!(result.is_err());
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("row 2"));
        assert!(err.contains("duplicate arc"));
    }

    #[test]
    fn test_self_loop_rejected() {
        let content = "from,to,capacity\nA,B,1.0\nM,M,5\n";
        let result = parse_arclist_string(content, "A", "B");
        assert!(result.is_err());
        let err = format!("{:#}", result.unwrap_err());
        assert!(err.contains("row 2"));
        assert!(err.contains("self-loop"));
    }
}
