use crate::{Network, NodeId};
use anyhow::{anyhow, Result};
use petgraph::algo::connected_components;
use petgraph::visit::EdgeRef;
use std::collections::{HashSet, VecDeque};

/// Summary statistics produced by `check` (density/degree/component counts).
#[derive(Debug)]
pub struct GraphStats {
    pub node_count: usize,
    pub arc_count: usize,
    pub weakly_connected_components: usize,
    pub min_degree: usize,
    pub avg_degree: f64,
    pub max_degree: usize,
    pub density: f64,
}

/// Calculates graph-level statistics such as density, degree distribution,
/// and component counts. Degree counts both incoming and outgoing arcs;
/// density is arcs over ordered node pairs.
pub fn graph_stats(network: &Network) -> Result<GraphStats> {
    let node_count = network.graph.node_count();
    let arc_count = network.graph.edge_count();
    let mut degrees = Vec::with_capacity(node_count);
    for node in network.graph.node_indices() {
        let incoming = network
            .graph
            .neighbors_directed(node, petgraph::Incoming)
            .count();
        let outgoing = network
            .graph
            .neighbors_directed(node, petgraph::Outgoing)
            .count();
        degrees.push(incoming + outgoing);
    }
    let min_degree = *degrees.iter().min().unwrap_or(&0);
    let max_degree = *degrees.iter().max().unwrap_or(&0);
    let avg_degree = if node_count == 0 {
        0.0
    } else {
        degrees.iter().copied().sum::<usize>() as f64 / node_count as f64
    };
    let density = if node_count < 2 {
        0.0
    } else {
        arc_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
    };
    let weakly_connected_components = connected_components(&network.graph);
    Ok(GraphStats {
        node_count,
        arc_count,
        weakly_connected_components,
        min_degree,
        avg_degree,
        max_degree,
        density,
    })
}

/// Nodes reachable from the designated source along arcs with positive
/// capacity (breadth-first search). Zero-capacity arcs carry no flow, so
/// they do not extend reachability.
pub fn reachable_from_source(network: &Network) -> Result<HashSet<NodeId>> {
    let source = network
        .source()
        .ok_or_else(|| anyhow!("network has no designated source"))?;
    let start = network
        .node_index(source)
        .ok_or_else(|| anyhow!("source id {} is not in the network", source.value()))?;

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back(start);
    while let Some(node) = queue.pop_front() {
        if !visited.insert(network.graph[node].id) {
            continue;
        }
        for edge in network.graph.edges_directed(node, petgraph::Outgoing) {
            if edge.weight().capacity > 0.0 && !visited.contains(&network.graph[edge.target()].id)
            {
                queue.push_back(edge.target());
            }
        }
    }
    Ok(visited)
}

/// Whether any positive-capacity path leads from the source to the sink.
/// When this is false the maximum flow is zero by inspection.
pub fn sink_reachable(network: &Network) -> Result<bool> {
    let sink = network
        .sink()
        .ok_or_else(|| anyhow!("network has no designated sink"))?;
    Ok(reachable_from_source(network)?.contains(&sink))
}

/// Export the topology to a DOT string (Graphviz) so external tools can
/// visualize the layout. Terminals render as boxes, arcs carry capacity
/// labels.
pub fn export_graph(network: &Network, format: &str) -> Result<String> {
    match format.to_ascii_lowercase().as_str() {
        "graphviz" | "dot" => Ok(render_dot(network)),
        other => Err(anyhow!("unsupported graph export format '{other}'")),
    }
}

fn render_dot(network: &Network) -> String {
    let mut buffer = String::new();
    buffer.push_str("digraph flow_network {\n");
    buffer.push_str("  rankdir=LR;\n");
    for node in network.graph.node_indices() {
        let weight = &network.graph[node];
        let label = sanitize_label(weight.label());
        let is_terminal =
            Some(weight.id) == network.source() || Some(weight.id) == network.sink();
        if is_terminal {
            buffer.push_str(&format!(
                "  n{} [label=\"{}\", shape=box];\n",
                node.index(),
                label
            ));
        } else {
            buffer.push_str(&format!("  n{} [label=\"{}\"];\n", node.index(), label));
        }
    }
    for edge in network.graph.edge_references() {
        let source = edge.source().index();
        let target = edge.target().index();
        buffer.push_str(&format!(
            "  n{source} -> n{target} [label=\"{}\"];\n",
            edge.weight().capacity
        ));
    }
    buffer.push('}');
    buffer
}

fn sanitize_label(label: &str) -> String {
    label.replace('"', "\\\"")
}
