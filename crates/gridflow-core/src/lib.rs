//! # gridflow-core: Flow Network Modeling Core
//!
//! Provides the fundamental data structures for capacitated flow networks used
//! in maximum-flow analysis.
//!
//! ## Design Philosophy
//!
//! Networks are modeled as **directed graphs** where:
//! - **Nodes**: junctions identified by a dense id and a human-readable name
//! - **Arcs**: directed edges carrying a non-negative capacity bound
//!
//! A network additionally designates one **source** and one **sink** node.
//! Flow may originate freely at the source and terminate freely at the sink;
//! every other node conserves flow.
//!
//! This graph-based approach enables:
//! - Fast topological queries (reachability, degree, components)
//! - Type-safe element access with newtype IDs
//! - A single in-memory contract shared by importers, the model builder,
//!   and reporting
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gridflow_core::Network;
//!
//! // Create a network
//! let mut network = Network::new();
//!
//! // Add nodes
//! let a = network.add_node("A");
//! let b = network.add_node("B");
//! let c = network.add_node("C");
//!
//! // Add capacitated arcs
//! network.add_arc(a, b, 5.0).unwrap();
//! network.add_arc(b, c, 3.0).unwrap();
//! network.add_arc(a, c, 2.0).unwrap();
//!
//! // Designate terminals
//! network.set_source(a).unwrap();
//! network.set_sink(c).unwrap();
//!
//! assert!(network.validate().is_ok());
//! ```
//!
//! ## Core Data Structures
//!
//! - [`Network`] - The main network container (petgraph `DiGraph<Node, Arc>`)
//! - [`Node`] - A named junction in the network
//! - [`Arc`] - A directed, capacitated edge
//! - Type-safe IDs: [`NodeId`], [`ArcId`]
//!
//! ## ID System
//!
//! Node and arc ids are newtype wrappers around `usize`, assigned densely in
//! insertion order. The graph never removes elements, so a `NodeId` doubles
//! as the node's positional index. IDs enable:
//! - Type safety: arc ids cannot be confused with node ids
//! - Stable, reproducible orderings for model construction
//! - Consistent cross-referencing between importers and solvers
//!
//! ## Modules
//!
//! - [`error`] - Unified error types for the gridflow crates
//! - [`graph_utils`] - Topological analysis (stats, reachability, DOT export)
//!
//! ## Integration with gridflow-io
//!
//! The gridflow-io crate provides importers (DIMACS max-flow files, CSV arc
//! lists) that construct [`Network`] values from external data.

use petgraph::prelude::*;
use serde::{Deserialize, Serialize};

pub mod error;
pub mod graph_utils;

pub use error::{GridError, GridResult};
pub use graph_utils::*;
pub use petgraph::graph::NodeIndex;

// Newtype wrappers for IDs for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArcId(usize);

impl NodeId {
    #[inline]
    pub fn new(value: usize) -> Self {
        NodeId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl ArcId {
    #[inline]
    pub fn new(value: usize) -> Self {
        ArcId(value)
    }
    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

/// A junction in the flow network. Nodes carry no data beyond identity;
/// the name exists for reporting and for name-based lookup in importers.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
}

impl Node {
    /// Returns a human-readable label for the node.
    pub fn label(&self) -> &str {
        &self.name
    }
}

/// A directed edge with a capacity bound.
#[derive(Debug, Clone)]
pub struct Arc {
    pub id: ArcId,
    pub from: NodeId,
    pub to: NodeId,
    /// Upper bound on flow along this arc (non-negative, finite)
    pub capacity: f64,
}

impl Arc {
    /// The (from, to) pair identifying this arc. Arc tuples are unique
    /// within a network and define the canonical ordering used by the
    /// model builder.
    pub fn tuple(&self) -> (NodeId, NodeId) {
        (self.from, self.to)
    }
}

/// The core flow network graph
#[derive(Debug, Default)]
pub struct Network {
    pub graph: DiGraph<Node, Arc>,
    source: Option<NodeId>,
    sink: Option<NodeId>,
}

impl Network {
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            source: None,
            sink: None,
        }
    }

    /// Add a node with the given name, returning its id.
    ///
    /// Node ids are dense insertion indices; the graph never removes nodes.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.graph.node_count());
        self.graph.add_node(Node {
            id,
            name: name.into(),
        });
        id
    }

    /// Add a directed arc with the given capacity, returning its id.
    ///
    /// Rejects unknown endpoints, self-loops, duplicate (from, to) pairs,
    /// and negative or non-finite capacities. These are fatal input errors:
    /// the network invariants hold by construction when arcs enter through
    /// this method.
    pub fn add_arc(&mut self, from: NodeId, to: NodeId, capacity: f64) -> GridResult<ArcId> {
        let from_idx = self.node_index(from).ok_or_else(|| {
            GridError::Network(format!("arc references unknown node id {}", from.value()))
        })?;
        let to_idx = self.node_index(to).ok_or_else(|| {
            GridError::Network(format!("arc references unknown node id {}", to.value()))
        })?;
        if from == to {
            return Err(GridError::Network(format!(
                "self-loop arc at {}",
                self.graph[from_idx].name
            )));
        }
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(GridError::Validation(format!(
                "arc {} -> {} has invalid capacity {}",
                self.graph[from_idx].name, self.graph[to_idx].name, capacity
            )));
        }
        if self.graph.find_edge(from_idx, to_idx).is_some() {
            return Err(GridError::Network(format!(
                "duplicate arc {} -> {}",
                self.graph[from_idx].name, self.graph[to_idx].name
            )));
        }
        let id = ArcId(self.graph.edge_count());
        self.graph.add_edge(
            from_idx,
            to_idx,
            Arc {
                id,
                from,
                to,
                capacity,
            },
        );
        Ok(id)
    }

    /// Designate the source node.
    pub fn set_source(&mut self, id: NodeId) -> GridResult<()> {
        if self.node_index(id).is_none() {
            return Err(GridError::Network(format!(
                "source id {} is not in the network",
                id.value()
            )));
        }
        self.source = Some(id);
        Ok(())
    }

    /// Designate the sink node.
    pub fn set_sink(&mut self, id: NodeId) -> GridResult<()> {
        if self.node_index(id).is_none() {
            return Err(GridError::Network(format!(
                "sink id {} is not in the network",
                id.value()
            )));
        }
        self.sink = Some(id);
        Ok(())
    }

    pub fn source(&self) -> Option<NodeId> {
        self.source
    }

    pub fn sink(&self) -> Option<NodeId> {
        self.sink
    }

    /// Translate a node id into its graph index, if the id is in range.
    pub fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        (id.value() < self.graph.node_count()).then(|| NodeIndex::new(id.value()))
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.node_index(id).map(|idx| &self.graph[idx])
    }

    /// Look up a node's name by id.
    pub fn node_name(&self, id: NodeId) -> Option<&str> {
        self.node(id).map(|n| n.name.as_str())
    }

    /// Find a node id by name (first match in insertion order).
    pub fn node_by_name(&self, name: &str) -> Option<NodeId> {
        self.graph
            .node_weights()
            .find(|n| n.name == name)
            .map(|n| n.id)
    }

    /// Get all nodes in insertion order.
    pub fn nodes(&self) -> Vec<&Node> {
        self.graph.node_weights().collect()
    }

    /// Get all arcs in insertion order.
    pub fn arcs(&self) -> Vec<&Arc> {
        self.graph.edge_weights().collect()
    }

    /// Look up an arc by id.
    pub fn arc(&self, id: ArcId) -> Option<&Arc> {
        (id.value() < self.graph.edge_count())
            .then(|| self.graph.edge_weight(EdgeIndex::new(id.value())))
            .flatten()
    }

    /// Find the arc from `from` to `to`, if present.
    pub fn arc_between(&self, from: NodeId, to: NodeId) -> Option<&Arc> {
        let from_idx = self.node_index(from)?;
        let to_idx = self.node_index(to)?;
        self.graph
            .find_edge(from_idx, to_idx)
            .and_then(|e| self.graph.edge_weight(e))
    }

    /// Arcs terminating at the given node.
    pub fn arcs_into(&self, id: NodeId) -> Vec<&Arc> {
        match self.node_index(id) {
            Some(idx) => self
                .graph
                .edges_directed(idx, Incoming)
                .map(|e| e.weight())
                .collect(),
            None => Vec::new(),
        }
    }

    /// Arcs originating at the given node.
    pub fn arcs_out_of(&self, id: NodeId) -> Vec<&Arc> {
        match self.node_index(id) {
            Some(idx) => self
                .graph
                .edges_directed(idx, Outgoing)
                .map(|e| e.weight())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn arc_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Total capacity over all arcs.
    pub fn total_capacity(&self) -> f64 {
        self.graph.edge_weights().map(|a| a.capacity).sum()
    }

    /// Compute basic statistics about the network
    pub fn stats(&self) -> NetworkStats {
        let mut stats = NetworkStats::default();

        stats.num_nodes = self.graph.node_count();
        stats.num_arcs = self.graph.edge_count();
        for arc in self.graph.edge_weights() {
            stats.total_capacity += arc.capacity;
            if arc.capacity > stats.max_capacity {
                stats.max_capacity = arc.capacity;
            }
            if arc.capacity == 0.0 {
                stats.num_zero_capacity_arcs += 1;
            }
        }
        stats.source_name = self
            .source
            .and_then(|id| self.node_name(id))
            .map(str::to_string);
        stats.sink_name = self
            .sink
            .and_then(|id| self.node_name(id))
            .map(str::to_string);
        stats
    }

    /// Validate network structure for problems that make max-flow model
    /// construction impossible.
    ///
    /// Returns all issues found rather than stopping at the first one.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut issues = Vec::new();

        if self.graph.node_count() == 0 {
            issues.push("network has no nodes".to_string());
            return Err(issues); // Can't check further
        }

        match self.source {
            None => issues.push("no source node designated".to_string()),
            Some(id) if self.node_index(id).is_none() => {
                issues.push(format!("source id {} is not in the network", id.value()))
            }
            Some(_) => {}
        }

        match self.sink {
            None => issues.push("no sink node designated".to_string()),
            Some(id) if self.node_index(id).is_none() => {
                issues.push(format!("sink id {} is not in the network", id.value()))
            }
            Some(_) => {}
        }

        if let (Some(s), Some(t)) = (self.source, self.sink) {
            if s == t {
                issues.push(format!(
                    "source and sink are the same node '{}'",
                    self.node_name(s).unwrap_or("?")
                ));
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

/// Statistics about a network's size and capacity
#[derive(Debug, Clone, Default)]
pub struct NetworkStats {
    pub num_nodes: usize,
    pub num_arcs: usize,
    pub num_zero_capacity_arcs: usize,
    pub total_capacity: f64,
    pub max_capacity: f64,
    pub source_name: Option<String>,
    pub sink_name: Option<String>,
}

impl std::fmt::Display for NetworkStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} nodes, {} arcs (total capacity {:.1}, max {:.1})",
            self.num_nodes, self.num_arcs, self.total_capacity, self.max_capacity
        )?;
        if let (Some(s), Some(t)) = (&self.source_name, &self.sink_name) {
            write!(f, ", source '{}', sink '{}'", s, t)?;
        }
        Ok(())
    }
}
