//! Flow assignment data structures
//!
//! Defines the output from solving a max-flow model.

use gridflow_core::NodeId;
use serde::Serialize;
use std::time::Duration;

/// Flow carried by one arc, paired with the arc's identity and bound.
#[derive(Debug, Clone, Serialize)]
pub struct ArcFlow {
    pub from: NodeId,
    pub to: NodeId,
    /// From-node name, carried so reporting needs no network lookup
    pub from_name: String,
    /// To-node name
    pub to_name: String,
    pub capacity: f64,
    pub flow: f64,
}

impl ArcFlow {
    /// Fraction of capacity in use; zero-capacity arcs report 0.
    pub fn utilization(&self) -> f64 {
        if self.capacity > 0.0 {
            self.flow / self.capacity
        } else {
            0.0
        }
    }
}

/// Complete solution to a max-flow model.
///
/// Read-only once produced: each solve invocation constructs a fresh
/// assignment and never updates an existing one.
#[derive(Debug, Clone, Serialize)]
pub struct FlowAssignment {
    /// Objective value: total flow arriving at the sink
    pub max_flow: f64,
    /// Name of the backend that produced the assignment
    pub backend: String,
    /// Wall-clock solve time
    pub solve_time: Duration,
    /// Per-arc flows in canonical model order
    flows: Vec<ArcFlow>,
}

impl FlowAssignment {
    pub fn new(max_flow: f64, backend: impl Into<String>, solve_time: Duration, flows: Vec<ArcFlow>) -> Self {
        Self {
            max_flow,
            backend: backend.into(),
            solve_time,
            flows,
        }
    }

    /// Per-arc flows in canonical model order.
    pub fn arc_flows(&self) -> &[ArcFlow] {
        &self.flows
    }

    /// Flow on the arc from `from` to `to`, if that arc exists.
    pub fn flow(&self, from: NodeId, to: NodeId) -> Option<f64> {
        self.flows
            .iter()
            .find(|f| f.from == from && f.to == to)
            .map(|f| f.flow)
    }

    /// Total flow on arcs terminating at the given node.
    pub fn inflow(&self, node: NodeId) -> f64 {
        self.flows
            .iter()
            .filter(|f| f.to == node)
            .map(|f| f.flow)
            .sum()
    }

    /// Total flow on arcs originating at the given node.
    pub fn outflow(&self, node: NodeId) -> f64 {
        self.flows
            .iter()
            .filter(|f| f.from == node)
            .map(|f| f.flow)
            .sum()
    }

    /// Number of arcs carrying more than `tolerance` of flow.
    pub fn active_arcs(&self, tolerance: f64) -> usize {
        self.flows.iter().filter(|f| f.flow > tolerance).count()
    }

    /// Format a human-readable summary
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Max-Flow Solution Summary\n{}\n", "=".repeat(40)));
        s.push_str(&format!("Maximum Flow: {:.4}\n", self.max_flow));
        s.push_str(&format!("Backend: {}\n", self.backend));
        s.push_str(&format!(
            "Active Arcs: {} of {}\n",
            self.active_arcs(1e-9),
            self.flows.len()
        ));
        s.push_str(&format!("Solve Time: {:.2?}\n", self.solve_time));

        if !self.flows.is_empty() {
            s.push_str("\nArc Flows:\n");
            for arc in &self.flows {
                s.push_str(&format!(
                    "  {} -> {}: {:.4} / {:.4}\n",
                    arc.from_name, arc.to_name, arc.flow, arc.capacity
                ));
            }
        }

        s
    }
}
