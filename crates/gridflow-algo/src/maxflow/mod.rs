//! Maximum Flow (LP formulation)
//!
//! This module constructs the linear program for the maximum-flow problem on
//! a directed capacitated network and hands it to an external LP backend.
//!
//! ## Problem Overview
//!
//! Maximum flow asks how much material can move per unit time from a source
//! node to a sink node without exceeding any arc's capacity.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────┐
//! │  MAXIMUM FLOW                                                         │
//! │  ────────────                                                         │
//! │                                                                       │
//! │  Given:                                                               │
//! │    • Directed graph with nodes N and arcs A ⊆ N × N                  │
//! │    • Capacity c_ij ≥ 0 for every arc (i,j)                           │
//! │    • Designated source s and sink t, s ≠ t                           │
//! │                                                                       │
//! │  Decide:                                                              │
//! │    • Flow f_ij on every arc (continuous)                             │
//! │                                                                       │
//! │  Maximize:                                                            │
//! │    Total flow arriving at the sink                                   │
//! │                                                                       │
//! │  Subject to:                                                          │
//! │    • Capacity on every arc                                           │
//! │    • Flow conservation at every node except s and t                  │
//! └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## LP Formulation
//!
//! ```text
//! maximize    Σ_{(i,t) ∈ A} f_it                  flow into the sink
//!
//! subject to:
//!   f_ij ≤ c_ij                  ∀ (i,j) ∈ A      capacity
//!   Σ_i f_ik = Σ_j f_kj          ∀ k ∉ {s, t}     conservation
//!   f_ij ≥ 0                     ∀ (i,j) ∈ A      variable domain
//! ```
//!
//! Non-negativity is a variable bound, not a constraint row. The source and
//! sink carry no conservation row: flow originates and terminates freely
//! there, which is what makes the objective meaningful.
//!
//! Model construction is a pure function of the network. Ordering is
//! canonical (variables and capacity rows sorted by arc tuple, conservation
//! rows by node id), so the same network always yields a structurally
//! identical [`Model`].
//!
//! ## References
//!
//! - **Ford & Fulkerson (1956)**: "Maximal flow through a network"
//!   - The original max-flow formulation and min-cut duality
//!
//! - **Ahuja, Magnanti & Orlin (1993)**: "Network Flows: Theory, Algorithms,
//!   and Applications"
//!   - Chapter 6 covers the arc-flow LP used here

use thiserror::Error;

mod export;
mod model;
mod solution;
mod solver;

pub use model::{
    assemble_model, build_capacity_constraints, build_conservation_constraints, build_objective,
    flow_variables, validate_network, Constraint, ConstraintKind, LinearExpr, LinearTerm, Model,
    Relation, Sense, VarId, VariableDef,
};
pub use solution::{ArcFlow, FlowAssignment};
pub use solver::{solve_max_flow, solve_model, LpBackend};

/// Errors raised while assembling or solving a max-flow model.
///
/// Validation failures (`InvalidNetwork`, `InvalidCapacity`) are raised
/// eagerly, before any constraint is emitted; a partial model is never
/// returned. Solver verdicts (`Infeasible`, `Unbounded`) are passed through
/// from the backend unmodified, with no retry or repair.
#[derive(Error, Debug, Clone)]
pub enum MaxFlowError {
    /// Structural problems: missing source/sink, source equals sink,
    /// duplicate arcs
    #[error("invalid network: {0}")]
    InvalidNetwork(String),

    /// A negative or non-finite capacity on some arc
    #[error("invalid capacity: {0}")]
    InvalidCapacity(String),

    /// The backend proved the model infeasible
    #[error("model is infeasible")]
    Infeasible,

    /// The backend proved the model unbounded
    #[error("model is unbounded")]
    Unbounded,

    /// Any other backend failure
    #[error("solver error: {0}")]
    Solver(String),
}
