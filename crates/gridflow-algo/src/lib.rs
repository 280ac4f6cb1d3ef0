//! # gridflow-algo: Maximum-Flow Model Construction and Solving
//!
//! This crate turns a capacitated [`gridflow_core::Network`] into the
//! canonical linear program for maximum flow and delegates solving to an
//! external LP backend through `good_lp`.
//!
//! ## Pipeline
//!
//! | Step | Entry point | Output |
//! |------|-------------|--------|
//! | Build objective | [`maxflow::build_objective`] | sum of flow variables into the sink |
//! | Build capacity rows | [`maxflow::build_capacity_constraints`] | one `flow <= capacity` row per arc |
//! | Build conservation rows | [`maxflow::build_conservation_constraints`] | one `inflow == outflow` row per interior node |
//! | Assemble | [`maxflow::assemble_model`] | solver-independent [`maxflow::Model`] |
//! | Solve | [`maxflow::solve_max_flow`] | [`maxflow::FlowAssignment`] |
//!
//! The [`maxflow::Model`] is plain data (variable table, coefficient lists,
//! relations, right-hand sides). Nothing in it depends on which backend
//! eventually runs it; the translation to `good_lp` happens in
//! [`maxflow::solve_model`].
//!
//! ## Example
//!
//! ```no_run
//! use gridflow_algo::maxflow::{solve_max_flow, LpBackend};
//! use gridflow_core::Network;
//!
//! let mut network = Network::new();
//! let a = network.add_node("A");
//! let b = network.add_node("B");
//! let c = network.add_node("C");
//! network.add_arc(a, b, 5.0)?;
//! network.add_arc(b, c, 3.0)?;
//! network.add_arc(a, c, 2.0)?;
//! network.set_source(a)?;
//! network.set_sink(c)?;
//!
//! let assignment = solve_max_flow(&network, LpBackend::default())?;
//! println!("{}", assignment.summary());
//! assert!((assignment.max_flow - 5.0).abs() < 1e-4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod maxflow;

pub use maxflow::{
    assemble_model, solve_max_flow, FlowAssignment, LpBackend, MaxFlowError, Model,
};
