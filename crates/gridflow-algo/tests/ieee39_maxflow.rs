//! Solve the 39-node benchmark instance and check the flow laws at scale.

use gridflow_algo::maxflow::{assemble_model, solve_max_flow, LpBackend};
use gridflow_io::importers::parse_dimacs_file;
use std::path::PathBuf;

const TOL: f64 = 1e-3;

fn ieee39_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("gridflow-io/tests/data/ieee39.max")
}

#[test]
fn ieee39_model_has_expected_shape() {
    let network = parse_dimacs_file(&ieee39_path()).expect("parse ieee39.max");
    let model = assemble_model(&network).expect("assemble");

    assert_eq!(model.variables.len(), 46);
    assert_eq!(model.capacity_constraints().count(), 46);
    // |nodes| - 2 conservation rows, terminals skipped
    assert_eq!(model.conservation_constraints().count(), 37);
    // Arcs into bus 39: (1,39) and (9,39)
    assert_eq!(model.objective.terms.len(), 2);
}

#[test]
fn ieee39_solution_obeys_flow_laws() {
    let network = parse_dimacs_file(&ieee39_path()).expect("parse ieee39.max");
    let assignment = solve_max_flow(&network, LpBackend::default()).expect("solve ieee39");

    for arc in assignment.arc_flows() {
        assert!(arc.flow >= -TOL);
        assert!(arc.flow <= arc.capacity + TOL);
    }

    let source = network.source().unwrap();
    let sink = network.sink().unwrap();
    for node in network.nodes() {
        if node.id == source || node.id == sink {
            continue;
        }
        let imbalance = assignment.inflow(node.id) - assignment.outflow(node.id);
        assert!(
            imbalance.abs() < TOL,
            "bus {} violates conservation by {}",
            node.name,
            imbalance
        );
    }

    // The direct 1 -> 39 branch (rating 1000) can always saturate, and
    // everything leaving the source is bounded by 600 + 1000.
    assert!(assignment.max_flow > 1000.0 - TOL);
    assert!(assignment.max_flow < 1600.0 + TOL);
    assert!((assignment.inflow(sink) - assignment.max_flow).abs() < TOL);
}
