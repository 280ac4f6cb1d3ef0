//! Translation of the model IR into `good_lp` and backend dispatch.
//!
//! The only solver-aware code in the crate. Trivial `0 == 0` conservation
//! rows stay in the [`Model`] but are skipped here: a constant row is not
//! expressible in `good_lp` and is vacuously satisfied.

use super::model::{assemble_model, LinearExpr, Model, Relation, Sense};
use super::solution::{ArcFlow, FlowAssignment};
use super::MaxFlowError;
use gridflow_core::Network;

#[cfg(feature = "solver-clarabel")]
use good_lp::solvers::clarabel::clarabel as clarabel_solver;
#[cfg(feature = "solver-highs")]
use good_lp::solvers::highs::highs as highs_solver;
use good_lp::{constraint, variable, Expression, ResolutionError, Solution, Variable};
use good_lp::{ProblemVariables, SolverModel};

use std::str::FromStr;
use std::time::Instant;

/// LP backend selection, gated by cargo features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LpBackend {
    #[cfg(feature = "solver-clarabel")]
    #[default]
    Clarabel,
    #[cfg(feature = "solver-highs")]
    #[cfg_attr(not(feature = "solver-clarabel"), default)]
    Highs,
}

const AVAILABLE_BACKENDS: &[&str] = &[
    #[cfg(feature = "solver-clarabel")]
    "clarabel",
    #[cfg(feature = "solver-highs")]
    "highs",
];

impl LpBackend {
    pub fn available() -> &'static [&'static str] {
        AVAILABLE_BACKENDS
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            #[cfg(feature = "solver-clarabel")]
            LpBackend::Clarabel => "clarabel",
            #[cfg(feature = "solver-highs")]
            LpBackend::Highs => "highs",
        }
    }
}

fn unknown_backend_error(label: &str) -> MaxFlowError {
    MaxFlowError::Solver(format!(
        "unknown lp backend '{}'; supported values: {}",
        label,
        LpBackend::available().join(", ")
    ))
}

impl FromStr for LpBackend {
    type Err = MaxFlowError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.to_ascii_lowercase();
        match normalized.as_str() {
            "clarabel" => {
                #[cfg(feature = "solver-clarabel")]
                {
                    Ok(LpBackend::Clarabel)
                }
                #[cfg(not(feature = "solver-clarabel"))]
                {
                    Err(unknown_backend_error(&normalized))
                }
            }
            "highs" => {
                #[cfg(feature = "solver-highs")]
                {
                    Ok(LpBackend::Highs)
                }
                #[cfg(not(feature = "solver-highs"))]
                {
                    Err(unknown_backend_error(&normalized))
                }
            }
            other => Err(unknown_backend_error(other)),
        }
    }
}

fn map_resolution_error(err: ResolutionError) -> MaxFlowError {
    match err {
        ResolutionError::Infeasible => MaxFlowError::Infeasible,
        ResolutionError::Unbounded => MaxFlowError::Unbounded,
        other => MaxFlowError::Solver(format!("{other:?}")),
    }
}

fn to_expression(expr: &LinearExpr, lp_vars: &[Variable]) -> Expression {
    expr.terms
        .iter()
        .fold(Expression::from(0.0), |acc, term| {
            acc + term.coeff * lp_vars[term.var.value()]
        })
}

fn add_model_rows<M: SolverModel>(mut problem: M, model: &Model, lp_vars: &[Variable]) -> M {
    for row in &model.constraints {
        if row.expr.is_empty() {
            // 0 == 0 / 0 <= rhs with rhs >= 0: vacuously satisfied
            continue;
        }
        let lhs = to_expression(&row.expr, lp_vars);
        let c = match row.relation {
            Relation::LessEq => constraint!(lhs <= row.rhs),
            Relation::Eq => constraint!(lhs == row.rhs),
        };
        problem = problem.with(c);
    }
    problem
}

/// Run an already assembled model on the selected backend.
///
/// On success, extracts one flow value per arc plus the objective value
/// into a [`FlowAssignment`]. Backend verdicts map verbatim: infeasible
/// and unbounded pass through, anything else becomes
/// [`MaxFlowError::Solver`].
pub fn solve_model(
    network: &Network,
    model: &Model,
    backend: LpBackend,
) -> Result<FlowAssignment, MaxFlowError> {
    let start = Instant::now();

    let mut vars = ProblemVariables::new();
    let lp_vars: Vec<Variable> = model
        .variables
        .iter()
        .map(|def| vars.add(variable().min(def.lower_bound)))
        .collect();
    let objective = to_expression(&model.objective, &lp_vars);

    let builder = match model.sense {
        Sense::Maximize => vars.maximise(objective),
        Sense::Minimize => vars.minimise(objective),
    };

    let solution: Box<dyn Solution> = match backend {
        #[cfg(feature = "solver-clarabel")]
        LpBackend::Clarabel => {
            let problem = add_model_rows(builder.using(clarabel_solver), model, &lp_vars);
            Box::new(problem.solve().map_err(map_resolution_error)?)
        }
        #[cfg(feature = "solver-highs")]
        LpBackend::Highs => {
            let problem = add_model_rows(builder.using(highs_solver), model, &lp_vars);
            Box::new(problem.solve().map_err(map_resolution_error)?)
        }
    };

    let max_flow = model
        .objective
        .terms
        .iter()
        .map(|t| t.coeff * solution.value(lp_vars[t.var.value()]))
        .sum();

    let mut flows = Vec::with_capacity(model.variables.len());
    for (def, lp_var) in model.variables.iter().zip(&lp_vars) {
        let value = solution.value(*lp_var);
        let capacity = network
            .arc_between(def.from, def.to)
            .map(|a| a.capacity)
            .unwrap_or(0.0);
        let from_name = network.node_name(def.from).unwrap_or_default().to_string();
        let to_name = network.node_name(def.to).unwrap_or_default().to_string();
        flows.push(ArcFlow {
            from: def.from,
            to: def.to,
            from_name,
            to_name,
            capacity,
            flow: value,
        });
    }

    Ok(FlowAssignment::new(
        max_flow,
        backend.as_str(),
        start.elapsed(),
        flows,
    ))
}

/// Assemble the max-flow model for `network` and solve it in one call.
pub fn solve_max_flow(
    network: &Network,
    backend: LpBackend,
) -> Result<FlowAssignment, MaxFlowError> {
    let model = assemble_model(network)?;
    solve_model(network, &model, backend)
}
