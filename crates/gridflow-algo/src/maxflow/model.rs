//! Solver-independent model IR and the builder operations that produce it.
//!
//! Constraints are plain data records (variable ids, coefficients, a
//! relation, a right-hand side) produced by pure functions over the
//! network. Nothing here references a solver API; the translation to
//! `good_lp` lives in [`super::solver`].

use super::MaxFlowError;
use gridflow_core::{Network, NodeId};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Index into a model's variable table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VarId(usize);

impl VarId {
    pub fn new(value: usize) -> Self {
        VarId(value)
    }

    pub fn value(&self) -> usize {
        self.0
    }
}

/// One flow variable, tied to the arc it measures.
///
/// The lower bound carries the non-negativity domain restriction; capacity
/// is an explicit constraint row, not a variable bound.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDef {
    pub id: VarId,
    /// Display name, `f(from,to)` with node names
    pub name: String,
    pub from: NodeId,
    pub to: NodeId,
    pub lower_bound: f64,
}

/// One `coefficient * variable` term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearTerm {
    pub var: VarId,
    pub coeff: f64,
}

/// A linear expression as an ordered list of terms.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LinearExpr {
    pub terms: Vec<LinearTerm>,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, var: VarId, coeff: f64) {
        self.terms.push(LinearTerm { var, coeff });
    }

    /// An expression with no terms evaluates to zero for any assignment.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Relation between a constraint's expression and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Relation {
    LessEq,
    Eq,
}

impl Relation {
    pub fn symbol(&self) -> &'static str {
        match self {
            Relation::LessEq => "<=",
            Relation::Eq => "=",
        }
    }
}

/// Which builder rule produced a constraint row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ConstraintKind {
    /// `flow(i,j) <= capacity(i,j)` for one arc
    Capacity,
    /// `inflow(k) == outflow(k)` for one interior node
    Conservation,
}

/// A single constraint row: `expr <relation> rhs`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Constraint {
    /// Stable name, `cap(from,to)` or `con(node)` with node names
    pub name: String,
    pub kind: ConstraintKind,
    pub expr: LinearExpr,
    pub relation: Relation,
    pub rhs: f64,
}

/// Optimization direction. Max flow always maximizes, but the IR records
/// the sense explicitly so a model is self-describing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Sense {
    Maximize,
    Minimize,
}

/// A complete linear program: variable table, objective, constraint rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Model {
    pub variables: Vec<VariableDef>,
    pub sense: Sense,
    pub objective: LinearExpr,
    pub constraints: Vec<Constraint>,
}

impl Model {
    pub fn variable(&self, id: VarId) -> Option<&VariableDef> {
        self.variables.get(id.value())
    }

    pub fn capacity_constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints
            .iter()
            .filter(|c| c.kind == ConstraintKind::Capacity)
    }

    pub fn conservation_constraints(&self) -> impl Iterator<Item = &Constraint> {
        self.constraints
            .iter()
            .filter(|c| c.kind == ConstraintKind::Conservation)
    }
}

impl fmt::Display for Model {
    /// LP-style text rendering for inspection (`gridflow model`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sense = match self.sense {
            Sense::Maximize => "maximize",
            Sense::Minimize => "minimize",
        };
        writeln!(f, "{}", sense)?;
        writeln!(f, "  total: {}", self.render_expr(&self.objective))?;
        writeln!(f, "subject to")?;
        for row in &self.constraints {
            writeln!(
                f,
                "  {}: {} {} {}",
                row.name,
                self.render_expr(&row.expr),
                row.relation.symbol(),
                row.rhs
            )?;
        }
        writeln!(f, "bounds")?;
        for var in &self.variables {
            writeln!(f, "  {} >= {}", var.name, var.lower_bound)?;
        }
        Ok(())
    }
}

impl Model {
    fn render_expr(&self, expr: &LinearExpr) -> String {
        if expr.is_empty() {
            return "0".to_string();
        }
        let mut out = String::new();
        for (i, term) in expr.terms.iter().enumerate() {
            let name = self
                .variable(term.var)
                .map(|v| v.name.as_str())
                .unwrap_or("?");
            if i == 0 {
                if term.coeff == 1.0 {
                    out.push_str(name);
                } else if term.coeff == -1.0 {
                    out.push_str(&format!("-{}", name));
                } else {
                    out.push_str(&format!("{} {}", term.coeff, name));
                }
            } else if term.coeff >= 0.0 {
                if term.coeff == 1.0 {
                    out.push_str(&format!(" + {}", name));
                } else {
                    out.push_str(&format!(" + {} {}", term.coeff, name));
                }
            } else if term.coeff == -1.0 {
                out.push_str(&format!(" - {}", name));
            } else {
                out.push_str(&format!(" - {} {}", -term.coeff, name));
            }
        }
        out
    }
}

fn node_name(network: &Network, id: NodeId) -> String {
    network
        .node_name(id)
        .map(str::to_string)
        .unwrap_or_else(|| format!("#{}", id.value()))
}

/// Check the structural preconditions for model construction.
///
/// Errors are raised before any constraint is emitted; a partial model is
/// never returned. Capacity checks live in
/// [`build_capacity_constraints`], which owns the `InvalidCapacity` class.
pub fn validate_network(network: &Network) -> Result<(), MaxFlowError> {
    if network.node_count() == 0 {
        return Err(MaxFlowError::InvalidNetwork(
            "network has no nodes".to_string(),
        ));
    }
    let source = network
        .source()
        .ok_or_else(|| MaxFlowError::InvalidNetwork("no source node designated".to_string()))?;
    let sink = network
        .sink()
        .ok_or_else(|| MaxFlowError::InvalidNetwork("no sink node designated".to_string()))?;
    if network.node(source).is_none() {
        return Err(MaxFlowError::InvalidNetwork(format!(
            "source id {} is not in the node set",
            source.value()
        )));
    }
    if network.node(sink).is_none() {
        return Err(MaxFlowError::InvalidNetwork(format!(
            "sink id {} is not in the node set",
            sink.value()
        )));
    }
    if source == sink {
        return Err(MaxFlowError::InvalidNetwork(format!(
            "source and sink are the same node '{}'",
            node_name(network, source)
        )));
    }
    Ok(())
}

/// The canonical variable table: one flow variable per arc, sorted by
/// (from, to) tuple so the same network always yields the same table.
pub fn flow_variables(network: &Network) -> Vec<VariableDef> {
    let mut arcs = network.arcs();
    arcs.sort_by_key(|a| a.tuple());
    arcs.iter()
        .enumerate()
        .map(|(i, arc)| VariableDef {
            id: VarId::new(i),
            name: format!(
                "f({},{})",
                node_name(network, arc.from),
                node_name(network, arc.to)
            ),
            from: arc.from,
            to: arc.to,
            lower_bound: 0.0,
        })
        .collect()
}

fn var_index(variables: &[VariableDef]) -> HashMap<(NodeId, NodeId), VarId> {
    variables.iter().map(|v| ((v.from, v.to), v.id)).collect()
}

/// The objective: sum of flow on arcs terminating at the sink.
///
/// Every arc incident to the sink contributes exactly once; arcs elsewhere
/// contribute zero. Fails with `InvalidNetwork` if no valid sink is
/// designated.
pub fn build_objective(network: &Network) -> Result<LinearExpr, MaxFlowError> {
    let sink = network
        .sink()
        .ok_or_else(|| MaxFlowError::InvalidNetwork("no sink node designated".to_string()))?;
    if network.node(sink).is_none() {
        return Err(MaxFlowError::InvalidNetwork(format!(
            "sink id {} is not in the node set",
            sink.value()
        )));
    }
    let variables = flow_variables(network);
    let mut expr = LinearExpr::new();
    for var in &variables {
        if var.to == sink {
            expr.push(var.id, 1.0);
        }
    }
    Ok(expr)
}

/// One `flow(i,j) <= capacity(i,j)` row per arc, in canonical order.
///
/// Non-negativity is the variable's lower bound, not a row here. Fails with
/// `InvalidCapacity` on any negative or non-finite capacity, before any row
/// is emitted.
pub fn build_capacity_constraints(network: &Network) -> Result<Vec<Constraint>, MaxFlowError> {
    for arc in network.arcs() {
        if !arc.capacity.is_finite() || arc.capacity < 0.0 {
            return Err(MaxFlowError::InvalidCapacity(format!(
                "arc {} -> {} has capacity {}",
                node_name(network, arc.from),
                node_name(network, arc.to),
                arc.capacity
            )));
        }
    }
    let variables = flow_variables(network);
    Ok(variables
        .iter()
        .map(|var| {
            let capacity = network
                .arc_between(var.from, var.to)
                .map(|a| a.capacity)
                .unwrap_or(0.0);
            let mut expr = LinearExpr::new();
            expr.push(var.id, 1.0);
            Constraint {
                name: format!(
                    "cap({},{})",
                    node_name(network, var.from),
                    node_name(network, var.to)
                ),
                kind: ConstraintKind::Capacity,
                expr,
                relation: Relation::LessEq,
                rhs: capacity,
            }
        })
        .collect())
}

/// One `inflow(k) == outflow(k)` row per node other than the terminals,
/// in node-id order. Source and sink are skipped entirely so flow can
/// originate and terminate freely there.
///
/// A node with no incident arcs yields the trivial row `0 == 0`, kept in
/// the model so the row count stays `|nodes| - 2`.
pub fn build_conservation_constraints(network: &Network) -> Result<Vec<Constraint>, MaxFlowError> {
    validate_network(network)?;
    let source = network.source().expect("validated");
    let sink = network.sink().expect("validated");

    let variables = flow_variables(network);
    let index = var_index(&variables);

    let mut constraints = Vec::new();
    for node in network.nodes() {
        if node.id == source || node.id == sink {
            continue;
        }
        // inflow - outflow == 0; terms in canonical variable order
        let mut expr = LinearExpr::new();
        for var in &variables {
            if var.to == node.id {
                expr.push(index[&(var.from, var.to)], 1.0);
            } else if var.from == node.id {
                expr.push(index[&(var.from, var.to)], -1.0);
            }
        }
        constraints.push(Constraint {
            name: format!("con({})", node.name),
            kind: ConstraintKind::Conservation,
            expr,
            relation: Relation::Eq,
            rhs: 0.0,
        });
    }
    Ok(constraints)
}

/// Compose objective, capacity rows, and conservation rows into one LP.
///
/// All validation happens before any row is emitted. Given the same
/// network this produces a structurally identical model every time:
/// variables and capacity rows sorted by arc tuple, conservation rows by
/// node id.
pub fn assemble_model(network: &Network) -> Result<Model, MaxFlowError> {
    validate_network(network)?;
    let objective = build_objective(network)?;
    let capacity = build_capacity_constraints(network)?;
    let conservation = build_conservation_constraints(network)?;

    let mut constraints = capacity;
    constraints.extend(conservation);

    Ok(Model {
        variables: flow_variables(network),
        sense: Sense::Maximize,
        objective,
        constraints,
    })
}
