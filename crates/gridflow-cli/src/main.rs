use anyhow::{anyhow, Context, Result};
use clap::Parser;
use gridflow_algo::maxflow::{assemble_model, solve_model, LpBackend};
use gridflow_core::{graph_utils, Network};
use gridflow_io::importers::load_network;
use std::io::{self, Write};
use std::path::PathBuf;
use tabwriter::TabWriter;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

mod cli;

use cli::{Cli, Commands, NetworkArgs};

fn load(input: &NetworkArgs) -> Result<Network> {
    let terminals = match (input.source.as_deref(), input.sink.as_deref()) {
        (Some(s), Some(t)) => Some((s, t)),
        (None, None) => None,
        _ => return Err(anyhow!("--source and --sink must be given together")),
    };
    let network = load_network(&input.network, terminals)
        .with_context(|| format!("loading network from {}", input.network.display()))?;
    if let Err(issues) = network.validate() {
        for issue in &issues {
            error!("validation: {issue}");
        }
        return Err(anyhow!(
            "network failed validation with {} issue(s)",
            issues.len()
        ));
    }
    Ok(network)
}

fn run_solve(
    input: &NetworkArgs,
    solver: &str,
    out: Option<&PathBuf>,
    json: Option<&PathBuf>,
) -> Result<()> {
    let backend: LpBackend = solver.parse()?;
    let network = load(input)?;
    info!(
        "Solving max flow on {} ({} nodes, {} arcs) with {}",
        input.network.display(),
        network.node_count(),
        network.arc_count(),
        backend.as_str()
    );

    let model = assemble_model(&network)?;
    let assignment = solve_model(&network, &model, backend)?;

    print_flow_table(&assignment)?;
    println!();
    println!("Maximum flow: {:.4}", assignment.max_flow);
    println!(
        "Solved with {} in {:.2?}",
        assignment.backend, assignment.solve_time
    );

    if let Some(path) = out {
        assignment.to_csv(path)?;
        info!("Wrote per-arc flows to {}", path.display());
    }
    if let Some(path) = json {
        assignment.to_json(path)?;
        info!("Wrote solution to {}", path.display());
    }
    Ok(())
}

fn print_flow_table(assignment: &gridflow_algo::maxflow::FlowAssignment) -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "FROM\tTO\tCAPACITY\tFLOW\tUTIL")?;
    for arc in assignment.arc_flows() {
        writeln!(
            writer,
            "{}\t{}\t{:.4}\t{:.4}\t{:.1}%",
            arc.from_name,
            arc.to_name,
            arc.capacity,
            arc.flow,
            arc.utilization() * 100.0
        )?;
    }
    writer.flush()?;
    Ok(())
}

fn run_check(input: &NetworkArgs, dot: Option<&PathBuf>) -> Result<()> {
    let network = load(input)?;
    println!("{}", network.stats());

    let stats = graph_utils::graph_stats(&network)?;
    println!(
        "Degree [min/avg/max]: {}/{:.2}/{}",
        stats.min_degree, stats.avg_degree, stats.max_degree
    );
    println!("Density: {:.4}", stats.density);
    println!(
        "Weakly connected components: {}",
        stats.weakly_connected_components
    );
    if graph_utils::sink_reachable(&network)? {
        println!("Sink is reachable from the source along positive-capacity arcs");
    } else {
        println!("Sink is NOT reachable: the maximum flow is zero");
    }

    if let Some(path) = dot {
        let text = graph_utils::export_graph(&network, "dot")?;
        std::fs::write(path, text)
            .with_context(|| format!("writing DOT to {}", path.display()))?;
        info!("Wrote Graphviz DOT to {}", path.display());
    }
    Ok(())
}

fn run_model(input: &NetworkArgs) -> Result<()> {
    let network = load(input)?;
    let model = assemble_model(&network)?;
    print!("{model}");
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Solve {
            input,
            solver,
            out,
            json,
        } => run_solve(input, solver, out.as_ref(), json.as_ref()),
        Commands::Check { input, dot } => run_check(input, dot.as_ref()),
        Commands::Model { input } => run_model(input),
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    if let Err(e) = run(&cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
