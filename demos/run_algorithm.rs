//! Loads a graph, runs one algorithm on it and writes the parameter and
//! result documents for the visualization scripts.
//!
//! Usage:
//!   cargo run --example run_algorithm -- graph.json dijkstra --start 0
//!   cargo run --example run_algorithm -- --tree 50 --seed 7 bfs --out files
//!
//! Set `RUST_LOG=resgraph=debug` to see the library's events.

use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_pcg::Pcg64;
use resgraph::prelude::*;
use resgraph::tracing_support::{algorithm_timings, init_tracing};

type DemoGraph = Graph<u32, (), i64>;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Algorithm {
    Bfs,
    Dfs,
    Dijkstra,
    Unweighted,
    Components,
    Coloring,
}

/// Run a graph algorithm and record its documents as JSON files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Graph file in the persistence format (omit when using --tree)
    input: Option<PathBuf>,

    /// Algorithm to run
    #[arg(value_enum)]
    algorithm: Algorithm,

    /// Start vertex for the single-source algorithms
    #[arg(long, default_value_t = 0)]
    start: u32,

    /// Generate a random tree with this many vertices instead of loading
    #[arg(long, conflicts_with = "input")]
    tree: Option<usize>,

    /// Seed for --tree
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Directory for the documents (defaults to $GRAPH_LOG_DIR or "files")
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let mut graph = load_or_exit(&args);
    let mut sink = match &args.out {
        Some(dir) => JsonFileSink::new(dir),
        None => JsonFileSink::from_env(),
    };

    if let Err(err) = run(&mut graph, &args, &mut sink) {
        eprintln!("{:?} failed: {err}", args.algorithm);
        process::exit(1);
    }

    for timing in algorithm_timings() {
        eprintln!(
            "{}: {} call(s), {:?}",
            timing.name, timing.count, timing.total
        );
    }
}

fn load_or_exit(args: &Args) -> DemoGraph {
    let mut graph = DemoGraph::new();
    let loaded = match (&args.input, args.tree) {
        (_, Some(n)) => {
            let mut rng = Pcg64::seed_from_u64(args.seed);
            graph.generate_tree(n, 1, &mut rng)
        }
        (Some(path), None) => graph.load_from_json(path),
        (None, None) => {
            eprintln!("Either an input file or --tree is required.");
            process::exit(2);
        }
    };
    if let Err(err) = loaded {
        eprintln!("Could not build the graph: {err}");
        process::exit(1);
    }
    graph
}

fn run(graph: &mut DemoGraph, args: &Args, sink: &mut JsonFileSink) -> GraphResult<()> {
    graph.record_parameters(sink)?;
    let start = args.start;
    let summary = match args.algorithm {
        Algorithm::Bfs => {
            let traversal = graph.breadth_first_search(start, sink)?;
            format!("reached {} vertices", traversal.order.len())
        }
        Algorithm::Dfs => {
            let traversal = graph.depth_first_search(start, sink)?;
            format!("reached {} vertices", traversal.order.len())
        }
        Algorithm::Dijkstra => {
            let paths = graph.dijkstra(start, sink)?;
            let farthest = paths.distances().values().max().copied().unwrap_or(0);
            format!(
                "reached {} vertices, farthest at distance {farthest}",
                paths.distances().len()
            )
        }
        Algorithm::Unweighted => {
            let hops = graph.shortest_paths_unweighted(start, sink)?;
            let eccentricity = hops.distances().values().max().copied().unwrap_or(0);
            format!("eccentricity of {start} is {eccentricity}")
        }
        Algorithm::Components => {
            let components = graph.connected_components(sink)?;
            format!("{} component(s)", components.len())
        }
        Algorithm::Coloring => {
            let coloring = graph.greedy_coloring(start, sink)?;
            format!("{} color(s)", coloring.color_count())
        }
    };
    println!(
        "{:?} on {} vertices / {} edges: {summary}; documents in {}",
        args.algorithm,
        graph.vertex_count(),
        graph.edge_count(),
        sink.dir().display()
    );
    Ok(())
}
