//! Defective graph coloring solver (greedy, GRASP, reactive GRASP)

#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]

use std::process;

use clap::{App, load_yaml};
use fastrand::Rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use defective_color::coloring::validate;
use defective_color::error::ColoringError;
use defective_color::graph::Graph;
use defective_color::report::{arms_to_string, solution_to_string};
use defective_color::search::greedy::greedy_defective;
use defective_color::search::grasp::grasp;
use defective_color::search::reactive::reactive_grasp;
use defective_color::util::{Algorithm, RunParams, export_results, read_params};


/** reads the instance, runs the chosen algorithm and exports the results */
fn run(params:&RunParams) -> Result<(), ColoringError> {
    println!("reading instance: {}...", params.instance);
    let inst = Graph::from_file(&params.instance)?;
    inst.display_statistics();
    println!("d: {}", params.d);
    println!("=======================");
    let (solution, arms) = match params.algorithm {
        Algorithm::Greedy => (greedy_defective(&inst, params.d), None),
        Algorithm::Grasp { alpha, iterations, seed } => {
            println!("alpha: {}\titerations: {}\tseed: {}", alpha, iterations, seed);
            let rng = Rng::with_seed(seed);
            (grasp(&inst, params.d, iterations, alpha, &rng)?, None)
        },
        Algorithm::Reactive { iterations, block_size, seed } => {
            println!("iterations: {}\tblock size: {}\tseed: {}", iterations, block_size, seed);
            let rng = Rng::with_seed(seed);
            let res = reactive_grasp(&inst, params.d, iterations, block_size, &rng)?;
            println!("{}", arms_to_string(&res.arms));
            (res.solution, Some(res.arms))
        },
    };
    println!("{}", solution_to_string(&inst, params.d, &solution));
    if !validate(&inst, params.d, &solution) {
        error!("{} produced an invalid solution", params.algorithm.name());
    }
    info!(
        algorithm = params.algorithm.name(), seed = ?params.algorithm.seed(),
        nb_colors = solution.nb_colors, nb_defects = solution.nb_defects,
        "{} took {:.3} seconds", params.algorithm.name(), solution.time_searched
    );
    export_results(&inst, params, &solution, arms.as_ref())
}

/** parses the command line and solves the instance */
pub fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    // parse arguments
    let yaml = load_yaml!("main_args.yml");
    let main_args = App::from_yaml(yaml).get_matches();
    let params = match read_params(&main_args) {
        Ok(p) => p,
        Err(e) => {
            error!("{}", e);
            process::exit(2);
        }
    };
    if let Err(e) = run(&params) {
        error!("{}", e);
        process::exit(1);
    }
}
