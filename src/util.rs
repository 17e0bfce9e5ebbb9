use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::ArgMatches;
use serde_json::{json, Value};
use tracing::info;

use crate::coloring::{Solution, checker, solution_to_partition};
use crate::error::ColoringError;
use crate::graph::Graph;
use crate::report::{CsvLog, RunRecord, write_edge_list};
use crate::search::reactive::AlphaArms;

/** algorithm to run, with its parameters */
#[derive(Debug, Clone, PartialEq)]
pub enum Algorithm {
    /// greedy algorithm
    Greedy,
    /// GRASP
    Grasp {
        /// RCL parameter
        alpha: f64,
        /// number of constructions
        iterations: usize,
        /// random seed
        seed: u64,
    },
    /// reactive GRASP
    Reactive {
        /// number of constructions
        iterations: usize,
        /// number of iterations between two probability updates
        block_size: usize,
        /// random seed
        seed: u64,
    },
}

impl Algorithm {
    /// algorithm name (as used on the command line)
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Greedy => "greedy",
            Algorithm::Grasp { .. } => "grasp",
            Algorithm::Reactive { .. } => "reactive",
        }
    }

    /// alpha (GRASP only)
    pub fn alpha(&self) -> Option<f64> {
        match self {
            Algorithm::Grasp { alpha, .. } => Some(*alpha),
            _ => None,
        }
    }

    /// number of iterations (GRASP variants)
    pub fn iterations(&self) -> Option<usize> {
        match self {
            Algorithm::Greedy => None,
            Algorithm::Grasp { iterations, .. } | Algorithm::Reactive { iterations, .. } => Some(*iterations),
        }
    }

    /// block size (reactive GRASP only)
    pub fn block_size(&self) -> Option<usize> {
        match self {
            Algorithm::Reactive { block_size, .. } => Some(*block_size),
            _ => None,
        }
    }

    /// random seed (GRASP variants)
    pub fn seed(&self) -> Option<u64> {
        match self {
            Algorithm::Greedy => None,
            Algorithm::Grasp { seed, .. } | Algorithm::Reactive { seed, .. } => Some(*seed),
        }
    }
}

/** parameters of a run, read from the command line */
#[derive(Debug, Clone, PartialEq)]
pub struct RunParams {
    /// instance file
    pub instance: String,
    /// defect budget
    pub d: usize,
    /// algorithm and its parameters
    pub algorithm: Algorithm,
    /// CSV result log
    pub csv_file: String,
    /// edge list export
    pub export_file: Option<String>,
    /// solution file (one line per color)
    pub solution_file: Option<String>,
    /// performance statistics (JSON)
    pub perf_file: Option<String>,
}

/// seed derived from the wall-clock time
pub fn time_seed() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|t| t.as_secs()).unwrap_or(0)
}

/// parses a mandatory argument
fn parse_arg<T:std::str::FromStr>(args:&ArgMatches, name:&str) -> Result<T, ColoringError> {
    let value = args.value_of(name)
        .ok_or_else(|| ColoringError::parameter(format!("missing argument {}", name)))?;
    value.parse::<T>()
        .map_err(|_| ColoringError::parameter(format!("unable to parse {} (got {:?})", name, value)))
}

/// parses an optional seed, defaulting to the wall-clock time
fn parse_seed(args:&ArgMatches) -> Result<u64, ColoringError> {
    match args.value_of("seed") {
        None => Ok(time_seed()),
        Some(_) => parse_arg(args, "seed"),
    }
}

/** reads command line input and returns the run parameters */
pub fn read_params(main_args:&ArgMatches) -> Result<RunParams, ColoringError> {
    let algorithm = match main_args.subcommand() {
        ("greedy", Some(_)) => Algorithm::Greedy,
        ("grasp", Some(args)) => Algorithm::Grasp {
            alpha: parse_arg(args, "alpha")?,
            iterations: parse_arg(args, "iterations")?,
            seed: parse_seed(args)?,
        },
        ("reactive", Some(args)) => Algorithm::Reactive {
            iterations: parse_arg(args, "iterations")?,
            block_size: parse_arg(args, "block_size")?,
            seed: parse_seed(args)?,
        },
        (name, _) => {
            return Err(ColoringError::parameter(
                format!("unknown algorithm {:?} (valid: greedy, grasp, reactive)", name)
            ));
        }
    };
    Ok(RunParams {
        instance: parse_arg(main_args, "instance")?,
        d: parse_arg(main_args, "defects")?,
        algorithm,
        csv_file: main_args.value_of("csv").unwrap_or("results.csv").to_string(),
        export_file: main_args.value_of("export").map(|s| s.to_string()),
        solution_file: main_args.value_of("solution").map(|s| s.to_string()),
        perf_file: main_args.value_of("perf").map(|s| s.to_string()),
    })
}

/** performance statistics of a run (JSON) */
pub fn stats_to_json(params:&RunParams, sol:&Solution, arms:Option<&AlphaArms>) -> Value {
    json!({
        "inst_name": params.instance,
        "algorithm": params.algorithm.name(),
        "d": params.d,
        "alpha": params.algorithm.alpha(),
        "iterations": params.algorithm.iterations(),
        "block_size": params.algorithm.block_size(),
        "seed": params.algorithm.seed(),
        "time_searched": sol.time_searched,
        "nb_colors": sol.nb_colors,
        "nb_defects": sol.nb_defects,
        "best_alpha": sol.best_alpha(),
        "mean_nb_colors": sol.mean_nb_colors,
        "arms": arms.map(|a| a.arms()),
    })
}

/** writes a solution into a file. each line corresponds to a color. */
pub fn write_solution(filename:&str, sol:&Solution) -> Result<(), ColoringError> {
    let mut res = String::default();
    for e in solution_to_partition(&sol.colors) {
        for v in e {
            res += format!("{} ", v).as_str();
        }
        res += "\n";
    }
    fs::write(filename, res)?;
    Ok(())
}

/// exports search results to files (CSV log, and optionally solution, statistics and edge list)
pub fn export_results(
    instance:&Graph,
    params:&RunParams,
    sol:&Solution,
    arms:Option<&AlphaArms>,
) -> Result<(), ColoringError> {
    let mut log = CsvLog::open(&params.csv_file)?;
    log.append(&RunRecord::new(params, sol))?;
    info!("results appended to {}", params.csv_file);
    if let Some(filename) = &params.perf_file {
        fs::write(filename, serde_json::to_string(&stats_to_json(params, sol, arms))?)?;
        info!("statistics written to {}", filename);
    }
    if let Some(filename) = &params.solution_file {
        let checker_result = checker(instance, params.d, &sol.colors);
        info!("checker: {:?}", checker_result);
        write_solution(filename, sol)?;
        info!("solution written to {}", filename);
    }
    if let Some(filename) = &params.export_file {
        write_edge_list(instance, filename)?;
        info!("edge list exported to {}", filename);
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    use clap::{App, Arg, SubCommand};

    use crate::search::greedy::greedy_defective;

    fn app() -> App<'static, 'static> {
        App::new("test")
            .arg(Arg::with_name("instance").required(true).index(1))
            .arg(Arg::with_name("defects").short("d").takes_value(true).required(true))
            .arg(Arg::with_name("csv").long("csv").takes_value(true))
            .arg(Arg::with_name("perf").long("perf").takes_value(true))
            .subcommand(SubCommand::with_name("greedy"))
            .subcommand(SubCommand::with_name("grasp")
                .arg(Arg::with_name("alpha").required(true).index(1))
                .arg(Arg::with_name("iterations").required(true).index(2))
                .arg(Arg::with_name("seed").index(3)))
            .subcommand(SubCommand::with_name("reactive")
                .arg(Arg::with_name("iterations").required(true).index(1))
                .arg(Arg::with_name("block_size").required(true).index(2))
                .arg(Arg::with_name("seed").index(3)))
    }

    #[test]
    fn test_read_params_grasp() {
        let args = app().get_matches_from(vec!["test", "g.txt", "-d", "2", "grasp", "0.5", "100", "42"]);
        let params = read_params(&args).unwrap();
        assert_eq!(params.instance, "g.txt");
        assert_eq!(params.d, 2);
        assert_eq!(params.algorithm, Algorithm::Grasp { alpha: 0.5, iterations: 100, seed: 42 });
        assert_eq!(params.csv_file, "results.csv");
        assert!(params.perf_file.is_none());
    }

    #[test]
    fn test_read_params_reactive_default_seed() {
        let args = app().get_matches_from(vec!["test", "g.txt", "-d", "1", "--csv", "out.csv", "reactive", "50", "10"]);
        let params = read_params(&args).unwrap();
        assert_eq!(params.algorithm.iterations(), Some(50));
        assert_eq!(params.algorithm.block_size(), Some(10));
        assert!(params.algorithm.seed().is_some());
        assert_eq!(params.csv_file, "out.csv");
    }

    #[test]
    fn test_read_params_errors() {
        let args = app().get_matches_from(vec!["test", "g.txt", "-d", "x", "greedy"]);
        assert!(matches!(read_params(&args), Err(ColoringError::InvalidParameter(_))));
        let args = app().get_matches_from(vec!["test", "g.txt", "-d", "1"]);
        assert!(matches!(read_params(&args), Err(ColoringError::InvalidParameter(_))));
    }

    #[test]
    fn test_export_results() {
        let g = Graph::from_file("insts/cycle_chord6.txt").unwrap();
        let sol = greedy_defective(&g, 1);
        let dir = tempfile::tempdir().unwrap();
        let file = |name:&str| dir.path().join(name).to_str().unwrap().to_string();
        let params = RunParams {
            instance: "insts/cycle_chord6.txt".to_string(),
            d: 1,
            algorithm: Algorithm::Greedy,
            csv_file: file("results.csv"),
            export_file: Some(file("edges.txt")),
            solution_file: Some(file("sol.txt")),
            perf_file: Some(file("perf.json")),
        };
        export_results(&g, &params, &sol, None).unwrap();
        let perf:Value = serde_json::from_str(&fs::read_to_string(file("perf.json")).unwrap()).unwrap();
        assert_eq!(perf["nb_colors"], json!(sol.nb_colors));
        assert_eq!(perf["algorithm"], json!("greedy"));
        assert!(perf["arms"].is_null());
        let sol_lines = fs::read_to_string(file("sol.txt")).unwrap();
        assert_eq!(sol_lines.lines().count(), sol.nb_colors);
        assert_eq!(fs::read_to_string(file("edges.txt")).unwrap().lines().count(), 8);
        assert_eq!(fs::read_to_string(file("results.csv")).unwrap().lines().count(), 2);
    }
}
