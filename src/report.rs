/*
Implements the reporting formats:
 - human readable solution dump and alpha statistics
 - CSV result log (one row per run)
 - edge list export for graph visualization tools
*/
use std::fs::{self, File, OpenOptions};
use std::path::Path;

use chrono::Local;
use csv::WriterBuilder;
use serde::Serialize;

use crate::coloring::{Solution, validate};
use crate::error::ColoringError;
use crate::graph::Graph;
use crate::search::reactive::AlphaArms;
use crate::util::RunParams;

/// header of the CSV result log
pub const CSV_HEADER:[&str ; 13] = [
    "Timestamp", "Instance", "Algorithm", "d", "Alpha", "Iterations", "BlockSize", "Seed",
    "TimeSeconds", "ColorCount", "DefectCount", "BestAlphaFraction", "MeanColorCount",
];

/** writes a human readable description of the solution */
pub fn solution_to_string(inst:&Graph, d:usize, sol:&Solution) -> String {
    let mut res = String::from("=== SOLUTION ===\n");
    res += format!("number of colors: {}\n", sol.nb_colors).as_str();
    res += format!("number of defects: {}\n", sol.nb_defects).as_str();
    res += format!("time: {:.4} seconds\n", sol.time_searched).as_str();
    if let Some(alpha) = sol.best_alpha() {
        res += format!("alpha of the best solution: {:.2}\n", alpha).as_str();
    }
    if let Some(mean) = sol.mean_nb_colors {
        res += format!("mean number of colors (all iterations): {:.2}\n", mean).as_str();
    }
    res += "\nvertex colors:\n";
    for (v,c) in sol.colors.iter().enumerate() {
        match c {
            Some(c) => { res += format!("vertex {}: color {}\n", v, c).as_str(); },
            None => { res += format!("vertex {}: uncolored\n", v).as_str(); },
        }
    }
    if validate(inst, d, sol) {
        res += "\nvalid solution\n";
    } else {
        res += "\ninvalid solution\n";
    }
    res
}

/** writes the statistics of each alpha (reactive GRASP) and the alpha with the best mean */
pub fn arms_to_string(arms:&AlphaArms) -> String {
    let mut res = String::from("=== alpha statistics ===\n");
    for arm in arms.arms() {
        match arm.mean_quality() {
            Some(q) => {
                res += format!(
                    "alpha {:.2}: chosen {} times, mean quality = {:.2}, probability = {:.4}\n",
                    arm.alpha, arm.nb_chosen, q, arm.probability
                ).as_str();
            },
            None => { res += format!("alpha {:.2}: never chosen\n", arm.alpha).as_str(); },
        }
    }
    if let Some(best) = arms.best_arm() {
        res += format!("best mean quality: alpha {:.2}\n", best.alpha).as_str();
    }
    res
}

/** edge list: one "u v" line per unordered edge */
pub fn edge_list_to_string(inst:&Graph) -> String {
    let mut res = String::default();
    for (u,v) in inst.edges() {
        res += format!("{} {}\n", u, v).as_str();
    }
    res
}

/** exports the graph as an edge list (graph visualization tools) */
pub fn write_edge_list(inst:&Graph, filename:&str) -> Result<(), ColoringError> {
    fs::write(filename, edge_list_to_string(inst))?;
    Ok(())
}


/** one row of the CSV result log */
#[derive(Debug, Clone, Serialize)]
pub struct RunRecord {
    /// local date and time of the run
    pub timestamp: String,
    /// instance file
    pub instance: String,
    /// algorithm name
    pub algorithm: String,
    /// defect budget
    pub d: usize,
    /// alpha (GRASP only)
    pub alpha: Option<String>,
    /// number of iterations
    pub iterations: Option<usize>,
    /// block size (reactive GRASP only)
    pub block_size: Option<usize>,
    /// random seed
    pub seed: Option<u64>,
    /// time (seconds)
    pub time_seconds: String,
    /// number of colors
    pub color_count: usize,
    /// number of defects
    pub defect_count: usize,
    /// alpha of the best solution (reactive GRASP only)
    pub best_alpha_fraction: Option<String>,
    /// mean number of colors over the iterations
    pub mean_color_count: Option<String>,
}

impl RunRecord {
    /// creates the record of a run
    pub fn new(params:&RunParams, sol:&Solution) -> Self {
        let algorithm = &params.algorithm;
        Self {
            timestamp: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            instance: params.instance.clone(),
            algorithm: algorithm.name().to_string(),
            d: params.d,
            alpha: algorithm.alpha().map(|a| format!("{:.4}", a)),
            iterations: algorithm.iterations(),
            block_size: algorithm.block_size(),
            seed: algorithm.seed(),
            time_seconds: format!("{:.4}", sol.time_searched),
            color_count: sol.nb_colors,
            defect_count: sol.nb_defects,
            best_alpha_fraction: sol.best_alpha().map(|a| format!("{:.4}", a)),
            mean_color_count: sol.mean_nb_colors.map(|m| format!("{:.4}", m)),
        }
    }
}

/**
CSV result log opened in append mode. The header is written when (and only when) the file is
created. Each appended row is flushed, the file is closed when the log is dropped.
*/
#[derive(Debug)]
pub struct CsvLog {
    /// csv writer over the log file
    writer: csv::Writer<File>,
}

impl CsvLog {
    /// opens (or creates) the log, writing the header if the file does not exist yet
    pub fn open(path:impl AsRef<Path>) -> Result<Self, ColoringError> {
        let path = path.as_ref();
        let existed = path.exists();
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
        if !existed {
            writer.write_record(&CSV_HEADER)?;
            writer.flush()?;
        }
        Ok(Self { writer })
    }

    /// appends a row to the log
    pub fn append(&mut self, record:&RunRecord) -> Result<(), ColoringError> {
        self.writer.serialize(record)?;
        self.writer.flush()?;
        Ok(())
    }
}
