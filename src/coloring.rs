use serde::Serialize;

use crate::graph::{Graph, VertexId};

/** Color Id */
pub type ColorId = usize;

/** coloring under construction: colors[v] is None while v is uncolored */
pub type PartialColoring = Vec<Option<ColorId>>;


/** Solution of a defective coloring problem. Frozen once returned by an algorithm. */
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// colors[v]: color of the vertex v
    pub colors: PartialColoring,
    /// number of colors (1 + largest color used)
    pub nb_colors: usize,
    /// number of neighbor pairs sharing a color
    pub nb_defects: usize,
    /// time taken to build the solution (seconds)
    pub time_searched: f64,
    /// alpha (in percent) that produced the solution (reactive GRASP only)
    pub best_alpha_percent: Option<u32>,
    /// mean number of colors over all the iterations (GRASP variants only)
    pub mean_nb_colors: Option<f64>,
}

impl Solution {
    /** builds a solution from a finished coloring, computing its number of defects. */
    pub fn new(inst:&Graph, colors:PartialColoring, nb_colors:usize) -> Self {
        let nb_defects = count_defects(inst, &colors);
        Self {
            colors, nb_colors, nb_defects,
            time_searched: 0.,
            best_alpha_percent: None,
            mean_nb_colors: None,
        }
    }

    /// alpha of the solution in [0,1] (reactive GRASP only)
    pub fn best_alpha(&self) -> Option<f64> {
        self.best_alpha_percent.map(|a| a as f64 / 100.)
    }
}

/** returns true if a is strictly better than b: fewer colors, then fewer defects */
pub fn is_better(a:&Solution, b:&Solution) -> bool {
    (a.nb_colors, a.nb_defects) < (b.nb_colors, b.nb_defects)
}

/** number of neighbor pairs (u,v) with u > v sharing the same color.
Each adjacency entry is counted, so duplicated edges count several times.
*/
pub fn count_defects(inst:&Graph, colors:&[Option<ColorId>]) -> usize {
    let mut res = 0;
    for v in 0..inst.nb_vertices() {
        if colors[v].is_none() { continue; }
        res += inst.neighbors(v).iter()
            .filter(|u| **u > v && colors[**u] == colors[v])
            .count();
    }
    res
}

/** number of colored neighbors of v sharing its color (0 if v is uncolored) */
pub fn vertex_defects(inst:&Graph, v:VertexId, colors:&[Option<ColorId>]) -> usize {
    match colors[v] {
        None => 0,
        Some(c) => inst.neighbors(v).iter().filter(|u| colors[**u] == Some(c)).count(),
    }
}

/// result of the checker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckerResult {
    /// valid solution, with its number of colors
    Ok(usize),
    /// the coloring does not have one entry per vertex (number of entries)
    WrongSize(usize),
    /// vertex not colored
    VertexNotColored(VertexId),
    /// vertex having more than d neighbors with its color (vertex, nb same-colored neighbors)
    TooManyDefects(VertexId, usize),
}

/**
checks a coloring: every vertex is colored and sees at most d neighbors of its color.
returns the number of colors if the solution is feasible.
*/
pub fn checker(inst:&Graph, d:usize, colors:&[Option<ColorId>]) -> CheckerResult {
    if colors.len() != inst.nb_vertices() {
        return CheckerResult::WrongSize(colors.len());
    }
    if let Some(v) = colors.iter().position(|c| c.is_none()) {
        return CheckerResult::VertexNotColored(v);
    }
    for v in 0..inst.nb_vertices() {
        let defects = vertex_defects(inst, v, colors);
        if defects > d {
            return CheckerResult::TooManyDefects(v, defects);
        }
    }
    CheckerResult::Ok(colors.iter().flatten().max().map_or(1, |c| c+1))
}

/** returns true if the solution is valid for the defect budget d */
pub fn validate(inst:&Graph, d:usize, sol:&Solution) -> bool {
    matches!(checker(inst, d, &sol.colors), CheckerResult::Ok(_))
}

/** converts a coloring to a partition (res[c]: vertices colored with c). Uncolored vertices are ignored. */
pub fn solution_to_partition(colors:&[Option<ColorId>]) -> Vec<Vec<VertexId>> {
    let nb_classes = colors.iter().flatten().max().map_or(0, |c| c+1);
    let mut res = vec![vec![] ; nb_classes];
    for (v,c) in colors.iter().enumerate() {
        if let Some(c) = c {
            res[*c].push(v);
        }
    }
    res
}
