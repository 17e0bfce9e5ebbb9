use std::time::Instant;

use fastrand::Rng;
use ordered_float::OrderedFloat;
use serde::Serialize;
use tracing::{debug, info};

use crate::coloring::{Solution, is_better};
use crate::error::ColoringError;
use crate::graph::Graph;
use crate::search::grasp::{check_iterations, grasp_construction};

/// candidate values of alpha
pub const ALPHAS:[f64 ; 5] = [0., 0.25, 0.5, 0.75, 1.];

/** statistics of a candidate value of alpha */
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlphaArm {
    /// value of alpha
    pub alpha: f64,
    /// number of iterations that used this alpha
    pub nb_chosen: usize,
    /// sum of the number of colors obtained with this alpha
    pub quality_sum: f64,
    /// probability to choose this alpha
    pub probability: f64,
}

impl AlphaArm {
    /// mean number of colors obtained with this alpha (None if never chosen)
    pub fn mean_quality(&self) -> Option<f64> {
        if self.nb_chosen == 0 { None }
        else { Some(self.quality_sum / self.nb_chosen as f64) }
    }
}

/**
Probability distribution over the values of alpha, updated from the observed solution quality.
Every block of iterations, each chosen alpha receives a probability proportional to the inverse
of its mean number of colors. Alphas never chosen receive a probability of 0, and keep it.
*/
#[derive(Debug, Clone)]
pub struct AlphaArms {
    /// arms[i]: statistics of the ith alpha
    arms: Vec<AlphaArm>,
}

impl Default for AlphaArms {
    fn default() -> Self { Self::new(&ALPHAS) }
}

impl AlphaArms {
    /// creates the arms with a uniform distribution
    pub fn new(alphas:&[f64]) -> Self {
        let p = 1. / alphas.len() as f64;
        Self {
            arms: alphas.iter().map(|alpha| AlphaArm {
                alpha: *alpha, nb_chosen: 0, quality_sum: 0., probability: p
            }).collect()
        }
    }

    /// arm statistics
    pub fn arms(&self) -> &[AlphaArm] { &self.arms }

    /** selects an arm given r in [0,1): the first arm (of non-zero probability) whose
    cumulative probability reaches r. If rounding errors leave r above the total, the last arm
    of non-zero probability is selected. */
    pub fn select(&self, r:f64) -> usize {
        let mut cumulated = 0.;
        let mut last_possible = self.arms.len() - 1;
        for (i,arm) in self.arms.iter().enumerate() {
            if arm.probability <= 0. { continue; }
            last_possible = i;
            cumulated += arm.probability;
            if r <= cumulated { return i; }
        }
        last_possible
    }

    /// records the number of colors obtained by an iteration using the arm i
    pub fn record(&mut self, i:usize, nb_colors:usize) {
        self.arms[i].nb_chosen += 1;
        self.arms[i].quality_sum += nb_colors as f64;
    }

    /// recomputes the probabilities: p_i ∝ 1 / mean_quality_i for chosen arms, 0 otherwise
    pub fn reweight(&mut self) {
        let sum_inverses:f64 = self.arms.iter()
            .filter_map(|arm| arm.mean_quality())
            .map(|q| 1. / q)
            .sum();
        if sum_inverses <= 0. { return; } // no arm chosen yet
        for arm in self.arms.iter_mut() {
            arm.probability = match arm.mean_quality() {
                Some(q) => (1. / q) / sum_inverses,
                None => 0.,
            };
        }
    }

    /// arm with the lowest mean number of colors (None if no arm was chosen)
    pub fn best_arm(&self) -> Option<&AlphaArm> {
        self.arms.iter()
            .filter(|arm| arm.nb_chosen > 0)
            .min_by_key(|arm| OrderedFloat(arm.mean_quality().unwrap_or(f64::INFINITY)))
    }
}

/** result of the reactive GRASP: best solution and final arm statistics */
#[derive(Debug, Clone)]
pub struct ReactiveResult {
    /// best solution found
    pub solution: Solution,
    /// statistics of each alpha at the end of the run
    pub arms: AlphaArms,
}

/// returns an error if the block size is 0
pub fn check_block_size(block_size:usize) -> Result<(), ColoringError> {
    if block_size >= 1 { Ok(()) }
    else { Err(ColoringError::parameter("the block size must be at least 1")) }
}

/** Reactive GRASP.
    1. at each iteration, draw alpha from the current distribution over the alpha values
    2. run one randomized construction with it and record its number of colors
    3. keep the best solution (fewer colors, then fewer defects) and the alpha that produced it
    4. every block_size iterations, update the distribution
*/
pub fn reactive_grasp(
    inst:&Graph, d:usize, iterations:usize, block_size:usize, rng:&Rng
) -> Result<ReactiveResult, ColoringError> {
    check_iterations(iterations)?;
    check_block_size(block_size)?;
    let t_start = Instant::now();
    let mut arms = AlphaArms::default();
    let mut best:Option<Solution> = None;
    let mut sum_nb_colors = 0.;
    for iter in 0..iterations {
        let i = arms.select(rng.f64());
        let alpha = arms.arms()[i].alpha;
        let mut sol = grasp_construction(inst, d, alpha, rng)?;
        arms.record(i, sol.nb_colors);
        sum_nb_colors += sol.nb_colors as f64;
        if best.as_ref().map_or(true, |b| is_better(&sol, b)) {
            debug!(iter, alpha, nb_colors = sol.nb_colors, nb_defects = sol.nb_defects, "new best solution");
            sol.best_alpha_percent = Some((alpha * 100.).round() as u32);
            best = Some(sol);
        }
        if (iter+1) % block_size == 0 {
            arms.reweight();
            debug!(
                iter,
                probabilities = ?arms.arms().iter().map(|a| a.probability).collect::<Vec<f64>>(),
                "alpha probabilities updated"
            );
        }
    }
    let mut solution = best.ok_or_else(|| ColoringError::parameter("no iteration performed"))?;
    solution.mean_nb_colors = Some(sum_nb_colors / iterations as f64);
    solution.time_searched = t_start.elapsed().as_secs_f64();
    info!(
        nb_colors = solution.nb_colors, nb_defects = solution.nb_defects,
        best_alpha = ?solution.best_alpha(), iterations, block_size,
        "reactive GRASP finished"
    );
    Ok(ReactiveResult { solution, arms })
}
