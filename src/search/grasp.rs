use std::time::Instant;

use fastrand::Rng;
use tracing::{debug, info};

use crate::coloring::{PartialColoring, Solution, is_better};
use crate::error::ColoringError;
use crate::graph::{Graph, VertexId};
use crate::search::feasibility::first_feasible_color;

/// returns an error if alpha is not in [0,1]
pub fn check_alpha(alpha:f64) -> Result<(), ColoringError> {
    if (0. ..=1.).contains(&alpha) { Ok(()) }
    else { Err(ColoringError::parameter(format!("alpha must be in [0,1] (got {})", alpha))) }
}

/// returns an error if no iteration is requested
pub fn check_iterations(iterations:usize) -> Result<(), ColoringError> {
    if iterations >= 1 { Ok(()) }
    else { Err(ColoringError::parameter("the number of iterations must be at least 1")) }
}

/**
restricted candidate list: remaining vertices whose degree is at least
min_degree + α.(max_degree - min_degree). The list is sorted by decreasing degree.
α = 1 keeps only the vertices of maximum degree, α = 0 keeps every remaining vertex.
*/
pub fn restricted_candidate_list(
    inst:&Graph, remaining:&[VertexId], alpha:f64
) -> Result<Vec<VertexId>, ColoringError> {
    let mut candidates:Vec<(usize,VertexId)> = remaining.iter()
        .map(|v| (inst.degree(*v), *v))
        .collect();
    candidates.sort_by(|a,b| b.cmp(a));
    let empty = || ColoringError::EmptyCandidateList { remaining: remaining.len() };
    let max_degree = candidates.first().ok_or_else(empty)?.0;
    let min_degree = candidates.last().ok_or_else(empty)?.0;
    let threshold = min_degree as f64 + alpha * (max_degree - min_degree) as f64;
    let rcl:Vec<VertexId> = candidates.iter()
        .filter(|(degree,_)| *degree as f64 >= threshold)
        .map(|(_,v)| *v)
        .collect();
    if rcl.is_empty() { return Err(empty()); }
    Ok(rcl)
}

/** builds one randomized greedy solution (one GRASP iteration).
    1. build the restricted candidate list among the uncolored vertices
    2. pick a vertex uniformly at random in it
    3. give it the smallest feasible color (or a new one)
    4. repeat until every vertex is colored
*/
pub fn grasp_construction(inst:&Graph, d:usize, alpha:f64, rng:&Rng) -> Result<Solution, ColoringError> {
    let n = inst.nb_vertices();
    let mut colors:PartialColoring = vec![None ; n];
    let mut remaining:Vec<VertexId> = (0..n).collect();
    let mut last_color = 0;
    while !remaining.is_empty() {
        let rcl = restricted_candidate_list(inst, &remaining, alpha)?;
        let v = rcl[rng.usize(0..rcl.len())];
        remaining.retain(|u| *u != v);
        let color = match first_feasible_color(inst, d, v, last_color, &colors) {
            Some(c) => c,
            None => { last_color += 1; last_color }
        };
        colors[v] = Some(color);
    }
    Ok(Solution::new(inst, colors, last_color+1))
}

/** GRASP: repeats the randomized construction and returns the best solution found
(fewer colors, then fewer defects). The returned solution also reports the mean number of colors
over all iterations.
*/
pub fn grasp(
    inst:&Graph, d:usize, iterations:usize, alpha:f64, rng:&Rng
) -> Result<Solution, ColoringError> {
    check_iterations(iterations)?;
    check_alpha(alpha)?;
    let t_start = Instant::now();
    let mut best = grasp_construction(inst, d, alpha, rng)?;
    let mut sum_nb_colors = best.nb_colors as f64;
    for iter in 1..iterations {
        let sol = grasp_construction(inst, d, alpha, rng)?;
        sum_nb_colors += sol.nb_colors as f64;
        if is_better(&sol, &best) {
            debug!(iter, nb_colors = sol.nb_colors, nb_defects = sol.nb_defects, "new best solution");
            best = sol;
        }
    }
    best.mean_nb_colors = Some(sum_nb_colors / iterations as f64);
    best.time_searched = t_start.elapsed().as_secs_f64();
    info!(nb_colors = best.nb_colors, nb_defects = best.nb_defects, alpha, iterations, "GRASP finished");
    Ok(best)
}


#[cfg(test)]
mod tests {
    use super::*;

    use crate::coloring::{validate, count_defects};
    use crate::search::greedy::greedy_defective;

    #[test]
    fn test_rcl_bounds() {
        // degrees: 0:1, 1:3, 2:2, 3:2
        let g = Graph::from_edges(4, &[(0,1), (1,2), (1,3), (2,3)]);
        let all = vec![0,1,2,3];
        assert_eq!(restricted_candidate_list(&g, &all, 1.).unwrap(), vec![1]);
        assert_eq!(restricted_candidate_list(&g, &all, 0.).unwrap(), vec![1,3,2,0]);
        assert_eq!(restricted_candidate_list(&g, &all, 0.5).unwrap(), vec![1,3,2]);
        assert_eq!(restricted_candidate_list(&g, &[0,2], 0.75).unwrap(), vec![2]);
    }

    #[test]
    fn test_rcl_empty_working_set() {
        let g = Graph::new(2);
        match restricted_candidate_list(&g, &[], 0.5) {
            Err(ColoringError::EmptyCandidateList { remaining }) => assert_eq!(remaining, 0),
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_grasp_valid_solutions() {
        let g = Graph::from_file("insts/petersen.txt").unwrap();
        let rng = Rng::with_seed(42);
        for d in 0..3 {
            for alpha in &[0., 0.25, 0.5, 0.75, 1.] {
                let sol = grasp(&g, d, 5, *alpha, &rng).unwrap();
                assert!(validate(&g, d, &sol));
                assert_eq!(sol.nb_defects, count_defects(&g, &sol.colors));
                assert_eq!(sol.nb_colors, sol.colors.iter().flatten().max().unwrap() + 1);
                let mean = sol.mean_nb_colors.unwrap();
                assert!(mean >= sol.nb_colors as f64);
                assert!(sol.best_alpha_percent.is_none());
            }
        }
    }

    #[test]
    fn test_grasp_single_iteration_max_degree() {
        let g = Graph::from_file("insts/cycle_chord6.txt").unwrap();
        let greedy = greedy_defective(&g, 1);
        for seed in 0..20 {
            let sol = grasp(&g, 1, 1, 1., &Rng::with_seed(seed)).unwrap();
            assert!(validate(&g, 1, &sol));
            assert!(sol.nb_colors <= greedy.nb_colors);
            assert_eq!(sol.mean_nb_colors, Some(sol.nb_colors as f64));
        }
    }

    #[test]
    fn test_grasp_duplicated_edges() {
        let g = Graph::from_edges(6, &[(0,3), (0,4), (0,5), (0,1), (1,2), (1,2), (2,3), (2,3), (2,3)]);
        for seed in 0..20 {
            for d in 0..4 {
                let sol = grasp(&g, d, 3, 0., &Rng::with_seed(seed)).unwrap();
                assert!(validate(&g, d, &sol));
            }
        }
    }

    #[test]
    fn test_grasp_reproducible() {
        let g = Graph::from_file("insts/petersen.txt").unwrap();
        let sol1 = grasp(&g, 1, 10, 0.25, &Rng::with_seed(7)).unwrap();
        let sol2 = grasp(&g, 1, 10, 0.25, &Rng::with_seed(7)).unwrap();
        assert_eq!(sol1.colors, sol2.colors);
        assert_eq!(sol1.mean_nb_colors, sol2.mean_nb_colors);
    }

    #[test]
    fn test_grasp_invalid_parameters() {
        let g = Graph::new(3);
        let rng = Rng::with_seed(0);
        assert!(matches!(grasp(&g, 0, 0, 0.5, &rng), Err(ColoringError::InvalidParameter(_))));
        assert!(matches!(grasp(&g, 0, 3, 1.5, &rng), Err(ColoringError::InvalidParameter(_))));
        assert!(matches!(grasp(&g, 0, 3, f64::NAN, &rng), Err(ColoringError::InvalidParameter(_))));
    }

    #[test]
    fn test_grasp_empty_graph() {
        let sol = grasp(&Graph::new(0), 0, 3, 0.5, &Rng::with_seed(1)).unwrap();
        assert_eq!(sol.nb_colors, 1);
        assert_eq!(sol.nb_defects, 0);
        assert_eq!(sol.mean_nb_colors, Some(1.));
    }
}
