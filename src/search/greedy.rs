use std::time::Instant;

use tracing::info;

use crate::coloring::{PartialColoring, Solution};
use crate::graph::{Graph, VertexId};
use crate::search::feasibility::first_feasible_color;

/** vertices sorted by decreasing degree (ties: decreasing vertex id) */
pub fn vertices_by_degree(inst:&Graph) -> Vec<VertexId> {
    let mut res:Vec<VertexId> = (0..inst.nb_vertices()).collect();
    res.sort_by(|a,b| (inst.degree(*b), *b).cmp(&(inst.degree(*a), *a)));
    res
}

/** implements the greedy algorithm for the defective coloring problem.
    1. sort the vertices by decreasing degree (computed once)
    2. give each vertex the smallest color it can take without exceeding the defect budget d
       (its own one and the one of its neighbors)
    3. if no existing color fits, open a new color
The algorithm is deterministic. An empty graph is reported as using 1 color.
*/
pub fn greedy_defective(inst:&Graph, d:usize) -> Solution {
    let t_start = Instant::now();
    let n = inst.nb_vertices();
    let mut colors:PartialColoring = vec![None ; n];
    let mut last_color = 0;
    for v in vertices_by_degree(inst) {
        let color = match first_feasible_color(inst, d, v, last_color, &colors) {
            Some(c) => c,
            None => { last_color += 1; last_color }
        };
        colors[v] = Some(color);
    }
    let mut res = Solution::new(inst, colors, last_color+1);
    res.time_searched = t_start.elapsed().as_secs_f64();
    info!(nb_colors = res.nb_colors, nb_defects = res.nb_defects, "greedy finished");
    res
}
