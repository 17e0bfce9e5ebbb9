use crate::coloring::ColorId;
use crate::graph::{Graph, VertexId};

/**
returns true if coloring v with c keeps every vertex within its defect budget d.
    1. v may have at most d neighbors already colored with c
    2. every neighbor u colored with c must currently have strictly less than d neighbors
       colored with c (v becomes one more of them, once per edge between u and v)
v is supposed to be uncolored. The coloring is not modified.
Complexity: O(Δ(G)²)
*/
pub fn can_assign(inst:&Graph, d:usize, v:VertexId, c:ColorId, colors:&[Option<ColorId>]) -> bool {
    let mut nb_defects_v:usize = 0;
    for u in inst.neighbors(v) {
        if colors[*u] != Some(c) { continue; }
        nb_defects_v += 1;
        let mut nb_defects_u:usize = 0;
        let mut nb_edges_uv:usize = 0;
        for w in inst.neighbors(*u) {
            if colors[*w] == Some(c) { nb_defects_u += 1; }
            if *w == v { nb_edges_uv += 1; }
        }
        if nb_defects_u + nb_edges_uv > d { return false; }
    }
    nb_defects_v <= d
}

/** first color in 0..=last_color accepted by the feasibility check, None if every color is rejected */
pub fn first_feasible_color(
    inst:&Graph, d:usize, v:VertexId, last_color:ColorId, colors:&[Option<ColorId>]
) -> Option<ColorId> {
    (0..=last_color).find(|c| can_assign(inst, d, v, *c, colors))
}
