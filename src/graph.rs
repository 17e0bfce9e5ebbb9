use bit_set::BitSet;
use tracing::warn;

use crate::error::ColoringError;
use crate::reader::read_from_file;

/** Vertex Id */
pub type VertexId = usize;

/** models an undirected graph to color (adjacency lists, multi-edges and self-loops allowed) */
#[derive(Debug, Clone)]
pub struct Graph {
    /// nb vertices
    n: usize,
    /// nb inserted edges (each pair counted once)
    m: usize,
    /// adj_list[i]: list of vertices adjacent to i (in insertion order)
    adj_list: Vec<Vec<VertexId>>,
    /// if exists: adj_matrix[i] represents a bitset of its neighbors
    adj_matrix: Option<Vec<BitSet>>,
}


impl Graph {

    /// creates a graph with n vertices and no edges
    pub fn new(n:usize) -> Self {
        Self { n, m:0, adj_list: vec![Vec::new() ; n], adj_matrix: None }
    }

    /** creates a graph with n vertices, returning an error if n vertices cannot be allocated
    (for instance, when n comes from a corrupted file header). */
    pub fn try_new(n:usize) -> Result<Self, ColoringError> {
        let mut adj_list:Vec<Vec<VertexId>> = Vec::new();
        adj_list.try_reserve_exact(n).map_err(|_| {
            ColoringError::MalformedInstance(format!("unable to allocate {} vertices", n))
        })?;
        adj_list.resize(n, Vec::new());
        Ok(Self { n, m:0, adj_list, adj_matrix: None })
    }

    /** builds a graph from an edge list. Invalid edges are reported and skipped. */
    pub fn from_edges(n:usize, edges:&[(VertexId,VertexId)]) -> Self {
        let mut res = Self::new(n);
        for (u,v) in edges {
            if let Err(e) = res.add_edge(*u, *v) {
                warn!("{}", e);
            }
        }
        res
    }

    /// creates a graph from an instance file (see [`crate::reader`])
    pub fn from_file(filename:&str) -> Result<Self, ColoringError> {
        read_from_file(filename)
    }

    /** adds the undirected edge (u,v). The graph is left untouched if u or v is out of range. */
    pub fn add_edge(&mut self, u:VertexId, v:VertexId) -> Result<(), ColoringError> {
        if u >= self.n || v >= self.n {
            return Err(ColoringError::InvalidEdge { u: u as i64, v: v as i64, n: self.n });
        }
        self.adj_list[u].push(v);
        self.adj_list[v].push(u);
        if let Some(matrix) = &mut self.adj_matrix {
            matrix[u].insert(v);
            matrix[v].insert(u);
        }
        self.m += 1;
        Ok(())
    }

    /// number of vertices
    pub fn nb_vertices(&self) -> usize { self.n }

    /// number of edges
    pub fn nb_edges(&self) -> usize { self.m }

    /// list of vertices adjacent to vertex u (duplicated edges appear several times)
    pub fn neighbors(&self, u:VertexId) -> &[VertexId] { &self.adj_list[u] }

    /// degree of u (counts duplicated edges and self-loops)
    pub fn degree(&self, u:VertexId) -> usize { self.adj_list[u].len() }

    /// maximum degree of the graph (0 if the graph is empty)
    pub fn max_degree(&self) -> usize {
        (0..self.n).map(|u| self.degree(u)).max().unwrap_or(0)
    }

    /** returns if u and v are adjacent
    if the adjacency matrix is defined: O(1)
    otherwise: O(Δ(G))
    */
    pub fn edge_exists(&self, u:VertexId, v:VertexId) -> bool {
        match &self.adj_matrix {
            None => { self.adj_list[u].iter().any(|c| &v==c) },
            Some(matrix) => { matrix[u].contains(v) }
        }
    }

    /** edge list. Each unordered pair is returned once, smallest endpoint first,
    ordered by first endpoint then by adjacency order. */
    pub fn edges(&self) -> Vec<(VertexId,VertexId)> {
        let mut res = Vec::new();
        let mut seen = BitSet::with_capacity(self.n);
        for (u,l) in self.adj_list.iter().enumerate() {
            seen.clear();
            for v in l {
                if u <= *v && seen.insert(*v) {
                    res.push((u,*v));
                }
            }
        }
        res
    }

    /// if called, populate the adj_matrix
    pub fn populate_adj_matrix(&mut self) {
        let mut res = vec![BitSet::default(); self.n];
        for (a,resa) in res.iter_mut().enumerate() {
            for b in &self.adj_list[a] {
                resa.insert(*b);
            }
        }
        self.adj_matrix = Some(res);
    }

    /// print statistics of the instance
    pub fn display_statistics(&self) {
        println!("\t{} \t vertices", self.nb_vertices());
        println!("\t{} \t edges", self.nb_edges());
        let degrees:Vec<usize> = (0..self.nb_vertices()).map(|i| self.degree(i)).collect();
        if let (Some(min), Some(max)) = (degrees.iter().min(), degrees.iter().max()) {
            println!("\t{} \t min degree", min);
            println!("\t{} \t max degree", max);
        }
        if self.adj_matrix.is_some() {
            println!("\tadj matrix computed");
        }
    }
}
