/*
Reads graph instances in the edge-count format:
 - line 1: number of vertices
 - line 2: number of edges
 - then one edge "u v" per line (vertices indexed from 0)
*/
use std::fs;

use nom::IResult;
use nom::character::complete::{digit1, multispace0, space0, space1};
use nom::combinator::{all_consuming, map_res};
use nom::sequence::{delimited, separated_pair};
use tracing::warn;

use crate::error::ColoringError;
use crate::graph::Graph;


/// reads an instance from file
pub fn read_from_file(filename:&str) -> Result<Graph, ColoringError> {
    let content = fs::read_to_string(filename)
        .map_err(|source| ColoringError::FileUnreadable { path: filename.to_string(), source })?;
    read_from_str(&content)
}

/** reads an instance from its textual content.
Malformed edge lines and edges with out-of-range vertices are reported and skipped.
*/
pub fn read_from_str(content:&str) -> Result<Graph, ColoringError> {
    let s1 = content.replace("\r", "");
    let (s2, (n,m)) = read_header(s1.as_str()).map_err(|e| {
        ColoringError::MalformedInstance(format!("unable to read the header ({})", e))
    })?;
    let mut res = Graph::try_new(n)?;
    let mut nb_edge_lines = 0;
    for line in s2.lines().filter(|l| !l.trim().is_empty()) {
        nb_edge_lines += 1;
        match read_edge(line) {
            Ok((_,(u,v))) => {
                if let Err(e) = add_edge(&mut res, u, v) {
                    warn!("{}, skipped", e);
                }
            }
            Err(_) => { warn!("malformed edge line {:?}, skipped", line); }
        }
    }
    if nb_edge_lines != m {
        warn!("instance declares {} edges but {} edge lines were read", m, nb_edge_lines);
    }
    res.populate_adj_matrix();
    Ok(res)
}

/// adds an edge read from a file (negative ids are reported as invalid edges)
fn add_edge(graph:&mut Graph, u:i64, v:i64) -> Result<(), ColoringError> {
    if u < 0 || v < 0 {
        return Err(ColoringError::InvalidEdge { u, v, n: graph.nb_vertices() });
    }
    graph.add_edge(u as usize, v as usize)
}

/// reads a non-negative integer, skipping leading blanks and newlines
fn read_count(s:&str) -> IResult<&str, usize> {
    let (remaining, _) = multispace0(s)?;
    map_res(digit1, |d:&str| d.parse::<usize>())(remaining)
}

/// reads header containing (n,m)
pub fn read_header(s:&str) -> IResult<&str, (usize,usize)> {
    let (remaining, n) = read_count(s)?;
    let (remaining, m) = read_count(remaining)?;
    Ok((remaining, (n,m)))
}

/// reads an edge line "u v" (the whole line must be consumed)
pub fn read_edge(s:&str) -> IResult<&str, (i64,i64)> {
    all_consuming(delimited(
        space0,
        separated_pair(
            nom::character::complete::i64,
            space1,
            nom::character::complete::i64,
        ),
        space0,
    ))(s)
}


#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// creates a temporary instance file with the given content
    fn create_temp_instance(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_read_instance() {
        let inst = read_from_file("insts/cycle_chord6.txt").unwrap();
        assert_eq!(inst.nb_vertices(), 6);
        assert_eq!(inst.nb_edges(), 8);
        assert_eq!(inst.neighbors(3), &[1,2,4,5]);
    }

    #[test]
    fn test_read_header() {
        let s = "3\n2\n0 1\n1 2\n";
        assert_eq!(read_header(s).unwrap().1, (3,2));
        assert_eq!(read_header(s).unwrap().0, "\n0 1\n1 2\n");
    }

    #[test]
    fn test_read_edge() {
        assert_eq!(read_edge("0 1").unwrap().1, (0,1));
        assert_eq!(read_edge("  4\t7 ").unwrap().1, (4,7));
        assert_eq!(read_edge("-1 2").unwrap().1, (-1,2));
        assert!(read_edge("0").is_err());
        assert!(read_edge("a b").is_err());
        assert!(read_edge("0 1 2").is_err());
    }

    #[test]
    fn test_invalid_edges_are_skipped() {
        let file = create_temp_instance("3\n4\n0 1\n0 3\n-1 2\nfoo bar\n1 2\n");
        let inst = read_from_file(file.path().to_str().unwrap()).unwrap();
        assert_eq!(inst.nb_vertices(), 3);
        assert_eq!(inst.edges(), vec![(0,1), (1,2)]);
    }

    #[test]
    fn test_windows_line_endings() {
        let inst = read_from_str("2\r\n1\r\n0 1\r\n").unwrap();
        assert_eq!(inst.nb_edges(), 1);
    }

    #[test]
    fn test_malformed_header() {
        match read_from_str("three\n0\n") {
            Err(ColoringError::MalformedInstance(_)) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_huge_vertex_count() {
        for header in &["99999999999999\n0\n", "18446744073709551615\n0\n"] {
            match read_from_str(header) {
                Err(ColoringError::MalformedInstance(_)) => {}
                other => panic!("unexpected result {:?}", other),
            }
        }
    }

    #[test]
    fn test_adjacency_matrix_populated() {
        let inst = read_from_file("insts/cycle_chord6.txt").unwrap();
        assert!(inst.edge_exists(3, 5));
        assert!(inst.edge_exists(5, 3));
        assert!(!inst.edge_exists(0, 5));
    }

    #[test]
    fn test_unreadable_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.txt");
        match read_from_file(path.to_str().unwrap()) {
            Err(ColoringError::FileUnreadable { .. }) => {}
            other => panic!("unexpected result {:?}", other),
        }
    }
}
