//! Greedy, GRASP and reactive GRASP heuristics for the defective graph coloring problem

// #![warn(clippy::all, clippy::pedantic)]
// useful additional warnings if docs are missing, or crates imported but unused, etc.
#![warn(missing_debug_implementations)]
#![warn(missing_docs)]
#![warn(trivial_casts, trivial_numeric_casts)]
#![warn(unsafe_code)]
#![warn(unused_extern_crates)]
#![warn(variant_size_differences)]

// not sure if already by default in clippy
#![warn(clippy::similar_names)]
#![warn(clippy::shadow_unrelated)]
#![warn(clippy::shadow_same)]
#![warn(clippy::shadow_reuse)]


/// graph to color
pub mod graph;

/// read instance files
pub mod reader;

/// colorings, solutions and checker
pub mod coloring;

/// error type
pub mod error;

/// heuristics for the defective coloring problem
pub mod search;

/// solution dump, CSV log and edge list export
pub mod report;

/// helper and utility methods for executables
pub mod util;
