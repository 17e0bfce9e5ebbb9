//! Heuristics for the defective coloring problem.

/// defect budget check used by every constructive algorithm
pub mod feasibility;

/// greedy algorithm (static decreasing degree order)
pub mod greedy;

/// GRASP (randomized greedy with a restricted candidate list)
pub mod grasp;

/// reactive GRASP (alpha tuned online)
pub mod reactive;
