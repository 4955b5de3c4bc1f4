//! Program search
//!
//! This module contains:
//! - The branch-and-bound block solver with its candidate generator and color cache
//! - The local hill-climbing post-optimizer
//! - Swap and merge passes for initial configurations
//! - The outer driver tying them together

/// Color statistics memoization
pub mod cache;
/// Candidate instruction generation
pub mod candidates;
/// Outer iterative driver
pub mod driver;
/// Pair exclusion memo for the swap pass
pub mod exclusion;
/// Parameter hill climbing
pub mod hill_climb;
/// Greedy merge pass
pub mod merge;
/// Branch-and-bound block solver
pub mod solver;
/// Greedy swap pass
pub mod swap;

pub use driver::{Driver, DriverConfig, Phase};
pub use hill_climb::hill_climb;
pub use solver::{SearchResult, Solver};
