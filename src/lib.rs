//! Synthesis of low-cost block programs approximating a target image
//!
//! A canvas starts as one blank block (or the blocks of an initial configuration) and
//! is transformed by a five-instruction language: point cuts, line cuts, recolors,
//! swaps and merges. Each instruction costs more the smaller the block it touches, and
//! the final canvas is charged for its pixel distance to the target. The search combines
//! a depth-bounded branch-and-bound solver per block, a local hill climber over
//! instruction parameters, and greedy swap and merge passes for pre-cut canvases.

#![deny(unsafe_code)]

/// Canvas simulation: raster, block registry, apply/undo engine and transactions
pub mod canvas;
/// Input/output operations and error handling
pub mod io;
/// The ISL instruction language: block ids, instructions, programs and parsing
pub mod isl;
/// Pixel error kernels, instruction costs and region color statistics
pub mod scoring;
/// Solver, post-optimizer, swap/merge passes and the outer driver
pub mod search;

pub use canvas::{Bitmap, CanvasState, Transaction};
pub use io::error::{AlgorithmError, Result};
pub use isl::{BlockId, Instruction, Program, ProgramScore};
