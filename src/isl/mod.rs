//! The ISL instruction language
//!
//! This module contains:
//! - Block identifiers addressing the partition hierarchy
//! - The instruction model and its cost table
//! - Programs and their score breakdown
//! - Program text parsing for replay

/// Block identifiers
pub mod block_id;
/// Instruction model and base costs
pub mod instruction;
/// Program text parsing
pub mod parser;
/// Instruction sequences and rendering
pub mod program;

pub use block_id::BlockId;
pub use instruction::{Instruction, Opcode, Orientation};
pub use program::{Program, ProgramScore};
