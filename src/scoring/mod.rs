//! Scoring of canvases and instructions
//!
//! This module contains:
//! - Pixel error kernels comparing the canvas with the target
//! - The instruction cost formula
//! - Region color statistics used as paint candidates

/// Region color statistics
pub mod color;
/// Instruction cost formula
pub mod cost;
/// Pixel error kernels
pub mod pixel_error;

pub use cost::instruction_cost;
pub use pixel_error::{KernelChoice, LaneKernel, PixelErrorKernel, ScalarKernel, pixel_error};
