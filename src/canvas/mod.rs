//! Canvas simulation
//!
//! This module contains:
//! - The RGBA raster used for the target and the working canvas
//! - Block records and the registry indexing them
//! - The engine applying and undoing instructions
//! - Transactions bracketing speculative work

/// RGBA raster
pub mod bitmap;
/// Block geometry and predicates
pub mod block;
/// Apply/undo engine
pub mod engine;
/// Block registry
pub mod registry;
/// Speculation guard
pub mod transaction;

pub use bitmap::Bitmap;
pub use block::{BlockRecord, Point, Rect};
pub use engine::{CanvasState, UndoRecord};
pub use registry::BlockRegistry;
pub use transaction::Transaction;
