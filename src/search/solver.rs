//! Branch-and-bound search for the best short program on one block
//!
//! At each level the solver tries three recolors and a grid of line and point cuts,
//! applies each inside a transaction and recurses into the blocks the candidate
//! produced. At depth zero it only decides whether painting the median color pays
//! for itself. Results are gathered in a caller-owned [`SearchResult`] that only
//! accepts strictly better offers, so the first of several equal programs wins.

use crate::canvas::engine::CanvasState;
use crate::io::error::{AlgorithmError, Result};
use crate::isl::block_id::BlockId;
use crate::isl::instruction::{Instruction, Opcode};
use crate::isl::program::Program;
use crate::search::cache::{CacheStats, RegionColorCache};
use crate::search::candidates::candidates;
use tracing::debug;

/// Best program found so far together with its whole-canvas score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    /// Canvas error plus instruction cost after running the program
    pub score: u64,
    /// Instructions to append to the committed program
    pub program: Program,
}

impl SearchResult {
    /// Empty result that only accepts programs scoring below `score`
    pub const fn bound(score: u64) -> Self {
        Self {
            score,
            program: Program::new(),
        }
    }

    /// Empty result accepting anything
    pub const fn unbounded() -> Self {
        Self::bound(u64::MAX)
    }

    /// Replace the result if `score` is strictly better, returning whether it was taken
    pub fn offer(&mut self, score: u64, program: Program) -> bool {
        if score < self.score {
            self.score = score;
            self.program = program;
            true
        } else {
            false
        }
    }
}

/// Recursive block solver with a color statistics cache shared across calls
#[derive(Debug, Default)]
pub struct Solver {
    cache: RegionColorCache,
    nodes: u64,
}

impl Solver {
    /// Create a solver with an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Color cache statistics
    pub const fn cache_stats(&self) -> CacheStats {
        self.cache.stats
    }

    /// Number of search nodes visited
    pub const fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search programs starting on `block` and offer them to `best`
    ///
    /// `running_cost` is the instruction cost already spent, including the committed
    /// program. The state is left exactly as it was found.
    ///
    /// # Errors
    ///
    /// Returns an error if `block` is not a valid block of the state
    pub fn solve(
        &mut self,
        state: &mut CanvasState,
        block: &BlockId,
        depth: u32,
        running_cost: u64,
        best: &mut SearchResult,
    ) -> Result<()> {
        self.nodes += 1;
        let bounds = *state
            .lookup(block)
            .ok_or_else(|| AlgorithmError::UnknownBlock {
                id: block.to_string(),
                opcode: "solve",
            })?
            .bounds();
        let colors = self.cache.colors(state.target(), bounds);

        if depth == 0 {
            let unpainted = state.canvas_error() + running_cost;
            let paint = Instruction::Recolor {
                block: block.clone(),
                color: colors.median,
            };
            let mut transaction = state.begin();
            let painted = transaction
                .apply(&paint)
                .map(|cost| transaction.state().canvas_error() + running_cost + cost);
            drop(transaction);

            match painted {
                Ok(score) if score < unpainted => best.offer(score, Program::from(vec![paint])),
                _ => best.offer(unpainted, Program::new()),
            };
            return Ok(());
        }

        for candidate in candidates(block, bounds, colors, depth) {
            let mut transaction = state.begin();
            let cost = match transaction.apply(&candidate) {
                Ok(cost) => cost,
                Err(error) => {
                    debug!(%candidate, %error, "Skipping candidate");
                    continue;
                }
            };

            for child in continuation_blocks(&candidate)? {
                let mut child_best = SearchResult::bound(best.score);
                self.solve(
                    transaction.state_mut(),
                    &child,
                    depth - 1,
                    running_cost + cost,
                    &mut child_best,
                )?;
                let mut program = Program::from(vec![candidate.clone()]);
                program.extend_from(&child_best.program);
                best.offer(child_best.score, program);
            }
        }
        Ok(())
    }
}

/// Blocks searched after a candidate: quadrants 2, 3, 0, 1 after a point cut, both
/// halves after a line cut, the block itself after a recolor
fn continuation_blocks(candidate: &Instruction) -> Result<Vec<BlockId>> {
    let block = candidate.block();
    match candidate.opcode() {
        Opcode::PointCut => [2, 3, 0, 1].into_iter().map(|slot| block.child(slot)).collect(),
        Opcode::LineCut => [0, 1].into_iter().map(|slot| block.child(slot)).collect(),
        Opcode::Recolor | Opcode::Swap | Opcode::Merge => Ok(vec![block.clone()]),
    }
}
