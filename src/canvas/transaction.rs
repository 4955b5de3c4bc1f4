//! Scoped speculation over a canvas state

use crate::canvas::engine::{CanvasState, UndoRecord};
use crate::io::error::Result;
use crate::isl::instruction::Instruction;
use tracing::warn;

/// Instructions applied speculatively; dropping the guard undoes them in reverse order
///
/// Nested speculation borrows the transaction mutably through [`Transaction::begin`],
/// so an inner transaction always unwinds before the outer one continues.
#[derive(Debug)]
pub struct Transaction<'a> {
    state: &'a mut CanvasState,
    journal: Vec<(Instruction, UndoRecord)>,
}

impl<'a> Transaction<'a> {
    pub(crate) const fn new(state: &'a mut CanvasState) -> Self {
        Self {
            state,
            journal: Vec::new(),
        }
    }

    /// Apply an instruction and record how to undo it, returning its cost
    ///
    /// # Errors
    ///
    /// Returns the engine's rejection; nothing is recorded in that case
    pub fn apply(&mut self, instruction: &Instruction) -> Result<u64> {
        let record = self.state.apply(instruction)?;
        let cost = record.cost();
        self.journal.push((instruction.clone(), record));
        Ok(cost)
    }

    /// Open a nested transaction on the same state
    pub fn begin(&mut self) -> Transaction<'_> {
        self.state.begin()
    }

    /// Read access to the speculative state
    pub fn state(&self) -> &CanvasState {
        self.state
    }

    /// Mutable access for nested work; changes made here outside a transaction are not journaled
    pub const fn state_mut(&mut self) -> &mut CanvasState {
        self.state
    }

    /// Number of recorded instructions
    pub fn len(&self) -> usize {
        self.journal.len()
    }

    /// Whether nothing has been applied yet
    pub fn is_empty(&self) -> bool {
        self.journal.is_empty()
    }

    /// Summed cost of the recorded instructions
    pub fn cost(&self) -> u64 {
        self.journal.iter().map(|(_, record)| record.cost()).sum()
    }

    /// Keep every recorded effect, returning their summed cost
    pub fn commit(mut self) -> u64 {
        let cost = self.cost();
        self.journal.clear();
        cost
    }

    /// Undo everything now instead of at the end of the scope
    pub fn rollback(self) {
        drop(self);
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        while let Some((instruction, record)) = self.journal.pop() {
            if let Err(error) = self.state.undo(&instruction, record) {
                warn!(%instruction, %error, "Failed to undo speculative instruction");
            }
        }
    }
}
