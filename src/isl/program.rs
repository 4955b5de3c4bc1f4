//! Instruction sequences with their score breakdown

use crate::io::configuration::SOLVER_NAME;
use crate::isl::instruction::Instruction;
use std::fmt::Write;

/// Score breakdown of a program evaluated on a canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgramScore {
    /// Canvas error plus instruction cost
    pub total: u64,
    /// Sum of per-instruction costs
    pub instruction_cost: u64,
    /// Pixel error of the canvas after the program ran
    pub canvas_error: u64,
    /// Instructions the engine refused and skipped
    pub rejected: usize,
}

impl ProgramScore {
    /// Score used for comparisons; programs with rejected instructions never win
    pub const fn effective(&self) -> u64 {
        if self.rejected > 0 {
            u64::MAX
        } else {
            self.total
        }
    }
}

/// Ordered ISL instructions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    instructions: Vec<Instruction>,
}

impl Program {
    /// Create an empty program
    pub const fn new() -> Self {
        Self {
            instructions: Vec::new(),
        }
    }

    /// Instructions in execution order
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Mutable access for in-place parameter tweaks
    pub fn instructions_mut(&mut self) -> &mut [Instruction] {
        &mut self.instructions
    }

    /// Number of instructions
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Whether the program has no instructions
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Append one instruction
    pub fn push(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    /// Append all instructions of another program
    pub fn extend_from(&mut self, other: &Self) {
        self.instructions.extend(other.instructions.iter().cloned());
    }

    /// Drop recolors that are overwritten before anything else touches their block
    ///
    /// A recolor is redundant when the next instruction referencing the same block
    /// is another recolor of that block. Returns the number of removed instructions.
    pub fn remove_redundant_recolors(&mut self) -> usize {
        let before = self.instructions.len();
        let mut keep = vec![true; before];

        for (index, keep_flag) in keep.iter_mut().enumerate() {
            let Some(Instruction::Recolor { block, .. }) = self.instructions.get(index) else {
                continue;
            };
            let next_use = self
                .instructions
                .iter()
                .skip(index + 1)
                .find(|later| later.references(block));
            if matches!(next_use, Some(Instruction::Recolor { .. })) {
                *keep_flag = false;
            }
        }

        let mut flags = keep.into_iter();
        self.instructions.retain(|_| flags.next().unwrap_or(true));
        before - self.instructions.len()
    }

    /// Render as ISL text with the metadata header
    pub fn to_isl_text(&self, problem: u32, score: Option<&ProgramScore>) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "# Solver : {SOLVER_NAME}");
        let _ = writeln!(text, "# Problem : {problem}");
        if let Some(score) = score {
            let _ = writeln!(text, "# SCORE : {}", score.total);
            let _ = writeln!(text, "# Instructions : {}", score.instruction_cost);
            let _ = writeln!(text, "# Canvas error : {}", score.canvas_error);
        }
        text.push('\n');
        for instruction in &self.instructions {
            let _ = writeln!(text, "{instruction}");
        }
        text
    }
}

impl From<Vec<Instruction>> for Program {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }
}

impl FromIterator<Instruction> for Program {
    fn from_iter<I: IntoIterator<Item = Instruction>>(iter: I) -> Self {
        Self {
            instructions: iter.into_iter().collect(),
        }
    }
}
