//! Instruction cost formula

use crate::isl::instruction::Opcode;

/// Cost of applying an instruction to an operand of `operand_area` pixels
///
/// `round(base * total_pixels / operand_area)` with halves rounded up, in integer
/// arithmetic. An empty operand counts as one pixel.
pub const fn instruction_cost(opcode: Opcode, operand_area: u64, total_pixels: u64) -> u64 {
    let area = if operand_area == 0 { 1 } else { operand_area };
    (2 * opcode.base_cost() * total_pixels + area) / (2 * area)
}
