//! Parsing of ISL program text for replay

use crate::io::error::{AlgorithmError, Result};
use crate::isl::block_id::BlockId;
use crate::isl::instruction::{Instruction, Orientation};
use crate::isl::program::Program;
use image::Rgba;

/// Parse a whole program, skipping blank lines and `#` comments
///
/// # Errors
///
/// Returns an error naming the first line that is not a valid instruction
pub fn parse_program(text: &str) -> Result<Program> {
    let mut program = Program::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let instruction = parse_instruction(line).map_err(|reason| AlgorithmError::ProgramParse {
            line: index + 1,
            text: line.to_string(),
            reason,
        })?;
        program.push(instruction);
    }
    Ok(program)
}

/// Parse a single instruction line
///
/// # Errors
///
/// Returns a description of the problem if the line is malformed
pub fn parse_instruction(line: &str) -> std::result::Result<Instruction, String> {
    let mnemonic = line
        .split(|c: char| c.is_whitespace() || c == '[')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let groups = bracket_groups(line)?;

    match (mnemonic.as_str(), groups.as_slice()) {
        ("cut", [id, point]) => {
            let [x, y] = numbers::<2>(point)?;
            Ok(Instruction::PointCut {
                block: block_id(id)?,
                x,
                y,
            })
        }
        ("cut", [id, axis, position]) => {
            let mut letters = axis.trim().chars();
            let orientation = match (letters.next(), letters.next()) {
                (Some(letter), None) => Orientation::from_letter(letter),
                _ => None,
            }
            .ok_or_else(|| format!("unknown cut axis '{axis}'"))?;
            let [position] = numbers::<1>(position)?;
            Ok(Instruction::LineCut {
                block: block_id(id)?,
                orientation,
                position,
            })
        }
        ("color", [id, color]) => {
            let [r, g, b, a] = numbers::<4>(color)?;
            Ok(Instruction::Recolor {
                block: block_id(id)?,
                color: Rgba([channel(r)?, channel(g)?, channel(b)?, channel(a)?]),
            })
        }
        ("swap", [first, second]) => Ok(Instruction::Swap {
            first: block_id(first)?,
            second: block_id(second)?,
        }),
        ("merge", [first, second]) => Ok(Instruction::Merge {
            first: block_id(first)?,
            second: block_id(second)?,
        }),
        (other, found) => Err(format!(
            "'{other}' with {} bracket groups is not an instruction",
            found.len()
        )),
    }
}

fn bracket_groups(line: &str) -> std::result::Result<Vec<&str>, String> {
    let mut groups = Vec::new();
    let mut rest = line;
    while let Some(open) = rest.find('[') {
        let after = rest.get(open + 1..).unwrap_or_default();
        let close = after
            .find(']')
            .ok_or_else(|| "unterminated bracket".to_string())?;
        groups.push(after.get(..close).unwrap_or_default());
        rest = after.get(close + 1..).unwrap_or_default();
    }
    Ok(groups)
}

fn block_id(text: &str) -> std::result::Result<BlockId, String> {
    text.parse::<BlockId>().map_err(|e| e.to_string())
}

fn numbers<const N: usize>(text: &str) -> std::result::Result<[u32; N], String> {
    let mut values = [0u32; N];
    let mut parts = text.split(',');
    for value in &mut values {
        let part = parts
            .next()
            .ok_or_else(|| format!("expected {N} comma-separated values in '{text}'"))?;
        *value = part
            .trim()
            .parse()
            .map_err(|e| format!("bad number '{}': {e}", part.trim()))?;
    }
    if parts.next().is_some() {
        return Err(format!("expected {N} comma-separated values in '{text}'"));
    }
    Ok(values)
}

fn channel(value: u32) -> std::result::Result<u8, String> {
    u8::try_from(value).map_err(|e| format!("color channel {value} out of range: {e}"))
}
