//! Local post-optimization of instruction parameters
//!
//! Every numeric parameter of the program (recolor channels, line cut positions,
//! point cut coordinates) is walked one unit at a time while the whole-program score
//! does not get worse. Steps that leave the score unchanged are kept tentatively so
//! plateaus can be crossed, but the parameter always settles on the last value that
//! strictly improved the score.

use crate::canvas::block::Rect;
use crate::canvas::engine::CanvasState;
use crate::isl::instruction::{Instruction, Orientation};
use crate::isl::program::Program;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parameter {
    Channel(usize),
    LinePosition,
    PointX,
    PointY,
}

impl Parameter {
    fn get(self, instruction: &Instruction) -> Option<u32> {
        match (self, instruction) {
            (Self::Channel(channel), Instruction::Recolor { color, .. }) => {
                color.0.get(channel).copied().map(u32::from)
            }
            (Self::LinePosition, Instruction::LineCut { position, .. }) => Some(*position),
            (Self::PointX, Instruction::PointCut { x, .. }) => Some(*x),
            (Self::PointY, Instruction::PointCut { y, .. }) => Some(*y),
            _ => None,
        }
    }

    fn set(self, instruction: &mut Instruction, value: u32) {
        match (self, instruction) {
            (Self::Channel(channel), Instruction::Recolor { color, .. }) => {
                if let (Some(slot), Ok(value)) = (color.0.get_mut(channel), u8::try_from(value)) {
                    *slot = value;
                }
            }
            (Self::LinePosition, Instruction::LineCut { position, .. }) => *position = value,
            (Self::PointX, Instruction::PointCut { x, .. }) => *x = value,
            (Self::PointY, Instruction::PointCut { y, .. }) => *y = value,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Down,
    Up,
}

/// One walk: which parameter, which way, and the inclusive legal range
#[derive(Debug, Clone, Copy)]
struct Walk {
    parameter: Parameter,
    direction: Direction,
    low: u32,
    high: u32,
}

/// Tune the parameters of a program by repeated unit steps
///
/// Runs from the initial configuration of `state` and leaves the state reset.
/// Redundant recolors are dropped before climbing.
pub fn hill_climb(state: &mut CanvasState, program: &Program) -> Program {
    let mut program = program.clone();
    let removed = program.remove_redundant_recolors();
    if removed > 0 {
        debug!(removed, "Dropped redundant recolors");
    }

    let start = state.score_program(&program).effective();
    let mut best = start;
    let mut sweeps = 0usize;

    loop {
        sweeps += 1;
        let mut improved = false;
        for index in 0..program.len() {
            for walk in walks(state, &program, index) {
                improved |= climb(state, &mut program, index, walk, &mut best);
            }
        }
        if !improved {
            break;
        }
        debug!(sweeps, score = best, "Hill climb sweep improved");
    }

    state.reset();
    if best < start {
        info!(from = start, to = best, sweeps, "Local optimizer improved program");
    }
    program
}

/// Walks for one instruction in the order they are tried
fn walks(state: &mut CanvasState, program: &Program, index: usize) -> Vec<Walk> {
    let Some(instruction) = program.instructions().get(index) else {
        return Vec::new();
    };
    let walk = |parameter, direction, low, high| Walk {
        parameter,
        direction,
        low,
        high,
    };

    match instruction {
        Instruction::Recolor { .. } => (0..4)
            .flat_map(|channel| {
                [Direction::Down, Direction::Up]
                    .map(|direction| walk(Parameter::Channel(channel), direction, 0, 255))
            })
            .collect(),
        Instruction::LineCut { orientation, .. } => {
            let Some(bounds) = bounds_before(state, program, index) else {
                return Vec::new();
            };
            let (low, high) = match orientation {
                Orientation::Vertical => (bounds.x1, bounds.x2),
                Orientation::Horizontal => (bounds.y1, bounds.y2),
            };
            [Direction::Down, Direction::Up]
                .map(|direction| walk(Parameter::LinePosition, direction, low + 1, high - 1))
                .to_vec()
        }
        Instruction::PointCut { .. } => {
            let Some(bounds) = bounds_before(state, program, index) else {
                return Vec::new();
            };
            let x = (bounds.x1 + 1, bounds.x2 - 1);
            let y = (bounds.y1 + 1, bounds.y2 - 1);
            vec![
                walk(Parameter::PointX, Direction::Down, x.0, x.1),
                walk(Parameter::PointY, Direction::Down, y.0, y.1),
                walk(Parameter::PointX, Direction::Up, x.0, x.1),
                walk(Parameter::PointY, Direction::Up, y.0, y.1),
            ]
        }
        Instruction::Swap { .. } | Instruction::Merge { .. } => Vec::new(),
    }
}

/// Bounds of the block an instruction operates on, after replaying everything before it
fn bounds_before(state: &mut CanvasState, program: &Program, index: usize) -> Option<Rect> {
    state.reset();
    let instruction = program.instructions().get(index)?;
    let mut transaction = state.begin();
    for earlier in program.instructions().iter().take(index) {
        // Rejections surface when the whole program is scored
        let _ = transaction.apply(earlier);
    }
    let bounds = transaction.state().lookup(instruction.block()).map(|record| *record.bounds());
    bounds.filter(|rect| rect.width() >= 2 && rect.height() >= 2)
}

fn climb(
    state: &mut CanvasState,
    program: &mut Program,
    index: usize,
    walk: Walk,
    best: &mut u64,
) -> bool {
    let Some(original) = program
        .instructions()
        .get(index)
        .and_then(|instruction| walk.parameter.get(instruction))
    else {
        return false;
    };

    let mut anchor = original;
    let mut value = original;
    let mut improved = false;
    loop {
        let next = match walk.direction {
            Direction::Down => value.checked_sub(1).filter(|next| *next >= walk.low),
            Direction::Up => value.checked_add(1).filter(|next| *next <= walk.high),
        };
        let Some(next) = next else {
            break;
        };
        value = next;
        set(program, index, walk.parameter, value);

        let score = state.score_program(program).effective();
        if score < *best {
            *best = score;
            anchor = value;
            improved = true;
        } else if score > *best {
            break;
        }
    }

    set(program, index, walk.parameter, anchor);
    improved
}

fn set(program: &mut Program, index: usize, parameter: Parameter, value: u32) {
    if let Some(instruction) = program.instructions_mut().get_mut(index) {
        parameter.set(instruction, value);
    }
}
