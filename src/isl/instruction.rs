//! ISL instruction model and base cost table

use crate::io::configuration::{
    LINE_CUT_COST, MERGE_COST, POINT_CUT_COST, RECOLOR_COST, SWAP_COST,
};
use crate::isl::block_id::BlockId;
use image::Rgba;
use std::fmt;

/// Instruction kind, used for cost lookup and diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Split into four quadrants
    PointCut,
    /// Split into two parts along one axis
    LineCut,
    /// Flood with a solid color
    Recolor,
    /// Exchange two equal-size blocks
    Swap,
    /// Coalesce two adjacent blocks
    Merge,
}

impl Opcode {
    /// Base cost before scaling by canvas size over operand area
    pub const fn base_cost(self) -> u64 {
        match self {
            Self::PointCut => POINT_CUT_COST,
            Self::LineCut => LINE_CUT_COST,
            Self::Recolor => RECOLOR_COST,
            Self::Swap => SWAP_COST,
            Self::Merge => MERGE_COST,
        }
    }

    /// Mnemonic used in program text and diagnostics
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::PointCut | Self::LineCut => "cut",
            Self::Recolor => "color",
            Self::Swap => "swap",
            Self::Merge => "merge",
        }
    }
}

/// Direction of a line cut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Cut along `x = position`, producing left and right children
    Vertical,
    /// Cut along `y = position`, producing lower and upper children
    Horizontal,
}

impl Orientation {
    /// Axis letter used in program text
    pub const fn letter(self) -> char {
        match self {
            Self::Vertical => 'x',
            Self::Horizontal => 'y',
        }
    }

    /// Parse the axis letter of program text
    pub const fn from_letter(letter: char) -> Option<Self> {
        match letter {
            'x' | 'X' => Some(Self::Vertical),
            'y' | 'Y' => Some(Self::Horizontal),
            _ => None,
        }
    }

    /// The other orientation
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }
}

/// One ISL instruction
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Instruction {
    /// Split a block into four quadrants at an interior point
    PointCut {
        /// Block to cut
        block: BlockId,
        /// Cut x coordinate
        x: u32,
        /// Cut y coordinate
        y: u32,
    },
    /// Split a block in two along one axis
    LineCut {
        /// Block to cut
        block: BlockId,
        /// Cut direction
        orientation: Orientation,
        /// Cut coordinate along the axis
        position: u32,
    },
    /// Flood a block with a solid color
    Recolor {
        /// Block to paint
        block: BlockId,
        /// Paint color
        color: Rgba<u8>,
    },
    /// Exchange the pixels and geometry of two equal-size blocks
    Swap {
        /// First block
        first: BlockId,
        /// Second block
        second: BlockId,
    },
    /// Coalesce two edge-adjacent blocks into a new block
    Merge {
        /// First block
        first: BlockId,
        /// Second block
        second: BlockId,
    },
}

impl Instruction {
    /// Kind of this instruction
    pub const fn opcode(&self) -> Opcode {
        match self {
            Self::PointCut { .. } => Opcode::PointCut,
            Self::LineCut { .. } => Opcode::LineCut,
            Self::Recolor { .. } => Opcode::Recolor,
            Self::Swap { .. } => Opcode::Swap,
            Self::Merge { .. } => Opcode::Merge,
        }
    }

    /// Block the instruction operates on (the first one for swap and merge)
    pub const fn block(&self) -> &BlockId {
        match self {
            Self::PointCut { block, .. }
            | Self::LineCut { block, .. }
            | Self::Recolor { block, .. } => block,
            Self::Swap { first, .. } | Self::Merge { first, .. } => first,
        }
    }

    /// Whether the instruction reads or writes the given block
    pub fn references(&self, id: &BlockId) -> bool {
        match self {
            Self::PointCut { block, .. }
            | Self::LineCut { block, .. }
            | Self::Recolor { block, .. } => block == id,
            Self::Swap { first, second } | Self::Merge { first, second } => {
                first == id || second == id
            }
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointCut { block, x, y } => write!(f, "cut [{block}] [{x},{y}]"),
            Self::LineCut {
                block,
                orientation,
                position,
            } => write!(f, "cut [{block}] [{}] [{position}]", orientation.letter()),
            Self::Recolor { block, color } => {
                let [r, g, b, a] = color.0;
                write!(f, "color [{block}] [{r},{g},{b},{a}]")
            }
            Self::Swap { first, second } => write!(f, "swap [{first}] [{second}]"),
            Self::Merge { first, second } => write!(f, "merge [{first}] [{second}]"),
        }
    }
}

