use crate::canvas::block::Rect;
use crate::io::configuration::{
    CUT_MARGIN, LINE_STEP_DEEP, LINE_STEP_SHALLOW, POINT_STEP_DEEP_MAX, POINT_STEP_DEEP_MIN,
    POINT_STEP_SHALLOW,
};
use crate::isl::block_id::BlockId;
use crate::isl::instruction::{Instruction, Orientation};
use crate::scoring::color::RegionColors;

/// Spacing of generated cut positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CandidateGrid {
    /// Distance between consecutive line cuts
    pub line_step: u32,
    /// Distance between point cut grid lines on both axes
    pub point_step: u32,
}

impl CandidateGrid {
    /// Coarser grids for deeper lookahead; the deep point step follows the block width
    pub fn for_depth(depth: u32, bounds: &Rect) -> Self {
        if depth > 1 {
            Self {
                line_step: LINE_STEP_DEEP,
                point_step: (bounds.width().saturating_sub(2) / 2)
                    .clamp(POINT_STEP_DEEP_MIN, POINT_STEP_DEEP_MAX),
            }
        } else {
            Self {
                line_step: LINE_STEP_SHALLOW,
                point_step: POINT_STEP_SHALLOW,
            }
        }
    }
}

/// Cut coordinates from `low + 2` up to but excluding `high - 2`
pub fn cut_positions(low: u32, high: u32, step: u32) -> impl Iterator<Item = u32> + Clone {
    (low + CUT_MARGIN..high.saturating_sub(CUT_MARGIN)).step_by(step.max(1) as usize)
}

/// Candidate first instructions for one block, in evaluation order
///
/// Recolors with the median, mean and most frequent color come first, then vertical
/// and horizontal line cuts, then point cuts row by row.
pub fn candidates(
    block: &BlockId,
    bounds: Rect,
    colors: RegionColors,
    depth: u32,
) -> impl Iterator<Item = Instruction> + use<> {
    let grid = CandidateGrid::for_depth(depth, &bounds);

    let paints = [colors.median, colors.mean, colors.mode]
        .into_iter()
        .map({
            let block = block.clone();
            move |color| Instruction::Recolor {
                block: block.clone(),
                color,
            }
        });

    let vertical = cut_positions(bounds.x1, bounds.x2, grid.line_step)
        .map(|position| (Orientation::Vertical, position));
    let horizontal = cut_positions(bounds.y1, bounds.y2, grid.line_step)
        .map(|position| (Orientation::Horizontal, position));
    let line_cuts = vertical.chain(horizontal).map({
        let block = block.clone();
        move |(orientation, position)| Instruction::LineCut {
            block: block.clone(),
            orientation,
            position,
        }
    });

    let columns = cut_positions(bounds.x1, bounds.x2, grid.point_step);
    let point_cuts = cut_positions(bounds.y1, bounds.y2, grid.point_step)
        .flat_map(move |y| columns.clone().map(move |x| (x, y)))
        .map({
            let block = block.clone();
            move |(x, y)| Instruction::PointCut {
                block: block.clone(),
                x,
                y,
            }
        });

    paints.chain(line_cuts).chain(point_cuts)
}
