//! Engine constants and runtime configuration defaults

// Instruction language limits
/// Maximum number of child slots a block path may carry
pub const MAX_PATH_DIGITS: usize = 29;
/// Number of children produced by a point cut
pub const POINT_CUT_CHILDREN: u8 = 4;
/// Number of children produced by a line cut
pub const LINE_CUT_CHILDREN: u8 = 2;

// Base costs per opcode, scaled by canvas size over operand area
/// Base cost of a point cut
pub const POINT_CUT_COST: u64 = 10;
/// Base cost of a line cut
pub const LINE_CUT_COST: u64 = 7;
/// Base cost of a recolor
pub const RECOLOR_COST: u64 = 5;
/// Base cost of a swap
pub const SWAP_COST: u64 = 3;
/// Base cost of a merge
pub const MERGE_COST: u64 = 1;

// Pixel error metric
/// Scale applied to the summed per-pixel distance
pub const PIXEL_ERROR_SCALE: f64 = 0.005;
/// Largest possible sum of squared channel deltas (4 x 255^2)
pub const MAX_SQUARED_DISTANCE: usize = 4 * 255 * 255;
/// Pixels processed per lane-kernel step
pub const LANE_WIDTH: usize = 8;

// Solver candidate grid
/// Distance kept between generated cuts and block edges
pub const CUT_MARGIN: u32 = 2;
/// Line cut step at lookahead depth 1
pub const LINE_STEP_SHALLOW: u32 = 4;
/// Line cut step at lookahead depth above 1
pub const LINE_STEP_DEEP: u32 = 7;
/// Point cut grid step at lookahead depth 1
pub const POINT_STEP_SHALLOW: u32 = 11;
/// Lower clamp of the point cut grid step above depth 1
pub const POINT_STEP_DEEP_MIN: u32 = 4;
/// Upper clamp of the point cut grid step above depth 1
pub const POINT_STEP_DEEP_MAX: u32 = 24;

/// Rectangles held by the region color cache before it is flushed
pub const REGION_CACHE_CAPACITY: usize = 1 << 16;

// Driver defaults
/// Lookahead depth used by the outer driver
pub const DEFAULT_DEPTH: u32 = 2;
/// Fixed seed for the merge orientation choice
pub const DEFAULT_SEED: u64 = 42;
/// Background color of a canvas without an initial configuration
pub const BLANK_CANVAS: [u8; 4] = [255, 255, 255, 255];

// Output settings
/// Solver name written in program headers
pub const SOLVER_NAME: &str = "blocoder";
/// Extension of persisted programs
pub const PROGRAM_EXTENSION: &str = "isl";
/// Extension of the initial configuration file next to the target image
pub const INITIAL_CONFIG_EXTENSION: &str = "txt";
/// Digits used when zero-padding scores in file names
pub const SCORE_FILE_DIGITS: usize = 7;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
