//! Pixel error between two rasters
//!
//! Per pixel the distance is the Euclidean norm of the RGBA difference, looked up in a
//! precomputed square-root table. The summed distances are scaled and rounded into the
//! integer canvas error.
//!
//! Two kernels compute the same sum: a scalar loop and a lane kernel that handles eight
//! pixels per step in fixed-size arrays the compiler can keep in vector registers. Both
//! add the per-pixel terms in pixel order, so their results are bit-identical.

use crate::canvas::bitmap::CHANNELS;
use crate::io::configuration::{LANE_WIDTH, MAX_SQUARED_DISTANCE, PIXEL_ERROR_SCALE};
use std::sync::LazyLock;

const LANE_BYTES: usize = LANE_WIDTH * CHANNELS;

static SQRT_TABLE: LazyLock<Vec<f64>> = LazyLock::new(|| {
    (0..=MAX_SQUARED_DISTANCE)
        .map(|value| (value as f64).sqrt())
        .collect()
});

/// Square root of a summed squared channel distance
pub fn distance(squared: usize) -> f64 {
    SQRT_TABLE
        .get(squared)
        .copied()
        .unwrap_or_else(|| (squared as f64).sqrt())
}

/// Summed per-pixel distance between two RGBA byte slices
pub trait PixelErrorKernel {
    /// Sum the distances of all pixels the two slices have in common
    fn accumulate(&self, canvas: &[u8], target: &[u8]) -> f64 {
        let (canvas, target) = common_pixels(canvas, target);
        accumulate_pixels(0.0, canvas, target)
    }
}

/// One pixel at a time
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarKernel;

impl PixelErrorKernel for ScalarKernel {}

/// Eight pixels per step with a scalar tail
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneKernel;

impl PixelErrorKernel for LaneKernel {
    fn accumulate(&self, canvas: &[u8], target: &[u8]) -> f64 {
        let (canvas, target) = common_pixels(canvas, target);
        let canvas_lanes = canvas.chunks_exact(LANE_BYTES);
        let target_lanes = target.chunks_exact(LANE_BYTES);
        let (canvas_tail, target_tail) = (canvas_lanes.remainder(), target_lanes.remainder());

        let mut sum = 0.0;
        for (canvas_lane, target_lane) in canvas_lanes.zip(target_lanes) {
            let mut squares = [0u16; LANE_BYTES];
            for ((square, a), b) in squares.iter_mut().zip(canvas_lane).zip(target_lane) {
                let delta = u16::from(a.abs_diff(*b));
                *square = delta * delta;
            }

            let mut lookups = [0u32; LANE_WIDTH];
            for (lookup, pixel) in lookups.iter_mut().zip(squares.chunks_exact(CHANNELS)) {
                *lookup = pixel.iter().map(|&square| u32::from(square)).sum();
            }

            for lookup in lookups {
                sum += distance(lookup as usize);
            }
        }

        accumulate_pixels(sum, canvas_tail, target_tail)
    }
}

/// Kernel selection for the canvas engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum KernelChoice {
    /// Lanes on targets with 128-bit vector units, scalar elsewhere
    #[default]
    Auto,
    /// Always the scalar loop
    Scalar,
    /// Always the lane kernel
    Lanes,
}

impl KernelChoice {
    /// Concrete kernel after resolving `Auto` for the build target
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Auto => {
                if cfg!(any(target_arch = "x86_64", target_arch = "aarch64")) {
                    Self::Lanes
                } else {
                    Self::Scalar
                }
            }
            other => other,
        }
    }
}

impl PixelErrorKernel for KernelChoice {
    fn accumulate(&self, canvas: &[u8], target: &[u8]) -> f64 {
        match self.resolve() {
            Self::Lanes => LaneKernel.accumulate(canvas, target),
            Self::Auto | Self::Scalar => ScalarKernel.accumulate(canvas, target),
        }
    }
}

/// Integer pixel error: `trunc(0.5 + sum * 0.005)`
pub fn pixel_error<K: PixelErrorKernel + ?Sized>(kernel: &K, canvas: &[u8], target: &[u8]) -> u64 {
    scale(kernel.accumulate(canvas, target))
}

/// Convert a summed distance into the integer error
pub fn scale(sum: f64) -> u64 {
    PIXEL_ERROR_SCALE.mul_add(sum, 0.5) as u64
}

fn common_pixels<'a>(canvas: &'a [u8], target: &'a [u8]) -> (&'a [u8], &'a [u8]) {
    let len = canvas.len().min(target.len()) / CHANNELS * CHANNELS;
    (
        canvas.get(..len).unwrap_or_default(),
        target.get(..len).unwrap_or_default(),
    )
}

fn accumulate_pixels(mut sum: f64, canvas: &[u8], target: &[u8]) -> f64 {
    for (a, b) in canvas.chunks_exact(CHANNELS).zip(target.chunks_exact(CHANNELS)) {
        let squared: u32 = a
            .iter()
            .zip(b)
            .map(|(x, y)| {
                let delta = u32::from(x.abs_diff(*y));
                delta * delta
            })
            .sum();
        sum += distance(squared as usize);
    }
    sum
}
