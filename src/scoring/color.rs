//! Color statistics over the target pixels of a rectangle
//!
//! These provide the paint candidates of the solver: the per-channel upper median,
//! the per-channel rounded mean and the most frequent pixel.

use crate::canvas::bitmap::{Bitmap, CHANNELS};
use crate::canvas::block::Rect;
use image::Rgba;
use std::collections::HashMap;

/// The three candidate colors of one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionColors {
    /// Per-channel upper median
    pub median: Rgba<u8>,
    /// Per-channel mean, halves rounded up
    pub mean: Rgba<u8>,
    /// Most frequent pixel value
    pub mode: Rgba<u8>,
}

impl RegionColors {
    /// Compute all three statistics
    pub fn of(bitmap: &Bitmap, rect: &Rect) -> Self {
        Self {
            median: median_color(bitmap, rect),
            mean: mean_color(bitmap, rect),
            mode: most_frequent_color(bitmap, rect),
        }
    }
}

/// Per-channel upper median
///
/// Walks each channel histogram from 255 downward until half the region is covered.
pub fn median_color(bitmap: &Bitmap, rect: &Rect) -> Rgba<u8> {
    let mut histograms = [[0u64; 256]; CHANNELS];
    let mut area = 0u64;
    for_each_pixel(bitmap, rect, |pixel| {
        area += 1;
        for (histogram, &value) in histograms.iter_mut().zip(pixel) {
            if let Some(bucket) = histogram.get_mut(usize::from(value)) {
                *bucket += 1;
            }
        }
    });

    let half = (area / 2).max(1);
    let mut color = [0u8; CHANNELS];
    for (channel, histogram) in color.iter_mut().zip(&histograms) {
        let mut covered = 0;
        for value in (0..=u8::MAX).rev() {
            covered += histogram.get(usize::from(value)).copied().unwrap_or(0);
            if covered >= half {
                *channel = value;
                break;
            }
        }
    }
    Rgba(color)
}

/// Per-channel arithmetic mean with halves rounded up
pub fn mean_color(bitmap: &Bitmap, rect: &Rect) -> Rgba<u8> {
    let mut sums = [0u64; CHANNELS];
    let mut area = 0u64;
    for_each_pixel(bitmap, rect, |pixel| {
        area += 1;
        for (sum, &value) in sums.iter_mut().zip(pixel) {
            *sum += u64::from(value);
        }
    });

    if area == 0 {
        return Rgba([0; CHANNELS]);
    }
    let mut color = [0u8; CHANNELS];
    for (channel, sum) in color.iter_mut().zip(sums) {
        *channel = ((sum + area / 2) / area).min(u64::from(u8::MAX)) as u8;
    }
    Rgba(color)
}

/// Most frequent pixel; ties go to the smallest little-endian packed value
pub fn most_frequent_color(bitmap: &Bitmap, rect: &Rect) -> Rgba<u8> {
    let mut counts: HashMap<u32, u64> = HashMap::new();
    for_each_pixel(bitmap, rect, |pixel| {
        let mut packed = [0u8; CHANNELS];
        for (byte, &value) in packed.iter_mut().zip(pixel) {
            *byte = value;
        }
        *counts.entry(u32::from_le_bytes(packed)).or_default() += 1;
    });

    counts
        .into_iter()
        .max_by(|(key_a, count_a), (key_b, count_b)| {
            count_a.cmp(count_b).then_with(|| key_b.cmp(key_a))
        })
        .map_or(Rgba([0; CHANNELS]), |(packed, _)| Rgba(packed.to_le_bytes()))
}

fn for_each_pixel(bitmap: &Bitmap, rect: &Rect, mut visit: impl FnMut(&[u8])) {
    let rect = rect.clipped(bitmap.width(), bitmap.height());
    if rect.is_empty() {
        return;
    }
    for y in rect.y1..rect.y2 {
        for pixel in bitmap.row_span(y, rect.x1, rect.x2).chunks_exact(CHANNELS) {
            visit(pixel);
        }
    }
}
