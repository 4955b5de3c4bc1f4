//! RGBA raster backing the target and the working canvas
//!
//! Pixels live in a standard-layout `(height, width, 4)` array so the scorer can
//! walk them as one contiguous byte slice.

use crate::canvas::block::Rect;
use crate::io::error::{AlgorithmError, Result};
use image::{Rgba, RgbaImage};
use ndarray::{Array3, Axis, aview1, s};
use std::path::Path;

/// Number of bytes per pixel
pub const CHANNELS: usize = 4;

/// Owned RGBA raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pixels: Array3<u8>,
}

impl Bitmap {
    /// Create a bitmap filled with one color
    pub fn filled(width: u32, height: u32, color: Rgba<u8>) -> Self {
        let mut pixels = Array3::zeros((height as usize, width as usize, CHANNELS));
        for mut pixel in pixels.lanes_mut(Axis(2)) {
            pixel.assign(&aview1(&color.0));
        }
        Self { pixels }
    }

    /// Load a PNG and flip it so row `y` is measured from the bottom edge
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or decoded
    pub fn load_png(path: &Path) -> Result<Self> {
        let img = image::open(path).map_err(|e| AlgorithmError::ImageLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut rgba = img.to_rgba8();
        image::imageops::flip_vertical_in_place(&mut rgba);
        Ok(Self::from_image(&rgba))
    }

    /// Copy an `image` buffer row by row
    pub fn from_image(img: &RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels =
            Array3::from_shape_vec((height as usize, width as usize, CHANNELS), img.as_raw().clone())
                .unwrap_or_else(|_| Array3::zeros((0, 0, CHANNELS)));
        Self { pixels }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.dim().1 as u32
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.dim().0 as u32
    }

    /// Total pixel count
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// Rectangle covering the whole bitmap
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    /// Whole raster as contiguous RGBA bytes, row-major from `y = 0`
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_slice().unwrap_or_default()
    }

    /// RGBA bytes of the pixels of one rectangle row span
    pub fn row_span(&self, y: u32, x1: u32, x2: u32) -> &[u8] {
        let row_start = y as usize * self.width() as usize;
        let start = (row_start + x1 as usize) * CHANNELS;
        let end = (row_start + x2 as usize) * CHANNELS;
        self.as_bytes().get(start..end).unwrap_or_default()
    }

    /// Color of one pixel, `None` outside the bitmap
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba<u8>> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let mut color = [0u8; CHANNELS];
        for (channel, value) in color
            .iter_mut()
            .zip(self.pixels.slice(s![y as usize, x as usize, ..]))
        {
            *channel = *value;
        }
        Some(Rgba(color))
    }

    /// Set one pixel; writes outside the bitmap are ignored
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba<u8>) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        self.pixels
            .slice_mut(s![y as usize, x as usize, ..])
            .assign(&aview1(&color.0));
    }

    /// Flood a rectangle, clipped to the bitmap
    pub fn fill_rect(&mut self, rect: &Rect, color: Rgba<u8>) {
        let rect = rect.clipped(self.width(), self.height());
        if rect.is_empty() {
            return;
        }
        let mut region = self.pixels.slice_mut(s![
            rect.y1 as usize..rect.y2 as usize,
            rect.x1 as usize..rect.x2 as usize,
            ..
        ]);
        for mut pixel in region.lanes_mut(Axis(2)) {
            pixel.assign(&aview1(&color.0));
        }
    }

    /// Copy a rectangle into a new bitmap, clipped to the bitmap
    pub fn copy_rect(&self, rect: &Rect) -> Self {
        let rect = rect.clipped(self.width(), self.height());
        let pixels = self
            .pixels
            .slice(s![
                rect.y1 as usize..rect.y2 as usize,
                rect.x1 as usize..rect.x2 as usize,
                ..
            ])
            .to_owned();
        Self { pixels }
    }

    /// Paste a bitmap with its lower-left corner at `(x, y)`, clipped to the bitmap
    pub fn paste(&mut self, source: &Self, x: u32, y: u32) {
        let (x, y) = (x.min(self.width()), y.min(self.height()));
        let width = source.width().min(self.width() - x) as usize;
        let height = source.height().min(self.height() - y) as usize;
        let x1 = x as usize;
        let y1 = y as usize;
        self.pixels
            .slice_mut(s![y1..y1 + height, x1..x1 + width, ..])
            .assign(&source.pixels.slice(s![..height, ..width, ..]));
    }
}
