//! Initial configuration parsing: pre-cut, pre-painted blocks from a text file

use crate::canvas::bitmap::Bitmap;
use crate::canvas::block::{BlockRecord, Rect};
use crate::canvas::engine::CanvasState;
use crate::canvas::registry::BlockRegistry;
use crate::io::configuration::{BLANK_CANVAS, INITIAL_CONFIG_EXTENSION};
use crate::io::error::{Result, file_system_error};
use crate::isl::block_id::BlockId;
use crate::scoring::pixel_error::KernelChoice;
use image::Rgba;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One block of an initial configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitialBlock {
    /// Counter value of the block
    pub id: u64,
    /// Covered rectangle in canvas coordinates
    pub rect: Rect,
    /// Pre-painted color
    pub color: Rgba<u8>,
}

/// Blocks the canvas starts from instead of a blank root
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitialConfiguration {
    /// Parsed blocks in file order
    pub blocks: Vec<InitialBlock>,
}

impl InitialConfiguration {
    /// Parse configuration text, one block per line: `id x1,y1 x2,y2 r,g,b,a`
    ///
    /// Lines that do not match are skipped.
    pub fn parse(text: &str) -> Self {
        let blocks = text
            .lines()
            .enumerate()
            .filter_map(|(index, line)| {
                let parsed = parse_line(line);
                if parsed.is_none() && !line.trim().is_empty() {
                    debug!(line = index + 1, text = line, "Skipping malformed configuration line");
                }
                parsed
            })
            .collect();
        Self { blocks }
    }

    /// Read and parse a configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read
    pub fn from_file(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| file_system_error(path, "read", e))?;
        Ok(Self::parse(&text))
    }

    /// Configuration file expected next to a target image
    pub fn path_for(target: &Path) -> PathBuf {
        target.with_extension(INITIAL_CONFIG_EXTENSION)
    }

    /// Load the configuration next to `target`, or an empty one if there is none
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read
    pub fn for_target(target: &Path) -> Result<Self> {
        let path = Self::path_for(target);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let configuration = Self::from_file(&path)?;
        info!(
            path = %path.display(),
            blocks = configuration.blocks.len(),
            "Loaded initial configuration"
        );
        Ok(configuration)
    }

    /// Whether no block was parsed
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Fresh-id counter value after the configured blocks
    pub fn next_counter(&self) -> u64 {
        self.blocks
            .iter()
            .map(|block| block.id + 1)
            .max()
            .unwrap_or(1)
    }

    /// Build the engine state for `target`
    ///
    /// Blocks reaching outside the target are skipped. Without any remaining block the
    /// canvas is blank with a single root block.
    pub fn into_state(mut self, target: Bitmap, kernel: KernelChoice) -> CanvasState {
        let (width, height) = (target.width(), target.height());
        self.blocks.retain(|block| {
            let inside = block.rect.clipped(width, height) == block.rect;
            if !inside {
                debug!(
                    id = block.id,
                    rect = ?block.rect,
                    width,
                    height,
                    "Skipping configuration block outside the target"
                );
            }
            inside
        });
        if self.is_empty() {
            return CanvasState::new(target, kernel);
        }

        let counter = self.next_counter();
        let mut canvas = Bitmap::filled(width, height, Rgba(BLANK_CANVAS));
        let mut registry = BlockRegistry::new();
        for block in self.blocks {
            canvas.fill_rect(&block.rect, block.color);
            registry.insert(BlockRecord::new(BlockId::Counter(block.id), block.rect));
        }
        CanvasState::with_initial(target, canvas, registry, counter, kernel)
    }
}

fn parse_line(line: &str) -> Option<InitialBlock> {
    let mut fields = line.split_whitespace();
    let id = fields.next()?.parse().ok()?;
    let [x1, y1] = numbers(fields.next()?)?;
    let [x2, y2] = numbers(fields.next()?)?;
    let [r, g, b, a] = numbers(fields.next()?)?;
    if fields.next().is_some() {
        return None;
    }

    let rect = Rect::new(x1, y1, x2, y2);
    if rect.is_empty() {
        return None;
    }
    let channel = |value: u32| u8::try_from(value).ok();
    Some(InitialBlock {
        id,
        rect,
        color: Rgba([channel(r)?, channel(g)?, channel(b)?, channel(a)?]),
    })
}

fn numbers<const N: usize>(field: &str) -> Option<[u32; N]> {
    let mut values = [0u32; N];
    let mut parts = field.split(',');
    for value in &mut values {
        *value = parts.next()?.trim().parse().ok()?;
    }
    parts.next().is_none().then_some(values)
}
