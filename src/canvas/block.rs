//! Block records: rectangle geometry with cached bounds and adjacency predicates

use crate::isl::block_id::BlockId;
use crate::isl::instruction::Orientation;

/// Integer canvas coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    /// Horizontal coordinate
    pub x: u32,
    /// Vertical coordinate, measured from the bottom edge
    pub y: u32,
}

/// Half-open axis-aligned rectangle `[x1, x2) x [y1, y2)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Left edge (inclusive)
    pub x1: u32,
    /// Bottom edge (inclusive)
    pub y1: u32,
    /// Right edge (exclusive)
    pub x2: u32,
    /// Top edge (exclusive)
    pub y2: u32,
}

impl Rect {
    /// Create a rectangle from two diagonally opposite corners
    pub const fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self {
            x1: if x1 < x2 { x1 } else { x2 },
            y1: if y1 < y2 { y1 } else { y2 },
            x2: if x1 < x2 { x2 } else { x1 },
            y2: if y1 < y2 { y2 } else { y1 },
        }
    }

    /// Horizontal extent
    pub const fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    /// Vertical extent
    pub const fn height(&self) -> u32 {
        self.y2 - self.y1
    }

    /// Pixel count
    pub const fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Whether the rectangle covers no pixels
    pub const fn is_empty(&self) -> bool {
        self.x1 >= self.x2 || self.y1 >= self.y2
    }

    /// Whether a point lies strictly inside on both axes
    pub const fn contains_interior(&self, x: u32, y: u32) -> bool {
        self.x1 < x && x < self.x2 && self.y1 < y && y < self.y2
    }

    /// Intersection with `[0, width) x [0, height)`
    #[must_use]
    pub fn clipped(&self, width: u32, height: u32) -> Self {
        let x2 = self.x2.min(width);
        let y2 = self.y2.min(height);
        Self {
            x1: self.x1.min(x2),
            y1: self.y1.min(y2),
            x2,
            y2,
        }
    }

    /// Smallest rectangle containing both
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// Whether the two rectangles share any pixel
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }

    /// Corners starting at the minimum corner, counter-clockwise in ISL coordinates
    pub fn corners(&self) -> Vec<Point> {
        vec![
            Point {
                x: self.x1,
                y: self.y1,
            },
            Point {
                x: self.x2,
                y: self.y1,
            },
            Point {
                x: self.x2,
                y: self.y2,
            },
            Point {
                x: self.x1,
                y: self.y2,
            },
        ]
    }

    /// Bounding box of a corner list
    pub fn from_corners(corners: &[Point]) -> Self {
        let mut bounds = Self {
            x1: u32::MAX,
            y1: u32::MAX,
            x2: 0,
            y2: 0,
        };
        for corner in corners {
            bounds.x1 = bounds.x1.min(corner.x);
            bounds.y1 = bounds.y1.min(corner.y);
            bounds.x2 = bounds.x2.max(corner.x);
            bounds.y2 = bounds.y2.max(corner.y);
        }
        if corners.is_empty() {
            return Self::new(0, 0, 0, 0);
        }
        bounds
    }
}

/// One entry of the block registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRecord {
    /// Identifier of the block
    pub id: BlockId,
    /// False once consumed by a cut or merge
    pub valid: bool,
    corners: Vec<Point>,
    bounds: Rect,
    area: u64,
}

impl BlockRecord {
    /// Create a valid rectangular block
    pub fn new(id: BlockId, rect: Rect) -> Self {
        Self::from_corners(id, rect.corners())
    }

    /// Create a valid block from its polygon corners
    pub fn from_corners(id: BlockId, corners: Vec<Point>) -> Self {
        let bounds = Rect::from_corners(&corners);
        Self {
            id,
            valid: true,
            corners,
            bounds,
            area: bounds.area(),
        }
    }

    /// Cached bounding box
    pub const fn bounds(&self) -> &Rect {
        &self.bounds
    }

    /// Ordered polygon corners
    pub fn corners(&self) -> &[Point] {
        &self.corners
    }

    /// Pixel count
    pub const fn area(&self) -> u64 {
        self.area
    }

    /// Exchange geometry with another record, keeping both ids in place
    pub fn swap_geometry(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.corners, &mut other.corners);
        std::mem::swap(&mut self.bounds, &mut other.bounds);
        std::mem::swap(&mut self.area, &mut other.area);
    }

    /// Same height and y-extent, touching along a vertical edge
    pub const fn is_mergeable_horizontally(&self, other: &Self) -> bool {
        let (a, b) = (&self.bounds, &other.bounds);
        a.y1 == b.y1 && a.y2 == b.y2 && (a.x2 == b.x1 || b.x2 == a.x1)
    }

    /// Same width and x-extent, touching along a horizontal edge
    pub const fn is_mergeable_vertically(&self, other: &Self) -> bool {
        let (a, b) = (&self.bounds, &other.bounds);
        a.x1 == b.x1 && a.x2 == b.x2 && (a.y2 == b.y1 || b.y2 == a.y1)
    }

    /// Mergeable along the given seam direction
    ///
    /// `Vertical` means the seam is a vertical line, so the blocks sit side by side.
    pub const fn is_mergeable_along(&self, other: &Self, seam: Orientation) -> bool {
        match seam {
            Orientation::Vertical => self.is_mergeable_horizontally(other),
            Orientation::Horizontal => self.is_mergeable_vertically(other),
        }
    }

    /// Mergeable in either orientation
    pub const fn is_mergeable(&self, other: &Self) -> bool {
        self.is_mergeable_horizontally(other) || self.is_mergeable_vertically(other)
    }

    /// Identical width and height, position irrelevant
    pub const fn is_swappable(&self, other: &Self) -> bool {
        self.bounds.width() == other.bounds.width()
            && self.bounds.height() == other.bounds.height()
    }
}
