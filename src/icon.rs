//! Coordinate and asset types shared across the crate.
//!
//! Shapes are described in continuous pixel space: pixel `(x, y)` covers the
//! unit square `[x, x + 1) × [y, y + 1)` and is sampled at its center.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A point in continuous pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Multiplies both coordinates by `factor`.
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// An axis-aligned box in continuous pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct BoundsF {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BoundsF {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// The box centered on `center` with the given half extents.
    pub fn around(center: PointF, half_w: f32, half_h: f32) -> Self {
        Self::new(
            center.x - half_w,
            center.y - half_h,
            center.x + half_w,
            center.y + half_h,
        )
    }

    /// The smallest box containing every point. `None` for an empty slice.
    pub fn enclosing(points: &[PointF]) -> Option<Self> {
        let first = points.first()?;
        let init = Self::new(first.x, first.y, first.x, first.y);
        Some(points.iter().skip(1).fold(init, |acc, p| {
            Self::new(
                acc.min_x.min(p.x),
                acc.min_y.min(p.y),
                acc.max_x.max(p.x),
                acc.max_y.max(p.y),
            )
        }))
    }

    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Multiplies every edge by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(
            self.min_x * factor,
            self.min_y * factor,
            self.max_x * factor,
            self.max_y * factor,
        )
    }

    /// Grows the box by `amount` on every side.
    pub fn expanded(&self, amount: f32) -> Self {
        Self::new(
            self.min_x - amount,
            self.min_y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns true if every edge lies inside `[lo, hi]` on both axes,
    /// allowing `tolerance` for float rounding.
    pub fn lies_within(&self, lo: f32, hi: f32, tolerance: f32) -> bool {
        self.min_x >= lo - tolerance
            && self.min_y >= lo - tolerance
            && self.max_x <= hi + tolerance
            && self.max_y <= hi + tolerance
    }

    /// Returns the pixels whose centers could fall inside this box,
    /// clipped to a `size × size` canvas.
    pub fn pixel_span(&self, size: u32) -> RectPx {
        let clip = |v: f32| v.clamp(0.0, size as f32) as u32;
        let x0 = clip(self.min_x.floor());
        let y0 = clip(self.min_y.floor());
        let x1 = clip(self.max_x.ceil());
        let y1 = clip(self.max_y.ceil());
        RectPx::new(x0, y0, x1 - x0, y1 - y0)
    }
}

/// A rectangle defined in whole pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the image
    pub x: u32,
    /// Y offset from the top edge of the image
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RectPx {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Iterates every `(x, y)` pixel inside the rectangle, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + use<> {
        let (x0, x1) = (self.x, self.right());
        (self.y..self.bottom()).flat_map(move |y| (x0..x1).map(move |x| (x, y)))
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// Returns true if width equals height.
    pub fn is_square(&self) -> bool {
        self.width == self.height
    }
}

/// An encoded icon ready to hand to an asset sink.
///
/// `path` is relative; the sink decides where it is rooted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedAsset {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub encoded_bytes: Vec<u8>,
}

impl GeneratedAsset {
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.width, self.height)
    }
}
