//! The square RGBA pixel buffer the compositor draws into.
//!
//! A [`Canvas`] starts fully transparent and is only ever written with
//! replace semantics: a covered pixel takes the new color outright, with no
//! blending against what was there. Once drawing is done the canvas is
//! consumed by [`Canvas::into_image`].

use image::RgbaImage;

use crate::color::Color;
use crate::geometry::{coverage, Shape};
use crate::icon::SizePx;
use crate::text::GlyphMask;

/// Glyph coverage at or above this paints the pixel; below leaves it alone.
pub const COVERAGE_THRESHOLD: u8 = 128;

#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Creates a fully transparent `size × size` canvas.
    pub fn new(size: u32) -> Self {
        Self {
            image: RgbaImage::new(size, size),
        }
    }

    pub fn size(&self) -> u32 {
        self.image.width()
    }

    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.image.width(), self.image.height())
    }

    /// Replaces every covered pixel with `color`. Returns the pixel count.
    pub fn fill<S: Shape + ?Sized>(&mut self, shape: &S, color: Color) -> usize {
        let pixel = color.to_pixel();
        let mut painted = 0;
        for (x, y) in coverage(shape, self.size()) {
            self.image.put_pixel(x, y, pixel);
            painted += 1;
        }
        painted
    }

    /// Paints `mask` with its top-left corner at `(left, top)`.
    ///
    /// Coverage is thresholded per pixel, so text never leaves
    /// semi-transparent holes in the shapes beneath it. Mask pixels that
    /// fall off the canvas are skipped.
    pub fn paint_mask(&mut self, mask: &GlyphMask, left: i64, top: i64, color: Color) -> usize {
        let pixel = color.to_pixel();
        let size = i64::from(self.size());
        let mut painted = 0;
        for my in 0..mask.height() {
            for mx in 0..mask.width() {
                if mask.get(mx, my) < COVERAGE_THRESHOLD {
                    continue;
                }
                let (x, y) = (left + i64::from(mx), top + i64::from(my));
                if (0..size).contains(&x) && (0..size).contains(&y) {
                    self.image.put_pixel(x as u32, y as u32, pixel);
                    painted += 1;
                }
            }
        }
        painted
    }

    /// Read-only view of the pixels.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub(crate) fn image_mut(&mut self) -> &mut RgbaImage {
        &mut self.image
    }

    /// Freezes the canvas into its final raster.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
