//! Output invariants: exact size, padding bound, binary alpha, color purity.
//!
//! The padding and canvas checks run on declared geometry before anything is
//! drawn. The raster checks run on the finished canvas, and a failure there
//! means the asset is never encoded.

use image::RgbaImage;
use palette::{Srgb, WithAlpha};

use crate::color::Color;
use crate::error::{IconError, IconResult};
use crate::icon::BoundsF;

/// Slack for float rounding when comparing declared coordinates.
pub const BOUNDS_TOLERANCE: f32 = 1e-3;

/// Alpha at or above this becomes opaque; below it becomes transparent.
pub const ALPHA_THRESHOLD: u8 = 128;

// ============================================================================
// Padding
// ============================================================================

/// The inset from each canvas edge that content must respect.
///
/// This is `size * ratio`, unless a floor is given and the ratio yields
/// less than it, in which case the floor wins.
pub fn effective_padding(size: u32, ratio: f32, floor_px: Option<f32>) -> f32 {
    let from_ratio = size as f32 * ratio;
    match floor_px {
        Some(floor) if from_ratio < floor => floor,
        _ => from_ratio,
    }
}

/// Fails with a geometry error if `bounds` leaves the `size × size` canvas.
pub fn check_on_canvas(what: &str, bounds: &BoundsF, size: u32) -> IconResult<()> {
    if bounds.lies_within(0.0, size as f32, BOUNDS_TOLERANCE) {
        Ok(())
    } else {
        Err(IconError::geometry(format!(
            "{what} spans ({:.2}, {:.2})..({:.2}, {:.2}), outside the {size}x{size} canvas",
            bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
        )))
    }
}

/// Fails with a constraint violation if `bounds` crosses the padding inset.
pub fn check_padding(what: &str, bounds: &BoundsF, size: u32, padding: f32) -> IconResult<()> {
    let far = size as f32 - padding;
    if bounds.lies_within(padding, far, BOUNDS_TOLERANCE) {
        Ok(())
    } else {
        Err(IconError::constraint(format!(
            "{what} spans ({:.2}, {:.2})..({:.2}, {:.2}), outside the padded area [{padding:.2}, {far:.2}]",
            bounds.min_x, bounds.min_y, bounds.max_x, bounds.max_y
        )))
    }
}

// ============================================================================
// Raster checks
// ============================================================================

/// Fails unless the raster is exactly `size × size`.
pub fn check_size(image: &RgbaImage, size: u32) -> IconResult<()> {
    if image.width() == size && image.height() == size {
        Ok(())
    } else {
        Err(IconError::constraint(format!(
            "raster is {}x{}, expected {size}x{size}",
            image.width(),
            image.height()
        )))
    }
}

/// Forces every alpha to 0 or 255. Returns how many pixels were repaired.
///
/// Pixels that become transparent are cleared to `(0, 0, 0, 0)` so the
/// encoded output does not depend on color hidden under zero alpha.
pub fn binarize_alpha(image: &mut RgbaImage) -> usize {
    let mut repaired = 0;
    for pixel in image.pixels_mut() {
        let alpha = pixel.0[3];
        if alpha == 0 {
            pixel.0 = [0, 0, 0, 0];
        } else if alpha < u8::MAX {
            repaired += 1;
            if alpha >= ALPHA_THRESHOLD {
                pixel.0[3] = u8::MAX;
            } else {
                pixel.0 = [0, 0, 0, 0];
            }
        }
    }
    repaired
}

/// Requires every visible pixel of a profile to be one exact color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PurityRule {
    rgb: Srgb<u8>,
}

impl PurityRule {
    pub fn new(rgb: Srgb<u8>) -> Self {
        Self { rgb }
    }

    /// Every opaque pixel must be `(255, 255, 255)`.
    pub fn pure_white() -> Self {
        Self::new(Color::WHITE.to_srgb())
    }

    pub fn rgb(&self) -> Srgb<u8> {
        self.rgb
    }

    pub fn allows(&self, color: Color) -> bool {
        color.alpha() == 0 || color.to_srgb() == self.rgb
    }

    /// Fails on the first visible pixel with the wrong color, reporting it
    /// along with how many pixels are off.
    pub fn check(&self, image: &RgbaImage) -> IconResult<()> {
        let expected = [self.rgb.red, self.rgb.green, self.rgb.blue];
        let mut offenders = image
            .enumerate_pixels()
            .filter(|(_, _, p)| p.0[3] > 0 && p.0[..3] != expected);

        let Some((x, y, first)) = offenders.next() else {
            return Ok(());
        };
        let count = 1 + offenders.count();
        Err(IconError::constraint(format!(
            "{count} visible pixel(s) differ from the required color {}; first at ({x}, {y}) is {:?}",
            Color(self.rgb.with_alpha(u8::MAX)).to_hex(),
            first.0
        )))
    }
}
