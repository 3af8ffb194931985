//! Pure shape-to-coverage functions.
//!
//! Every shape answers two questions: which box could it touch
//! ([`Shape::bounds`]) and does it cover a given pixel center
//! ([`Shape::contains`]). Coverage is hard-edged: a pixel is either fully
//! inside or untouched.
//!
//! Constructors validate their parameters and return
//! [`IconError::Geometry`](crate::IconError::Geometry) for degenerate input,
//! so a built shape is always drawable.

pub mod ellipse;
pub mod polygon;
pub mod rounded_rect;
pub mod stroke;

pub use ellipse::Ellipse;
pub use polygon::Polygon;
pub use rounded_rect::RoundedRect;
pub use stroke::{Star, Stroke};

use crate::error::{IconError, IconResult};
use crate::icon::{BoundsF, PointF};

/// A filled region in continuous pixel space.
pub trait Shape {
    /// A box containing every point the shape covers.
    fn bounds(&self) -> BoundsF;

    /// Returns true if `point` lies inside the shape.
    fn contains(&self, point: PointF) -> bool;
}

/// Yields every pixel of a `size × size` canvas whose center the shape covers.
pub fn coverage<S: Shape + ?Sized>(shape: &S, size: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
    shape
        .bounds()
        .pixel_span(size)
        .pixels()
        .filter(move |&(x, y)| shape.contains(pixel_center(x, y)))
}

/// The sampling point of pixel `(x, y)`.
pub fn pixel_center(x: u32, y: u32) -> PointF {
    PointF::new(x as f32 + 0.5, y as f32 + 0.5)
}

pub(crate) fn require_finite(what: &str, values: &[f32]) -> IconResult<()> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(IconError::geometry(format!("{what} has a non-finite coordinate")))
    }
}

pub(crate) fn require_positive(what: &str, name: &str, value: f32) -> IconResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(IconError::geometry(format!(
            "{what} {name} must be positive, got {value}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HalfPlane;

    impl Shape for HalfPlane {
        fn bounds(&self) -> BoundsF {
            BoundsF::new(0.0, 0.0, 4.0, 4.0)
        }

        fn contains(&self, point: PointF) -> bool {
            point.x < 2.0
        }
    }

    #[test]
    fn coverage_samples_pixel_centers() {
        let pixels: Vec<_> = coverage(&HalfPlane, 8).collect();
        assert_eq!(pixels.len(), 8);
        assert!(pixels.iter().all(|&(x, y)| x < 2 && y < 4));
    }

    #[test]
    fn coverage_is_clipped_to_canvas() {
        let pixels: Vec<_> = coverage(&HalfPlane, 1).collect();
        assert_eq!(pixels, vec![(0, 0)]);
    }

    #[test]
    fn validation_helpers() {
        assert!(require_positive("circle", "radius", 0.0).unwrap_err().is_geometry());
        assert!(require_positive("circle", "radius", -1.0).is_err());
        assert!(require_positive("circle", "radius", 0.5).is_ok());
        assert!(require_finite("line", &[1.0, f32::NAN]).is_err());
    }
}
