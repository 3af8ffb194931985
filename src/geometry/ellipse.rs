//! Filled circles and ellipses.

use super::{require_finite, require_positive, Shape};
use crate::error::IconResult;
use crate::icon::{BoundsF, PointF};

/// An axis-aligned filled ellipse. A circle is the equal-radii case.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipse {
    center: PointF,
    rx: f32,
    ry: f32,
}

impl Ellipse {
    /// Creates an ellipse. Both radii must be positive.
    pub fn new(center: PointF, rx: f32, ry: f32) -> IconResult<Self> {
        require_finite("ellipse", &[center.x, center.y])?;
        require_positive("ellipse", "x radius", rx)?;
        require_positive("ellipse", "y radius", ry)?;
        Ok(Self { center, rx, ry })
    }

    /// Creates a circle. The radius must be positive.
    pub fn circle(center: PointF, radius: f32) -> IconResult<Self> {
        require_finite("circle", &[center.x, center.y])?;
        require_positive("circle", "radius", radius)?;
        Ok(Self {
            center,
            rx: radius,
            ry: radius,
        })
    }

    pub fn center(&self) -> PointF {
        self.center
    }

    pub fn radii(&self) -> (f32, f32) {
        (self.rx, self.ry)
    }
}

impl Shape for Ellipse {
    fn bounds(&self) -> BoundsF {
        BoundsF::around(self.center, self.rx, self.ry)
    }

    fn contains(&self, point: PointF) -> bool {
        let dx = (point.x - self.center.x) / self.rx;
        let dy = (point.y - self.center.y) / self.ry;
        dx * dx + dy * dy <= 1.0
    }
}
