//! Filled rectangles with circular corners.

use super::{require_finite, Shape};
use crate::error::{IconError, IconResult};
use crate::icon::{BoundsF, PointF};

/// A filled rectangle whose corners are rounded with a shared radius.
///
/// A radius larger than half the shorter side is clamped to it, which turns
/// the short edges into half circles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    rect: BoundsF,
    radius: f32,
}

impl RoundedRect {
    pub fn new(rect: BoundsF, corner_radius: f32) -> IconResult<Self> {
        require_finite(
            "rounded rect",
            &[rect.min_x, rect.min_y, rect.max_x, rect.max_y, corner_radius],
        )?;
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Err(IconError::geometry(format!(
                "rounded rect must have positive extent, got {}x{}",
                rect.width(),
                rect.height()
            )));
        }
        if corner_radius < 0.0 {
            return Err(IconError::geometry(format!(
                "rounded rect corner radius must not be negative, got {corner_radius}"
            )));
        }
        let max_radius = rect.width().min(rect.height()) / 2.0;
        Ok(Self {
            rect,
            radius: corner_radius.min(max_radius),
        })
    }

    /// The corner radius after clamping.
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Shape for RoundedRect {
    fn bounds(&self) -> BoundsF {
        self.rect
    }

    fn contains(&self, point: PointF) -> bool {
        let r = &self.rect;
        if point.x < r.min_x || point.x > r.max_x || point.y < r.min_y || point.y > r.max_y {
            return false;
        }
        // Distance from the inner rectangle whose corners are the arc centers.
        let cx = point.x.clamp(r.min_x + self.radius, r.max_x - self.radius);
        let cy = point.y.clamp(r.min_y + self.radius, r.max_y - self.radius);
        let dx = point.x - cx;
        let dy = point.y - cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}
