//! Stroked line segments and the multi-spoke star built from them.

use super::{require_finite, require_positive, Shape};
use crate::error::{IconError, IconResult};
use crate::icon::{BoundsF, PointF};

// ============================================================================
// Stroke
// ============================================================================

/// A straight segment drawn with a given width and flat (butt) ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    from: PointF,
    to: PointF,
    width: f32,
}

impl Stroke {
    pub fn new(from: PointF, to: PointF, width: f32) -> IconResult<Self> {
        require_finite("line", &[from.x, from.y, to.x, to.y])?;
        require_positive("line", "width", width)?;
        if from == to {
            return Err(IconError::geometry(format!(
                "line from ({}, {}) has zero length",
                from.x, from.y
            )));
        }
        Ok(Self { from, to, width })
    }

    pub fn endpoints(&self) -> (PointF, PointF) {
        (self.from, self.to)
    }
}

impl Shape for Stroke {
    fn bounds(&self) -> BoundsF {
        BoundsF::new(
            self.from.x.min(self.to.x),
            self.from.y.min(self.to.y),
            self.from.x.max(self.to.x),
            self.from.y.max(self.to.y),
        )
        .expanded(self.width / 2.0)
    }

    fn contains(&self, point: PointF) -> bool {
        let (dx, dy) = (self.to.x - self.from.x, self.to.y - self.from.y);
        let (px, py) = (point.x - self.from.x, point.y - self.from.y);
        let len_sq = dx * dx + dy * dy;
        let t = (px * dx + py * dy) / len_sq;
        if !(0.0..=1.0).contains(&t) {
            return false;
        }
        // Perpendicular distance via the cross product.
        let cross = px * dy - py * dx;
        let half = self.width / 2.0;
        cross * cross <= half * half * len_sq
    }
}

// ============================================================================
// Star
// ============================================================================

/// A sparkle: evenly spaced spokes radiating from a shared center.
///
/// Spoke `i` points at `i * 360° / spoke_count`, starting along +x and
/// turning clockwise in image space. Even spokes have the outer length and
/// odd spokes `outer_length * inner_ratio`.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    center: PointF,
    spokes: Vec<Stroke>,
}

impl Star {
    /// Builds a star. `spoke_count` must be even and at least 4.
    pub fn new(
        center: PointF,
        spoke_count: u32,
        outer_length: f32,
        inner_ratio: f32,
        stroke_width: f32,
    ) -> IconResult<Self> {
        if spoke_count < 4 || spoke_count % 2 != 0 {
            return Err(IconError::geometry(format!(
                "star spoke count must be even and at least 4, got {spoke_count}"
            )));
        }
        require_positive("star", "spoke length", outer_length)?;
        require_positive("star", "inner length ratio", inner_ratio)?;

        let step = 360.0 / spoke_count as f32;
        let spokes = (0..spoke_count)
            .map(|i| {
                let length = if i % 2 == 0 {
                    outer_length
                } else {
                    outer_length * inner_ratio
                };
                let angle = (i as f32 * step).to_radians();
                let tip = PointF::new(
                    center.x + length * angle.cos(),
                    center.y + length * angle.sin(),
                );
                Stroke::new(center, tip, stroke_width)
            })
            .collect::<IconResult<Vec<_>>>()?;

        Ok(Self { center, spokes })
    }

    pub fn center(&self) -> PointF {
        self.center
    }

    pub fn spokes(&self) -> &[Stroke] {
        &self.spokes
    }
}

impl Shape for Star {
    fn bounds(&self) -> BoundsF {
        self.spokes
            .iter()
            .map(Stroke::bounds)
            .reduce(|a, b| a.union(&b))
            .unwrap_or_else(|| BoundsF::around(self.center, 0.0, 0.0))
    }

    fn contains(&self, point: PointF) -> bool {
        self.spokes.iter().any(|s| s.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::coverage;

    #[test]
    fn horizontal_stroke_has_exact_width() {
        let line = Stroke::new(PointF::new(2.0, 8.0), PointF::new(14.0, 8.0), 2.0).unwrap();
        let pixels: Vec<_> = coverage(&line, 16).collect();
        assert!(pixels.iter().all(|&(_, y)| y == 7 || y == 8));
        assert_eq!(pixels.len(), 24);
    }

    #[test]
    fn zero_length_line_is_rejected() {
        let p = PointF::new(3.0, 3.0);
        assert!(Stroke::new(p, p, 2.0).unwrap_err().is_geometry());
        assert!(Stroke::new(p, PointF::new(4.0, 4.0), 0.0).is_err());
    }

    #[test]
    fn odd_or_small_spoke_counts_are_rejected() {
        let c = PointF::new(50.0, 50.0);
        for count in [0, 2, 3, 5, 7] {
            let err = Star::new(c, count, 10.0, 0.5, 2.0).unwrap_err();
            assert!(err.is_geometry(), "count {count} accepted");
        }
        assert!(Star::new(c, 4, 10.0, 0.5, 2.0).is_ok());
        assert!(Star::new(c, 8, 10.0, 0.5, 2.0).is_ok());
    }

    #[test]
    fn spokes_alternate_lengths() {
        let c = PointF::new(96.0, 91.0);
        let star = Star::new(c, 8, 35.0, 0.4, 6.0).unwrap();
        assert_eq!(star.spokes().len(), 8);
        let length = |s: &Stroke| {
            let (a, b) = s.endpoints();
            ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt()
        };
        assert!((length(&star.spokes()[0]) - 35.0).abs() < 1e-3);
        assert!((length(&star.spokes()[1]) - 14.0).abs() < 1e-3);
        assert!((length(&star.spokes()[2]) - 35.0).abs() < 1e-3);
    }

    #[test]
    fn star_bounds_cover_stroke_width() {
        let star = Star::new(PointF::new(16.0, 15.0), 4, 8.0, 1.0, 2.0).unwrap();
        let b = star.bounds();
        assert!((b.min_x - 7.0).abs() < 1e-3);
        assert!((b.max_x - 25.0).abs() < 1e-3);
        assert!((b.min_y - 6.0).abs() < 1e-3);
        assert!((b.max_y - 24.0).abs() < 1e-3);
        assert!(star.contains(PointF::new(16.5, 8.5)));
        assert!(!star.contains(PointF::new(20.5, 10.5)));
    }
}
