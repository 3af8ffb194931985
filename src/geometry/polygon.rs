//! Filled polygons using the even-odd rule.

use super::{require_finite, Shape};
use crate::error::{IconError, IconResult};
use crate::icon::{BoundsF, PointF};

/// A closed polygon over an ordered vertex list.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<PointF>,
    bounds: BoundsF,
}

impl Polygon {
    /// Creates a polygon. At least three vertices are required.
    pub fn new(points: Vec<PointF>) -> IconResult<Self> {
        if points.len() < 3 {
            return Err(IconError::geometry(format!(
                "polygon needs at least 3 points, got {}",
                points.len()
            )));
        }
        let coords: Vec<f32> = points.iter().flat_map(|p| [p.x, p.y]).collect();
        require_finite("polygon", &coords)?;
        let bounds = BoundsF::enclosing(&points)
            .ok_or_else(|| IconError::geometry("polygon has no points"))?;
        Ok(Self { points, bounds })
    }

    pub fn points(&self) -> &[PointF] {
        &self.points
    }
}

impl Shape for Polygon {
    fn bounds(&self) -> BoundsF {
        self.bounds
    }

    fn contains(&self, point: PointF) -> bool {
        let mut inside = false;
        let n = self.points.len();
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.points[i], self.points[j]);
            if (a.y > point.y) != (b.y > point.y) {
                let cross_x = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
                if point.x < cross_x {
                    inside = !inside;
                }
            }
            j = i;
        }
        inside
    }
}
