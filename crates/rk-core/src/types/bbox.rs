//! Axis-aligned bounding boxes

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in centimeters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: DVec3,
    pub max: DVec3,
}

impl BoundingBox {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Box of the given extents centered at `center`
    pub fn from_center_size(center: DVec3, size: DVec3) -> Self {
        let half = size.abs() / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing all points, `None` for an empty set
    pub fn from_points(points: impl IntoIterator<Item = DVec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        let (min, max) = points.fold((first, first), |(min, max), p| (min.min(p), max.max(p)));
        Some(Self { min, max })
    }

    /// Per-axis extents (always non-negative)
    pub fn size(&self) -> DVec3 {
        (self.max - self.min).abs()
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) / 2.0
    }

    /// Length of the space diagonal: sqrt(dx² + dy² + dz²)
    pub fn diagonal(&self) -> f64 {
        self.size().length()
    }

    /// Scale both corners, e.g. to change units
    pub fn scaled(&self, factor: f64) -> Self {
        Self::from_points([self.min * factor, self.max * factor]).unwrap_or(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_diagonal_of_unit_cube() {
        let bbox = BoundingBox::new(DVec3::ZERO, DVec3::ONE);
        assert_relative_eq!(bbox.diagonal(), 3.0_f64.sqrt());
    }

    #[test]
    fn test_diagonal_ignores_corner_order() {
        let bbox = BoundingBox::new(DVec3::new(3.0, 4.0, 0.0), DVec3::ZERO);
        assert_relative_eq!(bbox.diagonal(), 5.0);
    }

    #[test]
    fn test_from_points() {
        let bbox = BoundingBox::from_points([
            DVec3::new(1.0, -2.0, 0.5),
            DVec3::new(-1.0, 2.0, 0.0),
            DVec3::new(0.0, 0.0, 3.0),
        ])
        .unwrap();
        assert_eq!(bbox.min, DVec3::new(-1.0, -2.0, 0.0));
        assert_eq!(bbox.max, DVec3::new(1.0, 2.0, 3.0));
        assert!(BoundingBox::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_from_center_size() {
        let bbox = BoundingBox::from_center_size(DVec3::new(1.0, 1.0, 1.0), DVec3::new(2.0, 4.0, 6.0));
        assert_eq!(bbox.min, DVec3::new(0.0, -1.0, -2.0));
        assert_eq!(bbox.center(), DVec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_scaled_keeps_min_below_max() {
        let bbox = BoundingBox::new(DVec3::ZERO, DVec3::ONE).scaled(-2.0);
        assert_eq!(bbox.min, DVec3::splat(-2.0));
        assert_eq!(bbox.max, DVec3::ZERO);
    }
}
