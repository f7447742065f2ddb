use nalgebra::{Point3, Vector3};

/// Extents at or below this are treated as zero.
pub const DEGENERATE_EXTENT: f32 = 1e-6;

/// Axis-aligned bounding box of the raw model positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f32>,
    pub max: Point3<f32>,
}

impl BoundingBox {
    /// Streams over the positions once, tracking min and max per axis.
    /// Returns `None` when there are no positions.
    pub fn from_positions<I>(positions: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3<f32>>,
    {
        let mut min_bound = Point3::new(f32::MAX, f32::MAX, f32::MAX);
        let mut max_bound = Point3::new(f32::MIN, f32::MIN, f32::MIN);
        let mut has_verts = false;

        for p in positions {
            min_bound.x = min_bound.x.min(p.x);
            min_bound.y = min_bound.y.min(p.y);
            min_bound.z = min_bound.z.min(p.z);

            max_bound.x = max_bound.x.max(p.x);
            max_bound.y = max_bound.y.max(p.y);
            max_bound.z = max_bound.z.max(p.z);
            has_verts = true;
        }

        has_verts.then_some(Self {
            min: min_bound,
            max: max_bound,
        })
    }

    pub fn center(&self) -> Point3<f32> {
        nalgebra::center(&self.min, &self.max)
    }

    pub fn extent(&self) -> Vector3<f32> {
        self.max - self.min
    }

    pub fn largest_extent(&self) -> f32 {
        let extent = self.extent();
        extent.x.max(extent.y).max(extent.z)
    }

    /// Whether the box has zero size along every axis.
    pub fn is_degenerate(&self) -> bool {
        self.largest_extent() <= DEGENERATE_EXTENT
    }

    /// Uniform scale that brings the largest extent to exactly 1.0.
    /// A degenerate box gets 1.0 instead of an infinite factor.
    pub fn normalization_scale(&self) -> f32 {
        if self.is_degenerate() {
            1.0
        } else {
            1.0 / self.largest_extent()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn box_of_scattered_points() {
        let points = [
            Point3::new(1.0, -2.0, 3.0),
            Point3::new(-1.0, 4.0, 0.0),
            Point3::new(0.5, 0.0, 5.0),
        ];
        let bounds = BoundingBox::from_positions(points).unwrap();

        assert_eq!(bounds.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(bounds.max, Point3::new(1.0, 4.0, 5.0));
        assert_relative_eq!(bounds.center(), Point3::new(0.0, 1.0, 2.5));
        assert_relative_eq!(bounds.largest_extent(), 6.0);
        assert_relative_eq!(bounds.normalization_scale(), 1.0 / 6.0);
    }

    #[test]
    fn no_positions_gives_no_box() {
        assert!(BoundingBox::from_positions(std::iter::empty()).is_none());
    }

    #[test]
    fn single_point_falls_back_to_unit_scale() {
        let bounds = BoundingBox::from_positions([Point3::new(2.0, 2.0, 2.0)]).unwrap();
        assert!(bounds.is_degenerate());
        assert_eq!(bounds.normalization_scale(), 1.0);
        assert_eq!(bounds.center(), Point3::new(2.0, 2.0, 2.0));
    }

    #[test]
    fn flat_model_still_scales_by_its_largest_axis() {
        let bounds = BoundingBox::from_positions([
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 2.0, 0.0),
        ])
        .unwrap();
        assert!(!bounds.is_degenerate());
        assert_relative_eq!(bounds.normalization_scale(), 0.25);
    }
}
