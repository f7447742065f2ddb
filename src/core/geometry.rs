use nalgebra::{Point3, Vector3, Vector4};

/// Placeholder colors handed out round-robin at vertex creation.
pub const PLACEHOLDER_PALETTE: [[f32; 4]; 3] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
];

/// Represents a single vertex of the loaded model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Homogeneous position in model space, `w` is always 1.
    pub position: Vector4<f32>,
    /// Smooth normal, filled in by normal accumulation.
    pub normal: Vector3<f32>,
    /// Placeholder color, fixed at creation.
    pub color: Vector4<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, color: Vector4<f32>) -> Self {
        Self {
            position: position.to_homogeneous(),
            normal: Vector3::zeros(),
            color,
        }
    }

    /// Creates a vertex colored by its creation order.
    pub fn with_palette_color(position: Point3<f32>, creation_index: usize) -> Self {
        Self::new(position, palette_color(creation_index))
    }

    /// Cartesian position (drops `w`).
    #[inline]
    pub fn point(&self) -> Point3<f32> {
        Point3::new(self.position.x, self.position.y, self.position.z)
    }
}

/// Returns the palette entry for the `index`-th created vertex.
#[inline]
pub fn palette_color(index: usize) -> Vector4<f32> {
    Vector4::from(PLACEHOLDER_PALETTE[index % PLACEHOLDER_PALETTE.len()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles_every_three_vertices() {
        assert_eq!(palette_color(0), palette_color(3));
        assert_eq!(palette_color(1), palette_color(4));
        assert_ne!(palette_color(0), palette_color(1));
        assert_ne!(palette_color(1), palette_color(2));
    }

    #[test]
    fn new_vertex_is_homogeneous() {
        let v = Vertex::with_palette_color(Point3::new(1.0, 2.0, 3.0), 1);
        assert_eq!(v.position, Vector4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(v.point(), Point3::new(1.0, 2.0, 3.0));
        assert_eq!(v.normal, Vector3::zeros());
        assert_eq!(v.color, Vector4::new(0.0, 1.0, 0.0, 1.0));
    }
}
