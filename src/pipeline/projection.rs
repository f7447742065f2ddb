use crate::scene::view_state::TextureProjection;
use nalgebra::{Point3, Vector2};
use std::f32::consts::{PI, TAU};

/// Generates texture coordinates from a model-space position.
///
/// Positions are expected in the normalized model cube (largest extent 1,
/// centered at the origin), so the orthographic and cylindrical `v` span [0, 1].
/// Returns `None` when no projection is active.
pub fn project_uv(projection: TextureProjection, p: &Point3<f32>) -> Option<Vector2<f32>> {
    match projection {
        TextureProjection::None => None,
        TextureProjection::Orthographic => Some(Vector2::new(p.x + 0.5, p.y + 0.5)),
        TextureProjection::Cylindrical => Some(Vector2::new(azimuth_u(p), p.y + 0.5)),
        TextureProjection::Spherical => {
            let r = p.coords.norm();
            let v = if r > 1e-6 {
                (p.y / r).clamp(-1.0, 1.0).asin() / PI + 0.5
            } else {
                0.5
            };
            Some(Vector2::new(azimuth_u(p), v))
        }
    }
}

/// Angle around the Y axis mapped to [0, 1].
fn azimuth_u(p: &Point3<f32>) -> f32 {
    p.z.atan2(p.x) / TAU + 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn no_projection_gives_no_uv() {
        assert!(project_uv(TextureProjection::None, &Point3::new(0.1, 0.2, 0.3)).is_none());
    }

    #[test]
    fn orthographic_maps_cube_face_to_unit_square() {
        let low = project_uv(TextureProjection::Orthographic, &Point3::new(-0.5, -0.5, 0.4)).unwrap();
        let high = project_uv(TextureProjection::Orthographic, &Point3::new(0.5, 0.5, -0.4)).unwrap();
        assert_relative_eq!(low, Vector2::new(0.0, 0.0));
        assert_relative_eq!(high, Vector2::new(1.0, 1.0));
    }

    #[test]
    fn cylindrical_wraps_around_y() {
        let front = project_uv(TextureProjection::Cylindrical, &Point3::new(1.0, 0.0, 0.0)).unwrap();
        let side = project_uv(TextureProjection::Cylindrical, &Point3::new(0.0, 0.25, 1.0)).unwrap();
        assert_relative_eq!(front, Vector2::new(0.5, 0.5));
        assert_relative_eq!(side, Vector2::new(0.75, 0.75));
    }

    #[test]
    fn spherical_poles_and_center() {
        let north = project_uv(TextureProjection::Spherical, &Point3::new(0.0, 0.5, 0.0)).unwrap();
        let south = project_uv(TextureProjection::Spherical, &Point3::new(0.0, -0.5, 0.0)).unwrap();
        let origin = project_uv(TextureProjection::Spherical, &Point3::origin()).unwrap();
        assert_relative_eq!(north.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(south.y, 0.0, epsilon = 1e-6);
        assert!(origin.iter().all(|c| c.is_finite()));
    }
}
