use nalgebra::{Matrix4, Point2, Point3, UnitQuaternion, Vector2, Vector3, Vector4};

//=================================
// Transform Matrix Factory
//=================================

/// Factory for creating the transformation matrices used by the viewer.
/// Right-handed coordinates, camera looks down -Z.
pub struct TransformFactory;

#[rustfmt::skip]
impl TransformFactory {
    /// Creates a rotation matrix from an accumulated trackball orientation.
    pub fn rotation(rotation: &UnitQuaternion<f32>) -> Matrix4<f32> {
        rotation.to_homogeneous()
    }

    /// Creates a translation matrix.
    pub fn translation(translation: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            1.0, 0.0, 0.0, translation.x,
            0.0, 1.0, 0.0, translation.y,
            0.0, 0.0, 1.0, translation.z,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Creates a non-uniform scaling matrix.
    pub fn scaling_nonuniform(scale: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new(
            scale.x, 0.0,     0.0,     0.0,
            0.0,     scale.y, 0.0,     0.0,
            0.0,     0.0,     scale.z, 0.0,
            0.0,     0.0,     0.0,     1.0,
        )
    }

    /// Model matrix `T * R * S`.
    /// Centering is baked into the vertex buffer at load time, so it is not repeated here.
    pub fn model(
        translate: &Vector3<f32>,
        rotation: &UnitQuaternion<f32>,
        scale: &Vector3<f32>,
    ) -> Matrix4<f32> {
        Self::translation(translate) * Self::rotation(rotation) * Self::scaling_nonuniform(scale)
    }

    /// Creates a View matrix (Look-At, Right-Handed).
    /// Transforms world space coordinates to camera/view space.
    pub fn view(eye: &Point3<f32>, target: &Point3<f32>, up: &Vector3<f32>) -> Matrix4<f32> {
        // In RHS, camera looks down -Z
        let z_axis = (eye - target).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        let rotation = Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, 0.0,
            y_axis.x, y_axis.y, y_axis.z, 0.0,
            z_axis.x, z_axis.y, z_axis.z, 0.0,
            0.0,      0.0,      0.0,      1.0,
        );

        let translation = Self::translation(&-eye.coords);

        rotation * translation
    }

    /// Creates a Perspective Projection matrix (Right-Handed).
    /// Maps view frustum to NDC [-1, 1].
    pub fn perspective(aspect_ratio: f32, fov_y_rad: f32, near: f32, far: f32) -> Matrix4<f32> {
        let f = 1.0 / (fov_y_rad / 2.0).tan();
        let nf = 1.0 / (near - far);

        Matrix4::new(
            f / aspect_ratio, 0.0, 0.0,               0.0,
            0.0,              f,   0.0,               0.0,
            0.0,              0.0, (far + near) * nf, 2.0 * far * near * nf,
            0.0,              0.0, -1.0,              0.0,
        )
    }
}

//=================================
// Core Transformation Functions
//=================================

/// Performs perspective division: Clip Space -> NDC.
#[inline]
pub fn apply_perspective_division(clip: &Vector4<f32>) -> Point3<f32> {
    let w = clip.w;
    if w.abs() > 1e-6 {
        Point3::new(clip.x / w, clip.y / w, clip.z / w)
    } else {
        Point3::origin()
    }
}

/// Converts NDC coordinates to Screen coordinates (Viewport Transform).
/// Note: Y-axis is flipped (NDC +Y is up, Screen +Y is down).
#[inline]
pub fn ndc_to_screen(ndc_x: f32, ndc_y: f32, width: f32, height: f32) -> Point2<f32> {
    Point2::new(
        (ndc_x + 1.0) * 0.5 * width,
        (1.0 - (ndc_y + 1.0) * 0.5) * height,
    )
}

/// Inverse of [`ndc_to_screen`]: window pixels -> NDC in [-1, 1], y up.
#[inline]
pub fn screen_to_ndc(screen: &Point2<f32>, viewport: &Vector2<f32>) -> Point2<f32> {
    let width = viewport.x.max(1.0);
    let height = viewport.y.max(1.0);
    Point2::new(
        2.0 * screen.x / width - 1.0,
        1.0 - 2.0 * screen.y / height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn screen_corners_map_to_ndc_corners() {
        let viewport = Vector2::new(860.0, 640.0);
        let top_left = screen_to_ndc(&Point2::new(0.0, 0.0), &viewport);
        let bottom_right = screen_to_ndc(&Point2::new(860.0, 640.0), &viewport);
        let center = screen_to_ndc(&Point2::new(430.0, 320.0), &viewport);

        assert_relative_eq!(top_left, Point2::new(-1.0, 1.0));
        assert_relative_eq!(bottom_right, Point2::new(1.0, -1.0));
        assert_relative_eq!(center, Point2::new(0.0, 0.0));
    }

    #[test]
    fn screen_to_ndc_inverts_viewport_transform() {
        let viewport = Vector2::new(800.0, 600.0);
        let screen = ndc_to_screen(0.25, -0.5, viewport.x, viewport.y);
        let ndc = screen_to_ndc(&screen, &viewport);
        assert_relative_eq!(ndc, Point2::new(0.25, -0.5), epsilon = 1e-6);
    }

    #[test]
    fn model_matrix_applies_scale_then_rotation_then_translation() {
        let rotation = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), std::f32::consts::FRAC_PI_2);
        let model = TransformFactory::model(
            &Vector3::new(0.0, 0.0, -1.0),
            &rotation,
            &Vector3::new(2.0, 2.0, 2.0),
        );

        // (1,0,0) -> scale (2,0,0) -> rotate (0,2,0) -> translate (0,2,-1)
        let p = model * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(p, Vector4::new(0.0, 2.0, -1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn perspective_maps_near_plane_to_minus_one() {
        let proj = TransformFactory::perspective(1.0, 90.0_f32.to_radians(), 0.1, 100.0);
        let clip = proj * Vector4::new(0.0, 0.0, -0.1, 1.0);
        let ndc = apply_perspective_division(&clip);
        assert_relative_eq!(ndc.z, -1.0, epsilon = 1e-4);
    }

    #[test]
    fn view_moves_eye_to_origin() {
        let eye = Point3::new(0.0, 0.0, 3.0);
        let view = TransformFactory::view(&eye, &Point3::origin(), &Vector3::y());
        let p = view * eye.to_homogeneous();
        assert_relative_eq!(p, Vector4::new(0.0, 0.0, 0.0, 1.0), epsilon = 1e-6);
    }
}
