use crate::core::math::transform::TransformFactory;
use crate::io::config::CameraConfig;
use nalgebra::{Matrix4, Point3, Vector3};

/// Perspective camera looking at the origin, where the model sits after load.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov_y_rad: f32,
    pub aspect_ratio: f32,
    pub near: f32,
    pub far: f32,

    // --- Cached Matrices ---
    view_matrix: Matrix4<f32>,
    projection_matrix: Matrix4<f32>,
}

impl Camera {
    pub fn new_perspective(
        position: Point3<f32>,
        target: Point3<f32>,
        up: Vector3<f32>,
        fov_y_rad: f32,
        aspect_ratio: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let mut cam = Self {
            position,
            target,
            up,
            fov_y_rad,
            aspect_ratio,
            near,
            far,
            view_matrix: Matrix4::identity(),
            projection_matrix: Matrix4::identity(),
        };
        cam.update_matrices();
        cam
    }

    pub fn from_config(config: &CameraConfig, aspect_ratio: f32) -> Self {
        Self::new_perspective(
            Point3::from(config.position),
            Point3::origin(),
            Vector3::y(),
            config.fov.to_radians(),
            aspect_ratio,
            config.near,
            config.far,
        )
    }

    /// Follows the camera position edited in the UI and the current window aspect.
    pub fn sync(&mut self, position: Point3<f32>, aspect_ratio: f32) {
        // An eye on top of the target has no view direction.
        if (position - self.target).norm() < 1e-3 || aspect_ratio <= 0.0 {
            return;
        }
        if position != self.position || aspect_ratio != self.aspect_ratio {
            self.position = position;
            self.aspect_ratio = aspect_ratio;
            self.update_matrices();
        }
    }

    /// Recalculates View and Projection matrices based on current parameters.
    pub fn update_matrices(&mut self) {
        // Looking straight along `up` would make the view basis degenerate.
        let forward = (self.target - self.position).normalize();
        let up = if forward.cross(&self.up).norm_squared() < 1e-8 {
            Vector3::z()
        } else {
            self.up
        };

        self.view_matrix = TransformFactory::view(&self.position, &self.target, &up);
        self.projection_matrix =
            TransformFactory::perspective(self.aspect_ratio, self.fov_y_rad, self.near, self.far);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    #[test]
    fn origin_projects_to_screen_center() {
        let cam = Camera::from_config(&CameraConfig::default(), 860.0 / 640.0);
        let clip = cam.projection_matrix() * cam.view_matrix() * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-6);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-6);
        assert!(clip.w > 0.0);
    }

    #[test]
    fn sync_rebuilds_matrices_on_change() {
        let mut cam = Camera::from_config(&CameraConfig::default(), 1.0);
        let before = cam.projection_matrix();
        cam.sync(cam.position, 2.0);
        assert_ne!(before, cam.projection_matrix());
    }

    #[test]
    fn camera_above_the_model_stays_finite() {
        let mut cam = Camera::from_config(&CameraConfig::default(), 1.0);
        cam.sync(Point3::new(0.0, 5.0, 0.0), 1.0);
        assert!(cam.view_matrix().iter().all(|c| c.is_finite()));
    }
}
