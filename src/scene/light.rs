use crate::scene::view_state::ViewState;
use nalgebra::{Point3, Vector3};

/// Point light plus the Phong coefficients it is evaluated with.
#[derive(Debug, Clone, PartialEq)]
pub struct PhongLight {
    pub position: Point3<f32>,
    pub color: Vector3<f32>,
    pub ka: f32,
    pub kd: f32,
    pub ks: f32,
    pub shininess: f32,
}

impl PhongLight {
    /// Snapshot of the lighting parameters for one frame.
    pub fn from_state(state: &ViewState) -> Self {
        Self {
            position: state.light_position,
            color: state.light_color,
            ka: state.ka,
            kd: state.kd,
            ks: state.ks,
            shininess: state.shininess.max(1.0),
        }
    }

    /// Calculates the direction vector FROM the surface point TO the light source.
    pub fn direction_to_light(&self, surface_point: &Point3<f32>) -> Vector3<f32> {
        (self.position - surface_point)
            .try_normalize(1e-6)
            .unwrap_or_else(Vector3::zeros)
    }
}
