use crate::scene::light::PhongLight;
use nalgebra::{Point3, Vector3};

/// Phong lighting evaluated at one surface point.
/// Calculates Ambient + Diffuse + Specular components.
pub fn phong(
    light: &PhongLight,
    camera_pos: &Point3<f32>,
    world_pos: &Point3<f32>,
    normal: &Vector3<f32>,
    base_color: &Vector3<f32>,
) -> Vector3<f32> {
    let Some(normal) = normal.try_normalize(1e-6) else {
        return (light.color * light.ka).component_mul(base_color);
    };
    let light_dir = light.direction_to_light(world_pos);
    let view_dir = (camera_pos - world_pos)
        .try_normalize(1e-6)
        .unwrap_or_else(Vector3::zeros);

    // Ambient
    let ambient = light.color.component_mul(base_color) * light.ka;

    // Diffuse
    let diff = normal.dot(&light_dir).max(0.0);
    let diffuse = light.color.component_mul(base_color) * (light.kd * diff);

    // Specular, only on the lit side
    let specular = if diff > 0.0 {
        let reflect_dir = normal * (2.0 * normal.dot(&light_dir)) - light_dir;
        let spec = view_dir.dot(&reflect_dir).max(0.0).powf(light.shininess);
        light.color * (light.ks * spec)
    } else {
        Vector3::zeros()
    };

    clamp_color(ambient + diffuse + specular)
}

/// Linear mix toward a tint color, `factor` 0 keeps `color`.
pub fn blend(color: &Vector3<f32>, tint: &Vector3<f32>, factor: f32) -> Vector3<f32> {
    let t = factor.clamp(0.0, 1.0);
    color * (1.0 - t) + tint * t
}

pub fn clamp_color(color: Vector3<f32>) -> Vector3<f32> {
    color.map(|c| c.clamp(0.0, 1.0))
}
