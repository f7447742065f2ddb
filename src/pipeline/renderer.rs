use crate::core::math::transform::{apply_perspective_division, ndc_to_screen};
use crate::pipeline::projection::project_uv;
use crate::pipeline::shading::{blend, clamp_color, phong};
use crate::scene::camera::Camera;
use crate::scene::light::PhongLight;
use crate::scene::mesh::Mesh;
use crate::scene::texture::Texture;
use crate::scene::view_state::{TextureProjection, ViewState, VisualizationMode};
use nalgebra::{Matrix3, Point2, Point3, Vector2, Vector3};
use rayon::prelude::*;

/// A vertex after the model-view-projection transform and per-vertex shading.
#[derive(Debug, Clone, Copy)]
pub struct ScreenVertex {
    /// Window position in pixels, y down.
    pub position: Point2<f32>,
    /// NDC depth, larger is farther.
    pub depth: f32,
    pub color: Vector3<f32>,
    /// Inside the near/far range of the camera.
    pub visible: bool,
}

/// What the presentation layer paints for one frame.
#[derive(Debug, Clone)]
pub struct DrawList {
    pub vertices: Vec<ScreenVertex>,
    /// Visible triangles sorted back to front.
    pub triangles: Vec<[u32; 3]>,
    pub mode: VisualizationMode,
    pub stroke: f32,
}

/// Transforms, shades and depth-sorts the model for the current view state.
///
/// The mesh is only read; vertices are processed in parallel and the result is
/// complete before it is returned.
pub fn build_frame(
    mesh: &Mesh,
    state: &ViewState,
    camera: &Camera,
    texture: Option<&Texture>,
    viewport: Vector2<f32>,
) -> DrawList {
    let model = state.model_matrix();
    let mvp = camera.projection_matrix() * camera.view_matrix() * model;

    // Inverse transpose keeps normals perpendicular under non-uniform scale.
    let linear: Matrix3<f32> = model.fixed_view::<3, 3>(0, 0).into_owned();
    let normal_matrix = linear.try_inverse().map(|m| m.transpose()).unwrap_or(linear);

    let light = PhongLight::from_state(state);
    let texture = match state.projection {
        TextureProjection::None => None,
        _ => texture,
    };

    let vertices: Vec<ScreenVertex> = mesh
        .vertices
        .par_iter()
        .map(|vertex| {
            let clip = mvp * vertex.position;
            let visible = clip.w > 1e-5 && clip.z >= -clip.w && clip.z <= clip.w;
            let ndc = apply_perspective_division(&clip);
            let position = ndc_to_screen(ndc.x, ndc.y, viewport.x, viewport.y);

            let base_color = texture
                .zip(project_uv(state.projection, &vertex.point()))
                .map(|(tex, uv)| tex.sample(uv.x, uv.y))
                .unwrap_or_else(|| vertex.color.xyz());

            let lit = if state.lighting {
                let world = model * vertex.position;
                let world_pos = Point3::new(world.x, world.y, world.z);
                let normal = normal_matrix * vertex.normal;
                phong(&light, &camera.position, &world_pos, &normal, &base_color)
            } else {
                clamp_color(base_color)
            };

            ScreenVertex {
                position,
                depth: ndc.z,
                color: blend(&lit, &state.blend_color, state.blend),
                visible,
            }
        })
        .collect();

    let mut sorted: Vec<(f32, [u32; 3])> = mesh
        .indices
        .chunks_exact(3)
        .filter_map(|t| {
            let tri = [t[0], t[1], t[2]];
            let corners = tri.map(|i| &vertices[i as usize]);
            corners.iter().all(|v| v.visible).then(|| {
                let depth = corners.iter().map(|v| v.depth).sum::<f32>() / 3.0;
                (depth, tri)
            })
        })
        .collect();
    // Painter's algorithm: farthest first.
    sorted.sort_by(|a, b| b.0.total_cmp(&a.0));

    DrawList {
        vertices,
        triangles: sorted.into_iter().map(|(_, tri)| tri).collect(),
        mode: state.mode,
        stroke: state.stroke,
    }
}

impl DrawList {
    /// Unique triangle edges for wireframe drawing.
    pub fn edges(&self) -> Vec<[u32; 2]> {
        let mut edges: Vec<[u32; 2]> = self
            .triangles
            .iter()
            .flat_map(|&[a, b, c]| [[a, b], [b, c], [c, a]])
            .map(|[a, b]| if a < b { [a, b] } else { [b, a] })
            .collect();
        edges.sort_unstable();
        edges.dedup();
        edges
    }
}
