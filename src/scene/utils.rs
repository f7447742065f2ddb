use crate::scene::bounds::BoundingBox;
use crate::scene::mesh::Mesh;
use log::warn;
use nalgebra::Point3;
use rayon::prelude::*;

/// Analyzes the mesh's bounding box and transforms all vertices so that the
/// model is centered at (0,0,0) and its largest extent is exactly 1.0.
///
/// Returns the original center and the scaling factor used.
pub fn normalize_and_center_model(mesh: &mut Mesh) -> (Point3<f32>, f32) {
    let Some(bounds) = BoundingBox::from_positions(mesh.vertices.iter().map(|v| v.point())) else {
        return (Point3::origin(), 1.0);
    };

    let center = bounds.center();
    let scale_factor = bounds.normalization_scale();
    if bounds.is_degenerate() {
        warn!(
            "Model has zero extent (largest axis {:e}), keeping scale 1.0",
            bounds.largest_extent()
        );
    }

    mesh.vertices.par_iter_mut().for_each(|vertex| {
        // Translate to origin then scale
        let centered = (vertex.point() - center) * scale_factor;
        vertex.position = centered.push(1.0);
    });

    (center, scale_factor)
}
