use crate::scene::mesh::Mesh;
use log::warn;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Normal given to vertices whose adjacent faces cancel out or have no area.
pub const FALLBACK_NORMAL: Vector3<f32> = Vector3::new(0.0, 1.0, 0.0);

/// Generates smooth vertex normals by accumulating face normals.
///
/// Face normals are the unnormalized `(p2 - p1) x (p3 - p1)`, so larger faces
/// weigh more and the winding of the source decides the sign. Returns the
/// number of vertices that ended with a zero accumulator and got
/// [`FALLBACK_NORMAL`].
pub fn accumulate_smooth_normals(mesh: &mut Mesh) -> usize {
    let mut accumulated = vec![Vector3::<f32>::zeros(); mesh.vertices.len()];

    for [i1, i2, i3] in mesh.triangles() {
        let p1 = mesh.vertices[i1].point();
        let p2 = mesh.vertices[i2].point();
        let p3 = mesh.vertices[i3].point();

        let face_normal = (p2 - p1).cross(&(p3 - p1));

        accumulated[i1] += face_normal;
        accumulated[i2] += face_normal;
        accumulated[i3] += face_normal;
    }

    let zero_norm_count = mesh
        .vertices
        .par_iter_mut()
        .zip(accumulated.par_iter())
        .map(|(vertex, normal)| {
            // Only an exactly zero (or overflowed) accumulator has no direction.
            match normal.try_normalize(0.0).filter(|n| n.iter().all(|c| c.is_finite())) {
                Some(unit) => {
                    vertex.normal = unit;
                    0
                }
                None => {
                    vertex.normal = FALLBACK_NORMAL;
                    1
                }
            }
        })
        .sum::<usize>();

    if zero_norm_count > 0 {
        warn!("{zero_norm_count} vertices have a zero accumulated normal, using (0, 1, 0)");
    }

    zero_norm_count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Vertex;
    use crate::scene::import::{GeometrySource, import_geometry};
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn mesh_from(points: &[[f32; 3]], indices: Vec<u32>) -> Mesh {
        let vertices = points
            .iter()
            .enumerate()
            .map(|(i, p)| Vertex::with_palette_color(Point3::from(*p), i))
            .collect();
        Mesh::new(vertices, indices)
    }

    #[test]
    fn single_triangle_follows_winding() {
        let points = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];

        let mut ccw = mesh_from(&points, vec![0, 1, 2]);
        assert_eq!(accumulate_smooth_normals(&mut ccw), 0);
        for v in &ccw.vertices {
            assert_relative_eq!(v.normal, Vector3::z());
        }

        let mut cw = mesh_from(&points, vec![0, 2, 1]);
        accumulate_smooth_normals(&mut cw);
        for v in &cw.vertices {
            assert_relative_eq!(v.normal, -Vector3::z());
        }
    }

    #[test]
    fn larger_faces_weigh_more() {
        // Shared edge 0-1; a small triangle facing +Z and a large one facing +Y.
        let points = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, -3.0],
        ];
        let mut mesh = mesh_from(&points, vec![0, 1, 2, 0, 1, 3]);
        accumulate_smooth_normals(&mut mesh);

        // Accumulator on the shared edge: (0,0,1) + (0,3,0)
        let expected = Vector3::new(0.0, 3.0, 1.0).normalize();
        assert_relative_eq!(mesh.vertices[0].normal, expected, epsilon = 1e-6);
        assert_relative_eq!(mesh.vertices[1].normal, expected, epsilon = 1e-6);
    }

    #[test]
    fn tiny_triangles_keep_their_winding() {
        let points = [[0.0, 0.0, 0.0], [1e-4, 0.0, 0.0], [0.0, 0.0, -1e-4]];

        let mut up = mesh_from(&points, vec![0, 1, 2]);
        assert_eq!(accumulate_smooth_normals(&mut up), 0);
        for v in &up.vertices {
            assert_relative_eq!(v.normal, Vector3::y(), epsilon = 1e-5);
        }

        let mut down = mesh_from(&points, vec![0, 2, 1]);
        assert_eq!(accumulate_smooth_normals(&mut down), 0);
        for v in &down.vertices {
            assert_relative_eq!(v.normal, -Vector3::y(), epsilon = 1e-5);
        }
    }

    #[test]
    fn huge_triangles_stay_unit_length() {
        let points = [[0.0, 0.0, 0.0], [1e5, 0.0, 0.0], [0.0, 1e5, 0.0]];
        let mut mesh = mesh_from(&points, vec![0, 1, 2]);
        assert_eq!(accumulate_smooth_normals(&mut mesh), 0);
        for v in &mesh.vertices {
            assert_relative_eq!(v.normal, Vector3::z(), epsilon = 1e-5);
        }
    }

    #[test]
    fn unreferenced_and_degenerate_vertices_get_fallback() {
        let points = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [2.0, 0.0, 0.0], // collinear, zero area
            [5.0, 5.0, 5.0], // isolated
        ];
        let mut mesh = mesh_from(&points, vec![0, 1, 2]);
        assert_eq!(accumulate_smooth_normals(&mut mesh), 4);
        for v in &mesh.vertices {
            assert_eq!(v.normal, FALLBACK_NORMAL);
            assert!(v.normal.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn cube_normals_are_unit_and_point_outward() {
        let mut mesh = import_geometry(&GeometrySource::test_cube()).unwrap();
        assert_eq!(accumulate_smooth_normals(&mut mesh), 0);

        for v in &mesh.vertices {
            assert_relative_eq!(v.normal.norm(), 1.0, epsilon = 1e-6);
            assert!(v.normal.dot(&v.point().coords) > 0.0);
        }
    }
}
