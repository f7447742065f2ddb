use crate::core::geometry::Vertex;
use crate::error::ImportError;
use crate::scene::mesh::Mesh;
use log::debug;
use nalgebra::Point3;
use std::collections::HashMap;

/// One shape of a geometry source: a triangle list over source position ids.
#[derive(Debug, Clone, Default)]
pub struct SourceShape {
    pub name: String,
    /// Source position ids, three per triangle.
    pub indices: Vec<u32>,
}

/// Raw, already triangulated geometry as it comes out of a file parser.
#[derive(Debug, Clone, Default)]
pub struct GeometrySource {
    /// Flat `x, y, z` positions shared by all shapes.
    pub positions: Vec<f32>,
    pub shapes: Vec<SourceShape>,
}

impl GeometrySource {
    pub fn position_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn position(&self, id: u32) -> Option<Point3<f32>> {
        let start = id as usize * 3;
        self.positions
            .get(start..start + 3)
            .map(|p| Point3::new(p[0], p[1], p[2]))
    }

    /// Axis-aligned cube spanning `[-0.5, 0.5]` on every axis, 8 corners, 12 triangles.
    ///
    /// Winding is counter-clockwise seen from outside. Corners 0 and 6 sit on
    /// the shared diagonal of every face they touch.
    pub fn test_cube() -> Self {
        #[rustfmt::skip]
        let corners: [[f32; 3]; 8] = [
            [0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0],
        ];
        let positions = corners.iter().flatten().map(|c| c - 0.5).collect();

        #[rustfmt::skip]
        let indices = vec![
            0, 2, 1,  0, 3, 2, // bottom (z-)
            4, 5, 6,  4, 6, 7, // top (z+)
            0, 1, 5,  0, 5, 4, // front (y-)
            3, 7, 6,  3, 6, 2, // back (y+)
            0, 4, 7,  0, 7, 3, // left (x-)
            1, 2, 6,  1, 6, 5, // right (x+)
        ];

        Self {
            positions,
            shapes: vec![SourceShape {
                name: "cube".to_string(),
                indices,
            }],
        }
    }
}

/// Builds a compact indexed vertex buffer from a geometry source.
///
/// Each source position id gets exactly one vertex, created the first time the
/// id is referenced; later references reuse it. Indices keep the traversal
/// order shape -> face -> corner.
pub fn import_geometry(source: &GeometrySource) -> Result<Mesh, ImportError> {
    if source.shapes.is_empty() {
        return Err(ImportError::NoShapes);
    }
    if source.positions.len() % 3 != 0 {
        return Err(ImportError::MalformedPositions(source.positions.len()));
    }

    let total_indices: usize = source.shapes.iter().map(|s| s.indices.len()).sum();
    let mut vertices: Vec<Vertex> = Vec::new();
    let mut indices: Vec<u32> = Vec::with_capacity(total_indices);
    // source id -> compact id
    let mut index_map: HashMap<u32, u32> = HashMap::new();

    for shape in &source.shapes {
        if shape.indices.len() % 3 != 0 {
            return Err(ImportError::NotTriangulated {
                shape: shape.name.clone(),
                len: shape.indices.len(),
            });
        }

        for &source_id in &shape.indices {
            if let Some(&compact_id) = index_map.get(&source_id) {
                indices.push(compact_id);
                continue;
            }

            let position = source
                .position(source_id)
                .ok_or_else(|| ImportError::IndexOutOfRange {
                    shape: shape.name.clone(),
                    index: source_id,
                    position_count: source.position_count(),
                })?;

            let compact_id = vertices.len() as u32;
            vertices.push(Vertex::with_palette_color(position, vertices.len()));
            index_map.insert(source_id, compact_id);
            indices.push(compact_id);
        }

        debug!(
            "Imported shape '{}': {} triangles",
            shape.name,
            shape.indices.len() / 3
        );
    }

    Ok(Mesh::new(vertices, indices))
}
