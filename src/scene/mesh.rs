use crate::core::geometry::Vertex;

/// A collection of vertices and indices representing the loaded model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// List of vertices, the position in the list is the vertex id.
    pub vertices: Vec<Vertex>,
    /// List of indices defining triangles (3 indices per triangle).
    pub indices: Vec<u32>,
}

/// Reason a mesh buffer breaks the indexed triangle list invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeshDefect {
    PartialTriangle { len: usize },
    IndexOutOfBounds { position: usize, index: u32 },
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterates over triangles as vertex-id triples in traversal order.
    pub fn triangles(&self) -> impl Iterator<Item = [usize; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|t| [t[0] as usize, t[1] as usize, t[2] as usize])
    }

    /// Checks that every index is a valid vertex id and the list holds whole triangles.
    pub fn validate(&self) -> Result<(), MeshDefect> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshDefect::PartialTriangle {
                len: self.indices.len(),
            });
        }
        let count = self.vertices.len();
        match self
            .indices
            .iter()
            .position(|&index| index as usize >= count)
        {
            Some(position) => Err(MeshDefect::IndexOutOfBounds {
                position,
                index: self.indices[position],
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn triangle() -> Mesh {
        let vertices = (0..3)
            .map(|i| Vertex::with_palette_color(Point3::new(i as f32, 0.0, 0.0), i))
            .collect();
        Mesh::new(vertices, vec![0, 1, 2])
    }

    #[test]
    fn valid_triangle_passes() {
        let mesh = triangle();
        assert_eq!(mesh.validate(), Ok(()));
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.triangles().collect::<Vec<_>>(), vec![[0, 1, 2]]);
    }

    #[test]
    fn partial_triangle_is_rejected() {
        let mut mesh = triangle();
        mesh.indices.push(0);
        assert_eq!(mesh.validate(), Err(MeshDefect::PartialTriangle { len: 4 }));
    }

    #[test]
    fn dangling_index_is_rejected() {
        let mut mesh = triangle();
        mesh.indices[1] = 7;
        assert_eq!(
            mesh.validate(),
            Err(MeshDefect::IndexOutOfBounds {
                position: 1,
                index: 7
            })
        );
    }
}
