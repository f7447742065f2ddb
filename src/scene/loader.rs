use crate::error::ImportError;
use crate::io::obj_loader::load_obj_source;
use crate::scene::bounds::BoundingBox;
use crate::scene::import::{GeometrySource, import_geometry};
use crate::scene::mesh::Mesh;
use crate::scene::normals::accumulate_smooth_normals;
use crate::scene::utils::normalize_and_center_model;
use log::{debug, info};
use nalgebra::Point3;
use std::path::Path;
use std::time::Instant;

/// What the load pipeline had to work around.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Vertices that received the fallback normal.
    pub degenerate_normals: usize,
    /// The model had zero extent and kept scale 1.0.
    pub degenerate_extent: bool,
}

/// A model that went through import, normal accumulation and normalization.
///
/// The mesh is not mutated after load; it is only handed out by reference.
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub name: String,
    mesh: Mesh,
    /// Center of the raw model, already subtracted from every position.
    pub center: Point3<f32>,
    /// Uniform factor already applied to every position.
    pub scale: f32,
    pub report: LoadReport,
}

impl LoadedModel {
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh.vertices.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }
}

/// Runs import -> normals -> centering/scaling on an in-memory source.
pub fn build_model(name: impl Into<String>, source: &GeometrySource) -> Result<LoadedModel, ImportError> {
    let name = name.into();

    let import_start = Instant::now();
    let mut mesh = import_geometry(source)?;
    debug!(
        "Import of '{}' took {:?}: {} unique vertices, {} triangles",
        name,
        import_start.elapsed(),
        mesh.vertices.len(),
        mesh.triangle_count()
    );

    let degenerate_extent = BoundingBox::from_positions(mesh.vertices.iter().map(|v| v.point()))
        .is_none_or(|b| b.is_degenerate());

    let normals_start = Instant::now();
    let degenerate_normals = accumulate_smooth_normals(&mut mesh);
    debug!("Normal accumulation took {:?}", normals_start.elapsed());

    let (center, scale) = normalize_and_center_model(&mut mesh);
    debug!("Model normalized. Center: {center:.3?}, Scale: {scale:.4}");

    Ok(LoadedModel {
        name,
        mesh,
        center,
        scale,
        report: LoadReport {
            degenerate_normals,
            degenerate_extent,
        },
    })
}

/// Loads an OBJ file and prepares it for display.
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<LoadedModel, ImportError> {
    let path = path.as_ref();
    let load_start = Instant::now();

    let source = load_obj_source(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".to_string());
    let model = build_model(name, &source)?;

    info!(
        "Model '{}' ready in {:?}: {} vertices, {} triangles",
        model.name,
        load_start.elapsed(),
        model.vertex_count(),
        model.triangle_count()
    );

    Ok(model)
}
