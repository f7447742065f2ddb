use crate::error::ImportError;
use crate::scene::import::{GeometrySource, SourceShape};
use log::{debug, info, warn};
use obj::raw::object::Polygon;
use obj::raw::{RawObj, parse_obj};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads an OBJ file into a flat, triangulated geometry source.
///
/// Positions keep the file's global numbering, so a `v` shared by several
/// objects or groups has one source id everywhere it is referenced.
pub fn load_obj_source<P: AsRef<Path>>(path: P) -> Result<GeometrySource, ImportError> {
    let path = path.as_ref();
    info!("Loading OBJ file: {path:?}");

    let file = File::open(path)?;
    let source = read_obj_source(BufReader::new(file))?;

    info!(
        "OBJ parsed: {} shapes, {} positions",
        source.shapes.len(),
        source.position_count()
    );

    Ok(source)
}

/// Parses OBJ text from any reader. See [`load_obj_source`].
pub fn read_obj_source<R: BufRead>(input: R) -> Result<GeometrySource, ImportError> {
    let raw = parse_obj(input)?;

    // Materials are not used by the viewer, the placeholder palette colors the model.
    if !raw.material_libraries.is_empty() {
        debug!("Ignoring {} MTL libraries", raw.material_libraries.len());
    }
    if !raw.points.is_empty() || !raw.lines.is_empty() {
        debug!(
            "Ignoring {} points and {} lines",
            raw.points.len(),
            raw.lines.len()
        );
    }

    let positions: Vec<f32> = raw
        .positions
        .iter()
        .flat_map(|&(x, y, z, _w)| [x, y, z])
        .collect();

    let labels = polygon_labels(&raw);
    let mut shapes: Vec<SourceShape> = Vec::new();

    for (polygon, label) in raw.polygons.iter().zip(labels) {
        let corners = polygon_positions(polygon);
        if corners.len() < 3 {
            warn!("Skipping face with {} corners in '{label}'", corners.len());
            continue;
        }

        if shapes.last().is_none_or(|shape| shape.name != label) {
            shapes.push(SourceShape {
                name: label,
                indices: Vec::new(),
            });
        }
        let Some(shape) = shapes.last_mut() else {
            continue;
        };

        // Fan triangulation keeps the polygon's winding.
        for pair in corners[1..].windows(2) {
            for id in [corners[0], pair[0], pair[1]] {
                let id = u32::try_from(id).map_err(|_| ImportError::TooManyPositions(id))?;
                shape.indices.push(id);
            }
        }
    }

    Ok(GeometrySource { positions, shapes })
}

fn polygon_positions(polygon: &Polygon) -> Vec<usize> {
    match polygon {
        Polygon::P(v) => v.clone(),
        Polygon::PT(v) => v.iter().map(|&(p, _)| p).collect(),
        Polygon::PN(v) => v.iter().map(|&(p, _)| p).collect(),
        Polygon::PTN(v) => v.iter().map(|&(p, _, _)| p).collect(),
    }
}

/// Shape label of every polygon: its `o` object and `g` group names.
///
/// Names are applied in sorted order so a polygon listed under several groups
/// always gets the same label.
fn polygon_labels(raw: &RawObj) -> Vec<String> {
    let mut objects = vec![None; raw.polygons.len()];
    let mut groups = vec![None; raw.polygons.len()];

    for (names, table) in [(&mut objects, &raw.meshes), (&mut groups, &raw.groups)] {
        let mut entries: Vec<_> = table.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (name, group) in entries {
            for range in &group.polygons {
                for slot in names.iter_mut().take(range.end).skip(range.start) {
                    *slot = Some(name.as_str());
                }
            }
        }
    }

    objects
        .into_iter()
        .zip(groups)
        .map(|(object, group)| {
            let object = object.filter(|o| *o != "default");
            let group = group.filter(|g| *g != "default");
            match (object, group) {
                (Some(o), Some(g)) if o != g => format!("{o}/{g}"),
                (Some(name), _) | (None, Some(name)) => name.to_string(),
                (None, None) => "default".to_string(),
            }
        })
        .collect()
}
