use std::io::Write;
use std::path::Path;

use tracing::debug;

use super::write_atomic;
use crate::error::{IoError, Result, SceneError};
use crate::math::Point3;
use crate::scene::MeshData;

/// Loads every model of an OBJ file into one mesh, keeping polygons as
/// authored (no triangulation).
///
/// # Errors
///
/// Returns an error if the file cannot be parsed or a face index is out of
/// range.
pub fn load_obj(path: &Path) -> Result<MeshData> {
    let options = tobj::LoadOptions {
        single_index: true,
        triangulate: false,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &options).map_err(|source| IoError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        let offset = vertices.len();
        vertices.extend(
            mesh.positions
                .chunks_exact(3)
                .map(|p| Point3::new(f64::from(p[0]), f64::from(p[1]), f64::from(p[2]))),
        );

        let index = |i: &u32| offset + *i as usize;
        if mesh.face_arities.is_empty() {
            faces.extend(mesh.indices.chunks_exact(3).map(|f| f.iter().map(index).collect()));
        } else {
            let mut start = 0;
            for &arity in &mesh.face_arities {
                let end = start + arity as usize;
                let Some(face) = mesh.indices.get(start..end) else {
                    break;
                };
                faces.push(face.iter().map(index).collect());
                start = end;
            }
        }
        debug!(model = %model.name, vertices = mesh.positions.len() / 3, "loaded OBJ model");
    }

    Ok(MeshData::new(vertices, faces)?)
}

/// Writes `mesh` as OBJ with per-vertex colors (`v x y z r g b`) taken from
/// the named color attribute. Alpha is not representable and is dropped.
///
/// # Errors
///
/// Returns an error if the attribute does not exist or the file cannot be
/// written.
pub fn write_obj_with_colors(path: &Path, mesh: &MeshData, attribute: &str) -> Result<()> {
    let colors = mesh
        .color_attribute(attribute)
        .ok_or_else(|| SceneError::AttributeNotFound(attribute.to_owned()))?;

    write_atomic(path, |w| {
        let mut emit = || -> std::io::Result<()> {
            writeln!(w, "# color attribute: {attribute}")?;
            for (v, c) in mesh.vertices().iter().zip(colors) {
                writeln!(
                    w,
                    "v {} {} {} {:.6} {:.6} {:.6}",
                    v.x, v.y, v.z, c.r, c.g, c.b
                )?;
            }
            for face in mesh.faces() {
                write!(w, "f")?;
                for i in face {
                    write!(w, " {}", i + 1)?;
                }
                writeln!(w)?;
            }
            Ok(())
        };
        emit().map_err(|e| IoError::file(path, e))
    })?;
    Ok(())
}
