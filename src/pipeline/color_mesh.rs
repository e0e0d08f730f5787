use std::path::PathBuf;

use tracing::info;

use crate::color::ColorSpec;
use crate::error::Result;
use crate::io::{self, obj};
use crate::operations::{ColorByDistance, ColoringReport, WindowFraction, DEFAULT_WINDOWS};
use crate::scene::{SceneObject, SceneStore};

/// Outcome of a [`ColorMeshJob`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColorMeshReport {
    pub coloring: ColoringReport,
    /// One OBJ per color attribute, in window order.
    pub files: Vec<PathBuf>,
}

/// Colors an OBJ mesh by its distance to another OBJ mesh and exports one
/// vertex-colored OBJ per window.
///
/// Objects are named after their file stems.
pub struct ColorMeshJob {
    target: PathBuf,
    reference: PathBuf,
    output_dir: PathBuf,
    spec: Option<ColorSpec>,
    windows: Vec<WindowFraction>,
    unit: String,
}

impl ColorMeshJob {
    #[must_use]
    pub fn new(
        target: impl Into<PathBuf>,
        reference: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            target: target.into(),
            reference: reference.into(),
            output_dir: output_dir.into(),
            spec: None,
            windows: DEFAULT_WINDOWS.to_vec(),
            unit: "m".to_owned(),
        }
    }

    #[must_use]
    pub fn with_color_spec(mut self, spec: ColorSpec) -> Self {
        self.spec = Some(spec);
        self
    }

    #[must_use]
    pub fn with_windows(mut self, windows: Vec<WindowFraction>) -> Self {
        self.windows = windows;
        self
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Loads both meshes, colors the target and writes the exports.
    ///
    /// # Errors
    ///
    /// Returns an error if a mesh cannot be loaded, both files share a stem,
    /// the coloring fails or an export cannot be written.
    pub fn execute(&self) -> Result<ColorMeshReport> {
        let mut store = SceneStore::new();
        let target = load_into(&mut store, &self.target)?;
        let reference = load_into(&mut store, &self.reference)?;

        let mut operation = ColorByDistance::new(target.as_str(), reference.as_str())
            .with_windows(self.windows.clone())
            .with_unit(self.unit.as_str());
        if let Some(spec) = &self.spec {
            operation = operation.with_color_spec(spec.clone());
        }
        let coloring = operation.execute(&mut store)?;

        io::ensure_dir(&self.output_dir)?;
        let mesh = store.by_name(&target)?.as_mesh()?;
        let mut files = Vec::with_capacity(coloring.attributes.len());
        for attribute in &coloring.attributes {
            let path = self.output_dir.join(format!("{target}_{attribute}.obj"));
            obj::write_obj_with_colors(&path, mesh, attribute)?;
            files.push(path);
        }
        info!(files = files.len(), output = %self.output_dir.display(), "colored meshes written");

        Ok(ColorMeshReport { coloring, files })
    }
}

fn load_into(store: &mut SceneStore, path: &std::path::Path) -> Result<String> {
    let name = path
        .file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());
    let mesh = obj::load_obj(path)?;
    info!(name = %name, vertices = mesh.vertex_count(), "mesh loaded");
    store.add_object(SceneObject::mesh(name.clone(), mesh))?;
    Ok(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{DistColorError, SceneError};

    /// Collinear vertices chained by degenerate triangles, so the loader keeps
    /// them in file order.
    fn write_points(path: &std::path::Path, xs: &[f64]) {
        let mut text: String = xs.iter().map(|x| format!("v {x} 0 0\n")).collect();
        let n = xs.len();
        for i in 1..=n {
            let a = i;
            let b = (i + 1).min(n);
            let c = (i + 2).min(n);
            text.push_str(&format!("f {a} {b} {c}\n"));
        }
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn exports_one_obj_per_window() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("vessel.obj");
        let reference = dir.path().join("cell.obj");
        write_points(&target, &[0.0, 1.0, 2.0, 4.0]);
        write_points(&reference, &[0.0]);

        let out = dir.path().join("out");
        let report = ColorMeshJob::new(&target, &reference, &out)
            .with_windows(vec![WindowFraction::new(0.0, 0.3), WindowFraction::new(0.5, 1.0)])
            .execute()
            .unwrap();

        assert_eq!(report.coloring.vertex_count, 4);
        assert_eq!(report.files.len(), 2);
        assert_eq!(
            report.files[0],
            out.join("vessel_0.00m-1.20m-FFA500_to_800080.obj")
        );
        let text = std::fs::read_to_string(&report.files[1]).unwrap();
        // Vertex 0 is below the [2, 4] window and gets the orange end.
        assert!(text.contains("v 0 0 0 1.000000 0.647059 0.000000"));
    }

    #[test]
    fn same_stem_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        std::fs::create_dir_all(&a).unwrap();
        std::fs::create_dir_all(&b).unwrap();
        write_points(&a.join("mesh.obj"), &[0.0, 1.0]);
        write_points(&b.join("mesh.obj"), &[0.0]);

        let result = ColorMeshJob::new(a.join("mesh.obj"), b.join("mesh.obj"), dir.path()).execute();
        assert!(matches!(
            result,
            Err(DistColorError::Scene(SceneError::DuplicateName(_)))
        ));
    }
}
