use tracing::info;

use crate::color::{ramp_name, ColorSpec, Rgba};
use crate::error::Result;
use crate::operations::{
    DistanceColorMapper, Normalization, NormalizationWindow, PointDistanceField,
};
use crate::scene::SceneStore;

/// Orange, the default near-distance color.
pub const ORANGE: Rgba = Rgba::new(1.0, 165.0 / 255.0, 0.0, 1.0);

/// Purple, the default far-distance color.
pub const PURPLE: Rgba = Rgba::new(128.0 / 255.0, 0.0, 128.0 / 255.0, 1.0);

/// A normalization window given as fractions of the observed maximum distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowFraction {
    pub lower: f64,
    pub upper: f64,
}

impl WindowFraction {
    #[must_use]
    pub const fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }
}

/// Windows applied when none are configured.
pub const DEFAULT_WINDOWS: [WindowFraction; 6] = [
    WindowFraction::new(0.0, 0.3),
    WindowFraction::new(0.25, 0.5),
    WindowFraction::new(0.2, 0.4),
    WindowFraction::new(0.1, 0.7),
    WindowFraction::new(0.6, 0.8),
    WindowFraction::new(0.75, 1.0),
];

/// Summary of a [`ColorByDistance`] run.
#[derive(Debug, Clone, PartialEq)]
pub struct ColoringReport {
    /// Number of colored vertices.
    pub vertex_count: usize,
    /// Smallest vertex distance.
    pub min_distance: f64,
    /// Largest vertex distance.
    pub max_distance: f64,
    /// Names of the color attributes written, in window order.
    pub attributes: Vec<String>,
}

/// Colors the vertices of a target mesh by distance to a reference mesh.
///
/// For every target vertex the distance to the nearest reference vertex is
/// measured in world space. One color attribute is written per window; each
/// window is a fraction of the largest distance found.
pub struct ColorByDistance {
    target: String,
    reference: String,
    spec: ColorSpec,
    windows: Vec<WindowFraction>,
    unit: String,
}

impl ColorByDistance {
    /// Creates a new `ColorByDistance` operation with the orange-to-purple
    /// ramp and the default windows.
    #[must_use]
    pub fn new(target: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            reference: reference.into(),
            spec: ColorSpec::two_color(ORANGE, PURPLE),
            windows: DEFAULT_WINDOWS.to_vec(),
            unit: "m".to_owned(),
        }
    }

    /// Uses `spec` as the ramp; its stops keep their relative positions
    /// inside every window.
    #[must_use]
    pub fn with_color_spec(mut self, spec: ColorSpec) -> Self {
        self.spec = spec;
        self
    }

    #[must_use]
    pub fn with_windows(mut self, windows: Vec<WindowFraction>) -> Self {
        self.windows = windows;
        self
    }

    /// Unit suffix used in attribute names.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Executes the operation, writing color attributes onto the target mesh.
    ///
    /// Nothing is written unless every window can be applied.
    ///
    /// # Errors
    ///
    /// Returns an error if either object is missing or is not a mesh, if the
    /// reference mesh has no vertices, or if a window is invalid (including
    /// the degenerate case of a zero maximum distance).
    pub fn execute(&self, store: &mut SceneStore) -> Result<ColoringReport> {
        let target = store.by_name(&self.target)?;
        let reference = store.by_name(&self.reference)?;
        let query_points = target.world_vertices()?;
        let reference_points = reference.world_vertices()?;

        let field = PointDistanceField::new(&query_points, &reference_points).execute()?;
        info!(
            vertices = field.len(),
            "distance calculation complete for {:?}", self.target
        );

        let (min_distance, max_distance) = field.range().unwrap_or((0.0, 0.0));
        info!(
            min = format_args!("{min_distance:.2}"),
            max = format_args!("{max_distance:.2}"),
            "actual distance range"
        );

        let mut layers = Vec::with_capacity(self.windows.len());
        for fraction in &self.windows {
            let window =
                NormalizationWindow::from_fractions(fraction.lower, fraction.upper, max_distance)?;
            let name = ramp_name(
                window.min(),
                window.max(),
                &self.unit,
                &self.spec.first_color(),
                &self.spec.last_color(),
            );
            info!(
                min = format_args!("{:.2}", window.min()),
                max = format_args!("{:.2}", window.max()),
                "applying color ramp {name}"
            );
            let colors = DistanceColorMapper::new(&self.spec)
                .with_normalization(Normalization::Window(window))
                .map_field(&field)
                .into_colors();
            layers.push((name, colors));
        }

        let mesh = store.by_name_mut(&self.target)?.as_mesh_mut()?;
        let mut attributes = Vec::with_capacity(layers.len());
        for (name, colors) in layers {
            mesh.set_color_attribute(name.clone(), colors)?;
            attributes.push(name);
        }

        Ok(ColoringReport {
            vertex_count: field.len(),
            min_distance,
            max_distance,
            attributes,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::error::{ColorError, DistColorError, SceneError};
    use crate::math::{Matrix4, Point3, Vector3};
    use crate::scene::{MeshData, SceneObject};

    fn line_mesh(xs: &[f64]) -> MeshData {
        MeshData::new(xs.iter().map(|&x| Point3::new(x, 0.0, 0.0)).collect(), vec![]).unwrap()
    }

    fn scene() -> SceneStore {
        let mut store = SceneStore::new();
        store
            .add_object(SceneObject::mesh("Cube.002", line_mesh(&[0.0, 1.0, 2.0, 4.0])))
            .unwrap();
        store
            .add_object(SceneObject::mesh("Cube.001", line_mesh(&[0.0])))
            .unwrap();
        store
    }

    #[test]
    fn writes_one_attribute_per_window() {
        let mut store = scene();
        let report = ColorByDistance::new("Cube.002", "Cube.001")
            .execute(&mut store)
            .unwrap();

        assert_eq!(report.vertex_count, 4);
        assert_relative_eq!(report.max_distance, 4.0);
        assert_relative_eq!(report.min_distance, 0.0);
        assert_eq!(report.attributes.len(), 6);
        assert_eq!(report.attributes[0], "0.00m-1.20m-FFA500_to_800080");

        let mesh = store.by_name("Cube.002").unwrap().as_mesh().unwrap();
        let first = mesh.color_attribute(&report.attributes[0]).unwrap();
        assert_eq!(first[0], ORANGE);
        assert_eq!(first[3], PURPLE);
        // The reference mesh is untouched.
        let reference = store.by_name("Cube.001").unwrap().as_mesh().unwrap();
        assert_eq!(reference.color_attribute_names().count(), 0);
    }

    #[test]
    fn window_interpolates_between_ends() {
        let mut store = scene();
        let report = ColorByDistance::new("Cube.002", "Cube.001")
            .with_windows(vec![WindowFraction::new(0.0, 0.5)])
            .execute(&mut store)
            .unwrap();
        let mesh = store.by_name("Cube.002").unwrap().as_mesh().unwrap();
        let colors = mesh.color_attribute(&report.attributes[0]).unwrap();
        // distance 1 of window [0, 2]
        let mid = ORANGE.lerp(&PURPLE, 0.5);
        assert_relative_eq!(colors[1].r, mid.r, epsilon = 1e-12);
        assert_relative_eq!(colors[1].g, mid.g, epsilon = 1e-12);
        assert_eq!(colors[2], PURPLE);
    }

    #[test]
    fn uses_world_space() {
        let mut store = SceneStore::new();
        store
            .add_object(SceneObject::mesh("A", line_mesh(&[0.0, 1.0])))
            .unwrap();
        store
            .add_object(
                SceneObject::mesh("B", line_mesh(&[0.0]))
                    .with_transform(Matrix4::new_translation(&Vector3::new(0.0, 3.0, 0.0))),
            )
            .unwrap();
        let report = ColorByDistance::new("A", "B").execute(&mut store).unwrap();
        assert_relative_eq!(report.min_distance, 3.0, epsilon = 1e-12);
        assert_relative_eq!(report.max_distance, 10.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn non_mesh_aborts_without_output() {
        let mut store = scene();
        store.add_object(SceneObject::empty("Empty")).unwrap();
        let result = ColorByDistance::new("Cube.002", "Empty").execute(&mut store);
        assert!(matches!(
            result,
            Err(DistColorError::Scene(SceneError::NotAMesh(name))) if name == "Empty"
        ));
        let mesh = store.by_name("Cube.002").unwrap().as_mesh().unwrap();
        assert_eq!(mesh.color_attribute_names().count(), 0);
    }

    #[test]
    fn missing_object_is_reported() {
        let mut store = scene();
        let result = ColorByDistance::new("Nope", "Cube.001").execute(&mut store);
        assert!(matches!(
            result,
            Err(DistColorError::Scene(SceneError::ObjectNotFound(_)))
        ));
    }

    #[test]
    fn coincident_meshes_fail_loudly() {
        let mut store = SceneStore::new();
        store.add_object(SceneObject::mesh("A", line_mesh(&[0.0, 1.0]))).unwrap();
        store.add_object(SceneObject::mesh("B", line_mesh(&[0.0, 1.0]))).unwrap();
        let result = ColorByDistance::new("A", "B").execute(&mut store);
        assert!(matches!(
            result,
            Err(DistColorError::Color(ColorError::InvalidWindow { .. }))
        ));
        let mesh = store.by_name("A").unwrap().as_mesh().unwrap();
        assert_eq!(mesh.color_attribute_names().count(), 0);
    }

    #[test]
    fn invalid_fraction_writes_nothing() {
        let mut store = scene();
        let result = ColorByDistance::new("Cube.002", "Cube.001")
            .with_windows(vec![WindowFraction::new(0.0, 0.5), WindowFraction::new(0.9, 0.1)])
            .execute(&mut store);
        assert!(result.is_err());
        let mesh = store.by_name("Cube.002").unwrap().as_mesh().unwrap();
        assert_eq!(mesh.color_attribute_names().count(), 0);
    }
}
