use std::collections::BTreeMap;

use crate::color::Rgba;
use crate::error::SceneError;
use crate::math::{Matrix4, Point3};

/// Geometry and per-vertex color attributes of a polygon mesh.
#[derive(Debug, Clone, Default)]
pub struct MeshData {
    vertices: Vec<Point3>,
    faces: Vec<Vec<usize>>,
    color_attributes: BTreeMap<String, Vec<Rgba>>,
}

impl MeshData {
    /// Creates a mesh from local-space vertices and polygon index lists.
    ///
    /// # Errors
    ///
    /// Returns an error if a face references a vertex that does not exist.
    pub fn new(vertices: Vec<Point3>, faces: Vec<Vec<usize>>) -> Result<Self, SceneError> {
        let vertex_count = vertices.len();
        if let Some(&index) = faces.iter().flatten().find(|&&i| i >= vertex_count) {
            return Err(SceneError::FaceIndexOutOfRange {
                index,
                vertex_count,
            });
        }
        Ok(Self {
            vertices,
            faces,
            color_attributes: BTreeMap::new(),
        })
    }

    /// Vertex positions in the object's local space.
    #[must_use]
    pub fn vertices(&self) -> &[Point3] {
        &self.vertices
    }

    #[must_use]
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Stores a named per-vertex color attribute, replacing any existing
    /// attribute with the same name.
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` does not have one entry per vertex.
    pub fn set_color_attribute(
        &mut self,
        name: impl Into<String>,
        colors: Vec<Rgba>,
    ) -> Result<(), SceneError> {
        if colors.len() != self.vertices.len() {
            return Err(SceneError::AttributeLength {
                expected: self.vertices.len(),
                actual: colors.len(),
            });
        }
        self.color_attributes.insert(name.into(), colors);
        Ok(())
    }

    /// Per-vertex colors of the named attribute.
    #[must_use]
    pub fn color_attribute(&self, name: &str) -> Option<&[Rgba]> {
        self.color_attributes.get(name).map(Vec::as_slice)
    }

    /// Names of all color attributes, sorted.
    pub fn color_attribute_names(&self) -> impl Iterator<Item = &str> {
        self.color_attributes.keys().map(String::as_str)
    }
}

/// What a scene object holds.
#[derive(Debug, Clone)]
pub enum ObjectKind {
    Mesh(MeshData),
    /// A placeholder without geometry (transform only).
    Empty,
}

/// A named object with a local-to-world transform.
#[derive(Debug, Clone)]
pub struct SceneObject {
    name: String,
    transform: Matrix4,
    kind: ObjectKind,
}

impl SceneObject {
    /// Creates an object with an identity transform.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            transform: Matrix4::identity(),
            kind,
        }
    }

    /// Creates a mesh object with an identity transform.
    #[must_use]
    pub fn mesh(name: impl Into<String>, mesh: MeshData) -> Self {
        Self::new(name, ObjectKind::Mesh(mesh))
    }

    /// Creates an object without geometry.
    #[must_use]
    pub fn empty(name: impl Into<String>) -> Self {
        Self::new(name, ObjectKind::Empty)
    }

    /// Returns the object with `transform` as its local-to-world matrix.
    #[must_use]
    pub fn with_transform(mut self, transform: Matrix4) -> Self {
        self.transform = transform;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn transform(&self) -> &Matrix4 {
        &self.transform
    }

    #[must_use]
    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// The object's mesh.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NotAMesh`] if the object holds no mesh.
    pub fn as_mesh(&self) -> Result<&MeshData, SceneError> {
        match &self.kind {
            ObjectKind::Mesh(mesh) => Ok(mesh),
            ObjectKind::Empty => Err(SceneError::NotAMesh(self.name.clone())),
        }
    }

    /// The object's mesh, mutably.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NotAMesh`] if the object holds no mesh.
    pub fn as_mesh_mut(&mut self) -> Result<&mut MeshData, SceneError> {
        match &mut self.kind {
            ObjectKind::Mesh(mesh) => Ok(mesh),
            ObjectKind::Empty => Err(SceneError::NotAMesh(self.name.clone())),
        }
    }

    /// Mesh vertex positions transformed into world space.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::NotAMesh`] if the object holds no mesh.
    pub fn world_vertices(&self) -> Result<Vec<Point3>, SceneError> {
        let mesh = self.as_mesh()?;
        Ok(mesh
            .vertices()
            .iter()
            .map(|v| self.transform.transform_point(v))
            .collect())
    }
}
