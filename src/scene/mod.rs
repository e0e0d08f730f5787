pub mod object;

pub use object::{MeshData, ObjectKind, SceneObject};

use std::collections::HashMap;

use crate::error::SceneError;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Unique identifier for an object in the scene store.
    pub struct ObjectId;
}

/// Central arena that owns all scene objects.
///
/// Objects are addressed by typed IDs (generational indices) or by their
/// unique name.
#[derive(Debug, Default)]
pub struct SceneStore {
    objects: SlotMap<ObjectId, SceneObject>,
    names: HashMap<String, ObjectId>,
}

impl SceneStore {
    /// Creates a new, empty scene store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an object and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if an object with the same name already exists.
    pub fn add_object(&mut self, object: SceneObject) -> Result<ObjectId, SceneError> {
        if self.names.contains_key(object.name()) {
            return Err(SceneError::DuplicateName(object.name().to_owned()));
        }
        let name = object.name().to_owned();
        let id = self.objects.insert(object);
        self.names.insert(name, id);
        Ok(id)
    }

    /// Removes an object, returning it.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the store.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<SceneObject, SceneError> {
        let object = self
            .objects
            .remove(id)
            .ok_or_else(|| SceneError::ObjectNotFound(format!("{id:?}")))?;
        self.names.remove(object.name());
        Ok(object)
    }

    /// Looks up an object ID by name.
    ///
    /// # Errors
    ///
    /// Returns an error if no object has this name.
    pub fn find(&self, name: &str) -> Result<ObjectId, SceneError> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| SceneError::ObjectNotFound(name.to_owned()))
    }

    /// Returns a reference to an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the store.
    pub fn object(&self, id: ObjectId) -> Result<&SceneObject, SceneError> {
        self.objects
            .get(id)
            .ok_or_else(|| SceneError::ObjectNotFound(format!("{id:?}")))
    }

    /// Returns a mutable reference to an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not in the store.
    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut SceneObject, SceneError> {
        self.objects
            .get_mut(id)
            .ok_or_else(|| SceneError::ObjectNotFound(format!("{id:?}")))
    }

    /// Returns the object with the given name.
    ///
    /// # Errors
    ///
    /// Returns an error if no object has this name.
    pub fn by_name(&self, name: &str) -> Result<&SceneObject, SceneError> {
        self.object(self.find(name)?)
    }

    /// Returns the object with the given name, mutably.
    ///
    /// # Errors
    ///
    /// Returns an error if no object has this name.
    pub fn by_name_mut(&mut self, name: &str) -> Result<&mut SceneObject, SceneError> {
        let id = self.find(name)?;
        self.object_mut(id)
    }

    /// Iterates over all objects.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &SceneObject)> {
        self.objects.iter()
    }

    /// Number of objects in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;

    fn triangle() -> MeshData {
        MeshData::new(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2]],
        )
        .unwrap()
    }

    #[test]
    fn lookup_by_name() {
        let mut store = SceneStore::new();
        let id = store.add_object(SceneObject::mesh("Cube.001", triangle())).unwrap();
        assert_eq!(store.find("Cube.001").unwrap(), id);
        assert_eq!(store.by_name("Cube.001").unwrap().name(), "Cube.001");
        assert!(matches!(
            store.find("Cube.002"),
            Err(SceneError::ObjectNotFound(_))
        ));
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut store = SceneStore::new();
        store.add_object(SceneObject::empty("Empty")).unwrap();
        assert!(matches!(
            store.add_object(SceneObject::empty("Empty")),
            Err(SceneError::DuplicateName(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_frees_name() {
        let mut store = SceneStore::new();
        let id = store.add_object(SceneObject::empty("Empty")).unwrap();
        store.remove_object(id).unwrap();
        assert!(store.is_empty());
        assert!(store.object(id).is_err());
        assert!(store.add_object(SceneObject::empty("Empty")).is_ok());
    }
}
