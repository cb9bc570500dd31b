use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::camera::Camera;
use crate::error::LoadError;
use crate::geometry::{AxisRotation, Shape, TransformScope, Vec3};
use crate::light::Light;
use crate::material::MaterialKind;

/// Opaque handle of an entry in the object sequence.
pub type ObjectId = Uuid;

/// A shape together with the handle that identifies it inside a scene.
///
/// Clones share the handle, so adding a clone of an object that is already
/// in the scene is a no-op.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub shape: Shape,
}

impl SceneObject {
    pub fn new(shape: impl Into<Shape>) -> Self {
        Self {
            id: Uuid::new_v4(),
            shape: shape.into(),
        }
    }
}

/// The scene handed to the writers: camera, ordered objects and lights.
///
/// The object sequence is the scene graph; transform markers pushed with
/// [`Scene::push`] and [`Scene::pop`] open and close nested scopes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub camera: Camera,
    objects: Vec<SceneObject>,
    pub lights: Vec<Light>,
    pub backplate_image: Option<String>,
    /// Handles of the currently open `TransformBegin` markers, innermost last.
    #[serde(skip)]
    transform_stack: Vec<ObjectId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Objects ──────────────────────────────────────────────────────

    /// Append an object unless its handle is already present.
    pub fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = object.id;
        if self.contains(&id) {
            log::debug!("Object {} already in scene, not added again", id);
            return id;
        }
        self.objects.push(object);
        id
    }

    /// Wrap a shape in a new object and append it.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) -> ObjectId {
        self.add_object(SceneObject::new(shape))
    }

    /// Remove the object with the given handle.
    ///
    /// Open scopes after the removed position move down by one along with
    /// their markers. Removing an open marker closes its scope.
    pub fn remove_object(&mut self, id: &ObjectId) -> Option<SceneObject> {
        let index = self.position_of(id)?;
        let removed = self.objects.remove(index);
        self.transform_stack.retain(|open| open != id);
        Some(removed)
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.objects.iter().any(|o| o.id == *id)
    }

    pub fn position_of(&self, id: &ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == *id)
    }

    pub fn get_object(&self, id: &ObjectId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.id == *id)
    }

    pub fn get_object_mut(&mut self, id: &ObjectId) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.id == *id)
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.objects.iter().map(|o| &o.shape)
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    // ── Transform stack ──────────────────────────────────────────────

    /// Open a transform scope by appending a `TransformBegin` marker.
    pub fn push(&mut self) -> ObjectId {
        let id = self.add_shape(Shape::TransformBegin(TransformScope::default()));
        self.transform_stack.push(id);
        id
    }

    /// Close the innermost scope. Does nothing when no scope is open.
    pub fn pop(&mut self) {
        if self.transform_stack.pop().is_some() {
            self.add_shape(Shape::TransformEnd);
        }
    }

    pub fn translate(&mut self, x: f64, y: f64, z: f64) {
        self.with_open_scope(|scope| scope.translate = Some([x, y, z]));
    }

    pub fn scale(&mut self, x: f64, y: f64, z: f64) {
        self.with_open_scope(|scope| scope.scale = Some([x, y, z]));
    }

    pub fn rotate(&mut self, x: f64, y: f64, z: f64) {
        self.with_open_scope(|scope| scope.rotate = Some([x, y, z]));
    }

    pub fn rotate_axis(&mut self, angle: f64, axis: Vec3) {
        self.with_open_scope(|scope| scope.rotate_axis = Some(AxisRotation { angle, axis }));
    }

    /// Number of scopes currently open.
    pub fn transform_depth(&self) -> usize {
        self.transform_stack.len()
    }

    /// Sequence positions of the open `TransformBegin` markers, outermost first.
    pub fn open_scope_indices(&self) -> Vec<usize> {
        self.transform_stack
            .iter()
            .filter_map(|id| self.position_of(id))
            .collect()
    }

    fn with_open_scope(&mut self, apply: impl FnOnce(&mut TransformScope)) {
        let Some(id) = self.transform_stack.last().copied() else {
            return;
        };
        if let Some(SceneObject {
            shape: Shape::TransformBegin(scope),
            ..
        }) = self.get_object_mut(&id)
        {
            apply(scope);
        }
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load a scene saved with [`Scene::to_json`].
    ///
    /// Unknown material codes fail with `MaterialInvalid`. Repeated object
    /// handles keep their first entry only.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        for code in material_codes(&value) {
            code.parse::<MaterialKind>()?;
        }

        let mut loaded: Scene = serde_json::from_value(value)?;
        let objects = std::mem::take(&mut loaded.objects);
        let count = objects.len();
        for object in objects {
            loaded.add_object(object);
        }
        if loaded.objects.len() < count {
            log::warn!(
                "Dropped {} duplicate object(s) while loading scene",
                count - loaded.objects.len()
            );
        }
        Ok(loaded)
    }
}

/// Material codes of the shapes in a scene's JSON form.
///
/// Shapes and materials are externally tagged, so the code is the single
/// key of each `material` object.
fn material_codes(scene: &serde_json::Value) -> Vec<&str> {
    let Some(objects) = scene.get("objects").and_then(|o| o.as_array()) else {
        return Vec::new();
    };
    objects
        .iter()
        .filter_map(|object| object.get("shape")?.as_object()?.values().next())
        .filter_map(|shape| shape.get("material")?.as_object()?.keys().next())
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Disk, Sphere};

    #[test]
    fn test_add_object_is_idempotent() {
        let mut scene = Scene::new();
        let sphere = SceneObject::new(Sphere::default());
        scene.add_object(sphere.clone());
        scene.add_object(sphere);
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn test_push_translate_pop() {
        let mut scene = Scene::new();
        scene.push();
        scene.translate(1.0, 2.0, 3.0);
        let sphere = scene.add_shape(Sphere::default());
        scene.pop();

        let shapes: Vec<&Shape> = scene.shapes().collect();
        assert_eq!(shapes.len(), 3);
        match shapes[0] {
            Shape::TransformBegin(scope) => assert_eq!(scope.translate, Some([1.0, 2.0, 3.0])),
            other => panic!("expected TransformBegin, got {:?}", other),
        }
        assert_eq!(scene.position_of(&sphere), Some(1));
        assert_eq!(shapes[2], &Shape::TransformEnd);
        assert_eq!(scene.transform_depth(), 0);
    }

    #[test]
    fn test_pop_without_push_is_noop() {
        let mut scene = Scene::new();
        scene.pop();
        scene.pop();
        assert!(scene.is_empty());

        scene.translate(5.0, 5.0, 5.0);
        scene.push();
        scene.scale(2.0, 2.0, 2.0);
        match &scene.objects()[0].shape {
            Shape::TransformBegin(scope) => {
                assert_eq!(scope.scale, Some([2.0, 2.0, 2.0]));
                assert!(scope.translate.is_none());
            }
            other => panic!("expected TransformBegin, got {:?}", other),
        }
    }

    #[test]
    fn test_mutations_target_innermost_scope() {
        let mut scene = Scene::new();
        let outer = scene.push();
        scene.rotate(0.0, 90.0, 0.0);
        let inner = scene.push();
        scene.rotate_axis(45.0, [0.0, 1.0, 0.0]);
        scene.pop();
        scene.scale(3.0, 3.0, 3.0);

        let outer_scope = match &scene.get_object(&outer).unwrap().shape {
            Shape::TransformBegin(scope) => *scope,
            _ => unreachable!(),
        };
        let inner_scope = match &scene.get_object(&inner).unwrap().shape {
            Shape::TransformBegin(scope) => *scope,
            _ => unreachable!(),
        };
        assert_eq!(outer_scope.rotate, Some([0.0, 90.0, 0.0]));
        assert_eq!(outer_scope.scale, Some([3.0, 3.0, 3.0]));
        assert!(outer_scope.rotate_axis.is_none());
        assert_eq!(
            inner_scope.rotate_axis,
            Some(AxisRotation {
                angle: 45.0,
                axis: [0.0, 1.0, 0.0]
            })
        );
    }

    #[test]
    fn test_remove_object_shifts_open_scopes() {
        let mut scene = Scene::new();
        scene.push();
        let disk = scene.add_shape(Disk::default());
        scene.push();
        scene.add_shape(Sphere::default());
        assert_eq!(scene.open_scope_indices(), vec![0, 2]);

        let removed = scene.remove_object(&disk).unwrap();
        assert!(matches!(removed.shape, Shape::Disk(_)));
        assert_eq!(scene.open_scope_indices(), vec![0, 1]);
        assert_eq!(scene.transform_depth(), 2);
    }

    #[test]
    fn test_remove_open_marker_closes_scope() {
        let mut scene = Scene::new();
        let marker = scene.push();
        scene.add_shape(Sphere::default());
        scene.remove_object(&marker);
        assert_eq!(scene.transform_depth(), 0);
        assert!(scene.open_scope_indices().is_empty());

        scene.translate(1.0, 1.0, 1.0);
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn test_remove_unknown_object() {
        let mut scene = Scene::new();
        scene.add_shape(Sphere::default());
        assert!(scene.remove_object(&Uuid::new_v4()).is_none());
        assert_eq!(scene.object_count(), 1);
    }

    #[test]
    fn test_json_roundtrip_drops_open_scopes() {
        let mut scene = Scene::new();
        scene.push();
        scene.add_shape(Sphere::default());
        scene.add_light(Light::ambient([0.5, 0.5, 0.5]));
        scene.backplate_image = Some("backplate.png".into());

        let json = scene.to_json().unwrap();
        let restored = Scene::from_json(&json).unwrap();
        assert_eq!(restored.objects(), scene.objects());
        assert_eq!(restored.lights, scene.lights);
        assert_eq!(restored.backplate_image.as_deref(), Some("backplate.png"));
        assert_eq!(restored.transform_depth(), 0);
    }

    #[test]
    fn test_from_json_rejects_unknown_material_code() {
        let mut scene = Scene::new();
        scene.add_shape(Sphere::default());
        let json = scene.to_json().unwrap().replace("BrushedMetal", "Chrome");

        match Scene::from_json(&json).unwrap_err() {
            LoadError::Scene(err) => assert_eq!(
                err,
                crate::SceneError::MaterialInvalid {
                    code: "Chrome".into()
                }
            ),
            other => panic!("expected MaterialInvalid, got {:?}", other),
        }
    }

    #[test]
    fn test_from_json_drops_repeated_handles() {
        let mut scene = Scene::new();
        let sphere = scene.add_shape(Sphere::default());
        let mut value: serde_json::Value = serde_json::from_str(&scene.to_json().unwrap()).unwrap();
        let objects = value["objects"].as_array_mut().unwrap();
        let copy = objects[0].clone();
        objects.push(copy);

        let mut restored = Scene::from_json(&value.to_string()).unwrap();
        assert_eq!(restored.object_count(), 1);
        restored.remove_object(&sphere);
        assert!(!restored.contains(&sphere));
        assert!(restored.is_empty());
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            Scene::from_json("{ not json").unwrap_err(),
            LoadError::Json(_)
        ));
    }
}
