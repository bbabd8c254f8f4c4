//! JSON scene documents.
//!
//! A scene document is a snapshot of the authoring application's scene graph:
//! one entry per object with its transform, custom attributes, geometry and
//! animation. Loading it yields a [`Scene`] implementing [`SceneGraph`].

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::animation::{AnimationData, LOCATION_PATH};
use super::modifier::{evaluate_stack, Modifier};
use super::{AttrValue, ObjectKind, SceneGraph, SceneObject};
use crate::geom::MeshData;
use crate::util::{compose_matrix, DMat4, DVec3, Error, Result, Vertex};

/// A spline control point. Accepts `[x, y, z]` or homogeneous `[x, y, z, w]`;
/// the weight does not affect the position.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct ControlPoint(pub DVec3);

impl TryFrom<Vec<f64>> for ControlPoint {
    type Error = String;

    fn try_from(v: Vec<f64>) -> std::result::Result<Self, Self::Error> {
        match v.as_slice() {
            [x, y, z] | [x, y, z, _] => Ok(ControlPoint(DVec3::new(*x, *y, *z))),
            _ => Err(format!("control point needs 3 or 4 components, got {}", v.len())),
        }
    }
}

/// One spline of a curve object.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Spline {
    #[serde(default)]
    pub points: Vec<ControlPoint>,
}

/// Curve object data.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct CurveData {
    #[serde(default)]
    pub splines: Vec<Spline>,
}

fn unit_scale() -> DVec3 {
    DVec3::ONE
}

/// One object of a scene document.
#[derive(Clone, Debug, Deserialize)]
pub struct ObjectNode {
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: ObjectKind,
    #[serde(default)]
    pub location: DVec3,
    /// XYZ Euler angles in radians.
    #[serde(default)]
    pub rotation_euler: DVec3,
    #[serde(default = "unit_scale")]
    pub scale: DVec3,
    /// Explicit world matrix (column-major). Overrides location/rotation/scale.
    #[serde(default)]
    pub matrix_world: Option<DMat4>,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttrValue>,
    #[serde(default)]
    pub mesh: Option<MeshData>,
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
    #[serde(default)]
    pub curve: Option<CurveData>,
    #[serde(default)]
    pub animation: Option<AnimationData>,
    #[serde(default)]
    pub selected: bool,
}

impl ObjectNode {
    /// Create an untransformed object with no data.
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            location: DVec3::ZERO,
            rotation_euler: DVec3::ZERO,
            scale: DVec3::ONE,
            matrix_world: None,
            attributes: BTreeMap::new(),
            mesh: None,
            modifiers: Vec::new(),
            curve: None,
            animation: None,
            selected: false,
        }
    }

    /// Builder: set a custom attribute.
    pub fn with_attribute(mut self, key: &str, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    /// Builder: attach mesh data.
    pub fn with_mesh(mut self, mesh: MeshData) -> Self {
        self.mesh = Some(mesh);
        self
    }

    /// Builder: set the location.
    pub fn with_location(mut self, location: DVec3) -> Self {
        self.location = location;
        self
    }
}

impl SceneObject for ObjectNode {
    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> ObjectKind {
        self.kind
    }

    fn matrix_world(&self) -> DMat4 {
        self.matrix_world
            .unwrap_or_else(|| compose_matrix(self.location, self.rotation_euler, self.scale))
    }

    fn rotation_euler(&self) -> DVec3 {
        self.rotation_euler
    }

    fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    fn mesh(&self) -> Option<&MeshData> {
        self.mesh.as_ref()
    }

    fn evaluated_mesh(&self) -> Result<Option<Cow<'_, MeshData>>> {
        let Some(mesh) = &self.mesh else {
            return Ok(None);
        };
        if self.modifiers.is_empty() {
            return Ok(Some(Cow::Borrowed(mesh)));
        }
        evaluate_stack(mesh, &self.modifiers, &self.name).map(|m| Some(Cow::Owned(m)))
    }

    fn spline_points(&self) -> &[ControlPoint] {
        self.curve
            .as_ref()
            .and_then(|c| c.splines.first())
            .map(|s| s.points.as_slice())
            .unwrap_or(&[])
    }

    fn animation(&self) -> Option<&AnimationData> {
        self.animation.as_ref()
    }

    fn evaluate_position(&self, frame: f64) -> Vertex {
        let mut position = self.world_location();
        if let Some(anim) = &self.animation {
            for curve in anim.channels(LOCATION_PATH) {
                if let Some(value) = curve.evaluate(frame) {
                    match curve.index {
                        0 => position.x = value,
                        1 => position.y = value,
                        2 => position.z = value,
                        _ => {}
                    }
                }
            }
        }
        position
    }

    fn is_selected(&self) -> bool {
        self.selected
    }
}

/// In-memory scene loaded from a scene document.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Scene {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub objects: Vec<ObjectNode>,
}

impl Scene {
    /// Create a scene from objects in iteration order.
    pub fn new(name: impl Into<String>, objects: Vec<ObjectNode>) -> Self {
        let mut scene = Self {
            name: name.into(),
            objects,
        };
        scene.normalize();
        scene
    }

    /// Load a scene document from disk.
    ///
    /// An unnamed scene takes the file stem as its name.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::FileNotFound(path.to_path_buf()));
        }
        let text = std::fs::read_to_string(path)?;
        let mut scene = Self::from_json(&text)?;
        if scene.name.is_empty() {
            scene.name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        tracing::debug!(path = %path.display(), objects = scene.objects.len(), "scene loaded");
        Ok(scene)
    }

    /// Parse a scene document.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut scene: Scene = serde_json::from_str(text)?;
        scene.normalize();
        Ok(scene)
    }

    fn normalize(&mut self) {
        for obj in &mut self.objects {
            if let Some(anim) = &mut obj.animation {
                anim.sort_keys();
            }
        }
    }
}

impl SceneGraph for Scene {
    fn name(&self) -> &str {
        &self.name
    }

    fn objects(&self) -> Box<dyn Iterator<Item = &dyn SceneObject> + '_> {
        Box::new(self.objects.iter().map(|o| o as &dyn SceneObject))
    }
}
