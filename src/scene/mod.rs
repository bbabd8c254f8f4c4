//! Read-only view of the authoring application's scene graph.
//!
//! The exporter never touches the application's object model directly. It
//! goes through two traits:
//! - [`SceneGraph`] - ordered iteration over objects
//! - [`SceneObject`] - name, type, transform, custom attributes, geometry,
//!   animation, and a side-effect-free position evaluator
//!
//! [`Scene`] implements both on top of a JSON scene document.

mod animation;
mod classify;
mod document;
mod modifier;

pub use animation::{AnimationData, FCurve, Interpolation, Keyframe, LOCATION_PATH};
pub use classify::{classify, number_attribute, text_attribute, ObjectRole, ReflectorProps, SourceProps};
pub use document::{ControlPoint, CurveData, ObjectNode, Scene, Spline};
pub use modifier::{Axis, Modifier};

use std::borrow::Cow;
use std::fmt;

use serde::Deserialize;

use crate::geom::MeshData;
use crate::util::{DMat4, DVec3, Result, Vertex};

/// Object type tag as reported by the scene graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Mesh,
    Curve,
    #[default]
    #[serde(other)]
    Other,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Mesh => f.write_str("mesh"),
            ObjectKind::Curve => f.write_str("curve"),
            ObjectKind::Other => f.write_str("other"),
        }
    }
}

/// Value of a custom per-object attribute.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl AttrValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Number(v) => Some(*v),
            AttrValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s),
            AttrValue::Number(_) => None,
        }
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Number(v)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

/// One object of the scene graph.
pub trait SceneObject {
    /// Object name, unique within the scene.
    fn name(&self) -> &str;

    /// Object type tag.
    fn kind(&self) -> ObjectKind;

    /// Object-to-world transform.
    fn matrix_world(&self) -> DMat4;

    /// XYZ Euler rotation in radians.
    fn rotation_euler(&self) -> DVec3;

    /// Custom attribute lookup; `None` when the key is absent.
    fn attribute(&self, key: &str) -> Option<&AttrValue>;

    /// Mesh data as stored, without modifiers.
    fn mesh(&self) -> Option<&MeshData>;

    /// Mesh with procedural modifiers applied.
    ///
    /// Returns a borrowed mesh when there is nothing to evaluate and an owned
    /// temporary otherwise. The temporary belongs to the caller and is released
    /// when dropped.
    fn evaluated_mesh(&self) -> Result<Option<Cow<'_, MeshData>>>;

    /// Control points of the first spline in object space. Empty for
    /// non-curves.
    fn spline_points(&self) -> &[ControlPoint];

    /// Animation data, if the object is animated at all.
    fn animation(&self) -> Option<&AnimationData>;

    /// World position at an arbitrary scene frame.
    ///
    /// Must not depend on or modify any shared "current frame" state.
    fn evaluate_position(&self, frame: f64) -> Vertex;

    /// Whether the object is part of the user's selection.
    fn is_selected(&self) -> bool {
        false
    }

    /// World translation of the static transform.
    fn world_location(&self) -> Vertex {
        self.matrix_world().w_axis.truncate()
    }
}

/// Ordered collection of scene objects.
pub trait SceneGraph {
    /// Scene name, used as the base for output file names.
    fn name(&self) -> &str;

    /// Objects in scene iteration order.
    fn objects(&self) -> Box<dyn Iterator<Item = &dyn SceneObject> + '_>;

    /// Find an object by name.
    fn object(&self, name: &str) -> Option<&dyn SceneObject> {
        self.objects().find(|o| o.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_value_untagged() {
        let v: AttrValue = serde_json::from_str("0.8").unwrap();
        assert_eq!(v.as_f64(), Some(0.8));
        assert_eq!(v.as_str(), None);

        let v: AttrValue = serde_json::from_str("\"speech.wav\"").unwrap();
        assert_eq!(v.as_str(), Some("speech.wav"));
        assert_eq!(v.as_f64(), None);
    }

    #[test]
    fn test_object_kind() {
        let k: ObjectKind = serde_json::from_str("\"mesh\"").unwrap();
        assert_eq!(k, ObjectKind::Mesh);
        let k: ObjectKind = serde_json::from_str("\"lamp\"").unwrap();
        assert_eq!(k, ObjectKind::Other);
        assert_eq!(ObjectKind::Curve.to_string(), "curve");
    }
}
