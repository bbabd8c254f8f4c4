//! Classification of scene objects by their custom attributes.
//!
//! The attribute set decides what an object exports as, independent of its
//! object type. Classification runs once per object, before any output is
//! written, so malformed attributes abort the run early.

use super::SceneObject;
use crate::util::{Error, Result};

/// Acoustic surface properties of a reflector.
#[derive(Clone, Debug, PartialEq)]
pub struct ReflectorProps {
    pub reflectivity: f64,
    pub damping: Option<f64>,
}

/// Playback properties of a sound source.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceProps {
    /// Sound file backing the source.
    pub file: String,
    /// Loop count of the sound file.
    pub loop_count: Option<f64>,
    /// Start time in seconds.
    pub start: Option<f64>,
    /// End time in seconds.
    pub end: Option<f64>,
}

/// What an object exports as.
#[derive(Clone, Debug, PartialEq)]
pub enum ObjectRole {
    /// Carries `reflectivity`: exported as a face group
    Reflector(ReflectorProps),
    /// Carries `source`: exported as a sound source
    Source(SourceProps),
    /// Neither: not exported
    Plain,
}

impl ObjectRole {
    /// Short tag for listings.
    pub fn tag(&self) -> &'static str {
        match self {
            ObjectRole::Reflector(_) => "reflector",
            ObjectRole::Source(_) => "source",
            ObjectRole::Plain => "plain",
        }
    }
}

/// Look up a numeric attribute. Present but non-numeric is an error.
pub fn number_attribute(object: &dyn SceneObject, key: &str) -> Result<Option<f64>> {
    match object.attribute(key) {
        None => Ok(None),
        Some(value) => value.as_f64().map(Some).ok_or_else(|| Error::AttributeType {
            object: object.name().to_string(),
            key: key.to_string(),
            expected: "a number",
        }),
    }
}

/// Look up a string attribute. Present but non-string is an error.
pub fn text_attribute<'a>(object: &'a dyn SceneObject, key: &str) -> Result<Option<&'a str>> {
    match object.attribute(key) {
        None => Ok(None),
        Some(value) => value.as_str().map(Some).ok_or_else(|| Error::AttributeType {
            object: object.name().to_string(),
            key: key.to_string(),
            expected: "a string",
        }),
    }
}

/// Decide the export roles of an object.
///
/// Returns `[Plain]` when the object carries neither `reflectivity` nor
/// `source`; an object carrying both is exported as reflector, then source.
pub fn classify(object: &dyn SceneObject) -> Result<Vec<ObjectRole>> {
    let mut roles = Vec::with_capacity(1);

    if let Some(reflectivity) = number_attribute(object, "reflectivity")? {
        roles.push(ObjectRole::Reflector(ReflectorProps {
            reflectivity,
            damping: number_attribute(object, "damping")?,
        }));
    }

    if object.attribute("source").is_some() {
        let file = text_attribute(object, "source")?
            .map(str::to_string)
            .unwrap_or_default();
        roles.push(ObjectRole::Source(SourceProps {
            file,
            loop_count: number_attribute(object, "loop")?,
            start: number_attribute(object, "start")?,
            end: number_attribute(object, "end")?,
        }));
    }

    if roles.is_empty() {
        roles.push(ObjectRole::Plain);
    }
    Ok(roles)
}
