//! Per-object export records.
//!
//! Records are built fresh from the live scene for every run and handed to
//! the serializer; nothing in them is written back to the scene.

use crate::config::ExportConfig;
use crate::geom::{FaceList, GeometryExtractor};
use crate::scene::{classify, ObjectKind, ObjectRole, ReflectorProps, SceneGraph, SceneObject, SourceProps};
use crate::track::{KeyframeTimelineExtractor, Trajectory};
use crate::util::{euler_zyx_degrees, DVec3, Result};

/// Channel reference of point `index` in a source with `count` points.
///
/// Single-point sources address their only channel as `@.0`; multi-point
/// sources use `@.0.<index>`.
pub fn connect_reference(index: usize, count: usize) -> String {
    if count == 1 {
        format!("@.{index}")
    } else {
        format!("@.0.{index}")
    }
}

/// One point of a source's point cloud.
#[derive(Clone, Debug, PartialEq)]
pub struct SourcePoint {
    pub index: usize,
    pub connect: String,
    /// Offset from the source origin, in the source's own frame.
    pub offset: DVec3,
}

/// Motion and channel layout of a source.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceTrack {
    pub trajectory: Trajectory,
    /// Z, Y, X Euler angles in degrees.
    pub orientation: DVec3,
    pub points: Vec<SourcePoint>,
}

impl SourceTrack {
    /// Number of sound channels: one per point.
    pub fn channels(&self) -> usize {
        self.points.len()
    }
}

/// Computed output of one role.
#[derive(Clone, Debug, PartialEq)]
pub enum Payload {
    FaceGroup { props: ReflectorProps, faces: FaceList },
    Source { props: SourceProps, track: SourceTrack },
}

/// Export record of one scene object.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneObjectRecord {
    pub name: String,
    pub kind: ObjectKind,
    pub roles: Vec<ObjectRole>,
    pub payloads: Vec<Payload>,
}

impl SceneObjectRecord {
    /// True when nothing will be written for this object.
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

/// Builds records from scene objects.
#[derive(Clone, Copy, Debug)]
pub struct RecordBuilder {
    extractor: GeometryExtractor,
    timeline: KeyframeTimelineExtractor,
}

impl RecordBuilder {
    /// Face groups are always triangulated; `config.triangulate` only affects
    /// per-object raw files.
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            extractor: GeometryExtractor::new(true, config.apply_modifiers),
            timeline: KeyframeTimelineExtractor::new(config.frame_rate),
        }
    }

    /// Classify one object and compute the payload of each role.
    pub fn build(&self, object: &dyn SceneObject) -> Result<SceneObjectRecord> {
        let roles = classify(object)?;
        let mut payloads = Vec::with_capacity(roles.len());

        for role in &roles {
            match role {
                ObjectRole::Reflector(props) => match self.extractor.extract_or_skip(object)? {
                    Some(faces) if !faces.is_empty() => payloads.push(Payload::FaceGroup {
                        props: props.clone(),
                        faces,
                    }),
                    _ => tracing::debug!(object = object.name(), "reflector without faces"),
                },
                ObjectRole::Source(props) => payloads.push(Payload::Source {
                    props: props.clone(),
                    track: self.source_track(object),
                }),
                ObjectRole::Plain => tracing::trace!(object = object.name(), "plain object skipped"),
            }
        }

        Ok(SceneObjectRecord {
            name: object.name().to_string(),
            kind: object.kind(),
            roles,
            payloads,
        })
    }

    /// Build records for every object, in scene order.
    #[tracing::instrument(level = "debug", skip_all, fields(scene = scene.name()))]
    pub fn build_all(&self, scene: &dyn SceneGraph) -> Result<Vec<SceneObjectRecord>> {
        scene.objects().map(|object| self.build(object)).collect()
    }

    fn source_track(&self, object: &dyn SceneObject) -> SourceTrack {
        let vertices = object.mesh().map(|m| m.vertices.as_slice()).unwrap_or(&[]);
        let count = vertices.len();
        let points = vertices
            .iter()
            .enumerate()
            .map(|(index, &offset)| SourcePoint {
                index,
                connect: connect_reference(index, count),
                offset,
            })
            .collect();

        SourceTrack {
            trajectory: self.timeline.extract(object),
            orientation: euler_zyx_degrees(object.rotation_euler()),
            points,
        }
    }
}
