//! Export of scenes to markup, raw geometry and trajectory files.
//!
//! [`Exporter`] ties the stages together and owns file creation; the
//! writers in the submodules only see `io::Write`.

pub mod csv;
pub mod naming;
pub mod pose;
pub mod raw;
pub mod record;
pub mod tsc;

pub use record::{connect_reference, Payload, RecordBuilder, SceneObjectRecord, SourcePoint, SourceTrack};
pub use tsc::SceneSerializer;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::ExportConfig;
use crate::geom::{FaceList, GeometryExtractor};
use crate::scene::{ObjectKind, SceneGraph};
use crate::track::TrajectorySampler;
use crate::util::{Error, Result};

/// Export statistics
#[derive(Default, Debug, Clone, PartialEq)]
pub struct ExportStats {
    pub face_groups: usize,
    pub sources: usize,
    pub raw_files: usize,
    pub tracks: usize,
    pub faces: usize,
    pub skipped: usize,
}

/// Runs exports of one scene with one configuration.
#[derive(Debug, Clone)]
pub struct Exporter {
    config: ExportConfig,
}

impl Exporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    fn create(&self, file_name: &str) -> Result<(PathBuf, BufWriter<File>)> {
        if let Some(dir) = &self.config.output_dir {
            std::fs::create_dir_all(dir)?;
        }
        let path = self.config.output_path(file_name);
        let file = File::create(&path)?;
        Ok((path, BufWriter::new(file)))
    }

    fn extractor(&self, triangulate: bool) -> GeometryExtractor {
        GeometryExtractor::new(triangulate, self.config.apply_modifiers)
    }

    /// Write `<base>_export.tsc`.
    #[tracing::instrument(skip_all, fields(scene = scene.name()))]
    pub fn export_scene(&self, scene: &dyn SceneGraph, stats: &mut ExportStats) -> Result<PathBuf> {
        let records = RecordBuilder::new(&self.config).build_all(scene)?;
        for record in &records {
            if record.is_empty() {
                stats.skipped += 1;
            }
            for payload in &record.payloads {
                match payload {
                    Payload::FaceGroup { faces, .. } => {
                        stats.face_groups += 1;
                        stats.faces += faces.len();
                    }
                    Payload::Source { .. } => stats.sources += 1,
                }
            }
        }

        let (path, mut out) = self.create(&naming::scene_file(scene.name()))?;
        SceneSerializer::new(&self.config).write_records(&records, &mut out)?;
        out.flush()?;
        tracing::info!(path = %path.display(), face_groups = stats.face_groups, sources = stats.sources, "scene written");
        Ok(path)
    }

    /// Write one `<base>_<object>.raw` per mesh object with geometry.
    ///
    /// Polygons are written one per line; quads are split only when
    /// `triangulate` is set.
    #[tracing::instrument(skip_all, fields(scene = scene.name()))]
    pub fn export_meshes(&self, scene: &dyn SceneGraph, stats: &mut ExportStats) -> Result<Vec<PathBuf>> {
        let extractor = self.extractor(self.config.triangulate);
        let mut written = Vec::new();
        for object in scene.objects().filter(|o| o.kind() == ObjectKind::Mesh) {
            let Some(faces) = extractor.extract_or_skip(object)? else {
                stats.skipped += 1;
                continue;
            };
            let (path, mut out) = self.create(&naming::object_raw_file(scene.name(), object.name()))?;
            raw::write_faces(&mut out, &faces)?;
            out.flush()?;
            tracing::debug!(path = %path.display(), faces = faces.len(), "raw geometry written");
            stats.raw_files += 1;
            stats.faces += faces.len();
            written.push(path);
        }
        Ok(written)
    }

    /// Write one `<base>_<object>.csv` per curve object with control points.
    #[tracing::instrument(skip_all, fields(scene = scene.name()))]
    pub fn export_tracks(&self, scene: &dyn SceneGraph, stats: &mut ExportStats) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for object in scene.objects().filter(|o| o.kind() == ObjectKind::Curve) {
            let sampler = TrajectorySampler::for_object(object, self.config.default_speed)?;
            let trajectory = sampler.sample_object(object);
            if trajectory.is_empty() {
                tracing::debug!(object = object.name(), "curve without control points");
                stats.skipped += 1;
                continue;
            }
            let (path, mut out) = self.create(&naming::object_csv_file(scene.name(), object.name()))?;
            csv::write_trajectory(&mut out, &trajectory)?;
            out.flush()?;
            tracing::debug!(path = %path.display(), samples = trajectory.len(), duration = trajectory.duration(), "track written");
            stats.tracks += 1;
            written.push(path);
        }
        Ok(written)
    }

    /// Write the faces of all selected objects (all objects when nothing is
    /// selected) into a single raw file, `<base>.raw` unless `target` is given.
    /// Quads are always split.
    #[tracing::instrument(skip_all, fields(scene = scene.name()))]
    pub fn export_selection(
        &self,
        scene: &dyn SceneGraph,
        target: Option<&Path>,
        stats: &mut ExportStats,
    ) -> Result<PathBuf> {
        let any_selected = scene.objects().any(|o| o.is_selected());
        let extractor = self.extractor(true);

        let mut faces = FaceList::new();
        for object in scene.objects().filter(|o| !any_selected || o.is_selected()) {
            match extractor.extract_or_skip(object)? {
                Some(object_faces) => faces.extend(object_faces),
                None => stats.skipped += 1,
            }
        }

        let file_name = match target {
            Some(path) => path.to_string_lossy().into_owned(),
            None => naming::selection_raw_file(scene.name()),
        };
        let (path, mut out) = self.create(&file_name)?;
        raw::write_faces(&mut out, &faces)?;
        out.flush()?;
        stats.raw_files += 1;
        stats.faces += faces.len();
        tracing::info!(path = %path.display(), faces = faces.len(), "selection written");
        Ok(path)
    }

    /// Pose snippet of a named object.
    pub fn pose(&self, scene: &dyn SceneGraph, object: &str) -> Result<String> {
        let object = scene
            .object(object)
            .ok_or_else(|| Error::ObjectNotFound(object.to_string()))?;
        Ok(pose::pose_snippet(object))
    }

    /// Write the pose snippet of a named object to `objpos.txt` (or `target`).
    pub fn export_pose(&self, scene: &dyn SceneGraph, object: &str, target: Option<&Path>) -> Result<PathBuf> {
        let snippet = self.pose(scene, object)?;
        let file_name = match target {
            Some(path) => path.to_string_lossy().into_owned(),
            None => naming::POSE_FILE.to_string(),
        };
        let (path, mut out) = self.create(&file_name)?;
        out.write_all(snippet.as_bytes())?;
        out.flush()?;
        Ok(path)
    }
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}
