//! # tsc-export
//!
//! Extraction of geometry and motion from a 3D scene graph into the scene
//! description consumed by a spatial-audio renderer.
//!
//! ## Modules
//!
//! - [`util`] - Basic types (math aliases, errors, printf-style formatting)
//! - [`scene`] - Read-only scene-graph interface and JSON scene documents
//! - [`geom`] - World-space face extraction and quad triangulation
//! - [`track`] - Curve and keyframe trajectories
//! - [`export`] - Scene markup, raw geometry and trajectory CSV writers
//! - [`config`] - Export settings
//!
//! ## Example
//!
//! ```ignore
//! use tsc_export::prelude::*;
//!
//! let scene = Scene::open("hall.json")?;
//! let mut stats = ExportStats::default();
//! let path = Exporter::default().export_scene(&scene, &mut stats)?;
//! println!("{} face groups -> {}", stats.face_groups, path.display());
//! ```

pub mod util;
pub mod config;
pub mod scene;
pub mod geom;
pub mod track;
pub mod export;

// Re-export commonly used types
pub use util::{Error, Result, Vertex};
pub use config::ExportConfig;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::util::{Error, Result, Vertex};
    pub use crate::config::ExportConfig;
    pub use crate::scene::{classify, ObjectKind, ObjectNode, ObjectRole, Scene, SceneGraph, SceneObject};
    pub use crate::geom::{Face, FaceList, GeometryExtractor, MeshData, Triangulator};
    pub use crate::track::{KeyframeTimelineExtractor, Trajectory, TrajectorySample, TrajectorySampler};
    pub use crate::export::{ExportStats, Exporter, SceneSerializer};
}
