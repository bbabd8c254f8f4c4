//! Mesh geometry extraction.
//!
//! - [`MeshData`] - local-space polygon mesh handed over by the scene graph
//! - [`Face`] / [`FaceList`] - world-space polygons ready for output
//! - [`Triangulator`] - fixed-diagonal quad splitting
//! - [`GeometryExtractor`] - bakes object transforms into face lists

pub mod extract;
pub mod mesh;
pub mod triangulate;

pub use extract::GeometryExtractor;
pub use mesh::{Face, FaceList, MeshData};
pub use triangulate::{triangulate_face, Triangulator};
