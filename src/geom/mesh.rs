//! Mesh data as handed over by the scene graph, and the face types produced
//! from it.

use serde::Deserialize;
use smallvec::SmallVec;

use crate::util::{to_world, DMat4, DVec3, Error, Result, Vertex};

/// Ordered world-space vertices of one polygon. Winding is preserved.
///
/// Triangles and quads stay inline; larger polygons spill to the heap.
pub type Face = SmallVec<[Vertex; 4]>;

/// Faces of one mesh object, in the mesh's native face order.
pub type FaceList = Vec<Face>;

/// Local-space polygon mesh: a vertex table and per-polygon index lists.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MeshData {
    /// Vertex coordinates in object space.
    #[serde(default)]
    pub vertices: Vec<DVec3>,
    /// Vertex index lists, one per polygon.
    #[serde(default)]
    pub polygons: Vec<Vec<u32>>,
}

impl MeshData {
    /// Create a mesh from a vertex table and polygon index lists.
    pub fn new(vertices: Vec<DVec3>, polygons: Vec<Vec<u32>>) -> Self {
        Self { vertices, polygons }
    }

    /// Get number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get number of polygons.
    pub fn num_faces(&self) -> usize {
        self.polygons.len()
    }

    /// True when the mesh has no polygons to export.
    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// Check that every polygon index refers to an existing vertex.
    ///
    /// `owner` names the object in the returned error.
    pub fn check_indices(&self, owner: &str) -> Result<()> {
        let count = self.vertices.len();
        for (face, polygon) in self.polygons.iter().enumerate() {
            if let Some(&bad) = polygon.iter().find(|&&i| i as usize >= count) {
                return Err(Error::evaluation(
                    owner,
                    format!("face {face} references vertex {bad} of {count}"),
                ));
            }
        }
        Ok(())
    }

    /// Gather one polygon's vertices, transformed by `matrix`.
    pub fn face(&self, index: usize, matrix: &DMat4, owner: &str) -> Result<Face> {
        let polygon = self.polygons.get(index).ok_or_else(|| {
            Error::evaluation(owner, format!("face {index} out of range"))
        })?;
        polygon
            .iter()
            .map(|&vi| {
                self.vertices
                    .get(vi as usize)
                    .map(|&co| to_world(matrix, co))
                    .ok_or_else(|| {
                        Error::evaluation(
                            owner,
                            format!("face {index} references vertex {vi} of {}", self.vertices.len()),
                        )
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> MeshData {
        MeshData::new(
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3]],
        )
    }

    #[test]
    fn test_counts() {
        let m = quad();
        assert_eq!(m.num_vertices(), 4);
        assert_eq!(m.num_faces(), 1);
        assert!(!m.is_empty());
        assert!(MeshData::default().is_empty());
    }

    #[test]
    fn test_face_transformed() {
        let m = quad();
        let matrix = DMat4::from_translation(DVec3::new(0.0, 0.0, 2.0));
        let face = m.face(0, &matrix, "quad").unwrap();
        assert_eq!(face.len(), 4);
        assert_eq!(face[2], DVec3::new(1.0, 1.0, 2.0));
    }

    #[test]
    fn test_bad_index() {
        let mut m = quad();
        m.polygons.push(vec![0, 1, 9]);
        assert!(m.check_indices("quad").is_err());
        let err = m.face(1, &DMat4::IDENTITY, "quad").unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_deserialize() {
        let m: MeshData = serde_json::from_str(
            r#"{"vertices": [[0,0,0],[1,0,0],[0,1,0]], "polygons": [[0,1,2]]}"#,
        )
        .unwrap();
        assert_eq!(m.num_vertices(), 3);
        assert_eq!(m.polygons[0], vec![0, 1, 2]);
    }
}
