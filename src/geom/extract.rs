//! World-space face extraction from mesh objects.

use crate::scene::SceneObject;
use crate::util::{DMat4, Result};

use super::mesh::{FaceList, MeshData};
use super::triangulate::Triangulator;

/// Reads mesh objects and bakes their world transform into face lists.
#[derive(Clone, Copy, Debug)]
pub struct GeometryExtractor {
    triangulator: Triangulator,
    apply_modifiers: bool,
}

impl GeometryExtractor {
    pub fn new(triangulate: bool, apply_modifiers: bool) -> Self {
        Self {
            triangulator: Triangulator::new(triangulate),
            apply_modifiers,
        }
    }

    /// Transform every polygon of `mesh` by `matrix`, in native face order.
    ///
    /// Each polygon is emitted exactly once. Degenerate and non-planar
    /// polygons pass through untouched.
    pub fn bake(&self, mesh: &MeshData, matrix: &DMat4, owner: &str) -> Result<FaceList> {
        let mut faces = FaceList::with_capacity(mesh.num_faces());
        for index in 0..mesh.num_faces() {
            let face = mesh.face(index, matrix, owner)?;
            faces.extend(self.triangulator.apply(face));
        }
        Ok(faces)
    }

    /// Extract the faces of one object in world space.
    ///
    /// `Ok(None)` means the object has no mesh. Evaluation failures are
    /// returned as recoverable errors; see [`Self::extract_or_skip`].
    #[tracing::instrument(level = "debug", skip_all, fields(object = object.name()))]
    pub fn extract(&self, object: &dyn SceneObject) -> Result<Option<FaceList>> {
        let matrix = object.matrix_world();
        if !self.apply_modifiers {
            return object
                .mesh()
                .map(|mesh| self.bake(mesh, &matrix, object.name()))
                .transpose();
        }

        // Owned when modifiers were applied; dropped at the end of this scope.
        let Some(mesh) = object.evaluated_mesh()? else {
            return Ok(None);
        };
        let faces = self.bake(&mesh, &matrix, object.name())?;
        tracing::trace!(faces = faces.len(), temporary = matches!(mesh, std::borrow::Cow::Owned(_)), "baked");
        Ok(Some(faces))
    }

    /// Like [`Self::extract`], but an evaluation failure only drops this
    /// object's geometry. Other errors propagate.
    pub fn extract_or_skip(&self, object: &dyn SceneObject) -> Result<Option<FaceList>> {
        match self.extract(object) {
            Err(e) if e.is_recoverable() => {
                tracing::warn!(object = object.name(), error = %e, "skipping geometry");
                Ok(None)
            }
            other => other,
        }
    }
}

impl Default for GeometryExtractor {
    fn default() -> Self {
        Self::new(true, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::Face;
    use crate::scene::{Modifier, ObjectKind, ObjectNode};
    use crate::util::DVec3;

    fn quad_mesh() -> MeshData {
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

    fn as_vecs(faces: &FaceList) -> Vec<Vec<DVec3>> {
        faces.iter().map(|f: &Face| f.to_vec()).collect()
    }

    #[test]
    fn test_bake_world_transform() {
        let node = ObjectNode::new("Wall", ObjectKind::Mesh)
            .with_mesh(quad_mesh())
            .with_location(DVec3::new(10.0, 0.0, 0.0));
        let faces = GeometryExtractor::new(false, false).extract(&node).unwrap().unwrap();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0][0], DVec3::new(10.0, 0.0, 0.0));
        assert_eq!(faces[0][2], DVec3::new(11.0, 1.0, 0.0));
    }

    #[test]
    fn test_triangulated_once() {
        let node = ObjectNode::new("Wall", ObjectKind::Mesh).with_mesh(quad_mesh());
        let faces = GeometryExtractor::default().extract(&node).unwrap().unwrap();
        assert_eq!(faces.len(), 2);
        assert!(faces.iter().all(|f| f.len() == 3));
    }

    #[test]
    fn test_idempotent() {
        let mut node = ObjectNode::new("Wall", ObjectKind::Mesh).with_mesh(quad_mesh());
        node.rotation_euler = DVec3::new(0.3, -1.2, 2.0);
        node.scale = DVec3::new(1.5, 1.0, 0.5);
        let ex = GeometryExtractor::default();
        let a = ex.extract(&node).unwrap().unwrap();
        let b = ex.extract(&node).unwrap().unwrap();
        assert_eq!(as_vecs(&a), as_vecs(&b));
    }

    #[test]
    fn test_no_mesh() {
        let node = ObjectNode::new("Empty", ObjectKind::Other);
        assert!(GeometryExtractor::default().extract(&node).unwrap().is_none());
    }

    #[test]
    fn test_modifiers_applied_or_ignored() {
        let mut node = ObjectNode::new("Row", ObjectKind::Mesh).with_mesh(quad_mesh());
        node.modifiers.push(Modifier::Array { count: 3, offset: DVec3::new(2.0, 0.0, 0.0) });

        let with = GeometryExtractor::new(false, true).extract(&node).unwrap().unwrap();
        assert_eq!(with.len(), 3);
        let without = GeometryExtractor::new(false, false).extract(&node).unwrap().unwrap();
        assert_eq!(without.len(), 1);
    }

    #[test]
    fn test_evaluation_failure_skips() {
        let mut node = ObjectNode::new("Broken", ObjectKind::Mesh).with_mesh(quad_mesh());
        node.modifiers.push(Modifier::Array { count: 0, offset: DVec3::X });
        let ex = GeometryExtractor::default();
        assert!(ex.extract(&node).is_err());
        assert!(ex.extract_or_skip(&node).unwrap().is_none());
    }

    #[test]
    fn test_bad_index_skips_without_modifiers() {
        let mut mesh = quad_mesh();
        mesh.polygons.push(vec![0, 1, 42]);
        let node = ObjectNode::new("Broken", ObjectKind::Mesh).with_mesh(mesh);
        assert!(GeometryExtractor::new(true, false).extract_or_skip(&node).unwrap().is_none());
    }
}
