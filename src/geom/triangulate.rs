//! Quad triangulation with a fixed diagonal.

use smallvec::{smallvec, SmallVec};

use super::mesh::Face;

/// Split a quad along the v0-v2 diagonal into `[v0,v1,v2]` and `[v2,v3,v0]`.
///
/// Any face that is not a quad is returned unchanged. Triangle quality is not
/// checked: non-planar and non-convex quads use the same diagonal.
pub fn triangulate_face(face: Face) -> SmallVec<[Face; 2]> {
    if face.len() == 4 {
        let (v0, v1, v2, v3) = (face[0], face[1], face[2], face[3]);
        smallvec![smallvec![v0, v1, v2], smallvec![v2, v3, v0]]
    } else {
        smallvec![face]
    }
}

/// Optional triangulation stage applied to extracted faces.
#[derive(Clone, Copy, Debug)]
pub struct Triangulator {
    enabled: bool,
}

impl Triangulator {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Triangulate one face. Returns it unchanged when disabled.
    pub fn apply(&self, face: Face) -> SmallVec<[Face; 2]> {
        if self.enabled {
            triangulate_face(face)
        } else {
            smallvec![face]
        }
    }
}

impl Default for Triangulator {
    fn default() -> Self {
        Self::new(true)
    }
}
