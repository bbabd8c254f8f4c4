//! Procedural modifiers evaluated into a temporary mesh at export time.

use serde::Deserialize;

use crate::geom::MeshData;
use crate::util::{DVec3, Error, Result};

/// Mirror axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    fn flip(self, v: DVec3) -> DVec3 {
        match self {
            Axis::X => DVec3::new(-v.x, v.y, v.z),
            Axis::Y => DVec3::new(v.x, -v.y, v.z),
            Axis::Z => DVec3::new(v.x, v.y, -v.z),
        }
    }
}

fn default_offset() -> DVec3 {
    DVec3::X
}

/// A modifier in an object's stack.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Modifier {
    /// `count` copies of the mesh, copy `i` shifted by `i * offset`
    Array {
        count: u32,
        #[serde(default = "default_offset")]
        offset: DVec3,
    },
    /// Original mesh plus a copy reflected across the plane normal to `axis`
    Mirror { axis: Axis },
}

impl Modifier {
    /// Apply this modifier to `mesh`, producing a new mesh.
    pub fn apply(&self, mesh: &MeshData, owner: &str) -> Result<MeshData> {
        match *self {
            Modifier::Array { count, offset } => {
                if count == 0 {
                    return Err(Error::evaluation(owner, "array modifier with zero copies"));
                }
                let copies: Vec<_> = (0..count).map(|i| (offset * f64::from(i), false)).collect();
                Ok(replicate(mesh, &copies, |v, (shift, _)| v + shift))
            }
            Modifier::Mirror { axis } => {
                let copies = [(DVec3::ZERO, false), (DVec3::ZERO, true)];
                Ok(replicate(mesh, &copies, |v, (_, mirrored)| {
                    if mirrored {
                        axis.flip(v)
                    } else {
                        v
                    }
                }))
            }
        }
    }
}

/// Append one copy of `mesh` per entry of `copies`. Mirrored copies get
/// reversed winding so their normals keep pointing outwards.
fn replicate(
    mesh: &MeshData,
    copies: &[(DVec3, bool)],
    map: impl Fn(DVec3, (DVec3, bool)) -> DVec3,
) -> MeshData {
    let n = mesh.vertices.len() as u32;
    let mut out = MeshData {
        vertices: Vec::with_capacity(mesh.vertices.len() * copies.len()),
        polygons: Vec::with_capacity(mesh.polygons.len() * copies.len()),
    };
    for (copy, &params) in copies.iter().enumerate() {
        let base = n * copy as u32;
        out.vertices.extend(mesh.vertices.iter().map(|&v| map(v, params)));
        for polygon in &mesh.polygons {
            let mut indices: Vec<u32> = polygon.iter().map(|&i| i + base).collect();
            if params.1 {
                indices.reverse();
            }
            out.polygons.push(indices);
        }
    }
    out
}

/// Evaluate a modifier stack in order on top of `base`.
pub(crate) fn evaluate_stack(base: &MeshData, modifiers: &[Modifier], owner: &str) -> Result<MeshData> {
    base.check_indices(owner)?;
    let mut mesh = base.clone();
    for modifier in modifiers {
        mesh = modifier.apply(&mesh, owner)?;
    }
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tri() -> MeshData {
        MeshData::new(
            vec![DVec3::new(1.0, 0.0, 0.0), DVec3::new(2.0, 0.0, 0.0), DVec3::new(1.0, 1.0, 0.0)],
            vec![vec![0, 1, 2]],
        )
    }

    #[test]
    fn test_array() {
        let m = Modifier::Array { count: 3, offset: DVec3::new(0.0, 0.0, 5.0) };
        let out = m.apply(&tri(), "t").unwrap();
        assert_eq!(out.num_vertices(), 9);
        assert_eq!(out.polygons, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8]]);
        assert_eq!(out.vertices[8], DVec3::new(1.0, 1.0, 10.0));
    }

    #[test]
    fn test_array_zero_fails() {
        let m = Modifier::Array { count: 0, offset: DVec3::X };
        let err = m.apply(&tri(), "t").unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_mirror() {
        let m = Modifier::Mirror { axis: Axis::X };
        let out = m.apply(&tri(), "t").unwrap();
        assert_eq!(out.num_faces(), 2);
        assert_eq!(out.polygons[1], vec![5, 4, 3]);
        assert_eq!(out.vertices[4], DVec3::new(-2.0, 0.0, 0.0));
    }

    #[test]
    fn test_stack_checks_topology() {
        let mut bad = tri();
        bad.polygons.push(vec![0, 7, 1]);
        assert!(evaluate_stack(&bad, &[], "t").is_err());
        let ok = evaluate_stack(&tri(), &[Modifier::Mirror { axis: Axis::Z }], "t").unwrap();
        assert_eq!(ok.num_faces(), 2);
    }

    #[test]
    fn test_deserialize() {
        let m: Vec<Modifier> = serde_json::from_str(
            r#"[{"type": "array", "count": 2}, {"type": "mirror", "axis": "y"}]"#,
        )
        .unwrap();
        assert_eq!(m[0], Modifier::Array { count: 2, offset: DVec3::X });
        assert_eq!(m[1], Modifier::Mirror { axis: Axis::Y });
    }
}
