//! Minimal Wavefront OBJ reader for small static models.
//!
//! Only geometry is read: `v` positions and `f` faces. Faces with more than
//! three vertices are fan-triangulated. Texture/normal references in
//! `v/vt/vn` face tokens are accepted and dropped. Every other record
//! (`vn`, `vt`, `o`, `g`, `s`, `usemtl`, `mtllib`, ...) is ignored.

use std::fmt;

use foundation::math::Vec3;
use scene::mesh::Mesh;

#[derive(Debug, Clone, PartialEq)]
pub enum ObjError {
    InvalidVertex { line: usize, reason: String },
    InvalidFace { line: usize, reason: String },
    IndexOutOfRange { line: usize, index: i64 },
    Empty,
}

impl fmt::Display for ObjError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjError::InvalidVertex { line, reason } => {
                write!(f, "line {line}: invalid vertex: {reason}")
            }
            ObjError::InvalidFace { line, reason } => {
                write!(f, "line {line}: invalid face: {reason}")
            }
            ObjError::IndexOutOfRange { line, index } => {
                write!(f, "line {line}: vertex index {index} out of range")
            }
            ObjError::Empty => write!(f, "model has no faces"),
        }
    }
}

impl std::error::Error for ObjError {}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObjModel {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl ObjModel {
    pub fn parse(payload: &str) -> Result<Self, ObjError> {
        let mut model = ObjModel::default();

        for (i, raw) in payload.lines().enumerate() {
            let line = i + 1;
            let content = raw.split('#').next().unwrap_or("").trim();
            let mut tokens = content.split_whitespace();
            match tokens.next() {
                Some("v") => {
                    let p = parse_vertex(tokens, line)?;
                    model.positions.push(p);
                }
                Some("f") => {
                    let face = tokens
                        .map(|t| resolve_index(t, model.positions.len(), line))
                        .collect::<Result<Vec<u32>, ObjError>>()?;
                    if face.len() < 3 {
                        return Err(ObjError::InvalidFace {
                            line,
                            reason: format!("expected at least 3 vertices, got {}", face.len()),
                        });
                    }
                    for k in 1..face.len() - 1 {
                        model.indices.extend_from_slice(&[face[0], face[k], face[k + 1]]);
                    }
                }
                _ => {}
            }
        }

        if model.indices.is_empty() {
            return Err(ObjError::Empty);
        }
        Ok(model)
    }

    pub fn into_mesh(self) -> Mesh {
        Mesh::new(self.positions, self.indices)
    }
}

fn parse_vertex<'a>(
    tokens: impl Iterator<Item = &'a str>,
    line: usize,
) -> Result<Vec3, ObjError> {
    // A fourth `w` component is allowed and ignored.
    let coords = tokens
        .take(3)
        .map(|t| {
            t.parse::<f64>().map_err(|e| ObjError::InvalidVertex {
                line,
                reason: format!("{t:?}: {e}"),
            })
        })
        .collect::<Result<Vec<f64>, ObjError>>()?;

    match coords.as_slice() {
        [x, y, z] if x.is_finite() && y.is_finite() && z.is_finite() => Ok(Vec3::new(*x, *y, *z)),
        [_, _, _] => Err(ObjError::InvalidVertex {
            line,
            reason: "non-finite coordinate".to_string(),
        }),
        _ => Err(ObjError::InvalidVertex {
            line,
            reason: format!("expected 3 coordinates, got {}", coords.len()),
        }),
    }
}

/// Resolves a 1-based (or negative, relative) OBJ index to a 0-based index.
fn resolve_index(token: &str, vertex_count: usize, line: usize) -> Result<u32, ObjError> {
    let head = token.split('/').next().unwrap_or("");
    let index: i64 = head.parse().map_err(|_| ObjError::InvalidFace {
        line,
        reason: format!("bad vertex reference {token:?}"),
    })?;

    let count = vertex_count as i64;
    let resolved = match index {
        i if i > 0 => i - 1,
        i if i < 0 => count + i,
        _ => return Err(ObjError::IndexOutOfRange { line, index }),
    };
    if resolved < 0 || resolved >= count {
        return Err(ObjError::IndexOutOfRange { line, index });
    }
    Ok(resolved as u32)
}

#[cfg(test)]
mod tests {
    use super::{ObjError, ObjModel};
    use foundation::math::Vec3;
    use pretty_assertions::assert_eq;

    const QUAD: &str = "\
# a unit quad
o panel
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1 4//1
";

    #[test]
    fn quad_is_fan_triangulated() {
        let model = ObjModel::parse(QUAD).unwrap();
        assert_eq!(model.positions.len(), 4);
        assert_eq!(model.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn negative_indices_are_relative() {
        let model = ObjModel::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
        assert_eq!(model.indices, vec![0, 1, 2]);
    }

    #[test]
    fn texture_and_normal_refs_are_dropped() {
        let model = ObjModel::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nf 1/1/1 2/1/1 3/1/1\n").unwrap();
        assert_eq!(model.indices, vec![0, 1, 2]);
        assert_eq!(model.positions[1], Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn out_of_range_index_reports_line() {
        let err = ObjModel::parse("v 0 0 0\nv 1 0 0\nf 1 2 3\n").unwrap_err();
        assert_eq!(err, ObjError::IndexOutOfRange { line: 3, index: 3 });
    }

    #[test]
    fn zero_index_is_invalid() {
        let err = ObjModel::parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 0 1 2\n").unwrap_err();
        assert_eq!(err, ObjError::IndexOutOfRange { line: 4, index: 0 });
    }

    #[test]
    fn malformed_vertex_is_rejected() {
        let err = ObjModel::parse("v 0 zero 0\n").unwrap_err();
        assert!(matches!(err, ObjError::InvalidVertex { line: 1, .. }));
        let err = ObjModel::parse("v 0 1\n").unwrap_err();
        assert_eq!(err.to_string(), "line 1: invalid vertex: expected 3 coordinates, got 2");
    }

    #[test]
    fn two_vertex_face_is_rejected() {
        let err = ObjModel::parse("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
        assert!(matches!(err, ObjError::InvalidFace { line: 3, .. }));
    }

    #[test]
    fn geometry_free_file_is_empty() {
        assert_eq!(ObjModel::parse("# nothing\nmtllib sat.mtl\n"), Err(ObjError::Empty));
    }

    #[test]
    fn converts_into_scene_mesh() {
        let mesh = ObjModel::parse(QUAD).unwrap().into_mesh();
        assert_eq!(mesh.triangle_count(), 2);
        let s = mesh.bounding_sphere().unwrap();
        assert_eq!(s.center, Vec3::new(0.5, 0.5, 0.0));
    }
}
