//! Raw geometry files: one face per line.

use std::io::Write;

use crate::geom::Face;
use crate::util::{format::fixed, Result};

/// One face as `"%.6f %.6f %.6f"` triplets separated by spaces, followed by
/// an empty field and a newline.
pub fn face_line(face: &Face) -> String {
    let mut line = String::with_capacity(face.len() * 3 * 12);
    for v in face {
        line.push_str(&fixed(v.x, 6));
        line.push(' ');
        line.push_str(&fixed(v.y, 6));
        line.push(' ');
        line.push_str(&fixed(v.z, 6));
        line.push(' ');
    }
    line.push('\n');
    line
}

/// Write faces, one line each, in list order.
pub fn write_faces<'a, W: Write>(out: &mut W, faces: impl IntoIterator<Item = &'a Face>) -> Result<()> {
    for face in faces {
        out.write_all(face_line(face).as_bytes())?;
    }
    Ok(())
}
