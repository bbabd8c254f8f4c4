//! Scene markup serializer.
//!
//! Emits `<facegroup>` blocks for reflectors and `<src_object>` blocks for
//! sources, in scene order. The document is a sequence of blocks meant to be
//! placed inside a scene element; it is not validated here.

use std::fmt;
use std::io::Write;

use super::raw::face_line;
use super::record::{Payload, RecordBuilder, SceneObjectRecord, SourceTrack};
use crate::config::ExportConfig;
use crate::geom::FaceList;
use crate::scene::{ReflectorProps, SceneGraph, SourceProps};
use crate::util::format::{fixed, G};
use crate::util::Result;

/// Writes export records as scene markup.
#[derive(Clone, Copy, Debug)]
pub struct SceneSerializer {
    builder: RecordBuilder,
}

impl SceneSerializer {
    pub fn new(config: &ExportConfig) -> Self {
        Self {
            builder: RecordBuilder::new(config),
        }
    }

    /// Build records for the whole scene and write them.
    #[tracing::instrument(level = "debug", skip_all, fields(scene = scene.name()))]
    pub fn write_scene<W: Write>(&self, scene: &dyn SceneGraph, out: &mut W) -> Result<usize> {
        let records = self.builder.build_all(scene)?;
        self.write_records(&records, out)
    }

    /// Write prepared records. Returns the number of blocks written.
    pub fn write_records<W: Write>(&self, records: &[SceneObjectRecord], out: &mut W) -> Result<usize> {
        let mut blocks = 0;
        for record in records {
            for payload in &record.payloads {
                match payload {
                    Payload::FaceGroup { props, faces } => {
                        write_face_group(out, &record.name, props, faces)?
                    }
                    Payload::Source { props, track } => write_source(out, &record.name, props, track)?,
                }
                blocks += 1;
            }
        }
        Ok(blocks)
    }

    /// Render the scene markup into a string.
    pub fn to_string(&self, scene: &dyn SceneGraph) -> Result<String> {
        let mut buf = Vec::new();
        self.write_scene(scene, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

impl Default for SceneSerializer {
    fn default() -> Self {
        Self::new(&ExportConfig::default())
    }
}

/// Display adapter escaping text for a double-quoted markup attribute.
struct Attr<'a>(&'a str);

impl fmt::Display for Attr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut rest = self.0;
        while let Some(pos) = rest.find(['&', '<', '>', '"', '\'']) {
            f.write_str(&rest[..pos])?;
            let entity = match rest.as_bytes()[pos] {
                b'&' => "&amp;",
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'"' => "&quot;",
                _ => "&apos;",
            };
            f.write_str(entity)?;
            rest = &rest[pos + 1..];
        }
        f.write_str(rest)
    }
}

fn write_face_group<W: Write>(out: &mut W, name: &str, props: &ReflectorProps, faces: &FaceList) -> Result<()> {
    write!(out, "<facegroup name=\"{}\" reflectivity=\"{}\"", Attr(name), G(props.reflectivity))?;
    if let Some(damping) = props.damping {
        write!(out, " damping=\"{}\"", G(damping))?;
    }
    out.write_all(b">\n<faces>")?;
    for face in faces {
        out.write_all(face_line(face).as_bytes())?;
    }
    out.write_all(b"</faces>\n</facegroup>\n")?;
    Ok(())
}

fn write_source<W: Write>(out: &mut W, name: &str, props: &SourceProps, track: &SourceTrack) -> Result<()> {
    write!(out, "<src_object name=\"{}\"", Attr(name))?;
    if let Some(start) = props.start {
        write!(out, " start=\"{}\"", G(start))?;
    }
    if let Some(end) = props.end {
        write!(out, " end=\"{}\"", G(end))?;
    }
    out.write_all(b">\n")?;

    let samples: Vec<String> = track
        .trajectory
        .iter()
        .map(|s| {
            format!(
                "{} {} {} {}",
                G(s.time),
                fixed(s.position.x, 3),
                fixed(s.position.y, 3),
                fixed(s.position.z, 3)
            )
        })
        .collect();
    writeln!(out, "<position>{}</position>", samples.join("\n"))?;

    let o = track.orientation;
    writeln!(
        out,
        "<orientation>0 {} {} {}</orientation>",
        fixed(o.x, 1),
        fixed(o.y, 1),
        fixed(o.z, 1)
    )?;

    for point in &track.points {
        writeln!(
            out,
            "<sound name=\"{}\" connect=\"{}\" x=\"{}\" y=\"{}\" z=\"{}\"/>",
            point.index,
            point.connect,
            G(point.offset.x),
            G(point.offset.y),
            G(point.offset.z)
        )?;
    }

    write!(out, "<sndfile name=\"{}\" channels=\"{}\"", Attr(&props.file), track.channels())?;
    if let Some(loop_count) = props.loop_count {
        write!(out, " loop=\"{}\"", G(loop_count))?;
    }
    out.write_all(b"/>\n</src_object>\n")?;
    Ok(())
}
