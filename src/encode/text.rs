use std::fmt::{self, Write};

use thiserror::Error;

use crate::core::mesh::MeshRecord;

/// Writes the human-readable variant of the mesh:
///
/// ```text
/// nt                  <- optional attributes present, in n, c, t order
/// -1 3 2 0 1 0 0.5 0  <- one line per vertex, same layout as the binary records
///                     <- blank separator
/// 0 1 2               <- one line per triangle
/// ```
///
/// Floats are written with the shortest representation that parses back to
/// the same value, so decoding the text reproduces the mesh exactly.
pub fn encode_text<W>(mesh: &MeshRecord, out: &mut W) -> Result<(), Err>
    where W: Write
{
    if mesh.index_count() % 3 != 0 {
        return Err(Err::NotTriangles(mesh.index_count()));
    }

    writeln!(out, "{}", mesh.mask().to_flag_string())?;

    for idx in 0..mesh.vertex_count() {
        let Some(record) = mesh.vertex(idx) else { break };
        let mut first = true;
        for value in record {
            if !first {
                out.write_char(' ')?;
            }
            first = false;
            write!(out, "{}", value)?;
        }
        out.write_char('\n')?;
    }

    out.write_char('\n')?;

    for [a, b, c] in mesh.triangles() {
        writeln!(out, "{} {} {}", a, b, c)?;
    }

    Ok(())
}

pub fn encode_text_to_string(mesh: &MeshRecord) -> Result<String, Err> {
    let mut out = String::new();
    encode_text(mesh, &mut out)?;
    Ok(out)
}

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("The text format stores triangles, but the mesh has {0} indices.")]
    NotTriangles(u32),

    #[error("Failed to write text: {0}")]
    Write(#[from] fmt::Error),
}
