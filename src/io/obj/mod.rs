// use tobj to parse the obj file and hand its separately indexed streams to the normalizer
use std::io::BufReader;
use std::path::Path;

use log::{debug, warn};

use crate::core::mask::AttributeMask;
use crate::core::mesh::normalizer::{self, normalize};
use crate::core::mesh::MeshRecord;
use crate::core::shared::{FaceList, SourceAttributes, SourceIndexKey};
use super::file;

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("Failed to read the obj file: {0}")]
    File(#[from] file::Err),

    #[error("The {stream} index stream has {len} entries, but the position index stream has {positions}.")]
    MismatchedIndexStreams { stream: &'static str, len: usize, positions: usize },

    #[error("Failed to normalize the mesh: {0}")]
    Normalize(#[from] normalizer::Err),

    #[error("Unable to parse model: the source contains no shapes")]
    NoShapes,

    #[error("Unable to parse model: {0}")]
    Parse(#[from] tobj::LoadError),
}

/// The first shape of an obj source, as separately indexed streams.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjSource {
    pub attributes: SourceAttributes,
    pub faces: FaceList,
    /// Number of shapes in the source; only the first one is kept.
    pub num_shapes: usize,
    /// Whether the source carried per-position colors, which are dropped.
    pub has_vertex_colors: bool,
}

impl ObjSource {
    /// The record layout for this source: normals and texture coordinates are
    /// kept whenever the source has any.
    pub fn mask(&self) -> AttributeMask {
        self.attributes.mask()
    }
}

/// Parses obj text into attribute arrays and a triangulated face list.
/// Materials are not loaded, line and point elements are skipped and only the
/// first shape is kept.
pub fn parse_obj(data: &[u8]) -> Result<ObjSource, Err> {
    let op = tobj::LoadOptions {
        triangulate: true,
        single_index: false,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    };

    let (models, _materials) = tobj::load_obj_buf(&mut BufReader::new(data), &op, |_| {
        Ok((Vec::new(), Default::default()))
    })?;

    let num_shapes = models.len();
    let model = models.into_iter().next().ok_or(Err::NoShapes)?;
    if num_shapes > 1 {
        warn!(
            "the source has {} shapes; only the first one ({:?}) is converted",
            num_shapes,
            model.name
        );
    }

    let mesh = model.mesh;
    let has_vertex_colors = !mesh.vertex_color.is_empty();
    if has_vertex_colors {
        warn!("vertex colors are not carried over to the vertex records");
    }

    let keys = zip_index_streams(&mesh)?;
    let faces = if mesh.face_arities.is_empty() {
        FaceList::triangles(keys)
    } else {
        FaceList { arities: mesh.face_arities, keys }
    };

    Ok(ObjSource {
        attributes: SourceAttributes {
            positions: mesh.positions,
            normals: mesh.normals,
            texcoords: mesh.texcoords,
        },
        faces,
        num_shapes,
        has_vertex_colors,
    })
}

/// Pairs the position, normal and texcoord index streams corner by corner.
/// Absent streams contribute index 0, which is never read.
fn zip_index_streams(mesh: &tobj::Mesh) -> Result<Vec<SourceIndexKey>, Err> {
    let positions = mesh.indices.len();
    for (stream, indices) in [("normal", &mesh.normal_indices), ("texcoord", &mesh.texcoord_indices)] {
        if !indices.is_empty() && indices.len() != positions {
            return Err(Err::MismatchedIndexStreams { stream, len: indices.len(), positions });
        }
    }

    let keys = (0..positions)
        .map(|i| SourceIndexKey {
            position: mesh.indices[i],
            normal: mesh.normal_indices.get(i).copied().unwrap_or(0),
            texcoord: mesh.texcoord_indices.get(i).copied().unwrap_or(0),
        })
        .collect();
    Ok(keys)
}

/// Parses obj text and normalizes its first shape into a mesh record.
pub fn obj_to_mesh(data: &[u8], cfg: &normalizer::Config) -> Result<MeshRecord, Err> {
    let source = parse_obj(data)?;
    let mask = source.mask();
    debug!(
        "parsed obj: {} positions, {} normals, {} texcoords, {} faces",
        source.attributes.num_positions(),
        source.attributes.num_normals(),
        source.attributes.num_texcoords(),
        source.faces.num_faces()
    );
    Ok(normalize(&source.attributes, &source.faces, mask, cfg)?)
}

/// Reads and converts the obj file at `path`.
pub fn load_obj<P: AsRef<Path>>(path: P, cfg: &normalizer::Config) -> Result<MeshRecord, Err> {
    let data = file::read_whole_file(path)?;
    obj_to_mesh(&data, cfg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shared::ConfigType;

    const TRIANGLE: &str = "\
v 1 2 3
v 4 5 6
v 7 8 9
vn 0 0 1
vt 0 0
vt 1 0
vt 1 1
f 1/1/1 2/2/1 3/3/1
";

    #[test]
    fn parses_index_streams() {
        let source = parse_obj(TRIANGLE.as_bytes()).unwrap();
        assert_eq!(source.num_shapes, 1);
        assert_eq!(source.mask(), AttributeMask::HAS_NORMAL | AttributeMask::HAS_TEXCOORD);
        assert_eq!(source.faces.num_faces(), 1);
        assert_eq!(source.faces.keys.len(), 3);
        assert_eq!(source.attributes.positions.len(), 9);
        assert!(!source.has_vertex_colors);
        // corners share the normal but not the texcoord
        let keys = &source.faces.keys;
        assert_eq!(keys[0].normal, keys[1].normal);
        assert_ne!(keys[0].texcoord, keys[1].texcoord);
    }

    #[test]
    fn converts_triangle() {
        let mesh = obj_to_mesh(TRIANGLE.as_bytes(), &normalizer::Config::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices(), &[0, 1, 2]);
        assert_eq!(mesh.vertex(0), Some(&[-1.0, 3.0, 2.0, -0.0, 1.0, 0.0, 0.0, 1.0][..]));
    }

    #[test]
    fn positions_only() {
        let obj = "v 1 2 3\nv 0 0 0\nv 0 1 0\nf 1 2 3\n";
        let mesh = obj_to_mesh(obj.as_bytes(), &normalizer::Config::default()).unwrap();
        assert_eq!(mesh.mask(), AttributeMask::NONE);
        assert_eq!(mesh.vertex(0), Some(&[-1.0, 3.0, 2.0][..]));
    }

    #[test]
    fn quad_is_triangulated() {
        let obj = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = obj_to_mesh(obj.as_bytes(), &normalizer::Config::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.index_count(), 6);
    }

    #[test]
    fn source_without_faces() {
        match parse_obj(b"v 0 0 0\n") {
            Err(Err::NoShapes) => {}
            Ok(source) => assert_eq!(source.faces.num_faces(), 0),
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    #[test]
    fn lines_and_points_are_skipped() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\nl 1 2\np 3\n";
        let source = parse_obj(obj.as_bytes()).unwrap();
        assert_eq!(source.faces.arities, vec![3]);
        assert_eq!(source.faces.keys.len(), 3);

        let mesh = obj_to_mesh(obj.as_bytes(), &normalizer::Config::default()).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.indices(), &[0, 1, 2]);
    }

    #[test]
    fn malformed_obj_is_a_parse_error() {
        let err = obj_to_mesh(b"v 0 zero 0\nf 1 1 1\n", &normalizer::Config::default()).unwrap_err();
        assert!(matches!(err, Err::Parse(_)));
    }

    #[test]
    fn face_index_out_of_range() {
        // tobj either rejects the dangling index or hands it on, in which case
        // the normalizer must report it instead of reading out of bounds
        let err = obj_to_mesh(b"v 0 0 0\nv 1 0 0\nf 1 2 3\n", &normalizer::Config::default()).unwrap_err();
        assert!(matches!(err, Err::Parse(_)) || matches!(&err, Err::Normalize(e) if e.is_index_out_of_range()));
    }
}
