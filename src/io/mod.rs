/// Whole-file reads and writes.
pub mod file;

/// Conversion of obj sources through the `tobj` parser.
pub mod obj;

use std::path::{Path, PathBuf};

use crate::core::mesh::normalizer;
use crate::core::mesh::MeshRecord;
use crate::{decode, encode};

/// File formats recognised by extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeshFormat {
    /// Wavefront obj, input only.
    Obj,
    /// The binary vmd format.
    Binary,
    /// The line-oriented text variant of vmd.
    Text,
}

impl MeshFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "obj" => Some(MeshFormat::Obj),
            "vmd" => Some(MeshFormat::Binary),
            "vmdt" => Some(MeshFormat::Text),
            _ => None,
        }
    }

    /// The format of `path`, judged by its extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, Err> {
        let ext = path.as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        Self::from_extension(ext).ok_or_else(|| Err::UnsupportedFormat(ext.to_owned()))
    }

    pub fn extension(self) -> &'static str {
        match self {
            MeshFormat::Obj => "obj",
            MeshFormat::Binary => "vmd",
            MeshFormat::Text => "vmdt",
        }
    }
}

/// The output file name for `input`: its base name with the extension of
/// `format`, relative to the current directory.
pub fn output_path_for<P: AsRef<Path>>(input: P, format: MeshFormat) -> PathBuf {
    let stem = input.as_ref()
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_default();
    let mut out = PathBuf::from(stem);
    out.set_extension(format.extension());
    out
}

/// Fails when writing to `output` would replace the file at `input`.
pub fn check_distinct_paths<P, Q>(input: P, output: Q) -> Result<(), Err>
    where P: AsRef<Path>, Q: AsRef<Path>
{
    let (input, output) = (input.as_ref(), output.as_ref());
    let same = input == output || matches!(
        (std::fs::canonicalize(input), std::fs::canonicalize(output)),
        (Ok(a), Ok(b)) if a == b
    );
    if same {
        return Err(Err::OutputOverwritesInput(output.to_path_buf()));
    }
    Ok(())
}

/// Loads a mesh from an obj, vmd or vmdt file.
pub fn load_mesh<P: AsRef<Path>>(path: P, cfg: &normalizer::Config) -> Result<MeshRecord, Err> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path)?;
    let data = file::read_whole_file(path)?;
    let mesh = match format {
        MeshFormat::Obj => obj::obj_to_mesh(&data, cfg)?,
        MeshFormat::Binary => decode::decode(&data)?,
        MeshFormat::Text => decode::text::decode_text_bytes(&data)?,
    };
    Ok(mesh)
}

/// Encodes `mesh` in the format given by the extension of `path` and writes it.
pub fn save_mesh<P: AsRef<Path>>(path: P, mesh: &MeshRecord) -> Result<(), Err> {
    let path = path.as_ref();
    let data = match MeshFormat::from_path(path)? {
        MeshFormat::Binary => encode::encode_to_vec(mesh),
        MeshFormat::Text => encode::encode_text_to_string(mesh)?.into_bytes(),
        MeshFormat::Obj => return Err(Err::UnsupportedFormat(MeshFormat::Obj.extension().to_owned())),
    };
    file::write_whole_file(path, &data)?;
    Ok(())
}

/// Broad failure classes, for callers that map errors to exit codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    Io,
    UnsupportedFormat,
    Parse,
    Format,
    IndexRange,
}

#[remain::sorted]
#[derive(Debug, thiserror::Error)]
pub enum Err {
    #[error("Error parsing vmd file: {0}")]
    Decode(#[from] decode::Err),

    #[error("Error writing vmdt file: {0}")]
    EncodeText(#[from] encode::text::Err),

    #[error(transparent)]
    File(#[from] file::Err),

    #[error(transparent)]
    Obj(#[from] obj::Err),

    #[error("Refusing to overwrite the input file {}", .0.display())]
    OutputOverwritesInput(PathBuf),

    #[error("Error parsing vmdt file: {0}")]
    TextDecode(#[from] decode::text::Err),

    #[error("Unsupported model format: {0:?}")]
    UnsupportedFormat(String),
}

impl Err {
    pub fn class(&self) -> ErrorClass {
        match self {
            Err::Decode(_) | Err::EncodeText(_) | Err::TextDecode(_) => ErrorClass::Format,
            Err::File(_) | Err::Obj(obj::Err::File(_)) | Err::OutputOverwritesInput(_) => ErrorClass::Io,
            Err::Obj(obj::Err::Normalize(e)) if e.is_index_out_of_range() => ErrorClass::IndexRange,
            Err::Obj(_) => ErrorClass::Parse,
            Err::UnsupportedFormat(_) => ErrorClass::UnsupportedFormat,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mask::AttributeMask;
    use crate::core::shared::ConfigType;

    #[test]
    fn format_dispatch() {
        assert_eq!(MeshFormat::from_path("a/b/model.obj").unwrap(), MeshFormat::Obj);
        assert_eq!(MeshFormat::from_path("model.vmd").unwrap(), MeshFormat::Binary);
        assert_eq!(MeshFormat::from_path("model.vmdt").unwrap(), MeshFormat::Text);
        let err = MeshFormat::from_path("model.fbx").unwrap_err();
        assert_eq!(err.class(), ErrorClass::UnsupportedFormat);
        assert!(matches!(MeshFormat::from_path("model"), Err(Err::UnsupportedFormat(e)) if e.is_empty()));
    }

    #[test]
    fn output_name_replaces_extension() {
        assert_eq!(output_path_for("assets/models/cube.obj", MeshFormat::Binary), PathBuf::from("cube.vmd"));
        assert_eq!(output_path_for("cube.obj", MeshFormat::Text), PathBuf::from("cube.vmdt"));
        assert_eq!(output_path_for("my.cube.obj", MeshFormat::Binary), PathBuf::from("my.cube.vmd"));
    }

    #[test]
    fn save_and_load_both_formats() {
        let mesh = MeshRecord::new(
            AttributeMask::HAS_TEXCOORD,
            vec![-1.0, 3.0, 2.0, 0.5, 0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 0.0, 0.25],
            vec![0, 1, 2],
        ).unwrap();
        let dir = std::env::temp_dir();
        for ext in ["vmd", "vmdt"] {
            let path = dir.join(format!("vmd-oxide-io-{}.{}", std::process::id(), ext));
            save_mesh(&path, &mesh).unwrap();
            assert_eq!(load_mesh(&path, &normalizer::Config::default()).unwrap(), mesh);
            std::fs::remove_file(&path).unwrap();
        }
    }

    #[test]
    fn output_must_not_replace_input() {
        let err = check_distinct_paths("cube.vmd", "cube.vmd").unwrap_err();
        assert!(matches!(&err, Err::OutputOverwritesInput(p) if p == Path::new("cube.vmd")));
        assert_eq!(err.class(), ErrorClass::Io);

        // the same existing file reached through two spellings
        let dir = std::env::temp_dir();
        let name = format!("vmd-oxide-same-{}.vmd", std::process::id());
        let path = dir.join(&name);
        file::write_whole_file(&path, &[0]).unwrap();
        let result = check_distinct_paths(&path, dir.join(".").join(&name));
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(Err::OutputOverwritesInput(_))));

        assert!(check_distinct_paths("cube.vmd", "cube.vmdt").is_ok());
        assert!(check_distinct_paths("models/cube.obj", "cube.vmd").is_ok());
    }

    #[test]
    fn obj_cannot_be_written() {
        let mesh = MeshRecord::empty(AttributeMask::NONE);
        let err = save_mesh(std::env::temp_dir().join("out.obj"), &mesh).unwrap_err();
        assert_eq!(err.class(), ErrorClass::UnsupportedFormat);
    }

    #[test]
    fn error_classes() {
        let err = load_mesh("/nonexistent/vmd-oxide/model.obj", &normalizer::Config::default()).unwrap_err();
        assert_eq!(err.class(), ErrorClass::Io);

        let err: Err = decode::decode(&[0, 0]).unwrap_err().into();
        assert_eq!(err.class(), ErrorClass::Format);

        let err: Err = obj::obj_to_mesh(b"v 0 zero 0\nf 1 1 1\n", &normalizer::Config::default())
            .unwrap_err()
            .into();
        assert_eq!(err.class(), ErrorClass::Parse);
    }
}
