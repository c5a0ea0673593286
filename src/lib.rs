// lib.rs

/// Contains the interface between `MeshRecord` and files on disk:
/// obj sources, binary vmd files and their text variant.
pub mod io;

/// Contains definitions shared by the encoder and the decoder.
pub(crate) mod shared;

/// Defines the binary and text encoders.
pub mod encode;

/// Defines the binary and text decoders.
pub mod decode;

/// Contains the mesh record, the attribute mask, the normalizer and the byte coders.
pub mod core;

pub use io::{Err, ErrorClass};

/// Contains the most commonly used traits, types, and objects.
pub mod prelude {
    pub use crate::core::mask::AttributeMask;
    pub use crate::core::mesh::MeshRecord;
    pub use crate::core::mesh::interner::DedupStrategy;
    pub use crate::core::mesh::normalizer::{self, normalize, Config};
    pub use crate::core::shared::{ConfigType, FaceList, SourceAttributes, SourceIndexKey};
    pub use crate::core::bit_coder::{
        ByteReader,
        ByteWriter,
        SliceReader,
    };
    pub use crate::encode::{self, encode, encode_to_vec, encode_text, encode_text_to_string};
    pub use crate::decode::{self, decode, decode_text, TextDecoder};
    pub use crate::io::{load_mesh, save_mesh, MeshFormat};
}
