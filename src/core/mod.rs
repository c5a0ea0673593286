/// Attribute mask and the per-vertex record layout it implies.
pub mod mask;

/// The mesh record together with the vertex interner and the normalizer that build it.
pub mod mesh;

/// Byte-level readers and writers used by the binary codec.
pub mod bit_coder;

/// Shared definitions: configuration trait and the upstream source data model.
pub mod shared;
