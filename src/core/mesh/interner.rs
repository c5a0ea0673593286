use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

use crate::core::mask::AttributeMask;
use crate::core::shared::{SourceAttributes, SourceIndexKey};
use super::normalizer::Config;

/// How the interner recognises a key it has already seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DedupStrategy {
    /// Hash map keyed on the full index triple.
    #[default]
    Exact,
    /// Tracks the component-wise maximum of all keys seen so far and only
    /// scans the previous keys when the candidate does not exceed it.
    /// Kept for compatibility with the output of older converters.
    RunningMax,
}

#[enum_dispatch::enum_dispatch]
pub(crate) trait KeyIndexImpl {
    /// Returns the output index previously assigned to `key`, if any.
    fn lookup(&mut self, key: SourceIndexKey) -> Option<u32>;

    /// Records that `key` has been assigned the output index `idx`.
    fn insert(&mut self, key: SourceIndexKey, idx: u32);
}

#[enum_dispatch::enum_dispatch(KeyIndexImpl)]
pub(crate) enum KeyIndex {
    Exact(ExactKeyIndex),
    RunningMax(RunningMaxKeyIndex),
}

impl KeyIndex {
    fn new(strategy: DedupStrategy, capacity: usize) -> Self {
        match strategy {
            DedupStrategy::Exact => KeyIndex::Exact(ExactKeyIndex {
                map: HashMap::with_capacity(capacity),
            }),
            DedupStrategy::RunningMax => KeyIndex::RunningMax(RunningMaxKeyIndex {
                keys: Vec::with_capacity(capacity),
                max: SourceIndexKey::default(),
            }),
        }
    }
}

pub(crate) struct ExactKeyIndex {
    map: HashMap<SourceIndexKey, u32>,
}

impl KeyIndexImpl for ExactKeyIndex {
    fn lookup(&mut self, key: SourceIndexKey) -> Option<u32> {
        self.map.get(&key).copied()
    }

    fn insert(&mut self, key: SourceIndexKey, idx: u32) {
        self.map.insert(key, idx);
    }
}

pub(crate) struct RunningMaxKeyIndex {
    /// Keys in output index order.
    keys: Vec<SourceIndexKey>,
    max: SourceIndexKey,
}

impl KeyIndexImpl for RunningMaxKeyIndex {
    fn lookup(&mut self, key: SourceIndexKey) -> Option<u32> {
        let dominated = key.position <= self.max.position
            && key.normal <= self.max.normal
            && key.texcoord <= self.max.texcoord;
        if !dominated {
            self.max.position = self.max.position.max(key.position);
            self.max.normal = self.max.normal.max(key.normal);
            self.max.texcoord = self.max.texcoord.max(key.texcoord);
            return None;
        }
        // Newest first: repeated corners tend to be close together.
        self.keys.iter()
            .rposition(|k| *k == key)
            .map(|i| i as u32)
    }

    fn insert(&mut self, key: SourceIndexKey, idx: u32) {
        debug_assert_eq!(idx as usize, self.keys.len());
        self.keys.push(key);
    }
}

/// The source stream an index refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeKind {
    Position,
    Normal,
    Texcoord,
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AttributeKind::Position => "position",
            AttributeKind::Normal => "normal",
            AttributeKind::Texcoord => "texcoord",
        };
        f.write_str(name)
    }
}

/// Assigns compact output indices to source index keys and builds the
/// interleaved vertex buffer as new keys are met.
pub struct VertexInterner<'a> {
    source: &'a SourceAttributes,
    mask: AttributeMask,
    remap_axes: bool,
    flip_v: bool,
    index: KeyIndex,
    vertices: Vec<f32>,
    vertex_count: u32,
}

impl<'a> VertexInterner<'a> {
    /// Creates an interner emitting records with the layout of `mask`.
    /// `capacity` is the expected number of distinct keys; it is only a hint.
    pub fn new(source: &'a SourceAttributes, mask: AttributeMask, cfg: &Config, capacity: usize) -> Result<Self, Err> {
        if mask.has_color() {
            return Err(Err::ColorNotSupported);
        }
        if mask.unknown_bits() != 0 {
            return Err(Err::UnknownMaskBits(mask.bits()));
        }
        Ok(Self {
            source,
            mask,
            remap_axes: cfg.remap_axes,
            flip_v: cfg.flip_v,
            index: KeyIndex::new(cfg.dedup, capacity),
            vertices: Vec::with_capacity(capacity * mask.components_per_vertex()),
            vertex_count: 0,
        })
    }

    /// Returns the output index of `key`, appending a new vertex record the
    /// first time the key is met.
    pub fn intern(&mut self, key: SourceIndexKey) -> Result<u32, Err> {
        if let Some(idx) = self.index.lookup(key) {
            return Ok(idx);
        }

        let idx = self.vertex_count;
        let next = idx.checked_add(1).ok_or(Err::TooManyVertices)?;
        self.push_record(key)?;
        self.index.insert(key, idx);
        self.vertex_count = next;
        Ok(idx)
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Consumes the interner and returns the vertex buffer, shrunk to the
    /// number of distinct keys met.
    pub fn into_vertices(self) -> Vec<f32> {
        let mut vertices = self.vertices;
        vertices.shrink_to_fit();
        vertices
    }

    fn push_record(&mut self, key: SourceIndexKey) -> Result<(), Err> {
        // Gather everything first so that a failed lookup leaves no partial record.
        let position = gather::<3>(&self.source.positions, key.position, AttributeKind::Position)?;
        let normal = if self.mask.has_normal() {
            Some(gather::<3>(&self.source.normals, key.normal, AttributeKind::Normal)?)
        } else {
            None
        };
        let texcoord = if self.mask.has_texcoord() {
            Some(gather::<2>(&self.source.texcoords, key.texcoord, AttributeKind::Texcoord)?)
        } else {
            None
        };

        self.vertices.extend_from_slice(&self.remap(position));
        if let Some(normal) = normal {
            self.vertices.extend_from_slice(&self.remap(normal));
        }
        if let Some([u, v]) = texcoord {
            let v = if self.flip_v { 1.0 - v } else { v };
            self.vertices.extend_from_slice(&[u, v]);
        }
        Ok(())
    }

    /// Source convention to target convention: x is mirrored, y and z swap.
    fn remap(&self, [x, y, z]: [f32; 3]) -> [f32; 3] {
        if self.remap_axes {
            [-x, z, y]
        } else {
            [x, y, z]
        }
    }
}

fn gather<const N: usize>(data: &[f32], idx: u32, attribute: AttributeKind) -> Result<[f32; N], Err> {
    let out_of_range = || Err::IndexOutOfRange { attribute, index: idx, len: data.len() / N };
    let start = (idx as usize).checked_mul(N).ok_or_else(out_of_range)?;
    let end = start.checked_add(N).ok_or_else(out_of_range)?;
    let slice = data.get(start..end).ok_or_else(out_of_range)?;
    let mut out = [0.0; N];
    out.copy_from_slice(slice);
    Ok(out)
}

#[remain::sorted]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Err {
    #[error("Vertex colors are reserved in the record layout but cannot be gathered from the source.")]
    ColorNotSupported,

    #[error("The {attribute} index {index} is out of range; the source has {len} {attribute} values.")]
    IndexOutOfRange { attribute: AttributeKind, index: u32, len: usize },

    #[error("The mesh has more distinct vertices than fit in a 32-bit index.")]
    TooManyVertices,

    #[error("The attribute mask {0:#010b} has unknown bits set.")]
    UnknownMaskBits(u8),
}
