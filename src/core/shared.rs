use super::mask::AttributeMask;

pub trait ConfigType {
    fn default() -> Self;
}

/// Indices of one face corner into the separately indexed source streams.
/// Only equality matters; the values are never retained in the mesh record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct SourceIndexKey {
    pub position: u32,
    pub normal: u32,
    pub texcoord: u32,
}

impl SourceIndexKey {
    pub const fn new(position: u32, normal: u32, texcoord: u32) -> Self {
        Self { position, normal, texcoord }
    }
}

impl From<[u32; 3]> for SourceIndexKey {
    fn from([position, normal, texcoord]: [u32; 3]) -> Self {
        Self { position, normal, texcoord }
    }
}

/// Flat attribute arrays as produced by the OBJ parser, in the source
/// coordinate convention. `positions` and `normals` hold three floats per
/// entry, `texcoords` two.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceAttributes {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub texcoords: Vec<f32>,
}

impl SourceAttributes {
    pub fn num_positions(&self) -> usize {
        self.positions.len() / AttributeMask::POSITION_COMPONENTS
    }

    pub fn num_normals(&self) -> usize {
        self.normals.len() / AttributeMask::NORMAL_COMPONENTS
    }

    pub fn num_texcoords(&self) -> usize {
        self.texcoords.len() / AttributeMask::TEXCOORD_COMPONENTS
    }

    /// The mask implied by which attribute streams are present.
    pub fn mask(&self) -> AttributeMask {
        let mut mask = AttributeMask::NONE;
        if self.num_normals() > 0 {
            mask |= AttributeMask::HAS_NORMAL;
        }
        if self.num_texcoords() > 0 {
            mask |= AttributeMask::HAS_TEXCOORD;
        }
        mask
    }
}

/// Faces of a single shape: the number of corners of each face and one
/// index key per corner, in face order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FaceList {
    pub arities: Vec<u32>,
    pub keys: Vec<SourceIndexKey>,
}

impl FaceList {
    /// A face list made of triangles only.
    pub fn triangles(keys: Vec<SourceIndexKey>) -> Self {
        let arities = vec![3; keys.len() / 3];
        Self { arities, keys }
    }

    pub fn num_faces(&self) -> usize {
        self.arities.len()
    }

    /// Total number of face corners across all faces.
    pub fn num_corners(&self) -> usize {
        self.arities.iter().map(|&a| a as usize).sum()
    }

    /// Iterates over the corners of each face.
    pub fn faces(&self) -> impl Iterator<Item = &[SourceIndexKey]> {
        let mut offset = 0;
        self.arities.iter().map(move |&arity| {
            let start = offset.min(self.keys.len());
            offset += arity as usize;
            &self.keys[start..offset.min(self.keys.len())]
        })
    }
}
