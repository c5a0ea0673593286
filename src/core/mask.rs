use std::fmt;
use std::ops;

/// Bitset selecting the optional per-vertex attributes of a mesh.
/// Every vertex record starts with three position floats, followed by
/// the attributes selected here, in the order normal, color, texcoord.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttributeMask(u8);

impl AttributeMask {
    pub const NONE: Self = Self(0);
    pub const HAS_NORMAL: Self = Self(1 << 0);
    pub const HAS_COLOR: Self = Self(1 << 1);
    pub const HAS_TEXCOORD: Self = Self(1 << 2);

    pub const POSITION_COMPONENTS: usize = 3;
    pub const NORMAL_COMPONENTS: usize = 3;
    pub const COLOR_COMPONENTS: usize = 3;
    pub const TEXCOORD_COMPONENTS: usize = 2;

    const KNOWN_BITS: u8 = 0b111;

    /// Interprets a raw mask byte without validation.
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Bits set outside the three known flags.
    pub const fn unknown_bits(self) -> u8 {
        self.0 & !Self::KNOWN_BITS
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn has_normal(self) -> bool {
        self.contains(Self::HAS_NORMAL)
    }

    pub fn has_color(self) -> bool {
        self.contains(Self::HAS_COLOR)
    }

    pub fn has_texcoord(self) -> bool {
        self.contains(Self::HAS_TEXCOORD)
    }

    /// Number of floats in one vertex record.
    pub fn components_per_vertex(self) -> usize {
        let mut n = Self::POSITION_COMPONENTS;
        if self.has_normal() {
            n += Self::NORMAL_COMPONENTS;
        }
        if self.has_color() {
            n += Self::COLOR_COMPONENTS;
        }
        if self.has_texcoord() {
            n += Self::TEXCOORD_COMPONENTS;
        }
        n
    }

    /// Size in bytes of one vertex record.
    pub fn record_size(self) -> usize {
        self.components_per_vertex() * std::mem::size_of::<f32>()
    }

    /// The flag characters of the text format, always written in `n`, `c`, `t` order.
    pub fn to_flag_string(self) -> String {
        let mut out = String::with_capacity(3);
        if self.has_normal() {
            out.push('n');
        }
        if self.has_color() {
            out.push('c');
        }
        if self.has_texcoord() {
            out.push('t');
        }
        out
    }

    /// Maps a text-format flag character to its mask bit.
    pub fn from_flag_char(c: char) -> Option<Self> {
        match c {
            'n' => Some(Self::HAS_NORMAL),
            'c' => Some(Self::HAS_COLOR),
            't' => Some(Self::HAS_TEXCOORD),
            _ => None,
        }
    }
}

impl ops::BitOr for AttributeMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl ops::BitOrAssign for AttributeMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for AttributeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttributeMask({:#05b} \"{}\")", self.0, self.to_flag_string())
    }
}
