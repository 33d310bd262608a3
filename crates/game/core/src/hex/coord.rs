use std::fmt;

/// Axial hex coordinate. The implicit third cube component is `s = -q - r`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexCoord {
    pub q: i32,
    pub r: i32,
}

impl HexCoord {
    pub const ORIGIN: Self = Self { q: 0, r: 0 };

    /// Unit offsets to the six neighbours, clockwise starting at `(+1, 0)`.
    pub const DIRECTIONS: [HexCoord; 6] = [
        HexCoord::new(1, 0),
        HexCoord::new(0, 1),
        HexCoord::new(-1, 1),
        HexCoord::new(-1, 0),
        HexCoord::new(0, -1),
        HexCoord::new(1, -1),
    ];

    #[inline]
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    #[inline]
    pub const fn s(self) -> i32 {
        -self.q - self.r
    }

    pub const fn offset(self, delta: HexCoord) -> Self {
        Self::new(self.q + delta.q, self.r + delta.r)
    }

    /// The six adjacent coordinates in [`Self::DIRECTIONS`] order.
    pub fn neighbors(self) -> [HexCoord; 6] {
        Self::DIRECTIONS.map(|delta| self.offset(delta))
    }

    /// Hex Manhattan distance: `(|dq| + |dq + dr| + |dr|) / 2`.
    pub fn distance(self, other: HexCoord) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = (self.q + self.r - other.q - other.r).unsigned_abs();
        (dq + ds + dr) / 2
    }

    pub fn is_adjacent(self, other: HexCoord) -> bool {
        self.distance(other) == 1
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.q, self.r)
    }
}
