use glam::Vec2;

use super::{HexCoord, HexError};

const SQRT_3: f32 = 1.732_050_8;

/// Flat-top axial layout parameterized by hex size.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HexLayout {
    size: f32,
}

impl HexLayout {
    pub const fn new(size: f32) -> Self {
        Self { size }
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// World distance covered by one push step.
    pub fn step_length(&self) -> f32 {
        self.size * 1.5
    }

    /// Centre of `coord` in world space.
    pub fn to_world(&self, coord: HexCoord) -> Vec2 {
        let q = coord.q as f32;
        let r = coord.r as f32;
        Vec2::new(
            self.size * (1.5 * q),
            self.size * (SQRT_3 / 2.0 * q + SQRT_3 * r),
        )
    }

    /// Fractional axial coordinates of a world position.
    pub fn fractional(&self, position: Vec2) -> (f32, f32) {
        let q = (2.0 / 3.0 * position.x) / self.size;
        let r = (-1.0 / 3.0 * position.x + SQRT_3 / 3.0 * position.y) / self.size;
        (q, r)
    }

    /// Nearest hex to a world position.
    ///
    /// Never fails: a rounding inconsistency (only reachable with non-finite
    /// input) is logged and resolved to the naive rounding of `(q, r)`.
    pub fn from_world(&self, position: Vec2) -> HexCoord {
        let (q, r) = self.fractional(position);
        match round_axial(q, r) {
            Ok(coord) => coord,
            Err(err) => {
                tracing::error!(%err, ?position, "hex rounding fell back to naive rounding");
                if q.is_finite() && r.is_finite() {
                    HexCoord::new(q.round() as i32, r.round() as i32)
                } else {
                    HexCoord::ORIGIN
                }
            }
        }
    }

    /// Same as [`Self::from_world`] but surfaces rounding failures.
    pub fn try_from_world(&self, position: Vec2) -> Result<HexCoord, HexError> {
        let (q, r) = self.fractional(position);
        round_axial(q, r)
    }

    /// Moves a world position onto the centre of its nearest hex.
    pub fn snap(&self, position: Vec2) -> Vec2 {
        self.to_world(self.from_world(position))
    }
}

/// Rounds fractional cube coordinates to the nearest hex by discarding the
/// component with the largest rounding error and rebuilding it from the other two.
pub(crate) fn round_axial(q: f32, r: f32) -> Result<HexCoord, HexError> {
    if !q.is_finite() || !r.is_finite() {
        return Err(HexError::InvalidCoordinate { q, r });
    }

    let s = -q - r;
    let mut rq = q.round();
    let mut rr = r.round();
    let mut rs = s.round();

    let q_diff = (rq - q).abs();
    let r_diff = (rr - r).abs();
    let s_diff = (rs - s).abs();

    if q_diff > r_diff && q_diff > s_diff {
        rq = -rr - rs;
    } else if r_diff > s_diff {
        rr = -rq - rs;
    } else {
        rs = -rq - rr;
    }

    let (iq, ir, is) = (rq as i32, rr as i32, rs as i32);
    if iq + ir + is != 0 {
        return Err(HexError::InvalidCoordinate { q, r });
    }
    Ok(HexCoord::new(iq, ir))
}
