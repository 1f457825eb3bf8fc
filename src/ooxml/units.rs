//! Length units used by DrawingML.
//!
//! Geometry is expressed in English Metric Units (EMU): 914400 per inch,
//! 12700 per point. Font sizes are written as hundredths of a point.

/// EMUs per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// EMUs per point.
pub const EMU_PER_POINT: i64 = 12_700;

/// EMUs per hundredth of a point (the unit of the DrawingML `sz` attribute).
pub const EMU_PER_CENTIPOINT: i64 = 127;

/// A length in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Length(i64);

impl Length {
    #[inline]
    pub const fn emu(emu: i64) -> Self {
        Self(emu)
    }

    #[inline]
    pub const fn pt(points: i64) -> Self {
        Self(points * EMU_PER_POINT)
    }

    #[inline]
    pub const fn from_centipoints(centipoints: i64) -> Self {
        Self(centipoints * EMU_PER_CENTIPOINT)
    }

    #[inline]
    pub const fn as_emu(self) -> i64 {
        self.0
    }

    /// Value in hundredths of a point, truncated toward zero.
    #[inline]
    pub const fn centipoints(self) -> i64 {
        self.0 / EMU_PER_CENTIPOINT
    }

    #[inline]
    pub fn points(self) -> f64 {
        self.0 as f64 / EMU_PER_POINT as f64
    }

    /// Multiply by `factor`, truncating to a whole EMU.
    #[inline]
    pub fn scale(self, factor: f64) -> Self {
        Self((self.0 as f64 * factor) as i64)
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}pt", self.points())
    }
}
