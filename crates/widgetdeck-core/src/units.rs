//! Display units: device-independent (dp), physical pixels (px), and the
//! launcher grid. Conversions always go through a [`Density`].

/// Edge length of one launcher grid cell, in dp.
pub const GRID_CELL_DP: f32 = 56.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DpSize {
    pub width: f32,
    pub height: f32,
}

impl DpSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PxSize {
    pub width: f32,
    pub height: f32,
}

impl PxSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Scale factor of the primary display (px per dp).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Density(pub f32);

impl Default for Density {
    fn default() -> Self {
        Density(1.0)
    }
}

impl Density {
    pub fn dp_to_px(&self, dp: f32) -> f32 {
        dp * self.0
    }

    pub fn px_to_dp(&self, px: f32) -> f32 {
        px / self.0
    }

    pub fn size_to_dp(&self, px: PxSize) -> DpSize {
        DpSize::new(self.px_to_dp(px.width), self.px_to_dp(px.height))
    }

    pub fn size_to_px(&self, dp: DpSize) -> PxSize {
        PxSize::new(self.dp_to_px(dp.width), self.dp_to_px(dp.height))
    }

    /// Grid cell edge in physical pixels for a given cell policy.
    pub fn cell_px(&self, cell_dp: f32) -> f32 {
        self.dp_to_px(cell_dp)
    }
}

/// A size in whole launcher grid cells.
///
/// Derived ordering is lexicographic by `(w, h)`, which is exactly the order
/// candidate size ladders are presented in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GridSize {
    pub w: u16,
    pub h: u16,
}

impl GridSize {
    pub fn new(w: u16, h: u16) -> Self {
        Self { w, h }
    }

    pub fn to_px(&self, cell_px: f32) -> PxSize {
        PxSize::new(self.w as f32 * cell_px, self.h as f32 * cell_px)
    }

    pub fn to_dp(&self, cell_dp: f32) -> DpSize {
        DpSize::new(self.w as f32 * cell_dp, self.h as f32 * cell_dp)
    }

    /// Component-wise minimum.
    pub fn min(self, other: GridSize) -> GridSize {
        GridSize::new(self.w.min(other.w), self.h.min(other.h))
    }

    /// Component-wise maximum.
    pub fn max(self, other: GridSize) -> GridSize {
        GridSize::new(self.w.max(other.w), self.h.max(other.h))
    }
}

impl std::fmt::Display for GridSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// Quantize a pixel extent to whole grid cells, never below one cell.
pub fn px_to_grid_units(px: f32, cell_px: f32) -> u16 {
    if cell_px <= 0.0 {
        return 1;
    }
    ((px / cell_px).ceil() as i64).max(1) as u16
}
