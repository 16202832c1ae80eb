//! Grid-quantized sizing for hosted widgets.
//!
//! Providers declare pixel constraints (minimum size, minimum resize size,
//! optionally a maximum). The launcher grid allocates space in fixed cells,
//! so the engine converts every bound to whole cells and enumerates the
//! discrete sizes between them. The hosted content has only ever been
//! validated against cell-aligned boxes; arbitrary pixel sizes are never
//! offered.

use crate::provider::ProviderDescriptor;
use crate::units::{px_to_grid_units, Density, DpSize, GridSize, PxSize, GRID_CELL_DP};

/// Sizing policy knobs.
///
/// `default_max_grid` caps the ladder when the platform reports no maximum
/// (older registry APIs). 5x5 covers the widgets actually shipped on the
/// grid; it is a policy choice, not a platform guarantee, which is why it is
/// a config field rather than a constant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizingConfig {
    pub grid_cell_dp: f32,
    pub default_max_grid: GridSize,
}

impl Default for SizingConfig {
    fn default() -> Self {
        Self {
            grid_cell_dp: GRID_CELL_DP,
            default_max_grid: GridSize::new(5, 5),
        }
    }
}

/// Enumerate the selectable grid sizes for a provider.
///
/// Non-resizable providers get exactly their minimum grid size. Resizable
/// ones get every `(w, h)` from the larger of the minimum and minimum-resize
/// grids up to the platform maximum capped by `config.default_max_grid`,
/// sorted ascending by `(w, h)`.
///
/// The result is never empty: when a provider's minimum already exceeds the
/// ceiling, the minimum itself is the only candidate, so a current-size
/// index into the list is always valid.
pub fn compute_candidates(
    descriptor: &ProviderDescriptor,
    density: Density,
    config: &SizingConfig,
) -> Vec<GridSize> {
    let cell_px = density.cell_px(config.grid_cell_dp);

    let min_grid = grid_floor(descriptor.min_size, cell_px);
    let min_resize_grid = grid_floor(descriptor.min_resize_size, cell_px);

    if !descriptor.resize_mode.is_resizable() {
        return vec![min_grid];
    }

    let start = min_grid.max(min_resize_grid);
    let max = platform_max_grid(descriptor, cell_px, config);

    let mut candidates = Vec::new();
    for w in start.w..=max.w {
        for h in start.h..=max.h {
            candidates.push(GridSize::new(w, h));
        }
    }
    if candidates.is_empty() {
        candidates.push(start);
    }
    candidates.sort();

    log::debug!(
        "sizing candidates for {}: {} sizes in {}..={}",
        descriptor.identity,
        candidates.len(),
        start,
        max
    );
    candidates
}

fn grid_floor(px: PxSize, cell_px: f32) -> GridSize {
    GridSize::new(
        px_to_grid_units(px.width, cell_px),
        px_to_grid_units(px.height, cell_px),
    )
}

/// Declared maximum in grid cells, capped by the policy default. A declared
/// axis of zero or below means "unspecified" and falls back to the default,
/// matching how registries report the absence of a bound.
fn platform_max_grid(descriptor: &ProviderDescriptor, cell_px: f32, config: &SizingConfig) -> GridSize {
    let default = config.default_max_grid;
    let Some(max_px) = descriptor.max_resize_size else {
        return default;
    };
    let w = if max_px.width > 0.0 {
        px_to_grid_units(max_px.width, cell_px)
    } else {
        default.w
    };
    let h = if max_px.height > 0.0 {
        px_to_grid_units(max_px.height, cell_px)
    } else {
        default.h
    };
    GridSize::new(w, h).min(default)
}

/// Per-widget sizing state: the candidate ladder, the selected rung, and the
/// concrete pixel box currently applied to the hosted view.
#[derive(Clone, Debug)]
pub struct SizingState {
    candidates: Vec<GridSize>,
    current_index: usize,
    current_px: PxSize,
    min_resize_px: PxSize,
    min_grid: GridSize,
    min_resize_grid: GridSize,
    max_grid: GridSize,
    resizable_desc: String,
    cell_px: f32,
    cell_dp: f32,
    density: Density,
}

impl SizingState {
    /// Build the ladder for a provider and select its smallest size.
    pub fn for_descriptor(
        descriptor: &ProviderDescriptor,
        density: Density,
        config: &SizingConfig,
    ) -> Self {
        let cell_px = density.cell_px(config.grid_cell_dp);
        let candidates = compute_candidates(descriptor, density, config);
        let initial = candidates[0];

        Self {
            current_px: initial.to_px(cell_px),
            current_index: 0,
            min_grid: grid_floor(descriptor.min_size, cell_px),
            min_resize_grid: grid_floor(descriptor.min_resize_size, cell_px),
            max_grid: platform_max_grid(descriptor, cell_px, config),
            resizable_desc: descriptor.resize_mode.describe(),
            min_resize_px: descriptor.min_resize_size,
            candidates,
            cell_px,
            cell_dp: config.grid_cell_dp,
            density,
        }
    }

    pub fn candidates(&self) -> &[GridSize] {
        &self.candidates
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_grid(&self) -> GridSize {
        self.candidates[self.current_index]
    }

    /// Pixel box currently applied to the view.
    pub fn current_px(&self) -> PxSize {
        self.current_px
    }

    /// Current box in dp, for the platform size-changed callback. The
    /// server-rendered content re-lays-out against this.
    pub fn current_dp(&self) -> DpSize {
        self.density.size_to_dp(self.current_px)
    }

    /// Step to the next larger candidate. Reports whether a move occurred.
    pub fn step_bigger(&mut self) -> bool {
        if self.current_index + 1 >= self.candidates.len() {
            return false;
        }
        self.current_index += 1;
        self.apply_candidate();
        true
    }

    /// Step to the next smaller candidate. Reports whether a move occurred.
    pub fn step_smaller(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        self.apply_candidate();
        true
    }

    fn apply_candidate(&mut self) {
        self.current_px = self.current_grid().to_px(self.cell_px);
    }

    /// Direct pixel resize, clamped to the provider's minimum-resize floor.
    /// The grid index is left where it was; free-form resizes coexist with
    /// the ladder the same way drag-resize coexists with step buttons.
    pub fn resize_px(&mut self, size: PxSize) {
        self.current_px = PxSize::new(
            size.width.max(self.min_resize_px.width),
            size.height.max(self.min_resize_px.height),
        );
    }

    /// One-line position summary, e.g. `Grid: 2x2 (112x112dp) [3/16]`.
    pub fn size_summary(&self) -> String {
        let grid = self.current_grid();
        let dp = grid.to_dp(self.cell_dp);
        format!(
            "Grid: {} ({}x{}dp) [{}/{}]",
            grid,
            dp.width as i32,
            dp.height as i32,
            self.current_index + 1,
            self.candidates.len()
        )
    }

    /// Multi-line dump of the constraint envelope, for the shell's info pane.
    pub fn constraints_summary(&self) -> String {
        let min_dp = self.min_grid.to_dp(self.cell_dp);
        let min_resize_dp = self.min_resize_grid.to_dp(self.cell_dp);
        let max_dp = self.max_grid.to_dp(self.cell_dp);
        format!(
            "Min: {} grid ({}x{}dp)\nMin Resize: {} grid ({}x{}dp)\nMax: {} grid ({}x{}dp)\n{}\nGrid Cell: {}dp\nAvailable sizes: {}",
            self.min_grid,
            min_dp.width as i32,
            min_dp.height as i32,
            self.min_resize_grid,
            min_resize_dp.width as i32,
            min_resize_dp.height as i32,
            self.max_grid,
            max_dp.width as i32,
            max_dp.height as i32,
            self.resizable_desc,
            self.cell_dp as i32,
            self.candidates.len()
        )
    }
}
