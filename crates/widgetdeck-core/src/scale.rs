//! Visual zoom, independent of layout size.
//!
//! The scale is a pure transform over the already-laid-out widget box: the
//! hosted content still renders for its grid size, the host just draws it
//! bigger or smaller. Useful on automotive / high-distance displays where a
//! 1x widget is unreadable.

use crate::units::PxSize;

/// Discrete zoom ladder. Index 2 (1.0) is the resting position.
pub const SCALE_LEVELS: [f32; 8] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0, 2.5, 3.0];

const INITIAL_SCALE_INDEX: usize = 2;

/// Fraction of the container left as breathing room in full-size mode.
pub const FULL_SIZE_MARGIN: f32 = 0.8;

/// Fit-to-container scale. Identity when either box is degenerate; a zero
/// dimension here means "not measured yet", never "scale to nothing".
pub fn compute_full_size_scale(content: PxSize, container: PxSize, margin: f32) -> f32 {
    if content.is_degenerate() || container.is_degenerate() {
        return 1.0;
    }
    let sx = container.width / content.width;
    let sy = container.height / content.height;
    sx.min(sy) * margin
}

/// Manual zoom ladder plus the fit-to-container mode flag.
///
/// Entering full-size mode does not disturb the remembered ladder index, so
/// leaving it restores the prior manual zoom.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleController {
    index: usize,
    full_size: bool,
    margin: f32,
}

impl Default for ScaleController {
    fn default() -> Self {
        Self {
            index: INITIAL_SCALE_INDEX,
            full_size: false,
            margin: FULL_SIZE_MARGIN,
        }
    }
}

impl ScaleController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Manual ladder value, regardless of mode.
    pub fn factor(&self) -> f32 {
        SCALE_LEVELS[self.index]
    }

    pub fn is_full_size(&self) -> bool {
        self.full_size
    }

    /// Step the ladder up. No-op at the top or while full-size is active.
    pub fn step_up(&mut self) -> bool {
        if self.full_size || self.index + 1 >= SCALE_LEVELS.len() {
            return false;
        }
        self.index += 1;
        true
    }

    /// Step the ladder down. No-op at the bottom or while full-size is active.
    pub fn step_down(&mut self) -> bool {
        if self.full_size || self.index == 0 {
            return false;
        }
        self.index -= 1;
        true
    }

    pub fn toggle_full_size(&mut self) -> bool {
        self.full_size = !self.full_size;
        self.full_size
    }

    pub fn set_full_size(&mut self, enabled: bool) {
        self.full_size = enabled;
    }

    /// The scale to actually apply for the given content/container boxes.
    pub fn effective_scale(&self, content: PxSize, container: PxSize) -> f32 {
        if self.full_size {
            compute_full_size_scale(content, container, self.margin)
        } else {
            self.factor()
        }
    }

    /// Transform pivot for a content box: its center, so the widget stays
    /// centered as it scales.
    pub fn pivot(content: PxSize) -> (f32, f32) {
        (content.width / 2.0, content.height / 2.0)
    }

    /// One-line position summary, e.g. `Scale: 1.25x [4/8]`.
    pub fn summary(&self) -> String {
        if self.full_size {
            "Full Size Mode".to_string()
        } else {
            format!(
                "Scale: {}x [{}/{}]",
                self.factor(),
                self.index + 1,
                SCALE_LEVELS.len()
            )
        }
    }
}
