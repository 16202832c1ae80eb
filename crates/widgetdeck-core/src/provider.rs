//! Widget provider descriptions, as reported by the platform's widget
//! registry. A provider is the app component that serves a widget's content;
//! the host only ever sees its declared constraints, never its code.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::units::PxSize;
use crate::stack::WidgetId;

/// Package + class pair naming a widget provider component.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderIdentity {
    pub package: String,
    pub class: String,
}

impl ProviderIdentity {
    pub fn new(package: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            class: class.into(),
        }
    }
}

impl std::fmt::Display for ProviderIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.package, self.class)
    }
}

bitflags! {
    /// Axes along which a provider allows resizing.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct ResizeMode: u8 {
        const HORIZONTAL = 0b01;
        const VERTICAL = 0b10;
    }
}

impl ResizeMode {
    pub fn is_resizable(&self) -> bool {
        !self.is_empty()
    }

    /// Human-readable description for the constraints summary.
    pub fn describe(&self) -> String {
        if self.is_empty() {
            return "Not resizable".into();
        }
        let mut axes = Vec::new();
        if self.contains(ResizeMode::HORIZONTAL) {
            axes.push("horizontal");
        }
        if self.contains(ResizeMode::VERTICAL) {
            axes.push("vertical");
        }
        format!("Resizable: {}", axes.join(", "))
    }
}

/// Everything the platform registry declares about one provider.
///
/// Pixel constraints are as reported for the primary display. On platforms
/// that predate a declared maximum, `max_resize_size` is `None` and sizing
/// falls back to the policy default grid.
#[derive(Clone, Debug, PartialEq)]
pub struct ProviderDescriptor {
    pub identity: ProviderIdentity,
    pub label: String,
    pub min_size: PxSize,
    pub min_resize_size: PxSize,
    pub max_resize_size: Option<PxSize>,
    pub resize_mode: ResizeMode,
}

/// Lookup into the live platform widget registry.
///
/// Persistence reconciliation and the add-widget flow both go through this;
/// platform widget ids are not stable across provider reinstalls, so a
/// persisted id must be re-resolved before it is treated as live.
pub trait ProviderRegistry {
    fn resolve_id(&self, id: WidgetId) -> Option<ProviderDescriptor>;
    fn resolve_identity(&self, identity: &ProviderIdentity) -> Option<ProviderDescriptor>;
}
