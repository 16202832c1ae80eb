//! Collaborator contracts the host consumes from the platform shell.
//!
//! The real implementations wrap the OS widget service; tests and the
//! headless demo substitute in-memory fakes. View inflation "may throw":
//! hosted content can reference view classes the host's runtime cannot
//! inflate, and the host has to tolerate that without crashing.

use widgetdeck_core::{DpSize, ProviderDescriptor, ProviderRegistry, PxSize, WidgetId};

/// A live, on-screen hosted widget view.
///
/// Layout size and scale transform are deliberately separate channels: the
/// hosted content lays out for the pixel box, while the scale is a visual
/// transform on top of it.
pub trait HostView {
    /// Apply concrete layout dimensions.
    fn set_layout_size(&mut self, size: PxSize);

    /// Apply the visual scale transform around `pivot` (content center).
    fn set_scale(&mut self, factor: f32, pivot: (f32, f32));

    /// Report the box in device-independent units so server-rendered
    /// content re-lays-out for it.
    fn report_size_dp(&mut self, size: DpSize);

    /// Attach to / detach from the visible tree. Detached views are kept,
    /// not destroyed; navigation flips this cheaply.
    fn set_visible(&mut self, visible: bool);

    /// Ask the hosted content to redraw.
    fn request_refresh(&mut self);
}

/// The platform facility behind the host: provider registry, widget id
/// allocation, and view creation.
///
/// Id discipline is the host's correctness invariant: every id handed out by
/// `allocate_id` must end up bound in the stack, persisted as pending, or
/// given back through `release_id` on the failure/removal path.
pub trait HostPlatform: ProviderRegistry {
    type View: HostView;

    fn allocate_id(&mut self) -> WidgetId;

    fn release_id(&mut self, id: WidgetId);

    /// Create the live view for a widget. Fails when the provider's content
    /// cannot be inflated by the host runtime.
    fn create_view(
        &mut self,
        id: WidgetId,
        descriptor: &ProviderDescriptor,
    ) -> anyhow::Result<Self::View>;
}
