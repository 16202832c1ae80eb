//! The render host: binds stack entries to live platform views and keeps
//! exactly one of them visible.
//!
//! The `widget_id -> slot` table here is a cache, not a source of truth —
//! every slot can be rebuilt from its entry's provider descriptor. The
//! [`widgetdeck_core::WidgetStack`] owns ordering and selection; this type
//! owns everything view-shaped.

use std::collections::HashMap;

use widgetdeck_core::{
    Binding, Density, ProviderIdentity, PxSize, ScaleController, SizingConfig, SizingState,
    StackEntry, WidgetId, WidgetStack,
};
use widgetdeck_persist::RestoreOutcome;

use crate::error::HostError;
use crate::platform::{HostPlatform, HostView};

/// Lifecycle of one hosted view. `Unbound` is implicit (no slot exists);
/// a slot is destroyed only on explicit removal, which also releases the
/// platform widget id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPhase {
    /// View created, never attached or currently between attachments.
    Bound,
    /// Attached and laid out.
    Visible,
    /// Detached on navigation; the view object is retained.
    Hidden,
}

struct ViewSlot<V> {
    view: V,
    sizing: SizingState,
    scale: ScaleController,
    phase: ViewPhase,
}

impl<V: HostView> ViewSlot<V> {
    /// Push the slot's sizing and scale onto the live view. The scale pivot
    /// depends on the current box, so this runs after every resize.
    fn apply_geometry(&mut self, container: PxSize) {
        let content = self.sizing.current_px();
        self.view.set_layout_size(content);
        self.view.report_size_dp(self.sizing.current_dp());
        let factor = self.scale.effective_scale(content, container);
        self.view.set_scale(factor, ScaleController::pivot(content));
    }
}

/// User-facing notice for a partial restore, or `None` when everything came
/// back.
pub fn restore_notice(failed: usize) -> Option<String> {
    match failed {
        0 => None,
        1 => Some("1 widget could not be restored".to_string()),
        n => Some(format!("{n} widgets could not be restored")),
    }
}

/// Orchestrates the widget stack against the platform's hosting facility.
///
/// Single-threaded by design: all mutation happens on the UI context, and
/// the change sink fires after each mutation is fully applied, so listeners
/// always observe consistent post-mutation state.
pub struct StackHost<P: HostPlatform> {
    platform: P,
    stack: WidgetStack,
    slots: HashMap<WidgetId, ViewSlot<P::View>>,
    visible: Option<WidgetId>,
    container: PxSize,
    density: Density,
    sizing_config: SizingConfig,
    on_change: Option<Box<dyn FnMut()>>,
}

impl<P: HostPlatform> StackHost<P> {
    pub fn new(platform: P, density: Density) -> Self {
        Self::with_config(platform, density, SizingConfig::default())
    }

    pub fn with_config(platform: P, density: Density, sizing_config: SizingConfig) -> Self {
        Self {
            platform,
            stack: WidgetStack::new(),
            slots: HashMap::new(),
            visible: None,
            container: PxSize::default(),
            density,
            sizing_config,
            on_change: None,
        }
    }

    /// Single change sink, invoked after every stack mutation. The shell
    /// hangs persistence and UI refresh off this.
    pub fn set_on_change(&mut self, f: impl FnMut() + 'static) {
        self.on_change = Some(Box::new(f));
    }

    fn notify(&mut self) {
        if let Some(f) = self.on_change.as_mut() {
            f();
        }
    }

    pub fn stack(&self) -> &WidgetStack {
        &self.stack
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Add a widget for `identity`, allocate its platform id, and show it if
    /// it is the first entry.
    ///
    /// Every failure branch releases the freshly allocated id; an id that
    /// never makes it into the stack must not leak.
    pub fn add_widget(&mut self, identity: &ProviderIdentity) -> Result<WidgetId, HostError> {
        let id = self.platform.allocate_id();

        let Some(descriptor) = self.platform.resolve_identity(identity) else {
            self.platform.release_id(id);
            return Err(HostError::UnknownProvider(identity.clone()));
        };

        let view = match self.platform.create_view(id, &descriptor) {
            Ok(view) => view,
            Err(cause) => {
                log::warn!("widget {id} inflation failed: {cause}");
                self.platform.release_id(id);
                return Err(HostError::Inflate { id, cause });
            }
        };

        let label = descriptor.label.clone();
        let sizing = SizingState::for_descriptor(&descriptor, self.density, &self.sizing_config);
        self.slots.insert(
            id,
            ViewSlot {
                view,
                sizing,
                scale: ScaleController::new(),
                phase: ViewPhase::Bound,
            },
        );
        self.stack.add(StackEntry::bound(id, label, descriptor));

        if self.visible.is_none() {
            self.show_current();
        }
        self.notify();
        Ok(id)
    }

    /// Rebuild the host from a persisted [`RestoreOutcome`]. Returns how many
    /// entries could not be brought back (reconciliation drops plus views
    /// that failed to inflate); see [`restore_notice`].
    pub fn restore(&mut self, outcome: RestoreOutcome) -> usize {
        let mut failed = outcome.dropped;
        self.clear_slots();
        self.stack.clear();

        for entry in outcome.entries {
            match &entry.binding {
                Binding::Bound(descriptor) => {
                    match self.platform.create_view(entry.widget_id, descriptor) {
                        Ok(view) => {
                            let sizing = SizingState::for_descriptor(
                                descriptor,
                                self.density,
                                &self.sizing_config,
                            );
                            self.slots.insert(
                                entry.widget_id,
                                ViewSlot {
                                    view,
                                    sizing,
                                    scale: ScaleController::new(),
                                    phase: ViewPhase::Bound,
                                },
                            );
                            self.stack.add(entry);
                        }
                        Err(err) => {
                            log::warn!(
                                "restored widget {} failed to inflate, dropping: {err}",
                                entry.widget_id
                            );
                            self.platform.release_id(entry.widget_id);
                            failed += 1;
                        }
                    }
                }
                // Pending entries stay viewless until their bind completes.
                Binding::Pending(_) => self.stack.add(entry),
            }
        }

        if !self.stack.set_cursor(outcome.cursor) {
            self.stack.set_cursor(0);
        }
        self.stack.set_full_size_mode(outcome.full_size_mode);
        self.show_current();
        self.notify();

        if failed > 0 {
            log::warn!("{failed} widget(s) not restored");
        }
        failed
    }

    /// Complete a pending entry's bind/configure round-trip: resolve its
    /// component, allocate an id if it never had one, and inflate its view.
    /// An unresolvable component leaves the entry pending; an inflation
    /// failure removes it (the content is actively broken, not just absent).
    pub fn bind_pending(&mut self, index: usize) -> Result<WidgetId, HostError> {
        let Some(entry) = self.stack.entry(index) else {
            return Err(HostError::OutOfRange(index));
        };
        let Some(identity) = entry.pending_identity().cloned() else {
            return Ok(entry.widget_id);
        };
        let had_id = entry.widget_id.is_bound();
        let existing = entry.widget_id;

        let Some(descriptor) = self.platform.resolve_identity(&identity) else {
            return Err(HostError::UnknownProvider(identity));
        };

        let id = if had_id { existing } else { self.platform.allocate_id() };
        let view = match self.platform.create_view(id, &descriptor) {
            Ok(view) => view,
            Err(cause) => {
                log::warn!("pending widget {id} inflation failed: {cause}");
                self.platform.release_id(id);
                self.stack.remove(index);
                self.show_current();
                self.notify();
                return Err(HostError::Inflate { id, cause });
            }
        };

        let sizing = SizingState::for_descriptor(&descriptor, self.density, &self.sizing_config);
        self.slots.insert(
            id,
            ViewSlot {
                view,
                sizing,
                scale: ScaleController::new(),
                phase: ViewPhase::Bound,
            },
        );
        if let Some(entry) = self.stack.entry_mut(index) {
            entry.widget_id = id;
            entry.label = descriptor.label.clone();
            entry.binding = Binding::Bound(descriptor);
        }

        if self.stack.cursor() == index {
            self.show_current();
        }
        self.notify();
        Ok(id)
    }

    /// Remove the entry at `index`, destroy its view, and release its
    /// platform id. Out-of-range indices are reported, not panicked on.
    pub fn remove_widget(&mut self, index: usize) -> bool {
        let Some(removed) = self.stack.remove(index) else {
            return false;
        };
        if let Some(mut slot) = self.slots.remove(&removed.widget_id) {
            if self.visible == Some(removed.widget_id) {
                slot.view.set_visible(false);
                self.visible = None;
            }
        }
        if removed.widget_id.is_bound() {
            self.platform.release_id(removed.widget_id);
        }
        self.show_current();
        self.notify();
        true
    }

    pub fn move_widget(&mut self, from: usize, to: usize) -> bool {
        if !self.stack.move_entry(from, to) {
            return false;
        }
        self.notify();
        true
    }

    pub fn navigate_next(&mut self) -> bool {
        if !self.stack.navigate_next() {
            return false;
        }
        self.show_current();
        self.notify();
        true
    }

    pub fn navigate_previous(&mut self) -> bool {
        if !self.stack.navigate_previous() {
            return false;
        }
        self.show_current();
        self.notify();
        true
    }

    pub fn select(&mut self, index: usize) -> bool {
        if !self.stack.set_cursor(index) {
            return false;
        }
        self.show_current();
        self.notify();
        true
    }

    /// Detach the previously visible view and attach the current entry's.
    /// Pending entries have no view; navigating onto one leaves the canvas
    /// empty rather than failing.
    fn show_current(&mut self) {
        let target = self.stack.current().map(|e| e.widget_id);

        if let Some(prev) = self.visible
            && Some(prev) != target
            && let Some(slot) = self.slots.get_mut(&prev)
        {
            slot.view.set_visible(false);
            slot.phase = ViewPhase::Hidden;
            self.visible = None;
        }

        let Some(id) = target else {
            self.visible = None;
            return;
        };
        let full_size = self.stack.is_full_size_mode();
        let Some(slot) = self.slots.get_mut(&id) else {
            self.visible = None;
            return;
        };
        slot.scale.set_full_size(full_size);
        slot.view.set_visible(true);
        slot.phase = ViewPhase::Visible;
        slot.apply_geometry(self.container);
        slot.view.request_refresh();
        self.visible = Some(id);
    }

    fn visible_slot(&mut self) -> Option<&mut ViewSlot<P::View>> {
        let id = self.visible?;
        self.slots.get_mut(&id)
    }

    /// Step the current widget to its next larger grid size.
    pub fn step_bigger(&mut self) -> bool {
        let container = self.container;
        let Some(slot) = self.visible_slot() else {
            return false;
        };
        if !slot.sizing.step_bigger() {
            return false;
        }
        slot.apply_geometry(container);
        slot.view.request_refresh();
        true
    }

    /// Step the current widget to its next smaller grid size.
    pub fn step_smaller(&mut self) -> bool {
        let container = self.container;
        let Some(slot) = self.visible_slot() else {
            return false;
        };
        if !slot.sizing.step_smaller() {
            return false;
        }
        slot.apply_geometry(container);
        slot.view.request_refresh();
        true
    }

    /// Free-form pixel resize of the current widget, clamped to its
    /// minimum-resize floor.
    pub fn resize_current(&mut self, size: PxSize) -> bool {
        let container = self.container;
        let Some(slot) = self.visible_slot() else {
            return false;
        };
        slot.sizing.resize_px(size);
        slot.apply_geometry(container);
        slot.view.request_refresh();
        true
    }

    pub fn scale_up(&mut self) -> bool {
        let container = self.container;
        let Some(slot) = self.visible_slot() else {
            return false;
        };
        if !slot.scale.step_up() {
            return false;
        }
        slot.apply_geometry(container);
        true
    }

    pub fn scale_down(&mut self) -> bool {
        let container = self.container;
        let Some(slot) = self.visible_slot() else {
            return false;
        };
        if !slot.scale.step_down() {
            return false;
        }
        slot.apply_geometry(container);
        true
    }

    /// Flip fit-to-container mode. The manual ladder index is remembered
    /// across the round trip.
    pub fn toggle_full_size(&mut self) -> bool {
        let enabled = self.stack.toggle_full_size_mode();
        let container = self.container;
        if let Some(slot) = self.visible_slot() {
            slot.scale.set_full_size(enabled);
            slot.apply_geometry(container);
        }
        self.notify();
        enabled
    }

    /// The shell reports its canvas size here; full-size scaling depends on
    /// it, so an active full-size view is re-fit immediately.
    pub fn set_container_size(&mut self, size: PxSize) {
        self.container = size;
        if self.stack.is_full_size_mode() {
            let container = self.container;
            if let Some(slot) = self.visible_slot() {
                slot.apply_geometry(container);
            }
        }
    }

    /// Stack position, scale mode, and grid position of the current widget,
    /// for the shell's status line.
    pub fn size_summary(&self) -> String {
        let header = format!("Stack: {}/{}", self.stack.cursor() + 1, self.stack.len());
        let Some(id) = self.visible else {
            return header;
        };
        let Some(slot) = self.slots.get(&id) else {
            return header;
        };
        format!("{header}\n{}\n{}", slot.scale.summary(), slot.sizing.size_summary())
    }

    /// Constraint envelope of the current widget, or empty when nothing is
    /// visible.
    pub fn constraints_summary(&self) -> String {
        self.visible
            .and_then(|id| self.slots.get(&id))
            .map(|slot| slot.sizing.constraints_summary())
            .unwrap_or_default()
    }

    fn clear_slots(&mut self) {
        for (_, slot) in self.slots.iter_mut() {
            slot.view.set_visible(false);
        }
        self.slots.clear();
        self.visible = None;
    }

    /// Drop everything: views detached and destroyed, bound ids released,
    /// stack emptied.
    pub fn clear(&mut self) {
        let ids: Vec<WidgetId> = self
            .stack
            .entries()
            .iter()
            .map(|e| e.widget_id)
            .filter(|id| id.is_bound())
            .collect();
        self.clear_slots();
        for id in ids {
            self.platform.release_id(id);
        }
        self.stack.clear();
        self.notify();
    }

    #[cfg(test)]
    fn phase(&self, id: WidgetId) -> Option<ViewPhase> {
        self.slots.get(&id).map(|s| s.phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap as Map;
    use std::rc::Rc;

    use widgetdeck_core::{DpSize, ProviderDescriptor, ProviderRegistry, ResizeMode};
    use widgetdeck_persist::{load, save, MemoryStore};

    #[derive(Debug, Default)]
    struct ViewLog {
        layout: Option<PxSize>,
        reported_dp: Option<DpSize>,
        scale: Option<(f32, (f32, f32))>,
        visible: bool,
        refreshes: usize,
    }

    struct FakeView {
        log: Rc<RefCell<ViewLog>>,
    }

    impl HostView for FakeView {
        fn set_layout_size(&mut self, size: PxSize) {
            self.log.borrow_mut().layout = Some(size);
        }
        fn set_scale(&mut self, factor: f32, pivot: (f32, f32)) {
            self.log.borrow_mut().scale = Some((factor, pivot));
        }
        fn report_size_dp(&mut self, size: DpSize) {
            self.log.borrow_mut().reported_dp = Some(size);
        }
        fn set_visible(&mut self, visible: bool) {
            self.log.borrow_mut().visible = visible;
        }
        fn request_refresh(&mut self) {
            self.log.borrow_mut().refreshes += 1;
        }
    }

    #[derive(Default)]
    struct FakePlatform {
        providers: Vec<ProviderDescriptor>,
        broken: Vec<ProviderIdentity>,
        next_id: i64,
        live: Vec<WidgetId>,
        released: Vec<WidgetId>,
        bound: Map<WidgetId, ProviderIdentity>,
        view_logs: Map<WidgetId, Rc<RefCell<ViewLog>>>,
    }

    impl FakePlatform {
        fn with_providers(providers: Vec<ProviderDescriptor>) -> Self {
            Self {
                providers,
                next_id: 1,
                ..Default::default()
            }
        }

        fn mark_broken(&mut self, identity: ProviderIdentity) {
            self.broken.push(identity);
        }

        fn view_log(&self, id: WidgetId) -> Rc<RefCell<ViewLog>> {
            self.view_logs.get(&id).unwrap().clone()
        }
    }

    impl ProviderRegistry for FakePlatform {
        fn resolve_id(&self, id: WidgetId) -> Option<ProviderDescriptor> {
            let identity = self.bound.get(&id)?;
            self.resolve_identity(identity)
        }
        fn resolve_identity(&self, identity: &ProviderIdentity) -> Option<ProviderDescriptor> {
            self.providers.iter().find(|d| &d.identity == identity).cloned()
        }
    }

    impl HostPlatform for FakePlatform {
        type View = FakeView;

        fn allocate_id(&mut self) -> WidgetId {
            let id = WidgetId(self.next_id);
            self.next_id += 1;
            self.live.push(id);
            id
        }

        fn release_id(&mut self, id: WidgetId) {
            self.live.retain(|x| *x != id);
            self.released.push(id);
            self.bound.remove(&id);
        }

        fn create_view(
            &mut self,
            id: WidgetId,
            descriptor: &ProviderDescriptor,
        ) -> anyhow::Result<Self::View> {
            if self.broken.contains(&descriptor.identity) {
                anyhow::bail!("incompatible view class in {}", descriptor.identity);
            }
            self.bound.insert(id, descriptor.identity.clone());
            let log = Rc::new(RefCell::new(ViewLog::default()));
            self.view_logs.insert(id, log.clone());
            Ok(FakeView { log })
        }
    }

    fn descriptor(n: u32, resize_mode: ResizeMode) -> ProviderDescriptor {
        ProviderDescriptor {
            identity: ProviderIdentity::new(format!("com.example.app{n}"), format!("Widget{n}")),
            label: format!("Widget {n}"),
            min_size: PxSize::new(140.0, 140.0),
            min_resize_size: PxSize::new(70.0, 70.0),
            max_resize_size: None,
            resize_mode,
        }
    }

    fn resizable(n: u32) -> ProviderDescriptor {
        descriptor(n, ResizeMode::HORIZONTAL | ResizeMode::VERTICAL)
    }

    fn host_with(providers: Vec<ProviderDescriptor>) -> StackHost<FakePlatform> {
        let mut host = StackHost::new(FakePlatform::with_providers(providers), Density(1.25));
        host.set_container_size(PxSize::new(1000.0, 600.0));
        host
    }

    #[test]
    fn add_shows_first_widget_and_applies_geometry() {
        let mut host = host_with(vec![resizable(1)]);
        let id = host.add_widget(&resizable(1).identity).unwrap();

        assert_eq!(host.stack().len(), 1);
        assert_eq!(host.phase(id), Some(ViewPhase::Visible));

        let log = host.platform().view_log(id);
        let log = log.borrow();
        assert!(log.visible);
        assert_eq!(log.layout, Some(PxSize::new(140.0, 140.0)));
        assert_eq!(log.reported_dp, Some(DpSize::new(112.0, 112.0)));
        let (factor, pivot) = log.scale.unwrap();
        assert_eq!(factor, 1.0);
        assert_eq!(pivot, (70.0, 70.0));
        assert!(log.refreshes >= 1);
    }

    #[test]
    fn unknown_provider_releases_allocated_id() {
        let mut host = host_with(vec![]);
        let missing = ProviderIdentity::new("com.gone", "Nope");
        let err = host.add_widget(&missing).unwrap_err();
        assert!(matches!(err, HostError::UnknownProvider(_)));
        assert!(host.platform().live.is_empty());
        assert_eq!(host.platform().released.len(), 1);
        assert!(host.stack().is_empty());
    }

    #[test]
    fn inflation_failure_releases_id_and_keeps_stack_unchanged() {
        let desc = resizable(1);
        let mut platform = FakePlatform::with_providers(vec![desc.clone()]);
        platform.mark_broken(desc.identity.clone());
        let mut host = StackHost::new(platform, Density(1.25));

        let err = host.add_widget(&desc.identity).unwrap_err();
        assert!(matches!(err, HostError::Inflate { .. }));
        assert!(!err.user_message().is_empty());
        assert!(host.stack().is_empty());
        assert!(host.platform().live.is_empty());
        assert_eq!(host.platform().released.len(), 1);
    }

    #[test]
    fn navigation_flips_view_phases() {
        let mut host = host_with(vec![resizable(1), resizable(2)]);
        let a = host.add_widget(&resizable(1).identity).unwrap();
        let b = host.add_widget(&resizable(2).identity).unwrap();

        assert_eq!(host.phase(a), Some(ViewPhase::Visible));
        assert_eq!(host.phase(b), Some(ViewPhase::Bound));

        assert!(host.navigate_next());
        assert_eq!(host.phase(a), Some(ViewPhase::Hidden));
        assert_eq!(host.phase(b), Some(ViewPhase::Visible));
        assert!(!host.platform().view_log(a).borrow().visible);
        assert!(host.platform().view_log(b).borrow().visible);

        assert!(host.navigate_previous());
        assert_eq!(host.phase(a), Some(ViewPhase::Visible));
        assert_eq!(host.phase(b), Some(ViewPhase::Hidden));
    }

    #[test]
    fn remove_releases_id_and_shows_next() {
        let mut host = host_with(vec![resizable(1), resizable(2)]);
        let a = host.add_widget(&resizable(1).identity).unwrap();
        let b = host.add_widget(&resizable(2).identity).unwrap();

        assert!(host.remove_widget(0));
        assert!(host.platform().released.contains(&a));
        assert_eq!(host.stack().len(), 1);
        assert_eq!(host.phase(b), Some(ViewPhase::Visible));

        assert!(!host.remove_widget(5));
    }

    #[test]
    fn change_sink_fires_after_each_mutation() {
        let count = Rc::new(RefCell::new(0usize));
        let mut host = host_with(vec![resizable(1), resizable(2)]);
        let sink = count.clone();
        host.set_on_change(move || *sink.borrow_mut() += 1);

        host.add_widget(&resizable(1).identity).unwrap();
        host.add_widget(&resizable(2).identity).unwrap();
        host.navigate_next();
        host.move_widget(0, 1);
        host.remove_widget(0);
        host.toggle_full_size();
        host.clear();
        assert_eq!(*count.borrow(), 7);
    }

    #[test]
    fn sizing_steps_drive_view_geometry() {
        let mut host = host_with(vec![resizable(1)]);
        let id = host.add_widget(&resizable(1).identity).unwrap();

        assert!(host.step_bigger());
        {
            let log = host.platform().view_log(id);
            let log = log.borrow();
            // (2,2) -> (2,3) at 70px cells.
            assert_eq!(log.layout, Some(PxSize::new(140.0, 210.0)));
            assert_eq!(log.reported_dp, Some(DpSize::new(112.0, 168.0)));
            // Pivot tracked the new box.
            assert_eq!(log.scale.unwrap().1, (70.0, 105.0));
        }

        assert!(host.step_smaller());
        assert!(!host.step_smaller()); // back at the ladder floor
    }

    #[test]
    fn resize_current_clamps_to_min_resize() {
        let mut host = host_with(vec![resizable(1)]);
        let id = host.add_widget(&resizable(1).identity).unwrap();
        assert!(host.resize_current(PxSize::new(10.0, 500.0)));
        let log = host.platform().view_log(id);
        assert_eq!(log.borrow().layout, Some(PxSize::new(70.0, 500.0)));
    }

    #[test]
    fn full_size_mode_fits_container_and_blocks_manual_scale() {
        let mut host = host_with(vec![resizable(1)]);
        let id = host.add_widget(&resizable(1).identity).unwrap();
        host.set_container_size(PxSize::new(700.0, 350.0));

        assert!(host.toggle_full_size());
        {
            let log = host.platform().view_log(id);
            // content 140x140 in 700x350: min(5.0, 2.5) * 0.8 = 2.0
            assert_eq!(log.borrow().scale.unwrap().0, 2.0);
        }
        assert!(!host.scale_up());
        assert!(!host.scale_down());

        // Container growth re-fits while the mode is active.
        host.set_container_size(PxSize::new(1400.0, 700.0));
        {
            let log = host.platform().view_log(id);
            assert_eq!(log.borrow().scale.unwrap().0, 4.0);
        }

        assert!(!host.toggle_full_size());
        assert!(host.scale_up());
        let log = host.platform().view_log(id);
        assert_eq!(log.borrow().scale.unwrap().0, 1.25);
    }

    #[test]
    fn restore_round_trip_through_persistence() {
        let mut host = host_with(vec![resizable(1), resizable(2)]);
        host.add_widget(&resizable(1).identity).unwrap();
        host.add_widget(&resizable(2).identity).unwrap();
        host.navigate_next();

        let mut store = MemoryStore::default();
        save(host.stack(), &mut store).unwrap();

        // Process death: a fresh host against the same platform registry.
        let mut revived = host_with(vec![resizable(1), resizable(2)]);
        // Carry over the platform's id bindings so persisted ids resolve.
        revived.platform = std::mem::take(&mut host.platform);

        let outcome = load(&store, revived.platform()).unwrap();
        let failed = revived.restore(outcome);
        assert_eq!(failed, 0);
        assert!(restore_notice(failed).is_none());
        assert_eq!(revived.stack().len(), 2);
        assert_eq!(revived.stack().cursor(), 1);
        assert_eq!(revived.phase(WidgetId(2)), Some(ViewPhase::Visible));
    }

    #[test]
    fn restore_counts_inflation_failures() {
        let mut host = host_with(vec![resizable(1), resizable(2)]);
        host.add_widget(&resizable(1).identity).unwrap();
        host.add_widget(&resizable(2).identity).unwrap();

        let mut store = MemoryStore::default();
        save(host.stack(), &mut store).unwrap();

        let mut revived = host_with(vec![resizable(1), resizable(2)]);
        revived.platform = std::mem::take(&mut host.platform);
        revived.platform.mark_broken(resizable(2).identity);

        let outcome = load(&store, revived.platform()).unwrap();
        let failed = revived.restore(outcome);
        assert_eq!(failed, 1);
        assert_eq!(restore_notice(failed).as_deref(), Some("1 widget could not be restored"));
        assert_eq!(revived.stack().len(), 1);
        assert!(revived.platform().released.contains(&WidgetId(2)));
    }

    #[test]
    fn bind_pending_resolves_and_shows() {
        let mut host = host_with(vec![resizable(3)]);
        let mut stack = WidgetStack::new();
        stack.add(StackEntry::pending(
            WidgetId::UNBOUND,
            "Widget 3",
            resizable(3).identity,
        ));
        let outcome = RestoreOutcome {
            entries: stack.entries().to_vec(),
            cursor: 0,
            full_size_mode: false,
            dropped: 0,
        };
        host.restore(outcome);
        assert!(host.stack().current().unwrap().pending_identity().is_some());

        let id = host.bind_pending(0).unwrap();
        assert!(id.is_bound());
        let entry = host.stack().current().unwrap();
        assert!(entry.descriptor().is_some());
        assert_eq!(entry.widget_id, id);
        assert_eq!(host.phase(id), Some(ViewPhase::Visible));
    }

    #[test]
    fn clear_releases_every_bound_id() {
        let mut host = host_with(vec![resizable(1), resizable(2)]);
        let a = host.add_widget(&resizable(1).identity).unwrap();
        let b = host.add_widget(&resizable(2).identity).unwrap();

        host.clear();
        assert!(host.stack().is_empty());
        assert!(host.platform().live.is_empty());
        assert!(host.platform().released.contains(&a));
        assert!(host.platform().released.contains(&b));
    }

    #[test]
    fn summaries_describe_current_widget() {
        let mut host = host_with(vec![resizable(1)]);
        host.add_widget(&resizable(1).identity).unwrap();
        let summary = host.size_summary();
        assert!(summary.starts_with("Stack: 1/1"));
        assert!(summary.contains("Scale: 1x [3/8]"));
        assert!(summary.contains("Grid: 2x2"));
        assert!(host.constraints_summary().contains("Grid Cell: 56dp"));
    }
}
