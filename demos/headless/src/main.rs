//! Headless walkthrough of the widget host against a simulated platform:
//! add a few widgets, navigate, resize, scale, persist, then reload after a
//! simulated process death with one provider uninstalled.
//!
//! Run with `RUST_LOG=debug cargo run -p headless` for the full trace.

use std::collections::HashMap;

use widgetdeck_core::{
    Density, DpSize, ProviderDescriptor, ProviderIdentity, ProviderRegistry, PxSize, ResizeMode,
    WidgetId,
};
use widgetdeck_host::{restore_notice, HostPlatform, HostView, StackHost};
use widgetdeck_persist::{load, save, MemoryStore, StackStore};

struct SimView {
    id: WidgetId,
}

impl HostView for SimView {
    fn set_layout_size(&mut self, size: PxSize) {
        log::debug!("view {}: layout {}x{}px", self.id, size.width, size.height);
    }
    fn set_scale(&mut self, factor: f32, pivot: (f32, f32)) {
        log::debug!("view {}: scale {factor}x around {pivot:?}", self.id);
    }
    fn report_size_dp(&mut self, size: DpSize) {
        log::debug!("view {}: content box {}x{}dp", self.id, size.width, size.height);
    }
    fn set_visible(&mut self, visible: bool) {
        log::debug!("view {}: visible={visible}", self.id);
    }
    fn request_refresh(&mut self) {
        log::debug!("view {}: refresh", self.id);
    }
}

/// In-memory stand-in for the OS widget service.
#[derive(Default)]
struct SimPlatform {
    providers: Vec<ProviderDescriptor>,
    bound: HashMap<WidgetId, ProviderIdentity>,
    next_id: i64,
}

impl SimPlatform {
    fn new(providers: Vec<ProviderDescriptor>) -> Self {
        Self {
            providers,
            bound: HashMap::new(),
            next_id: 1,
        }
    }

    fn uninstall(&mut self, package: &str) {
        self.providers.retain(|d| d.identity.package != package);
    }
}

impl ProviderRegistry for SimPlatform {
    fn resolve_id(&self, id: WidgetId) -> Option<ProviderDescriptor> {
        let identity = self.bound.get(&id)?;
        self.resolve_identity(identity)
    }
    fn resolve_identity(&self, identity: &ProviderIdentity) -> Option<ProviderDescriptor> {
        self.providers.iter().find(|d| &d.identity == identity).cloned()
    }
}

impl HostPlatform for SimPlatform {
    type View = SimView;

    fn allocate_id(&mut self) -> WidgetId {
        let id = WidgetId(self.next_id);
        self.next_id += 1;
        id
    }

    fn release_id(&mut self, id: WidgetId) {
        self.bound.remove(&id);
        log::debug!("platform: released {id}");
    }

    fn create_view(&mut self, id: WidgetId, descriptor: &ProviderDescriptor) -> anyhow::Result<SimView> {
        self.bound.insert(id, descriptor.identity.clone());
        Ok(SimView { id })
    }
}

fn provider(
    package: &str,
    class: &str,
    label: &str,
    min_dp: f32,
    resize_mode: ResizeMode,
    density: Density,
) -> ProviderDescriptor {
    let min = density.dp_to_px(min_dp);
    ProviderDescriptor {
        identity: ProviderIdentity::new(package, class),
        label: label.to_string(),
        min_size: PxSize::new(min, min),
        min_resize_size: PxSize::new(min / 2.0, min / 2.0),
        max_resize_size: None,
        resize_mode,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let density = Density(2.0);

    let clock = provider(
        "com.example.clock",
        "ClockWidget",
        "Analog Clock",
        110.0,
        ResizeMode::empty(),
        density,
    );
    let calendar = provider(
        "com.example.calendar",
        "MonthWidget",
        "Calendar",
        110.0,
        ResizeMode::HORIZONTAL | ResizeMode::VERTICAL,
        density,
    );
    let notes = provider(
        "com.example.notes",
        "NoteListWidget",
        "Notes",
        56.0,
        ResizeMode::VERTICAL,
        density,
    );

    let platform = SimPlatform::new(vec![clock.clone(), calendar.clone(), notes.clone()]);
    let mut host = StackHost::new(platform, density);
    host.set_container_size(PxSize::new(1920.0, 720.0));

    let mut store = MemoryStore::default();

    host.add_widget(&clock.identity)?;
    host.add_widget(&calendar.identity)?;
    host.add_widget(&notes.identity)?;
    println!("added 3 widgets\n{}\n", host.size_summary());

    host.navigate_next();
    host.step_bigger();
    host.step_bigger();
    host.scale_up();
    println!("calendar after two size steps and a zoom step\n{}\n", host.size_summary());
    println!("{}\n", host.constraints_summary());

    host.toggle_full_size();
    println!("full-size mode\n{}\n", host.size_summary());

    save(host.stack(), &mut store)?;
    println!("snapshot saved: {} bytes", store.read()?.map_or(0, |s| s.len()));

    // Process death. The notes app got uninstalled while we were gone.
    drop(host);
    let mut platform = SimPlatform::new(vec![clock.clone(), calendar.clone(), notes.clone()]);
    platform.uninstall("com.example.notes");
    platform.next_id = 100;
    // Ids 1 and 2 still resolve on the platform side.
    platform.bound.insert(WidgetId(1), clock.identity.clone());
    platform.bound.insert(WidgetId(2), calendar.identity.clone());

    let mut host = StackHost::new(platform, density);
    host.set_container_size(PxSize::new(1920.0, 720.0));

    let outcome = load(&store, host.platform())?;
    let failed = host.restore(outcome);
    if let Some(notice) = restore_notice(failed) {
        println!("{notice}");
    }
    println!("after restore\n{}", host.size_summary());

    Ok(())
}
