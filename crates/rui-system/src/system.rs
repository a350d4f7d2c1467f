//! The system object: owns the data graph, the layout root, input state,
//! the scheduler, and the three host-callback surfaces, and drives the
//! refresh → update → resolve_layout → render cycle described for the
//! host loop.

use std::cell::{Cell, RefCell};

use rui_data::{DataGraph, ScopedDataTraversal};
use rui_event::{
    default_tab_handling, focus_query_event, Acknowledged, Delivery, Event, FocusQueryKind,
    FocusTracker, KeyInput, MouseButton, Point,
};
use rui_id::CapturedId;
use rui_layout::{LayoutNodeHandle, LayoutVector};
use rui_signal::SmoothingContext;
use tracing::{debug, trace};

use crate::context::Context;
use crate::input::InputState;
use crate::interfaces::{
    CursorKind, ExternalInterface, NullExternalInterface, NullOsInterface, NullWindowInterface,
    OsInterface, WindowInterface,
};
use crate::scheduler::Scheduler;

pub type Controller = dyn FnMut(&mut Context);

pub struct System {
    graph: DataGraph,
    controller: RefCell<Box<Controller>>,
    layout_root: RefCell<Option<LayoutNodeHandle>>,
    refresh_count: Cell<u64>,
    input: RefCell<InputState>,
    scheduler: Scheduler,
    tick_count: Cell<u64>,
    surface_size: Cell<LayoutVector>,
    gc_enabled: Cell<bool>,
    external: Box<dyn ExternalInterface>,
    os: Box<dyn OsInterface>,
    window: Box<dyn WindowInterface>,
}

impl System {
    pub fn new(controller: impl FnMut(&mut Context) + 'static) -> Self {
        Self::with_config(controller, &rui_config::RuntimeConfig::default())
    }

    pub fn with_config(
        controller: impl FnMut(&mut Context) + 'static,
        config: &rui_config::RuntimeConfig,
    ) -> Self {
        Self {
            graph: DataGraph::new(),
            controller: RefCell::new(Box::new(controller)),
            layout_root: RefCell::new(None),
            refresh_count: Cell::new(0),
            input: RefCell::new(InputState::default()),
            scheduler: Scheduler::new(
                config.scheduler.ready_capacity_hint,
                config.scheduler.scheduled_capacity_hint,
            ),
            tick_count: Cell::new(0),
            surface_size: Cell::new(LayoutVector::ZERO),
            gc_enabled: Cell::new(config.gc.enabled),
            external: Box::new(NullExternalInterface),
            os: Box::new(NullOsInterface),
            window: Box::new(NullWindowInterface),
        }
    }

    pub fn set_external_interface(&mut self, external: Box<dyn ExternalInterface>) {
        self.external = external;
    }

    pub fn set_os_interface(&mut self, os: Box<dyn OsInterface>) {
        self.os = os;
    }

    pub fn set_window_interface(&mut self, window: Box<dyn WindowInterface>) {
        self.window = window;
    }

    pub fn set_surface_size(&self, size: LayoutVector) {
        self.surface_size.set(size);
    }

    pub fn set_layout_root(&self, root: LayoutNodeHandle) {
        *self.layout_root.borrow_mut() = Some(root);
    }

    pub fn refresh_count(&self) -> u64 {
        self.refresh_count.get()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count.get()
    }

    pub fn focused(&self) -> Option<CapturedId> {
        self.input.borrow().focused.clone()
    }

    pub fn hot(&self) -> Option<CapturedId> {
        self.input.borrow().hot.clone()
    }

    pub fn captured(&self) -> Option<CapturedId> {
        self.input.borrow().captured.clone()
    }

    pub fn window_has_focus(&self) -> bool {
        self.input.borrow().window_has_focus
    }

    pub fn set_window_has_focus(&self, focused: bool) {
        self.input.borrow_mut().window_has_focus = focused;
    }

    pub fn request_animation(&self) {
        self.external.schedule_animation_refresh();
    }

    pub fn set_cursor(&self, kind: CursorKind) {
        let mut input = self.input.borrow_mut();
        if input.cursor != kind {
            input.cursor = kind;
            self.window.set_mouse_cursor(kind);
        }
    }

    pub fn get_clipboard_text(&self) -> Option<String> {
        self.os.get_clipboard_text()
    }

    pub fn set_clipboard_text(&self, text: &str) -> anyhow::Result<()> {
        self.os.set_clipboard_text(text)
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    /// Advance the host's monotonic tick count and run every scheduled
    /// callback whose trigger has arrived.
    pub fn advance_tick(&self, tick_count: u64) {
        self.tick_count.set(tick_count);
        self.scheduler.run_due(tick_count);
    }

    fn run_pass(&self, event: Event, delivery: Delivery, gc_enabled: bool) -> (Acknowledged, Option<CapturedId>) {
        let mut scope = ScopedDataTraversal::with_gc(&self.graph, gc_enabled);
        let acknowledged = Cell::new(false);
        let hit_result = RefCell::new(None);
        let focus_tracker = match &event {
            Event::FocusQuery(kind) => Some(RefCell::new(FocusTracker::new(*kind, self.focused()))),
            _ => None,
        };
        {
            let mut ctx = Context::new(
                scope.traversal(),
                &event,
                delivery,
                self,
                &acknowledged,
                &hit_result,
                focus_tracker.as_ref(),
            );
            (self.controller.borrow_mut())(&mut ctx);
        }
        let focus_result = focus_tracker.and_then(|t| t.into_inner().result().cloned());
        (Acknowledged(acknowledged.get()), focus_result.or_else(|| hit_result.into_inner()))
    }

    /// Run a full traversal of the controller, allocating/locating data
    /// graph nodes and registering layout requirements. Idempotent to call
    /// repeatedly; the host retries on its own if a prior call panicked
    /// (scope guards on the traversal stack already preserved state).
    pub fn refresh(&self) {
        trace!(target: "rui_system::refresh", count = self.refresh_count.get(), "begin");
        self.run_pass(Event::Refresh, Delivery::Background, self.gc_enabled.get());
        self.refresh_count.set(self.refresh_count.get() + 1);
    }

    /// Hit-tests the current mouse position, updates the hot element, fires
    /// gain/loss notifications, and re-refreshes if anything changed.
    pub fn update(&self) {
        let point = self.input.borrow().mouse_position;
        let (_, new_hot) = self.run_pass(Event::MouseHitTest { point }, Delivery::Background, false);
        let old_hot = self.input.borrow().hot.clone();
        if new_hot != old_hot {
            if let Some(prev) = &old_hot {
                self.dispatch_to_id(prev, Event::MouseNotify { gained: false });
            }
            if let Some(next) = &new_hot {
                self.dispatch_to_id(next, Event::MouseNotify { gained: true });
            }
            self.input.borrow_mut().hot = new_hot;
            debug!(target: "rui_system::update", "hot element changed, re-refreshing");
            self.refresh();
        }
    }

    pub fn resolve_layout(&self) {
        let root = match self.layout_root.borrow().clone() {
            Some(root) => root,
            None => return,
        };
        let surface_size = self.surface_size.get();
        let vertical = root.vertical_requirements(surface_size.x());
        root.set_relative_assignment(rui_layout::RelativeLayoutAssignment {
            region: rui_layout::LayoutBox::new(LayoutVector::ZERO, surface_size),
            baseline_y: vertical.ascent,
        });
    }

    pub fn render(&self) {
        self.run_pass(Event::Render, Delivery::Background, false);
    }

    /// Delivers an event to every widget regardless of where it matches;
    /// the widget itself decides relevance by comparing `ctx.is_focused`
    /// or its own id, rather than the system resolving a routing path.
    fn dispatch_to_id(&self, _target: &CapturedId, event: Event) {
        self.run_pass(event, Delivery::Background, false);
    }

    /// Dispatches a key press either to the host's own tab-handling (which
    /// advances/regresses focus) or to the focused widget.
    pub fn dispatch_key_press(&self, key: KeyInput) -> Acknowledged {
        self.input.borrow_mut().keyboard_interaction = true;
        if let Some(kind) = default_tab_handling(&key) {
            self.run_focus_query(kind);
            return Acknowledged(true);
        }
        let (ack, _) = self.run_pass(Event::FocusedKeyPress(key), Delivery::Background, false);
        ack
    }

    pub fn dispatch_key_release(&self, key: KeyInput) -> Acknowledged {
        let (ack, _) = self.run_pass(Event::FocusedKeyRelease(key), Delivery::Background, false);
        ack
    }

    pub fn dispatch_background_key_press(&self, key: KeyInput) -> Acknowledged {
        let (ack, _) = self.run_pass(Event::BackgroundKeyPress(key), Delivery::Background, false);
        ack
    }

    pub fn dispatch_text_input(&self, text: String) -> Acknowledged {
        let (ack, _) = self.run_pass(Event::TextInput(text), Delivery::Background, false);
        ack
    }

    pub fn dispatch_mouse_motion(&self, point: Point) -> Acknowledged {
        self.input.borrow_mut().mouse_position = point;
        let (ack, _) = self.run_pass(Event::MouseMotion { point }, Delivery::Background, false);
        ack
    }

    pub fn dispatch_mouse_press(&self, button: MouseButton, point: Point) -> Acknowledged {
        self.input.borrow_mut().mouse_buttons.insert(button);
        let (ack, _) = self.run_pass(Event::MousePress { button, point }, Delivery::Background, false);
        ack
    }

    pub fn dispatch_mouse_release(&self, button: MouseButton, point: Point) -> Acknowledged {
        self.input.borrow_mut().mouse_buttons.remove(&button);
        let (ack, _) = self.run_pass(Event::MouseRelease { button, point }, Delivery::Background, false);
        ack
    }

    pub fn dispatch_mouse_wheel(&self, delta: Point) -> Acknowledged {
        let (ack, _) = self.run_pass(Event::MouseWheel { delta }, Delivery::Background, false);
        ack
    }

    fn run_focus_query(&self, kind: FocusQueryKind) {
        let event = focus_query_event(kind);
        let (_, next) = self.run_pass(event, Delivery::Background, false);
        self.input.borrow_mut().focused = next;
    }

    pub fn advance_focus(&self) {
        self.run_focus_query(FocusQueryKind::Successor);
    }

    pub fn regress_focus(&self) {
        self.run_focus_query(FocusQueryKind::Predecessor);
    }
}

impl SmoothingContext for System {
    fn tick_count(&self) -> u64 {
        self.tick_count.get()
    }

    fn request_tick(&self) {
        self.external.schedule_animation_refresh();
    }
}

/// Loads a [`rui_config::RuntimeConfig`] from a host-supplied path. This is
/// the one place in the core crates that touches the filesystem; `rui-config`
/// itself never resolves a path on its own.
pub fn load_config(path: impl AsRef<std::path::Path>) -> anyhow::Result<rui_config::RuntimeConfig> {
    use anyhow::Context as _;
    rui_config::RuntimeConfig::from_path(path.as_ref())
        .with_context(|| format!("loading runtime config from {}", path.as_ref().display()))
}

