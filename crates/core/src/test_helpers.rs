//! Recording doubles shared by the navigation tests.

use crate::control::{
    ClickType, Control, ControlContext, ControlDescriptor, ControlEvent, ControlKind, HostContext,
    KeyEvent, Lifecycle, ListItem, ObjectClickEvent, SwipeDirection, TouchEvent,
};
use crate::navigation::{
    ConstructionError, ControlFactory, ControlRegistry, Diagnostics, Host, NavigationManager,
    Navigator,
};
use anyhow::anyhow;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub const TEST_HOST: HostContext = HostContext {
    display_width: 220,
    display_height: 176,
};

pub const TEST_HOST_PACKAGE: &str = "com.example.host";

pub fn descriptor(kind: &str) -> ControlDescriptor {
    ControlDescriptor::new(kind)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Received {
    Activated,
    Deactivated,
    Event(ControlEvent),
    Lifecycle(Lifecycle),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub instance: usize,
    pub kind: ControlKind,
    pub received: Received,
}

/// Shared log of everything the recording controls received.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Rc<RefCell<Vec<Entry>>>,
    instances: Rc<Cell<usize>>,
    broken: Rc<RefCell<Vec<ControlKind>>>,
}

impl Journal {
    pub fn entries(&self) -> Vec<Entry> {
        self.entries.borrow().clone()
    }

    /// Everything received by the `instance`-th control constructed.
    pub fn received_by(&self, instance: usize) -> Vec<Received> {
        self.entries
            .borrow()
            .iter()
            .filter(|entry| entry.instance == instance)
            .map(|entry| entry.received.clone())
            .collect()
    }

    /// Number of controls constructed so far.
    pub fn instances(&self) -> usize {
        self.instances.get()
    }

    /// Makes further constructions of `kind` fail.
    pub fn break_kind(&self, kind: &str) {
        self.broken.borrow_mut().push(kind.into());
    }

    fn next_instance(&self) -> usize {
        let instance = self.instances.get();
        self.instances.set(instance + 1);
        instance
    }

    fn is_broken(&self, kind: &ControlKind) -> bool {
        self.broken.borrow().contains(kind)
    }
}

/// A control that logs every call into a [`Journal`].
///
/// Its descriptor parameters script a few reactions:
/// - `menu-navigates-to` (string): any menu item navigates to that kind
/// - `menu-goes-back` (bool): any menu item requests back navigation
/// - `activate-navigates-to` (string): activation navigates to that kind
/// - `activate-repeats` (bool): activation navigates to its own descriptor
pub struct RecordingControl {
    descriptor: ControlDescriptor,
    host: HostContext,
    host_package: String,
    navigator: Navigator,
    journal: Journal,
    instance: usize,
}

impl RecordingControl {
    pub fn new(context: ControlContext, journal: Journal) -> Self {
        RecordingControl {
            instance: journal.next_instance(),
            descriptor: context.descriptor,
            host: context.host,
            host_package: context.host_package,
            navigator: context.navigator,
            journal,
        }
    }

    pub fn instance(&self) -> usize {
        self.instance
    }

    pub fn host(&self) -> HostContext {
        self.host
    }

    pub fn host_package(&self) -> &str {
        &self.host_package
    }

    fn record(&self, received: Received) {
        self.journal.entries.borrow_mut().push(Entry {
            instance: self.instance,
            kind: self.descriptor.kind().clone(),
            received,
        });
    }
}

impl Control for RecordingControl {
    fn descriptor(&self) -> &ControlDescriptor {
        &self.descriptor
    }

    fn on_activate(&mut self) {
        self.record(Received::Activated);

        if let Some(target) = self.descriptor.param_str("activate-navigates-to") {
            self.navigator.navigate_to(ControlDescriptor::new(target));
        }
        if self.descriptor.param_bool("activate-repeats") == Some(true) {
            self.navigator.navigate_to(self.descriptor.clone());
        }
    }

    fn on_deactivate(&mut self) {
        self.record(Received::Deactivated);
    }

    fn on_request_list_item(&mut self, layout_reference: i32, list_item_position: i32) {
        self.record(Received::Event(ControlEvent::RequestListItem {
            layout_reference,
            list_item_position,
        }));
    }

    fn on_list_item_click(
        &mut self,
        item: &ListItem,
        click_type: ClickType,
        item_layout_reference: i32,
    ) {
        self.record(Received::Event(ControlEvent::ListItemClick {
            item: *item,
            click_type,
            item_layout_reference,
        }));
    }

    fn on_list_item_selected(&mut self, item: &ListItem) {
        self.record(Received::Event(ControlEvent::ListItemSelected(*item)));
    }

    fn on_list_refresh_request(&mut self, layout_reference: i32) {
        self.record(Received::Event(ControlEvent::ListRefreshRequest {
            layout_reference,
        }));
    }

    fn on_object_click(&mut self, event: &ObjectClickEvent) {
        self.record(Received::Event(ControlEvent::ObjectClick(*event)));
    }

    fn on_menu_item_selected(&mut self, menu_item: i32) {
        self.record(Received::Event(ControlEvent::MenuItemSelected(menu_item)));

        if let Some(target) = self.descriptor.param_str("menu-navigates-to") {
            self.navigator.navigate_to(ControlDescriptor::new(target));
        }
        if self.descriptor.param_bool("menu-goes-back") == Some(true) {
            self.navigator.back();
        }
    }

    fn on_key(&mut self, key: &KeyEvent) {
        self.record(Received::Event(ControlEvent::Key(*key)));
    }

    fn on_touch(&mut self, touch: &TouchEvent) {
        self.record(Received::Event(ControlEvent::Touch(*touch)));
    }

    fn on_swipe(&mut self, direction: SwipeDirection) {
        self.record(Received::Event(ControlEvent::Swipe(direction)));
    }

    fn on_lifecycle(&mut self, event: Lifecycle) {
        self.record(Received::Lifecycle(event));
    }
}

/// Registers `kinds` as recording controls, plus the kinds that never
/// build: `rejecting`, `panicking`, `impostor`, and the `meddling` kinds,
/// which ask to show `a` before failing.
pub fn recording_registry(journal: &Journal, kinds: &[&str]) -> ControlRegistry {
    let mut registry = ControlRegistry::new();

    for kind in kinds {
        let journal = journal.clone();
        registry.register(*kind, move |context: ControlContext| {
            if journal.is_broken(context.descriptor.kind()) {
                return Err(anyhow!("{} is broken", context.descriptor.kind()));
            }
            Ok(RecordingControl::new(context, journal.clone()))
        });
    }

    add_failing_kinds(&mut registry);
    registry
}

/// A registry in which every kind fails to build.
pub fn failing_registry() -> ControlRegistry {
    let mut registry = ControlRegistry::new();
    for kind in ["a", "b", "c"] {
        registry.register(kind, |_context: ControlContext| -> anyhow::Result<RecordingControl> {
            Err(anyhow!("construction refused"))
        });
    }
    add_failing_kinds(&mut registry);
    registry
}

fn add_failing_kinds(registry: &mut ControlRegistry) {
    let journal = Journal::default();

    registry
        .register(
            "rejecting",
            |_context: ControlContext| -> anyhow::Result<RecordingControl> {
                Err(anyhow!("construction refused"))
            },
        )
        .register(
            "panicking",
            |_context: ControlContext| -> anyhow::Result<RecordingControl> {
                panic!("constructor blew up")
            },
        )
        .register("impostor", move |mut context: ControlContext| {
            context.descriptor = ControlDescriptor::new("menu");
            Ok(RecordingControl::new(context, journal.clone()))
        })
        .register(
            "meddling",
            |context: ControlContext| -> anyhow::Result<RecordingControl> {
                context.navigator.navigate_to(descriptor("a"));
                context.navigator.close_session();
                Err(anyhow!("construction refused after queueing requests"))
            },
        )
        .register(
            "meddling-panic",
            |context: ControlContext| -> anyhow::Result<RecordingControl> {
                context.navigator.navigate_to(descriptor("a"));
                panic!("constructor blew up after queueing a request")
            },
        );
}

#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    ConstructionFailed(ControlKind),
    HistoryPushed(ControlKind, usize),
    HistorySkipped(ControlKind),
    HistoryRolledBack(ControlKind),
    SessionClosed,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingDiagnostics {
    entries: Rc<RefCell<Vec<Diagnostic>>>,
}

impl RecordingDiagnostics {
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn construction_failed(&mut self, descriptor: &ControlDescriptor, _error: &ConstructionError) {
        self.entries
            .borrow_mut()
            .push(Diagnostic::ConstructionFailed(descriptor.kind().clone()));
    }

    fn history_pushed(&mut self, descriptor: &ControlDescriptor, depth: usize) {
        self.entries
            .borrow_mut()
            .push(Diagnostic::HistoryPushed(descriptor.kind().clone(), depth));
    }

    fn history_skipped(&mut self, descriptor: &ControlDescriptor) {
        self.entries
            .borrow_mut()
            .push(Diagnostic::HistorySkipped(descriptor.kind().clone()));
    }

    fn history_rolled_back(&mut self, descriptor: &ControlDescriptor) {
        self.entries
            .borrow_mut()
            .push(Diagnostic::HistoryRolledBack(descriptor.kind().clone()));
    }

    fn session_closed(&mut self) {
        self.entries.borrow_mut().push(Diagnostic::SessionClosed);
    }
}

/// Counts close requests.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    closes: Rc<Cell<usize>>,
}

impl Host for RecordingHost {
    fn close_session(&mut self) {
        self.closes.set(self.closes.get() + 1);
    }
}

pub struct Harness {
    pub manager: NavigationManager,
    pub journal: Journal,
    pub closes: Rc<Cell<usize>>,
    pub diagnostics: RecordingDiagnostics,
}

/// A manager whose registry knows the recording kinds `a`, `b`, `c`, `i`,
/// `d1` and `d2`.
pub fn harness() -> Harness {
    let journal = Journal::default();
    let registry = recording_registry(&journal, &["a", "b", "c", "i", "d1", "d2"]);
    build_harness(registry, journal)
}

pub fn harness_with_registry(registry: ControlRegistry) -> Harness {
    build_harness(registry, Journal::default())
}

fn build_harness(registry: ControlRegistry, journal: Journal) -> Harness {
    let host = RecordingHost::default();
    let closes = host.closes.clone();
    let diagnostics = RecordingDiagnostics::default();
    let factory = ControlFactory::new(Rc::new(registry), TEST_HOST, TEST_HOST_PACKAGE);
    let manager = NavigationManager::new(factory, Box::new(host))
        .with_diagnostics(Box::new(diagnostics.clone()));

    Harness {
        manager,
        journal,
        closes,
        diagnostics,
    }
}
