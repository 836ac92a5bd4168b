//! The navigation manager.
//!
//! # State machine
//!
//! ```txt
//!   Uninitialized --initialize--> Active(control or none)
//!   Active --navigate_to ok------> Active(new control)
//!   Active --navigate_to failed--> Active(unchanged)
//!   Active --go_back, popped-----> Active(rebuilt control, or none if the build failed)
//!   Active --go_back, empty------> Terminated (host asked to close, control kept)
//! ```
//!
//! `Terminated` only records that the close request went out. The host owns
//! teardown, and a later `navigate_to` makes the session active again.

use super::diagnostics::{Diagnostics, TracingDiagnostics};
use super::factory::ControlFactory;
use super::host::Host;
use super::{NavigationRequest, Navigator};
use crate::control::{
    self, Control, ControlDescriptor, ControlEvent, KeyAction, KeyCode, KeyEvent, Lifecycle,
};
use crate::settings::NavigationSettings;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver};

/// Upper bound on requests applied by a single drain. A control that keeps
/// navigating on activation would otherwise never let the call return.
const MAX_REQUESTS_PER_DRAIN: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Active,
    Terminated,
}

/// What happens to the history push of a `navigate_to` whose target could
/// not be built.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryOnFailure {
    /// The pushed descriptor stays on the stack, even though the control it
    /// describes is still current.
    #[default]
    Keep,
    /// The push is undone.
    Rollback,
}

/// Owns the current control and the history stack, and routes every event
/// to the current control.
///
/// All operations take `&mut self` and run to completion; requests queued
/// by controls through their [`Navigator`] are applied before the
/// operation returns. No operation ever fails: construction errors are
/// reported to the [`Diagnostics`] sink and handled as described on each
/// method.
pub struct NavigationManager {
    factory: ControlFactory,
    host: Box<dyn Host>,
    diagnostics: Box<dyn Diagnostics>,
    current: Option<Box<dyn Control>>,
    history: Vec<ControlDescriptor>,
    state: SessionState,
    back_key: KeyCode,
    history_on_failure: HistoryOnFailure,
    navigator: Navigator,
    requests: Receiver<NavigationRequest>,
    pending: VecDeque<NavigationRequest>,
}

impl NavigationManager {
    pub fn new(factory: ControlFactory, host: Box<dyn Host>) -> Self {
        let (hub, requests) = mpsc::channel();

        NavigationManager {
            factory,
            host,
            diagnostics: Box::new(TracingDiagnostics),
            current: None,
            history: Vec::new(),
            state: SessionState::Uninitialized,
            back_key: KeyCode::Back,
            history_on_failure: HistoryOnFailure::default(),
            navigator: Navigator::new(hub),
            requests,
            pending: VecDeque::new(),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Box<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn with_settings(mut self, settings: &NavigationSettings) -> Self {
        self.back_key = settings.back_key;
        self.history_on_failure = settings.history_on_failure;
        self
    }

    pub fn with_back_key(mut self, back_key: KeyCode) -> Self {
        self.back_key = back_key;
        self
    }

    pub fn with_history_on_failure(mut self, policy: HistoryOnFailure) -> Self {
        self.history_on_failure = policy;
        self
    }

    /// Builds the first control, without touching the history.
    ///
    /// If the build fails the manager stays usable with no current control.
    pub fn initialize(&mut self, descriptor: ControlDescriptor) {
        tracing::debug!(kind = %descriptor.kind(), "initializing navigation");
        self.history.clear();
        let control = self.build(&descriptor);
        self.install(control);
        self.state = SessionState::Active;
        self.drain_requests();
    }

    /// Shows the control described by `descriptor`.
    ///
    /// The current control's descriptor is pushed onto the history unless
    /// it is marked `no_history`. If the new control cannot be built the
    /// current one stays; the push is kept or undone according to
    /// [`HistoryOnFailure`].
    pub fn navigate_to(&mut self, descriptor: ControlDescriptor) {
        self.navigate_to_inner(descriptor);
        self.drain_requests();
    }

    /// Returns to the most recent control of the history.
    ///
    /// The control being left is discarded and not recorded. If the popped
    /// descriptor cannot be built there is no current control afterwards.
    /// With an empty history the host is asked to close the session and the
    /// current control is left in place.
    pub fn go_back(&mut self) {
        self.go_back_inner();
        self.drain_requests();
    }

    /// Forwards `event` to the current control, or drops it if there is none.
    pub fn dispatch(&mut self, event: &ControlEvent) {
        self.dispatch_inner(event);
        self.drain_requests();
    }

    /// Handles a raw key event.
    ///
    /// Releasing the back key triggers [`go_back`](Self::go_back) and is not
    /// forwarded; every other key event is dispatched unchanged. Keys are
    /// compared by their host code, so `Other(7)` is the back key too.
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.action == KeyAction::Release && key.code.raw() == self.back_key.raw() {
            tracing::debug!("back key intercepted");
            self.go_back_inner();
        } else {
            self.dispatch_inner(&ControlEvent::Key(key));
        }
        self.drain_requests();
    }

    /// Forwards a host lifecycle transition to the current control.
    pub fn lifecycle(&mut self, event: Lifecycle) {
        match self.current.as_mut() {
            Some(control) => control.on_lifecycle(event),
            None => tracing::trace!(?event, "no current control, dropping lifecycle event"),
        }
        self.drain_requests();
    }

    /// Applies the requests controls queued through their navigator.
    ///
    /// Every other operation already does this before returning; hosts only
    /// need it when a navigator is used outside of a call into the manager.
    pub fn drain_requests(&mut self) {
        let mut applied = 0;

        loop {
            self.collect_requests();
            let Some(request) = self.pending.pop_front() else {
                break;
            };

            if applied == MAX_REQUESTS_PER_DRAIN {
                let dropped = self.pending.len() + 1;
                self.pending.clear();
                tracing::warn!(
                    dropped,
                    "too many chained navigation requests, dropping the rest"
                );
                break;
            }
            applied += 1;

            match request {
                NavigationRequest::NavigateTo(descriptor) => self.navigate_to_inner(descriptor),
                NavigationRequest::Back => self.go_back_inner(),
                NavigationRequest::CloseSession => self.close_session(),
            }
        }
    }

    /// A navigator bound to this manager, for hosts that want to queue
    /// requests themselves.
    pub fn navigator(&self) -> Navigator {
        self.navigator.clone()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current(&self) -> Option<&dyn Control> {
        self.current.as_deref()
    }

    /// The current control as its concrete type.
    pub fn current_as<T: Control>(&self) -> Option<&T> {
        self.current.as_ref()?.downcast_ref::<T>()
    }

    pub fn current_descriptor(&self) -> Option<&ControlDescriptor> {
        self.current.as_ref().map(|control| control.descriptor())
    }

    /// Recorded descriptors, oldest first.
    pub fn history(&self) -> &[ControlDescriptor] {
        &self.history
    }

    fn navigate_to_inner(&mut self, descriptor: ControlDescriptor) {
        let pushed = self.record_current();

        match self.build(&descriptor) {
            Some(control) => self.install(Some(control)),
            None => {
                if pushed && self.history_on_failure == HistoryOnFailure::Rollback {
                    if let Some(restored) = self.history.pop() {
                        self.diagnostics.history_rolled_back(&restored);
                    }
                }
            }
        }

        self.state = SessionState::Active;
    }

    fn go_back_inner(&mut self) {
        match self.history.pop() {
            Some(descriptor) => {
                let control = self.build(&descriptor);
                self.install(control);
                self.state = SessionState::Active;
            }
            None => self.close_session(),
        }
    }

    fn dispatch_inner(&mut self, event: &ControlEvent) {
        match self.current.as_mut() {
            Some(current) => control::deliver(current.as_mut(), event),
            None => tracing::trace!(?event, "no current control, dropping event"),
        }
    }

    /// Pushes the current control's descriptor unless it opted out.
    /// Returns whether something was pushed.
    fn record_current(&mut self) -> bool {
        let Some(control) = self.current.as_ref() else {
            return false;
        };

        let descriptor = control.descriptor();
        if descriptor.is_no_history() {
            self.diagnostics.history_skipped(descriptor);
            return false;
        }

        self.history.push(descriptor.clone());
        self.diagnostics.history_pushed(descriptor, self.history.len());
        true
    }

    /// Moves queued requests into `pending`, keeping their order.
    fn collect_requests(&mut self) {
        self.pending.extend(self.requests.try_iter());
    }

    /// Requests queued by a constructor only count if the build succeeds.
    fn build(&mut self, descriptor: &ControlDescriptor) -> Option<Box<dyn Control>> {
        self.collect_requests();

        match self.factory.build(descriptor, self.navigator.clone()) {
            Ok(control) => Some(control),
            Err(error) => {
                let discarded = self.requests.try_iter().count();
                if discarded > 0 {
                    tracing::debug!(
                        kind = %descriptor.kind(),
                        discarded,
                        "dropping requests of a failed construction"
                    );
                }
                self.diagnostics.construction_failed(descriptor, &error);
                None
            }
        }
    }

    /// Swaps the current control. The outgoing control is deactivated and
    /// dropped before the incoming one is activated.
    fn install(&mut self, control: Option<Box<dyn Control>>) {
        if let Some(mut previous) = self.current.take() {
            previous.on_deactivate();
        }

        self.current = control;

        if let Some(current) = self.current.as_mut() {
            current.on_activate();
        }
    }

    fn close_session(&mut self) {
        self.diagnostics.session_closed();
        self.host.close_session();
        self.state = SessionState::Terminated;
    }
}
