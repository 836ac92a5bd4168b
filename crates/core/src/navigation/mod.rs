//! Control selection, construction and history.
//!
//! The module is split into:
//! - [`registry`]: the mapping from control kind to constructor
//! - [`factory`]: builds a control from a descriptor, turning every failure
//!   into a [`ConstructionError`]
//! - [`manager`]: owns the current control and the history stack, and routes
//!   events
//! - [`diagnostics`] and [`host`]: the collaborators the manager reports to.
//!
//! Controls never hold a reference to the manager. They get a [`Navigator`]
//! instead, which queues [`NavigationRequest`]s; the manager applies them as
//! soon as the call into the control returns.

pub mod diagnostics;
pub mod factory;
pub mod host;
pub mod manager;
pub mod registry;

pub use self::diagnostics::{Diagnostics, TracingDiagnostics};
pub use self::factory::{ConstructionError, ControlFactory};
pub use self::host::Host;
pub use self::manager::{HistoryOnFailure, NavigationManager, SessionState};
pub use self::registry::{ControlConstructor, ControlRegistry};

use crate::control::ControlDescriptor;
use std::sync::mpsc::Sender;

/// Requests a control can make to its owning manager.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationRequest {
    /// Show a new control, recording the current one in the history.
    NavigateTo(ControlDescriptor),
    /// Same as the back key.
    Back,
    /// Ends the session regardless of the history.
    CloseSession,
}

/// Cloneable handle through which controls talk to their manager.
#[derive(Debug, Clone)]
pub struct Navigator {
    hub: Sender<NavigationRequest>,
}

impl Navigator {
    pub(crate) fn new(hub: Sender<NavigationRequest>) -> Self {
        Navigator { hub }
    }

    pub fn navigate_to(&self, descriptor: ControlDescriptor) {
        self.send(NavigationRequest::NavigateTo(descriptor));
    }

    pub fn back(&self) {
        self.send(NavigationRequest::Back);
    }

    pub fn close_session(&self) {
        self.send(NavigationRequest::CloseSession);
    }

    fn send(&self, request: NavigationRequest) {
        if self.hub.send(request).is_err() {
            tracing::warn!("navigation request dropped: manager is gone");
        }
    }
}
