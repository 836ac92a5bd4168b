use super::factory::ConstructionError;
use crate::control::ControlDescriptor;

/// Sink for the notable events of a navigation session.
///
/// The manager reports to it but never consults it, so an implementation
/// cannot influence navigation. Every method defaults to doing nothing.
pub trait Diagnostics {
    fn construction_failed(&mut self, _descriptor: &ControlDescriptor, _error: &ConstructionError) {}

    /// `depth` is the history length after the push.
    fn history_pushed(&mut self, _descriptor: &ControlDescriptor, _depth: usize) {}

    fn history_skipped(&mut self, _descriptor: &ControlDescriptor) {}

    /// A push was undone because the navigation it belonged to failed.
    fn history_rolled_back(&mut self, _descriptor: &ControlDescriptor) {}

    fn session_closed(&mut self) {}
}

/// Default sink, emits `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn construction_failed(&mut self, descriptor: &ControlDescriptor, error: &ConstructionError) {
        tracing::warn!(kind = %descriptor.kind(), error = %error, "failed in creating control");
    }

    fn history_pushed(&mut self, descriptor: &ControlDescriptor, depth: usize) {
        tracing::debug!(kind = %descriptor.kind(), depth, "adding control to history stack");
    }

    fn history_skipped(&mut self, descriptor: &ControlDescriptor) {
        tracing::debug!(kind = %descriptor.kind(), "not adding control to history stack");
    }

    fn history_rolled_back(&mut self, descriptor: &ControlDescriptor) {
        tracing::debug!(kind = %descriptor.kind(), "removed control from history stack after failed navigation");
    }

    fn session_closed(&mut self) {
        tracing::info!("history exhausted, closing session");
    }
}
