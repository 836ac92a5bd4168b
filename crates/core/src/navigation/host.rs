/// The host side of a session.
///
/// The host delivers events into the manager and owns the session's
/// teardown; the manager only tells it when the session should end.
pub trait Host {
    /// Asks the host to end the session.
    fn close_session(&mut self);
}
