use std::cell::Cell;
use std::rc::Rc;
use wristnav_core::navigation::Host;

/// Host backed by the terminal. Closing the session stops the input loop.
#[derive(Debug, Clone, Default)]
pub struct ConsoleHost {
    closed: Rc<Cell<bool>>,
}

impl ConsoleHost {
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

impl Host for ConsoleHost {
    fn close_session(&mut self) {
        tracing::info!("session closed by the navigation manager");
        self.closed.set(true);
    }
}
