//! Sample catalog: a splash screen, a menu list and a details screen.
//!
//! Rendering is out of scope for the core, so controls write text lines to a
//! shared [`Screen`] that the console host prints after every command.

mod details;
mod menu;
mod splash;

pub use self::details::DetailsControl;
pub use self::menu::MenuControl;
pub use self::splash::SplashControl;

use std::cell::RefCell;
use std::rc::Rc;
use wristnav_core::control::ControlContext;
use wristnav_core::navigation::ControlRegistry;

pub const SPLASH: &str = "splash";
pub const MENU: &str = "menu";
pub const DETAILS: &str = "details";

/// Width of a character cell on the accessory display, in pixels.
const CHAR_WIDTH: u32 = 8;

/// Text output shared by the sample controls.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    lines: Rc<RefCell<Vec<String>>>,
}

impl Screen {
    pub fn show(&self, line: impl Into<String>) {
        self.lines.borrow_mut().push(line.into());
    }

    /// Returns and clears everything shown since the last call.
    pub fn take(&self) -> Vec<String> {
        self.lines.borrow_mut().drain(..).collect()
    }
}

/// Number of characters that fit on one line of the display.
fn columns(context: &ControlContext) -> usize {
    (context.host.display_width / CHAR_WIDTH).max(1) as usize
}

fn fit(text: &str, columns: usize) -> String {
    text.chars().take(columns).collect()
}

pub fn register(registry: &mut ControlRegistry, screen: &Screen) {
    let splash_screen = screen.clone();
    let menu_screen = screen.clone();
    let details_screen = screen.clone();

    registry
        .register(SPLASH, move |context: ControlContext| {
            Ok(SplashControl::new(context, splash_screen.clone()))
        })
        .register(MENU, move |context: ControlContext| {
            Ok(MenuControl::new(context, menu_screen.clone()))
        })
        .register(DETAILS, move |context: ControlContext| {
            DetailsControl::new(context, details_screen.clone())
        });
}
