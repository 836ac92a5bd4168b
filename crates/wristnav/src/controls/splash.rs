use super::{columns, fit, Screen, MENU};
use wristnav_core::control::{
    Control, ControlContext, ControlDescriptor, KeyAction, KeyCode, KeyEvent, Lifecycle,
    ObjectClickEvent,
};
use wristnav_core::navigation::Navigator;

const DEFAULT_TITLE: &str = "Wristnav";

/// Start screen. Any tap, or releasing the action key, opens the menu.
///
/// Usually declared with `no-history = true`, so back from the menu ends the
/// session instead of returning here.
pub struct SplashControl {
    descriptor: ControlDescriptor,
    navigator: Navigator,
    screen: Screen,
    title: String,
}

impl SplashControl {
    pub fn new(context: ControlContext, screen: Screen) -> Self {
        let title = context
            .descriptor
            .param_str("title")
            .unwrap_or(DEFAULT_TITLE);
        let title = fit(title, columns(&context));

        SplashControl {
            descriptor: context.descriptor,
            navigator: context.navigator,
            screen,
            title,
        }
    }

    fn open_menu(&self) {
        self.navigator.navigate_to(ControlDescriptor::new(MENU));
    }
}

impl Control for SplashControl {
    fn descriptor(&self) -> &ControlDescriptor {
        &self.descriptor
    }

    fn on_activate(&mut self) {
        self.screen.show(format!("== {} ==", self.title));
        self.screen.show("tap or press action to start");
    }

    fn on_object_click(&mut self, _event: &ObjectClickEvent) {
        self.open_menu();
    }

    fn on_key(&mut self, key: &KeyEvent) {
        if key.action == KeyAction::Release && key.code == KeyCode::Action {
            self.open_menu();
        }
    }

    fn on_lifecycle(&mut self, event: Lifecycle) {
        tracing::debug!(?event, "splash lifecycle");
    }
}
