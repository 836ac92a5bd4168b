use super::{columns, fit, Screen, DETAILS};
use anyhow::Context;
use wristnav_core::control::{Control, ControlContext, ControlDescriptor, ObjectClickEvent};
use wristnav_core::navigation::Navigator;

/// Details of one menu item. Tapping opens the next item, back returns.
pub struct DetailsControl {
    descriptor: ControlDescriptor,
    navigator: Navigator,
    screen: Screen,
    position: i64,
    title: String,
    expanded: bool,
}

impl DetailsControl {
    /// Fails when the descriptor has no `position` parameter.
    pub fn new(context: ControlContext, screen: Screen) -> Result<Self, anyhow::Error> {
        let position = context
            .descriptor
            .param_int("position")
            .context("details need a position")?;
        let title = match context.descriptor.param_str("title") {
            Some(title) => fit(title, columns(&context)),
            None => format!("Item {}", position),
        };
        let expanded = context.descriptor.param_bool("expanded").unwrap_or(false);

        Ok(DetailsControl {
            descriptor: context.descriptor,
            navigator: context.navigator,
            screen,
            position,
            title,
            expanded,
        })
    }

    pub fn position(&self) -> i64 {
        self.position
    }
}

impl Control for DetailsControl {
    fn descriptor(&self) -> &ControlDescriptor {
        &self.descriptor
    }

    fn on_activate(&mut self) {
        self.screen.show(self.title.clone());
        self.screen.show(format!("item {}", self.position));
        if self.expanded {
            self.screen.show("tap for the next item");
        }
    }

    fn on_object_click(&mut self, _event: &ObjectClickEvent) {
        let Some(next) = self.position.checked_add(1) else {
            tracing::debug!(position = self.position, "last item, ignoring tap");
            return;
        };
        self.navigator
            .navigate_to(ControlDescriptor::new(DETAILS).with_param("position", next));
    }

    fn on_deactivate(&mut self) {
        tracing::trace!(position = self.position(), "details hidden");
    }
}
