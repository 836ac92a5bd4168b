//! The control abstraction.
//!
//! A control is a self-contained interactive screen: it owns its UI state,
//! receives the events the host forwards and asks for navigation through the
//! [`Navigator`] it was built with. Exactly one control is current at a time,
//! see [`crate::navigation::NavigationManager`].

mod descriptor;
mod event;

pub use self::descriptor::{ControlDescriptor, ControlKind, ParamValue};
pub use self::event::{
    ClickType, ControlEvent, KeyAction, KeyCode, KeyEvent, Lifecycle, ListItem,
    ObjectClickEvent, SwipeDirection, TouchAction, TouchEvent,
};

use crate::navigation::Navigator;
use downcast_rs::{impl_downcast, Downcast};

/// Opaque handles the host passes to every control constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostContext {
    /// Width of the accessory display in pixels.
    pub display_width: u32,
    /// Height of the accessory display in pixels.
    pub display_height: u32,
}

/// Everything a control constructor receives.
pub struct ControlContext {
    pub host: HostContext,
    /// Identity of the host application the session belongs to.
    pub host_package: String,
    /// Handle back to the owning manager.
    pub navigator: Navigator,
    /// The descriptor the control is being built from. The control must
    /// return an equal descriptor from [`Control::descriptor`].
    pub descriptor: ControlDescriptor,
}

/// Capability contract implemented by every control.
///
/// Only [`descriptor`](Control::descriptor) and
/// [`on_activate`](Control::on_activate) are mandatory; the event handlers
/// default to ignoring the event.
pub trait Control: Downcast {
    /// The descriptor this control was built from.
    fn descriptor(&self) -> &ControlDescriptor;

    /// Called exactly once, when the control becomes current.
    fn on_activate(&mut self);

    /// Called when the manager swaps the control out, right before dropping it.
    fn on_deactivate(&mut self) {}

    fn on_request_list_item(&mut self, _layout_reference: i32, _list_item_position: i32) {}

    fn on_list_item_click(
        &mut self,
        _item: &ListItem,
        _click_type: ClickType,
        _item_layout_reference: i32,
    ) {
    }

    fn on_list_item_selected(&mut self, _item: &ListItem) {}

    fn on_list_refresh_request(&mut self, _layout_reference: i32) {}

    fn on_object_click(&mut self, _event: &ObjectClickEvent) {}

    fn on_menu_item_selected(&mut self, _menu_item: i32) {}

    fn on_key(&mut self, _key: &KeyEvent) {}

    fn on_touch(&mut self, _touch: &TouchEvent) {}

    fn on_swipe(&mut self, _direction: SwipeDirection) {}

    fn on_lifecycle(&mut self, _event: Lifecycle) {}
}

impl_downcast!(Control);

/// Routes an event to the matching handler of `control`.
pub(crate) fn deliver(control: &mut dyn Control, event: &ControlEvent) {
    match event {
        ControlEvent::RequestListItem {
            layout_reference,
            list_item_position,
        } => control.on_request_list_item(*layout_reference, *list_item_position),
        ControlEvent::ListItemClick {
            item,
            click_type,
            item_layout_reference,
        } => control.on_list_item_click(item, *click_type, *item_layout_reference),
        ControlEvent::ListItemSelected(item) => control.on_list_item_selected(item),
        ControlEvent::ListRefreshRequest { layout_reference } => {
            control.on_list_refresh_request(*layout_reference)
        }
        ControlEvent::ObjectClick(click) => control.on_object_click(click),
        ControlEvent::MenuItemSelected(menu_item) => control.on_menu_item_selected(*menu_item),
        ControlEvent::Key(key) => control.on_key(key),
        ControlEvent::Touch(touch) => control.on_touch(touch),
        ControlEvent::Swipe(direction) => control.on_swipe(*direction),
    }
}
