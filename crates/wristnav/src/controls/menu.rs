use super::{columns, fit, Screen, DETAILS};
use wristnav_core::control::{ClickType, Control, ControlContext, ControlDescriptor, ListItem};
use wristnav_core::navigation::Navigator;

const DEFAULT_ITEMS: [&str; 4] = ["Lock now", "Lock schedule", "Unlock", "About"];

/// Menu item that ends the session.
pub const MENU_ITEM_CLOSE: i32 = 0;

/// List of actions. Clicking an item opens its details.
///
/// The `items` parameter, a comma separated list, replaces the default entries.
pub struct MenuControl {
    descriptor: ControlDescriptor,
    navigator: Navigator,
    screen: Screen,
    items: Vec<String>,
    selected: Option<usize>,
}

impl MenuControl {
    pub fn new(context: ControlContext, screen: Screen) -> Self {
        let columns = columns(&context);
        let items = match context.descriptor.param_str("items") {
            Some(items) => items
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| fit(item, columns))
                .collect(),
            None => DEFAULT_ITEMS.iter().map(|item| fit(item, columns)).collect(),
        };

        MenuControl {
            descriptor: context.descriptor,
            navigator: context.navigator,
            screen,
            items,
            selected: None,
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    fn item(&self, position: i32) -> Option<&String> {
        usize::try_from(position)
            .ok()
            .and_then(|position| self.items.get(position))
    }

    fn render(&self) {
        for (position, item) in self.items.iter().enumerate() {
            let marker = if self.selected == Some(position) { '>' } else { ' ' };
            self.screen.show(format!("{} {}. {}", marker, position, item));
        }
    }
}

impl Control for MenuControl {
    fn descriptor(&self) -> &ControlDescriptor {
        &self.descriptor
    }

    fn on_activate(&mut self) {
        tracing::debug!(items = self.items().len(), "menu shown");
        self.render();
    }

    fn on_request_list_item(&mut self, _layout_reference: i32, list_item_position: i32) {
        match self.item(list_item_position) {
            Some(item) => self.screen.show(format!("{}. {}", list_item_position, item)),
            None => tracing::debug!(list_item_position, "no such menu item"),
        }
    }

    fn on_list_item_click(
        &mut self,
        item: &ListItem,
        click_type: ClickType,
        _item_layout_reference: i32,
    ) {
        let Some(title) = self.item(item.list_item_position) else {
            tracing::debug!(position = item.list_item_position, "click outside of the list");
            return;
        };

        let mut details = ControlDescriptor::new(DETAILS)
            .with_param("position", item.list_item_position)
            .with_param("title", title.as_str());
        if click_type == ClickType::Long {
            details = details.with_param("expanded", true);
        }

        self.navigator.navigate_to(details);
    }

    fn on_list_item_selected(&mut self, item: &ListItem) {
        if self.item(item.list_item_position).is_some() {
            self.selected = usize::try_from(item.list_item_position).ok();
            self.render();
        }
    }

    fn on_list_refresh_request(&mut self, _layout_reference: i32) {
        self.render();
    }

    fn on_menu_item_selected(&mut self, menu_item: i32) {
        if menu_item == MENU_ITEM_CLOSE {
            self.navigator.close_session();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::test_helpers::sample_manager;
    use crate::controls::MENU;
    use wristnav_core::control::ControlEvent;
    use wristnav_core::navigation::SessionState;

    fn click(position: i32, click_type: ClickType) -> ControlEvent {
        ControlEvent::ListItemClick {
            item: ListItem {
                layout_reference: 1,
                list_item_id: position,
                list_item_position: position,
            },
            click_type,
            item_layout_reference: 2,
        }
    }

    #[test]
    fn test_activation_lists_default_items() {
        let (_manager, screen, _host) = sample_manager(ControlDescriptor::new(MENU));

        assert_eq!(
            screen.take(),
            vec![
                "  0. Lock now",
                "  1. Lock schedule",
                "  2. Unlock",
                "  3. About"
            ]
        );
    }

    #[test]
    fn test_items_parameter_replaces_defaults() {
        let (manager, _screen, _host) = sample_manager(
            ControlDescriptor::new(MENU).with_param("items", "Alpha, Beta,,Gamma"),
        );

        let menu = manager.current_as::<MenuControl>().unwrap();
        assert_eq!(menu.items(), &["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_click_opens_details_and_records_menu() {
        let (mut manager, _screen, _host) = sample_manager(ControlDescriptor::new(MENU));

        manager.dispatch(&click(1, ClickType::Short));

        assert_eq!(
            manager.current_descriptor(),
            Some(
                &ControlDescriptor::new(DETAILS)
                    .with_param("position", 1)
                    .with_param("title", "Lock schedule")
            )
        );
        assert_eq!(manager.history(), &[ControlDescriptor::new(MENU)]);
    }

    #[test]
    fn test_long_click_expands_details() {
        let (mut manager, _screen, _host) = sample_manager(ControlDescriptor::new(MENU));

        manager.dispatch(&click(3, ClickType::Long));

        let current = manager.current_descriptor().unwrap();
        assert_eq!(current.param_bool("expanded"), Some(true));
    }

    #[test]
    fn test_click_outside_list_is_ignored() {
        let (mut manager, _screen, _host) = sample_manager(ControlDescriptor::new(MENU));

        manager.dispatch(&click(9, ClickType::Short));
        manager.dispatch(&click(-1, ClickType::Short));

        assert_eq!(manager.current_descriptor(), Some(&ControlDescriptor::new(MENU)));
        assert!(manager.history().is_empty());
    }

    #[test]
    fn test_selection_moves_marker() {
        let (mut manager, screen, _host) = sample_manager(ControlDescriptor::new(MENU));
        screen.take();

        manager.dispatch(&ControlEvent::ListItemSelected(ListItem {
            layout_reference: 1,
            list_item_id: 2,
            list_item_position: 2,
        }));

        assert_eq!(screen.take()[2], "> 2. Unlock");
    }

    #[test]
    fn test_close_menu_item_ends_session() {
        let (mut manager, _screen, host) = sample_manager(ControlDescriptor::new(MENU));

        manager.dispatch(&ControlEvent::MenuItemSelected(MENU_ITEM_CLOSE));

        assert_eq!(host.closes.get(), 1);
        assert_eq!(manager.state(), SessionState::Terminated);
    }
}
