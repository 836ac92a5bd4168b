//! Input and lifecycle events delivered by the host.
//!
//! Payloads are opaque to the navigation manager: it only looks at key
//! events, to intercept the back key, and forwards everything else verbatim.

use serde::{Deserialize, Serialize};

/// Physical keys of the accessory.
///
/// The numeric codes are the ones used on the host transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyCode {
    Play,
    Next,
    Previous,
    Action,
    VolumeDown,
    VolumeUp,
    Back,
    Options,
    Other(i32),
}

impl KeyCode {
    pub fn from_raw(code: i32) -> KeyCode {
        match code {
            1 => KeyCode::Play,
            2 => KeyCode::Next,
            3 => KeyCode::Previous,
            4 => KeyCode::Action,
            5 => KeyCode::VolumeDown,
            6 => KeyCode::VolumeUp,
            7 => KeyCode::Back,
            8 => KeyCode::Options,
            other => KeyCode::Other(other),
        }
    }

    pub fn raw(self) -> i32 {
        match self {
            KeyCode::Play => 1,
            KeyCode::Next => 2,
            KeyCode::Previous => 3,
            KeyCode::Action => 4,
            KeyCode::VolumeDown => 5,
            KeyCode::VolumeUp => 6,
            KeyCode::Back => 7,
            KeyCode::Options => 8,
            KeyCode::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyAction {
    Press,
    Release,
    Repeat,
}

/// A raw key event, `timestamp` is in milliseconds as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub code: KeyCode,
    pub timestamp: i64,
}

impl KeyEvent {
    pub fn new(action: KeyAction, code: KeyCode, timestamp: i64) -> Self {
        KeyEvent {
            action,
            code,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickType {
    Short,
    Long,
}

/// Reference to an item of a list rendered by a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListItem {
    pub layout_reference: i32,
    pub list_item_id: i32,
    pub list_item_position: i32,
}

/// A click on a layout object that is not a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectClickEvent {
    pub click_type: ClickType,
    pub layout_reference: i32,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchAction {
    Press,
    LongPress,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TouchEvent {
    pub action: TouchAction,
    pub x: i32,
    pub y: i32,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Events routed to the current control.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// The host needs the content of a list item.
    RequestListItem {
        layout_reference: i32,
        list_item_position: i32,
    },
    ListItemClick {
        item: ListItem,
        click_type: ClickType,
        item_layout_reference: i32,
    },
    ListItemSelected(ListItem),
    ListRefreshRequest {
        layout_reference: i32,
    },
    ObjectClick(ObjectClickEvent),
    MenuItemSelected(i32),
    Key(KeyEvent),
    Touch(TouchEvent),
    Swipe(SwipeDirection),
}

/// Lifecycle transitions of the host session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Start,
    Resume,
    Pause,
    Stop,
    Destroy,
    Error(i32),
}
