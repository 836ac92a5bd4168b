//! Line commands read from the terminal.

use anyhow::{bail, format_err, Context, Error};
use wristnav_core::control::{
    ClickType, ControlEvent, KeyAction, KeyCode, KeyEvent, Lifecycle, ListItem, ObjectClickEvent,
    SwipeDirection, TouchAction, TouchEvent,
};

/// Layout reference used for every list the sample controls show.
const LIST_LAYOUT: i32 = 1;

pub const HELP: &str = "\
commands:
  back                              release the back key
  key <name|code> [press|release|repeat]
                                    keys: play next previous action volume-down
                                    volume-up back options
  click <pos> | long-click <pos>    click a list item
  select <pos> | request <pos>      select or request a list item
  refresh                           ask for a list refresh
  tap [x y]                         tap the screen
  swipe <up|down|left|right>
  menu <id>                         pick an options menu item
  start | resume | pause | stop | destroy | error <code>
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Key(KeyEvent),
    Event(ControlEvent),
    Lifecycle(Lifecycle),
    Help,
    Quit,
}

pub fn parse(line: &str, timestamp: i64) -> Result<Command, Error> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        bail!("empty command");
    };
    let args: Vec<&str> = words.collect();

    let command = match name {
        "back" => Command::Key(KeyEvent::new(KeyAction::Release, KeyCode::Back, timestamp)),
        "key" => {
            let code = args
                .first()
                .ok_or_else(|| format_err!("key needs a name or a code"))
                .and_then(|arg| key_code(arg))?;
            let action = match args.get(1).copied() {
                None | Some("release") => KeyAction::Release,
                Some("press") => KeyAction::Press,
                Some("repeat") => KeyAction::Repeat,
                Some(other) => bail!("unknown key action {}", other),
            };
            Command::Key(KeyEvent::new(action, code, timestamp))
        }
        "click" | "long-click" => {
            let click_type = if name == "click" {
                ClickType::Short
            } else {
                ClickType::Long
            };
            Command::Event(ControlEvent::ListItemClick {
                item: list_item(position(&args)?),
                click_type,
                item_layout_reference: LIST_LAYOUT,
            })
        }
        "select" => Command::Event(ControlEvent::ListItemSelected(list_item(position(&args)?))),
        "request" => Command::Event(ControlEvent::RequestListItem {
            layout_reference: LIST_LAYOUT,
            list_item_position: position(&args)?,
        }),
        "refresh" => Command::Event(ControlEvent::ListRefreshRequest {
            layout_reference: LIST_LAYOUT,
        }),
        "tap" => match args.as_slice() {
            [] => Command::Event(ControlEvent::ObjectClick(ObjectClickEvent {
                click_type: ClickType::Short,
                layout_reference: 0,
                timestamp,
            })),
            [x, y] => Command::Event(ControlEvent::Touch(TouchEvent {
                action: TouchAction::Release,
                x: number(x)?,
                y: number(y)?,
                timestamp,
            })),
            _ => bail!("tap takes no arguments or two coordinates"),
        },
        "swipe" => {
            let direction = match args.first().copied() {
                Some("up") => SwipeDirection::Up,
                Some("down") => SwipeDirection::Down,
                Some("left") => SwipeDirection::Left,
                Some("right") => SwipeDirection::Right,
                _ => bail!("swipe needs up, down, left or right"),
            };
            Command::Event(ControlEvent::Swipe(direction))
        }
        "menu" => Command::Event(ControlEvent::MenuItemSelected(position(&args)?)),
        "start" => Command::Lifecycle(Lifecycle::Start),
        "resume" => Command::Lifecycle(Lifecycle::Resume),
        "pause" => Command::Lifecycle(Lifecycle::Pause),
        "stop" => Command::Lifecycle(Lifecycle::Stop),
        "destroy" => Command::Lifecycle(Lifecycle::Destroy),
        "error" => Command::Lifecycle(Lifecycle::Error(position(&args)?)),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command {}", other),
    };

    Ok(command)
}

fn key_code(arg: &str) -> Result<KeyCode, Error> {
    let code = match arg {
        "play" => KeyCode::Play,
        "next" => KeyCode::Next,
        "previous" => KeyCode::Previous,
        "action" => KeyCode::Action,
        "volume-down" => KeyCode::VolumeDown,
        "volume-up" => KeyCode::VolumeUp,
        "back" => KeyCode::Back,
        "options" => KeyCode::Options,
        raw => KeyCode::from_raw(number(raw)?),
    };
    Ok(code)
}

fn position(args: &[&str]) -> Result<i32, Error> {
    match args {
        [value] => number(value),
        _ => bail!("expected exactly one number"),
    }
}

fn number(value: &str) -> Result<i32, Error> {
    value
        .parse()
        .with_context(|| format!("{} is not a number", value))
}

fn list_item(position: i32) -> ListItem {
    ListItem {
        layout_reference: LIST_LAYOUT,
        list_item_id: position,
        list_item_position: position,
    }
}
