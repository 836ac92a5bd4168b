//! Navigation core for companion-display controls.
//!
//! A host (typically a phone app talking to a wearable accessory) registers
//! its screens as [`control::Control`] implementations in a
//! [`navigation::ControlRegistry`], then drives a
//! [`navigation::NavigationManager`]: it decides which single control is
//! current, routes input and lifecycle events to it and keeps the back stack.
//!
//! ```
//! use std::rc::Rc;
//! use wristnav_core::control::{Control, ControlContext, ControlDescriptor, HostContext};
//! use wristnav_core::navigation::{ControlFactory, ControlRegistry, Host, NavigationManager};
//!
//! struct Screen(ControlDescriptor);
//!
//! impl Control for Screen {
//!     fn descriptor(&self) -> &ControlDescriptor {
//!         &self.0
//!     }
//!
//!     fn on_activate(&mut self) {}
//! }
//!
//! struct Closer;
//!
//! impl Host for Closer {
//!     fn close_session(&mut self) {}
//! }
//!
//! let mut registry = ControlRegistry::new();
//! registry.register("home", |context: ControlContext| Ok(Screen(context.descriptor)));
//! registry.register("details", |context: ControlContext| Ok(Screen(context.descriptor)));
//!
//! let host = HostContext { display_width: 220, display_height: 176 };
//! let factory = ControlFactory::new(Rc::new(registry), host, "com.example.host");
//! let mut manager = NavigationManager::new(factory, Box::new(Closer));
//!
//! manager.initialize(ControlDescriptor::new("home"));
//! manager.navigate_to(ControlDescriptor::new("details"));
//! assert_eq!(manager.history(), &[ControlDescriptor::new("home")]);
//!
//! manager.go_back();
//! assert_eq!(manager.current_descriptor(), Some(&ControlDescriptor::new("home")));
//! ```

pub mod control;
pub mod helpers;
pub mod logging;
pub mod navigation;
pub mod settings;

#[cfg(test)]
pub(crate) mod test_helpers;
