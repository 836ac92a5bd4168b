//! Application settings.
//!
//! Settings are read from a single TOML file. Every key is optional; missing
//! keys take their default value and a missing file yields the defaults.
//!
//! ```toml
//! host-package = "com.example.locker"
//!
//! [display]
//! width = 220
//! height = 176
//!
//! [initial-control]
//! kind = "splash"
//! no-history = true
//!
//! [navigation]
//! back-key = "back"
//! history-on-failure = "keep"
//!
//! [logging]
//! enabled = true
//! level = "info"
//! max-files = 3
//! directory = "logs"
//! ```

use crate::control::{ControlDescriptor, HostContext, KeyCode};
use crate::helpers::{load_toml, save_toml};
use crate::navigation::HistoryOnFailure;
use anyhow::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_PATH: &str = "Settings.toml";
pub const DEFAULT_HOST_PACKAGE: &str = "com.example.wristnav.host";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Identity of the host application, handed to every control.
    pub host_package: String,
    pub display: DisplaySettings,
    /// The control shown when the session starts.
    pub initial_control: ControlDescriptor,
    pub navigation: NavigationSettings,
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host_package: DEFAULT_HOST_PACKAGE.to_string(),
            display: DisplaySettings::default(),
            initial_control: ControlDescriptor::new("splash")
                .with_param("title", "Wristnav")
                .no_history(),
            navigation: NavigationSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Settings {
    /// Loads the settings at `path`, or the defaults if there is no file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Settings, Error> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Settings::default());
        }

        load_toml(path)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        save_toml(self, path)
    }
}

/// Size of the accessory display, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub width: u32,
    pub height: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            width: 220,
            height: 176,
        }
    }
}

impl DisplaySettings {
    pub fn host_context(&self) -> HostContext {
        HostContext {
            display_width: self.width,
            display_height: self.height,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct NavigationSettings {
    /// Releasing this key navigates back instead of reaching the control.
    pub back_key: KeyCode,
    pub history_on_failure: HistoryOnFailure,
}

impl Default for NavigationSettings {
    fn default() -> Self {
        NavigationSettings {
            back_key: KeyCode::Back,
            history_on_failure: HistoryOnFailure::Keep,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LoggingSettings {
    pub enabled: bool,
    /// Filter directive used when `RUST_LOG` is not set.
    pub level: String,
    /// Number of run logs to keep, 0 keeps all of them.
    pub max_files: usize,
    /// Relative to the current working directory.
    pub directory: PathBuf,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            enabled: true,
            level: "info".to_string(),
            max_files: 3,
            directory: PathBuf::from("logs"),
        }
    }
}
