//! Declarative descriptions of which control to build.
//!
//! A [`ControlDescriptor`] names a control kind, carries the parameters its
//! constructor needs and says whether the control may be recorded in the
//! navigation history. Descriptors are plain values: two descriptors with the
//! same kind, parameters and flag are equal, regardless of where they came
//! from or in which order their parameters were inserted.
//!
//! Descriptors can be declared in the settings file:
//!
//! ```toml
//! [initial-control]
//! kind = "splash"
//! no-history = true
//!
//! [initial-control.params]
//! title = "Locker"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type identifier resolved by the control registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlKind(String);

impl ControlKind {
    pub fn new(kind: impl Into<String>) -> Self {
        ControlKind(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ControlKind {
    fn from(kind: &str) -> Self {
        ControlKind::new(kind)
    }
}

impl From<String> for ControlKind {
    fn from(kind: String) -> Self {
        ControlKind(kind)
    }
}

/// A single construction parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

/// Immutable description of a control: its kind, its construction
/// parameters and its history flag.
///
/// # Example
///
/// ```
/// use wristnav_core::control::ControlDescriptor;
///
/// let details = ControlDescriptor::new("details")
///     .with_param("position", 3)
///     .with_param("title", "Schedule");
///
/// assert_eq!(details.param_int("position"), Some(3));
/// assert!(!details.is_no_history());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ControlDescriptor {
    kind: ControlKind,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    params: IndexMap<String, ParamValue>,
    /// When set, the control built from this descriptor is not pushed onto
    /// the history stack when the manager navigates away from it.
    #[serde(default)]
    no_history: bool,
}

impl ControlDescriptor {
    pub fn new(kind: impl Into<ControlKind>) -> Self {
        ControlDescriptor {
            kind: kind.into(),
            params: IndexMap::new(),
            no_history: false,
        }
    }

    /// Adds (or replaces) a construction parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Marks the descriptor as excluded from the navigation history.
    pub fn no_history(mut self) -> Self {
        self.no_history = true;
        self
    }

    pub fn kind(&self) -> &ControlKind {
        &self.kind
    }

    pub fn is_no_history(&self) -> bool {
        self.no_history
    }

    pub fn params(&self) -> &IndexMap<String, ParamValue> {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&ParamValue> {
        self.params.get(key)
    }

    pub fn param_str(&self, key: &str) -> Option<&str> {
        match self.params.get(key) {
            Some(ParamValue::Str(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn param_int(&self, key: &str) -> Option<i64> {
        match self.params.get(key) {
            Some(ParamValue::Int(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn param_bool(&self, key: &str) -> Option<bool> {
        match self.params.get(key) {
            Some(ParamValue::Bool(value)) => Some(*value),
            _ => None,
        }
    }
}
