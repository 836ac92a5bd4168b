use super::registry::ControlRegistry;
use super::Navigator;
use crate::control::{Control, ControlContext, ControlDescriptor, ControlKind, HostContext};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

/// Reasons a descriptor did not produce a control.
///
/// None of them is fatal: the manager turns each into "no control
/// available" and reports it to its diagnostics sink.
#[derive(thiserror::Error, Debug)]
pub enum ConstructionError {
    /// No constructor is registered for the descriptor's kind
    #[error("no control registered for kind `{0}`")]
    UnknownKind(ControlKind),

    /// The constructor returned an error
    #[error("control `{kind}` failed to construct: {source}")]
    Rejected {
        kind: ControlKind,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// The constructor panicked
    #[error("control `{kind}` panicked during construction: {message}")]
    Panicked { kind: ControlKind, message: String },

    /// The control does not report the descriptor it was built from
    #[error("control `{kind}` reports a different descriptor (kind `{reported}`)")]
    DescriptorMismatch {
        kind: ControlKind,
        reported: ControlKind,
    },
}

/// Builds controls from descriptors.
///
/// The factory holds no mutable state: every call to [`build`](Self::build)
/// is a single, independent attempt.
///
/// Panics raised by a constructor are caught and reported as
/// [`ConstructionError::Panicked`]. This relies on unwinding, so it does not
/// apply to builds using `panic = "abort"`.
#[derive(Debug, Clone)]
pub struct ControlFactory {
    registry: Rc<ControlRegistry>,
    host: HostContext,
    host_package: String,
}

impl ControlFactory {
    pub fn new(
        registry: Rc<ControlRegistry>,
        host: HostContext,
        host_package: impl Into<String>,
    ) -> Self {
        ControlFactory {
            registry,
            host,
            host_package: host_package.into(),
        }
    }

    pub fn registry(&self) -> &ControlRegistry {
        &self.registry
    }

    pub fn host_package(&self) -> &str {
        &self.host_package
    }

    /// Builds a control bound to `navigator` from `descriptor`.
    pub fn build(
        &self,
        descriptor: &ControlDescriptor,
        navigator: Navigator,
    ) -> Result<Box<dyn Control>, ConstructionError> {
        let kind = descriptor.kind();
        let constructor = self
            .registry
            .resolve(kind)
            .ok_or_else(|| ConstructionError::UnknownKind(kind.clone()))?;

        let context = ControlContext {
            host: self.host,
            host_package: self.host_package.clone(),
            navigator,
            descriptor: descriptor.clone(),
        };

        let control = match panic::catch_unwind(AssertUnwindSafe(|| constructor(context))) {
            Ok(Ok(control)) => control,
            Ok(Err(source)) => {
                return Err(ConstructionError::Rejected {
                    kind: kind.clone(),
                    source: source.into(),
                })
            }
            Err(payload) => {
                return Err(ConstructionError::Panicked {
                    kind: kind.clone(),
                    message: panic_message(payload.as_ref()),
                })
            }
        };

        if control.descriptor() != descriptor {
            return Err(ConstructionError::DescriptorMismatch {
                kind: kind.clone(),
                reported: control.descriptor().kind().clone(),
            });
        }

        tracing::debug!(kind = %kind, "control constructed");
        Ok(control)
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
