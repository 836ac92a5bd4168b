use crate::control::{Control, ControlContext, ControlKind};
use fxhash::FxHashMap;
use std::fmt;

/// A registered constructor.
///
/// Returning `Box<dyn Control>` is what makes the capability check static:
/// anything a constructor produces satisfies the control contract.
pub type ControlConstructor = Box<dyn Fn(ControlContext) -> anyhow::Result<Box<dyn Control>>>;

/// Maps control kinds to their constructors.
///
/// The host application populates the registry at startup; the
/// [`ControlFactory`](super::ControlFactory) only reads it.
///
/// # Example
///
/// ```
/// use wristnav_core::control::{Control, ControlContext, ControlDescriptor};
/// use wristnav_core::navigation::ControlRegistry;
///
/// struct Blank(ControlDescriptor);
///
/// impl Control for Blank {
///     fn descriptor(&self) -> &ControlDescriptor {
///         &self.0
///     }
///
///     fn on_activate(&mut self) {}
/// }
///
/// let mut registry = ControlRegistry::new();
/// registry.register("blank", |context: ControlContext| Ok(Blank(context.descriptor)));
///
/// assert!(registry.contains(&"blank".into()));
/// ```
#[derive(Default)]
pub struct ControlRegistry {
    constructors: FxHashMap<ControlKind, ControlConstructor>,
}

impl ControlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `constructor` for `kind`, replacing any previous one.
    pub fn register<C, F>(&mut self, kind: impl Into<ControlKind>, constructor: F) -> &mut Self
    where
        C: Control,
        F: Fn(ControlContext) -> anyhow::Result<C> + 'static,
    {
        let kind = kind.into();
        let boxed: ControlConstructor = Box::new(move |context| {
            constructor(context).map(|control| Box::new(control) as Box<dyn Control>)
        });

        if self.constructors.insert(kind.clone(), boxed).is_some() {
            tracing::debug!(kind = %kind, "replaced control constructor");
        }

        self
    }

    pub fn resolve(&self, kind: &ControlKind) -> Option<&ControlConstructor> {
        self.constructors.get(kind)
    }

    pub fn contains(&self, kind: &ControlKind) -> bool {
        self.constructors.contains_key(kind)
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<&ControlKind> {
        let mut kinds: Vec<_> = self.constructors.keys().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }
}

impl fmt::Debug for ControlRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}
