use std::{any::Any, fmt};

use deltasync_serde::{ByteWrite, Serde};

use crate::world::component::component_kinds::ComponentKind;

/// A Component that can be replicated over the network.
///
/// Implementors provide their own wire encoding through [`Serde`] and
/// value-equality through `PartialEq`, which is what change detection compares.
pub trait Replicate: Serde + Send + Sync + 'static {
    /// Stable, human-readable name, used in diagnostics and the protocol fingerprint
    const NAME: &'static str;
}

/// Type-erased view of a [`Replicate`] value, used wherever components of
/// different types are stored or dispatched side by side.
pub trait ReplicaDyn: Any + Send + Sync {
    fn kind(&self) -> ComponentKind;
    fn name(&self) -> &'static str;
    /// Writes this component's payload (without the presence flag)
    fn write(&self, writer: &mut dyn ByteWrite);
    /// Value-equality across the erased boundary; false if the types differ
    fn dyn_eq(&self, other: &dyn ReplicaDyn) -> bool;
    fn copy_to_box(&self) -> Box<dyn ReplicaDyn>;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<R: Replicate> ReplicaDyn for R {
    fn kind(&self) -> ComponentKind {
        ComponentKind::of::<R>()
    }

    fn name(&self) -> &'static str {
        R::NAME
    }

    fn write(&self, writer: &mut dyn ByteWrite) {
        self.ser(writer);
    }

    fn dyn_eq(&self, other: &dyn ReplicaDyn) -> bool {
        other
            .as_any()
            .downcast_ref::<R>()
            .map_or(false, |other| self == other)
    }

    fn copy_to_box(&self) -> Box<dyn ReplicaDyn> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl<'a> dyn ReplicaDyn + 'a {
    pub fn is<R: Replicate>(&self) -> bool {
        self.as_any().is::<R>()
    }

    pub fn downcast_ref<R: Replicate>(&self) -> Option<&R> {
        self.as_any().downcast_ref::<R>()
    }

    pub fn downcast_mut<R: Replicate>(&mut self) -> Option<&mut R> {
        self.as_any_mut().downcast_mut::<R>()
    }

    pub fn downcast<R: Replicate>(self: Box<Self>) -> Option<R> {
        self.into_any().downcast::<R>().ok().map(|boxed| *boxed)
    }
}

impl<'a> fmt::Debug for dyn ReplicaDyn + 'a {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
