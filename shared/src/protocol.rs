use crate::{
    constants::WIRE_VERSION,
    world::component::{component_kinds::ComponentKinds, replicate::Replicate},
};

pub mod error;
pub use error::ProtocolError;

// Protocol Plugin
pub trait ProtocolPlugin {
    fn build(&self, protocol: &mut Protocol);
}

// Protocol
/// The component manifest both peers are built from.
///
/// Components receive their wire ids in the order they are added, so the
/// server and the client must add the same components in the same order.
/// [`Protocol::fingerprint`] lets two peers check that they did.
#[derive(Default)]
pub struct Protocol {
    pub component_kinds: ComponentKinds,
    locked: bool,
}

impl Protocol {
    pub fn builder() -> Self {
        Self::default()
    }

    pub fn add_plugin<P: ProtocolPlugin>(&mut self, plugin: P) -> &mut Self {
        self.check_lock();
        plugin.build(self);
        self
    }

    pub fn add_component<C: Replicate>(&mut self) -> &mut Self {
        self.check_lock();
        if let Err(error) = self.component_kinds.add_component::<C>() {
            panic!("{}", error);
        }
        self
    }

    // Non-panicking builder methods

    pub fn try_add_plugin<P: ProtocolPlugin>(&mut self, plugin: P) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        plugin.build(self);
        Ok(self)
    }

    pub fn try_add_component<C: Replicate>(&mut self) -> Result<&mut Self, ProtocolError> {
        self.try_check_lock()?;
        self.component_kinds.add_component::<C>()?;
        Ok(self)
    }

    pub fn try_lock(&mut self) -> Result<(), ProtocolError> {
        self.try_check_lock()?;
        self.locked = true;
        Ok(())
    }

    pub fn lock(&mut self) {
        self.check_lock();
        self.locked = true;
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Checks if protocol is locked without panicking
    /// Returns Err if protocol is locked
    pub fn try_check_lock(&self) -> Result<(), ProtocolError> {
        if self.locked {
            Err(ProtocolError::AlreadyLocked)
        } else {
            Ok(())
        }
    }

    /// Checks if protocol is locked, panics if it is
    pub fn check_lock(&self) {
        if self.locked {
            panic!("Protocol already locked!");
        }
    }

    pub fn build(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Hash of the wire version and the ordered component names.
    ///
    /// Two peers with equal fingerprints assign the same id to every component.
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&WIRE_VERSION.to_le_bytes());
        for codec in self.component_kinds.iter() {
            hasher.update(codec.name().as_bytes());
            hasher.update(&[0]);
        }
        let hash = hasher.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }
}
