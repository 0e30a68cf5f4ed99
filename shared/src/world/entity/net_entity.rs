use std::fmt;

use deltasync_serde::{ByteReader, ByteWrite, ConstByteLength, Serde, SerdeErr};

use crate::world::component::replicate::Replicate;

/// Wire-stable 16-bit id of a replicated entity.
///
/// Also attached to the entity itself as a marker component, so the id can be
/// read back from the world. The marker is never registered with a Protocol
/// and so is never replicated.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
pub struct NetEntity(u16);

impl NetEntity {
    pub fn new(value: u16) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u16 {
        self.0
    }
}

impl From<u16> for NetEntity {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<NetEntity> for u16 {
    fn from(net_entity: NetEntity) -> Self {
        net_entity.0
    }
}

impl fmt::Display for NetEntity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl Serde for NetEntity {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        self.0.ser(writer);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self(u16::de(reader)?))
    }

    fn byte_length(&self) -> usize {
        <Self as ConstByteLength>::const_byte_length()
    }
}

impl ConstByteLength for NetEntity {
    fn const_byte_length() -> usize {
        <u16 as ConstByteLength>::const_byte_length()
    }
}

impl Replicate for NetEntity {
    const NAME: &'static str = "NetEntity";
}
