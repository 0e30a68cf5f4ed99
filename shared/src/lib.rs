//! # Deltasync Shared
//! Common functionality shared between deltasync-server & deltasync-client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

pub use deltasync_serde::{
    ByteCounter, ByteReader, ByteWrite, ByteWriter, ConstByteLength, Serde, SerdeErr,
};

mod connection;
mod constants;
mod protocol;
mod transport;
mod world;


cfg_if! {
    if #[cfg(feature = "transport_local")] {
        pub use transport::local::{LocalDisconnect, LocalTransport};
    }
}

pub use connection::{
    connection::Connection,
    entity_scope::{EntityScope, ScopeEntry},
    input_buffer::InputBuffer,
};
pub use constants::{DELETE_SENTINEL, MAX_INPUT_COMMANDS, WIRE_VERSION};
pub use protocol::{Protocol, ProtocolError, ProtocolPlugin};
pub use transport::{error::TransportError, PacketReceiver, PacketSender};
pub use world::{
    component::{
        component_codec::{ComponentChange, ComponentCodec},
        component_kinds::{ComponentKind, ComponentKinds, NetId, MAX_COMPONENT_KINDS},
        component_mask::{ComponentMask, ComponentMaskIter},
        error::ComponentError,
        replicate::{ReplicaDyn, Replicate},
    },
    entity::{
        error::NetEntityError,
        net_entity::NetEntity,
        net_entity_allocator::{NetEntityAllocator, MAX_NET_ENTITY},
    },
    host::{dirty_masks::DirtyMasks, error::HostWorldError, host_world_writer::HostWorldWriter},
    remote::{
        entity_event::EntityEvent,
        error::{ProtocolDesyncError, RemoteWorldError},
        remote_world_reader::RemoteWorldReader,
    },
    snapshot_store::SnapshotStore,
    world_type::{WorldMutType, WorldRefType},
};
