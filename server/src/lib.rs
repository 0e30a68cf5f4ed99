//! # Deltasync Server
//! The sending side of deltasync: assigns net entity ids to replicated
//! entities and streams per-User component deltas to connected Users, to whom
//! those entities are in scope.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use deltasync_shared::{
        ByteReader, ByteWrite, ByteWriter, ComponentKind, ComponentKinds, ComponentMask,
        NetEntity, PacketReceiver, PacketSender, Protocol, ReplicaDyn, Replicate, Serde,
        SerdeErr, WorldMutType, WorldRefType,
    };
}

cfg_if::cfg_if! {
    if #[cfg(feature = "transport_local")] {
        pub use deltasync_shared::LocalTransport;
    }
}

mod error;
mod events;
mod server;
mod user;

pub use error::ServerError;
pub use events::ServerEvent;
pub use server::{Server, ServerConfig};
pub use user::UserKey;
