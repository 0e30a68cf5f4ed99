//! # Deltasync Client
//! The receiving side of deltasync: applies the Server's update streams to a
//! local entity store, keeping net entity ids mapped to local entities, and
//! sends queued input commands back.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use deltasync_shared::{
        ByteReader, ByteWrite, ByteWriter, ComponentKind, ComponentKinds, EntityEvent,
        NetEntity, PacketReceiver, PacketSender, Protocol, ReplicaDyn, Replicate, Serde,
        SerdeErr, WorldMutType, WorldRefType,
    };
}

cfg_if::cfg_if! {
    if #[cfg(feature = "transport_local")] {
        pub use deltasync_shared::LocalTransport;
    }
}

mod client;
mod client_config;
mod error;

pub use client::Client;
pub use client_config::ClientConfig;
pub use deltasync_shared::EntityEvent;
pub use error::ClientError;
