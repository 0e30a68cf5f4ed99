use thiserror::Error;

use deltasync_serde::SerdeErr;

use crate::world::entity::{error::NetEntityError, net_entity::NetEntity};

/// The two peers no longer agree on entity or component state.
///
/// None of these are recoverable within a stream: the connection that
/// produced one should be closed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolDesyncError {
    /// A record carried a component count of zero
    #[error("Record for net entity {net_entity} (entity {entity}) has a component count of 0; a record must carry components or signal deletion")]
    EmptyRecord { net_entity: NetEntity, entity: String },

    /// An entity was left without any replicated component after a record was applied
    #[error("Net entity {net_entity} (entity {entity}) has no replicated components left after applying its record")]
    EmptyNetworkEntity { net_entity: NetEntity, entity: String },

    /// The net entity id and entity handle mappings disagree with each other or with the world
    #[error("Net entity mapping desync for {net_entity:?} (entity {entity}): {details}")]
    MappingDesync {
        net_entity: Option<NetEntity>,
        entity: String,
        details: &'static str,
    },

    /// A component id on the wire is not registered locally
    #[error("Unknown component id {component_id} in record for net entity {net_entity} (entity {entity}). Protocols of both peers must register the same components in the same order")]
    UnknownComponent {
        net_entity: NetEntity,
        entity: String,
        component_id: u16,
    },

    /// A component count below the deletion sentinel
    #[error("Invalid component count {count} in record for net entity {net_entity}")]
    InvalidComponentCount { net_entity: NetEntity, count: i16 },

    /// Bytes left over after the announced number of records
    #[error("{remaining} unread bytes after the last record of the update stream")]
    TrailingBytes { remaining: usize },

    /// A net entity id could not be bound or released
    #[error("Net entity binding failed: {0}")]
    Binding(#[from] NetEntityError),
}

/// Errors that can occur while reading an update stream into the world
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteWorldError {
    /// The stream is truncated or holds a malformed value
    #[error("Malformed update stream: {0}")]
    Serde(#[from] SerdeErr),

    /// The stream is well-formed but contradicts local state
    #[error("Protocol desync: {0}")]
    Desync(#[from] ProtocolDesyncError),
}
