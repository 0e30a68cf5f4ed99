use thiserror::Error;

use crate::world::entity::net_entity::NetEntity;

/// Errors that can occur while allocating or binding net entity ids
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NetEntityError {
    /// Every allocatable id is bound and the free list is empty
    #[error("Net entity id space exhausted: all {capacity} ids are in use and none have been released")]
    IdSpaceExhausted { capacity: usize },

    /// Attempted to bind a net entity id that is already bound
    #[error("Net entity {net_entity} is already bound to entity {entity}")]
    DuplicateNetEntity { net_entity: NetEntity, entity: String },

    /// Attempted to bind an entity that already holds a different id
    #[error("Entity {entity} is already bound to net entity {existing}, cannot also bind {requested}")]
    DuplicateEntityBinding {
        entity: String,
        existing: NetEntity,
        requested: NetEntity,
    },

    /// Attempted to network an entity that already holds an id
    #[error("Entity {entity} is already networked as net entity {existing}")]
    AlreadyNetworked { entity: String, existing: NetEntity },

    /// Attempted to release or resolve a net entity id that is not bound
    #[error("Net entity {net_entity} is not bound to any entity")]
    NotBound { net_entity: NetEntity },

    /// Attempted to look up the id of an entity that was never networked
    #[error("Entity {entity} has no net entity id. Must spawn or promote it through the Server first")]
    EntityNotNetworked { entity: String },
}
