use thiserror::Error;

use deltasync_shared::{
    ComponentError, HostWorldError, NetEntityError, SerdeErr, TransportError,
};

use crate::user::UserKey;

/// Errors that can occur in the Server
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServerError {
    /// Sending or receiving a packet failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Writing a User's update stream failed
    #[error("Failed to write update stream: {0}")]
    Write(#[from] HostWorldError),

    /// An inbound input packet could not be decoded
    #[error("Malformed input packet: {0}")]
    MalformedInput(#[from] SerdeErr),

    /// An input packet held more bytes than its command count announced
    #[error("Input packet has {remaining} bytes after its last command")]
    TrailingInput { remaining: usize },

    /// Allocating or binding a net entity id failed
    #[error("Net entity error: {0}")]
    NetEntity(#[from] NetEntityError),

    /// A component type is not part of the Protocol
    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    /// No connected User has this key
    #[error("No connected User with key {user_key:?}")]
    UserNotFound { user_key: UserKey },

    /// The entity was never added to the User's scope
    #[error("Entity {entity} is not in scope for {user_key:?}. Must call `user_add_entity()` first")]
    EntityNotInScope { user_key: UserKey, entity: String },
}
