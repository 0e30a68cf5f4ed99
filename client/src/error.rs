use thiserror::Error;

use deltasync_shared::{RemoteWorldError, TransportError};

/// Errors that can occur in the Client
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Sending or receiving a packet failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// An update stream could not be applied to the world
    #[error("Failed to read update stream: {0}")]
    Read(#[from] RemoteWorldError),

    /// The connection was closed by an earlier error
    #[error("Client is disconnected. A previous transport or protocol error closed the connection")]
    Disconnected,
}
