use thiserror::Error;

use crate::world::component::error::ComponentError;

/// Errors that can occur during protocol operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// Protocol is locked and cannot be modified
    #[error("Protocol is already locked and cannot be modified. Protocol.lock() has been called and no further changes are allowed")]
    AlreadyLocked,

    /// A component could not be registered
    #[error("Component registration failed: {0}")]
    Component(#[from] ComponentError),
}
