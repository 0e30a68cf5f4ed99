use thiserror::Error;

use deltasync_serde::SerdeErr;

use crate::world::{component::error::ComponentError, remote::error::ProtocolDesyncError};

/// Errors that can occur while writing an update stream for one connection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostWorldError {
    /// Local entity state is inconsistent with what is being replicated
    #[error("Protocol desync: {0}")]
    Desync(#[from] ProtocolDesyncError),

    /// A visible component id is not registered
    #[error("Component lookup failed: {0}")]
    Component(#[from] ComponentError),

    /// Patching a reserved count failed
    #[error("Failed to patch update stream: {0}")]
    Serde(#[from] SerdeErr),
}
