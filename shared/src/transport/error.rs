use thiserror::Error;

/// Errors that can occur while moving packets between peers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The remote end of the connection is gone
    #[error("Transport is disconnected. The remote end closed the connection")]
    Disconnected,

    /// A shared packet queue was poisoned by a panicking thread
    #[error("Packet queue lock poisoned while {operation}. A thread panicked while holding the queue")]
    QueuePoisoned { operation: &'static str },
}
