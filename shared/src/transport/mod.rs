pub mod error;

cfg_if! {
    if #[cfg(feature = "transport_local")] {
        pub mod local;
    } else {}
}

pub use inner::{PacketReceiver, PacketSender};

mod inner {

    use super::error::TransportError;

    /// Outbound half of a connection. Each call delivers one complete packet.
    pub trait PacketSender: Send + Sync {
        /// Sends a packet to the remote peer
        fn send(&self, payload: &[u8]) -> Result<(), TransportError>;
    }

    /// Inbound half of a connection. Packets arrive whole and in send order.
    pub trait PacketReceiver: Send + Sync {
        /// Receives the next packet, or `None` if nothing is waiting
        fn receive(&mut self) -> Result<Option<Vec<u8>>, TransportError>;
    }
}
