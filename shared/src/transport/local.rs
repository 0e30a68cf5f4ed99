//! In-memory transport: two packet queues shared by a server half and a client half

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
};

use super::{error::TransportError, PacketReceiver, PacketSender};

type PacketQueue = Arc<Mutex<VecDeque<Vec<u8>>>>;

/// A connected server/client pair of in-memory packet channels
pub struct LocalTransport {
    pub server_sender: Box<dyn PacketSender>,
    pub server_receiver: Box<dyn PacketReceiver>,
    pub client_sender: Box<dyn PacketSender>,
    pub client_receiver: Box<dyn PacketReceiver>,
    connected: Arc<AtomicBool>,
}

impl LocalTransport {
    pub fn new() -> Self {
        let server_to_client: PacketQueue = Arc::new(Mutex::new(VecDeque::new()));
        let client_to_server: PacketQueue = Arc::new(Mutex::new(VecDeque::new()));
        let connected = Arc::new(AtomicBool::new(true));

        Self {
            server_sender: Box::new(LocalSender {
                queue: server_to_client.clone(),
                connected: connected.clone(),
            }),
            server_receiver: Box::new(LocalReceiver {
                queue: client_to_server.clone(),
                connected: connected.clone(),
            }),
            client_sender: Box::new(LocalSender {
                queue: client_to_server,
                connected: connected.clone(),
            }),
            client_receiver: Box::new(LocalReceiver {
                queue: server_to_client,
                connected: connected.clone(),
            }),
            connected,
        }
    }

    /// Handle that can sever the pair after its halves were moved out
    pub fn disconnect_handle(&self) -> LocalDisconnect {
        LocalDisconnect {
            connected: self.connected.clone(),
        }
    }

    /// Severs both directions. Queued packets can still be drained.
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }
}

impl Default for LocalTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone)]
pub struct LocalDisconnect {
    connected: Arc<AtomicBool>,
}

impl LocalDisconnect {
    pub fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }
}

struct LocalSender {
    queue: PacketQueue,
    connected: Arc<AtomicBool>,
}

impl PacketSender for LocalSender {
    fn send(&self, payload: &[u8]) -> Result<(), TransportError> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(TransportError::Disconnected);
        }
        let mut queue = self
            .queue
            .lock()
            .map_err(|_| TransportError::QueuePoisoned { operation: "sending" })?;
        queue.push_back(payload.to_vec());
        Ok(())
    }
}

struct LocalReceiver {
    queue: PacketQueue,
    connected: Arc<AtomicBool>,
}

impl PacketReceiver for LocalReceiver {
    fn receive(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        let mut queue = self
            .queue
            .lock()
            .map_err(|_| TransportError::QueuePoisoned { operation: "receiving" })?;
        match queue.pop_front() {
            Some(packet) => Ok(Some(packet)),
            None if self.connected.load(Ordering::SeqCst) => Ok(None),
            None => Err(TransportError::Disconnected),
        }
    }
}
