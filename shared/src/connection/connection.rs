use std::hash::Hash;

use crate::{
    connection::entity_scope::EntityScope,
    transport::{error::TransportError, PacketReceiver, PacketSender},
};

/// One peer: its packet channels and the entities relayed to it
pub struct Connection<E> {
    sender: Box<dyn PacketSender>,
    receiver: Box<dyn PacketReceiver>,
    scope: EntityScope<E>,
}

impl<E: Copy + Eq + Hash> Connection<E> {
    pub fn new(sender: Box<dyn PacketSender>, receiver: Box<dyn PacketReceiver>) -> Self {
        Self {
            sender,
            receiver,
            scope: EntityScope::new(),
        }
    }

    pub fn send(&self, payload: &[u8]) -> Result<(), TransportError> {
        self.sender.send(payload)
    }

    pub fn receive(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
        self.receiver.receive()
    }

    pub fn scope(&self) -> &EntityScope<E> {
        &self.scope
    }

    pub fn scope_mut(&mut self) -> &mut EntityScope<E> {
        &mut self.scope
    }
}
