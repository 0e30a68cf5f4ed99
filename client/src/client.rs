use std::{fmt::Debug, hash::Hash};

use log::{error, info};

use deltasync_shared::{
    ByteReader, ByteWriter, ComponentKinds, EntityEvent, InputBuffer, NetEntity,
    NetEntityAllocator, PacketReceiver, PacketSender, Protocol, RemoteWorldReader,
    TransportError, WorldMutType,
};

use crate::{error::ClientError, ClientConfig};

/// The receiving side of replication. Mirrors the Server's replicated
/// entities into a local world and sends input commands back.
pub struct Client<E: Copy + Eq + Hash + Debug + Send + Sync> {
    client_config: ClientConfig,
    protocol: Protocol,
    allocator: NetEntityAllocator<E>,
    sender: Box<dyn PacketSender>,
    receiver: Box<dyn PacketReceiver>,
    input: InputBuffer,
    connected: bool,
}

impl<E: Copy + Eq + Hash + Debug + Send + Sync> Client<E> {
    /// Create a new Client, connected over the given packet channels
    pub fn new<P: Into<Protocol>>(
        client_config: ClientConfig,
        protocol: P,
        sender: Box<dyn PacketSender>,
        receiver: Box<dyn PacketReceiver>,
    ) -> Self {
        let mut protocol: Protocol = protocol.into();
        if !protocol.is_locked() {
            protocol.lock();
        }
        let input = InputBuffer::new(client_config.max_input_commands);

        Self {
            client_config,
            protocol,
            allocator: NetEntityAllocator::new(),
            sender,
            receiver,
            input,
            connected: true,
        }
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    pub fn component_kinds(&self) -> &ComponentKinds {
        &self.protocol.component_kinds
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    // Receiving

    /// Applies every update stream waiting in the receiver to `world`, in
    /// arrival order, appending the resulting entity events to `events`.
    /// Returns how many streams were applied.
    ///
    /// The world's reactive hooks are flushed once per stream, also when
    /// applying it fails. On failure `events` already holds the events of
    /// every change applied so far, including those of the failing stream.
    pub fn receive_updates<W: WorldMutType<E>>(
        &mut self,
        world: &mut W,
        events: &mut Vec<EntityEvent<E>>,
    ) -> Result<usize, ClientError> {
        if !self.connected {
            return Err(ClientError::Disconnected);
        }

        let mut applied = 0;
        loop {
            let packet = match self.receiver.receive() {
                Ok(Some(packet)) => packet,
                Ok(None) => break,
                Err(error) => return Err(self.close_on_transport(error)),
            };

            let mut reader = ByteReader::new(&packet);
            let read = RemoteWorldReader::read_updates(
                &self.protocol.component_kinds,
                &mut self.allocator,
                world,
                &mut reader,
                events,
            );
            world.flush_reactive();

            if let Err(error) = read {
                error!("failed to apply update stream: {}", error);
                if self.client_config.close_on_desync {
                    self.connected = false;
                    info!("connection closed after update stream error");
                }
                return Err(error.into());
            }
            applied += 1;
        }

        Ok(applied)
    }

    /// Local entity mirroring the Server's `net_entity`
    pub fn entity(&self, net_entity: &NetEntity) -> Option<E> {
        self.allocator.resolve(net_entity)
    }

    pub fn net_entity(&self, entity: &E) -> Option<NetEntity> {
        self.allocator.resolve_reverse(entity)
    }

    pub fn entities(&self) -> Vec<E> {
        self.allocator.entities()
    }

    // Input

    /// Queues one input command for the next flush. Returns false, and
    /// drops the command, if the queue is full.
    pub fn queue_input(&mut self, command: u8) -> bool {
        self.input.try_push(command)
    }

    pub fn queued_input_count(&self) -> usize {
        self.input.len()
    }

    /// Sends the queued input commands to the Server as one packet, even
    /// when none are queued
    pub fn flush_input(&mut self) -> Result<(), ClientError> {
        if !self.connected {
            return Err(ClientError::Disconnected);
        }

        let mut writer = ByteWriter::with_capacity(self.input.len() + 1);
        self.input.flush(&mut writer);
        match self.sender.send(writer.as_slice()) {
            Ok(()) => Ok(()),
            Err(error) => Err(self.close_on_transport(error)),
        }
    }

    fn close_on_transport(&mut self, error: TransportError) -> ClientError {
        if error == TransportError::Disconnected {
            self.connected = false;
            info!("connection closed: {}", error);
        }
        error.into()
    }
}
