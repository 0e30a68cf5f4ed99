use std::{collections::BTreeMap, fmt::Debug, hash::Hash};

use log::{debug, error, info, warn};

use deltasync_shared::{
    ByteReader, ByteWriter, ComponentKinds, ComponentMask, DirtyMasks, EntityScope,
    HostWorldWriter, InputBuffer, NetEntity, NetEntityAllocator, NetEntityError, PacketReceiver,
    PacketSender, Protocol, Replicate, SnapshotStore, TransportError, WorldMutType, WorldRefType,
};

use crate::{
    error::ServerError,
    events::ServerEvent,
    user::{User, UserKey},
    ServerConfig,
};

/// The sending side of replication: assigns net entity ids to entities,
/// keeps the last-sent snapshot of every replicated component and streams
/// per-User deltas to connected Users
pub struct Server<E: Copy + Eq + Hash + Debug + Send + Sync> {
    server_config: ServerConfig,
    protocol: Protocol,
    allocator: NetEntityAllocator<E>,
    snapshots: SnapshotStore<E>,
    users: BTreeMap<UserKey, User<E>>,
    next_user_key: u64,
}

impl<E: Copy + Eq + Hash + Debug + Send + Sync> Server<E> {
    /// Create a new Server
    pub fn new<P: Into<Protocol>>(server_config: ServerConfig, protocol: P) -> Self {
        let mut protocol: Protocol = protocol.into();
        if !protocol.is_locked() {
            protocol.lock();
        }

        Self {
            server_config,
            protocol,
            allocator: NetEntityAllocator::new(),
            snapshots: SnapshotStore::new(),
            users: BTreeMap::new(),
            next_user_key: 0,
        }
    }

    pub fn protocol(&self) -> &Protocol {
        &self.protocol
    }

    pub fn component_kinds(&self) -> &ComponentKinds {
        &self.protocol.component_kinds
    }

    // Users

    /// Registers a new User reachable over the given packet channels
    pub fn connect(
        &mut self,
        sender: Box<dyn PacketSender>,
        receiver: Box<dyn PacketReceiver>,
    ) -> UserKey {
        let user_key = UserKey::new(self.next_user_key);
        self.next_user_key += 1;
        self.users.insert(user_key, User::new(sender, receiver));
        info!("{} connected", user_key);
        user_key
    }

    /// Removes the User. Entities it had in scope are left untouched.
    pub fn disconnect(&mut self, user_key: &UserKey) -> bool {
        if self.users.remove(user_key).is_some() {
            info!("{} disconnected", user_key);
            true
        } else {
            false
        }
    }

    pub fn user_exists(&self, user_key: &UserKey) -> bool {
        self.users.contains_key(user_key)
    }

    pub fn user_keys(&self) -> Vec<UserKey> {
        self.users.keys().copied().collect()
    }

    pub fn users_count(&self) -> usize {
        self.users.len()
    }

    pub fn user_scope(&self, user_key: &UserKey) -> Option<&EntityScope<E>> {
        self.users.get(user_key).map(|user| user.scope())
    }

    /// Returns and clears the input commands received from the User so far
    pub fn take_user_input(&mut self, user_key: &UserKey) -> Result<Vec<u8>, ServerError> {
        Ok(self.user_mut(user_key)?.take_input())
    }

    // Entities

    /// Creates an entity in `world` and makes it replicable
    pub fn spawn_entity<W: WorldMutType<E>>(&mut self, world: &mut W) -> Result<E, ServerError> {
        let entity = world.spawn_entity();
        if let Err(error) = self.promote_entity(world, &entity) {
            world.despawn_entity(&entity);
            return Err(error);
        }
        Ok(entity)
    }

    /// Gives an existing entity a net entity id, attached to it as a
    /// [`NetEntity`] component
    pub fn promote_entity<W: WorldMutType<E>>(
        &mut self,
        world: &mut W,
        entity: &E,
    ) -> Result<NetEntity, ServerError> {
        let net_entity = self.allocator.allocate_and_bind(*entity)?;
        world.insert_component(entity, net_entity);
        debug!("entity {:?} is now net entity {}", entity, net_entity);
        Ok(net_entity)
    }

    pub fn net_entity(&self, entity: &E) -> Option<NetEntity> {
        self.allocator.resolve_reverse(entity)
    }

    pub fn entity(&self, net_entity: &NetEntity) -> Option<E> {
        self.allocator.resolve(net_entity)
    }

    // Scope

    /// Starts relaying `entity` to the User, limited to the Components in
    /// `visible`. Returns false if the entity was already in scope.
    pub fn user_add_entity(
        &mut self,
        user_key: &UserKey,
        entity: &E,
        visible: ComponentMask,
    ) -> Result<bool, ServerError> {
        if !self.allocator.contains_entity(entity) {
            return Err(NetEntityError::EntityNotNetworked {
                entity: format!("{:?}", entity),
            }
            .into());
        }
        Ok(self.user_mut(user_key)?.scope_mut().add_entity(*entity, visible))
    }

    /// Makes Component `R` of `entity` visible to the User. Its current
    /// value is sent on the next pass even if it did not change.
    pub fn user_sync_component<R: Replicate>(
        &mut self,
        user_key: &UserKey,
        entity: &E,
    ) -> Result<(), ServerError> {
        let net_id = self.protocol.component_kinds.net_id_of::<R>()?;
        let user = self.user_mut(user_key)?;
        if user.scope_mut().sync_component(entity, net_id) {
            Ok(())
        } else {
            Err(Self::not_in_scope(user_key, entity))
        }
    }

    pub fn user_sync_components(
        &mut self,
        user_key: &UserKey,
        entity: &E,
        components: &ComponentMask,
    ) -> Result<(), ServerError> {
        let user = self.user_mut(user_key)?;
        if user.scope_mut().sync_components(entity, components) {
            Ok(())
        } else {
            Err(Self::not_in_scope(user_key, entity))
        }
    }

    /// Stops relaying Component `R` of `entity`. The User keeps the last
    /// value it received.
    pub fn user_unsync_component<R: Replicate>(
        &mut self,
        user_key: &UserKey,
        entity: &E,
    ) -> Result<(), ServerError> {
        let net_id = self.protocol.component_kinds.net_id_of::<R>()?;
        let user = self.user_mut(user_key)?;
        if user.scope_mut().unsync_component(entity, net_id) {
            Ok(())
        } else {
            Err(Self::not_in_scope(user_key, entity))
        }
    }

    // Sending

    /// Runs one send pass: writes and sends an update stream to every User,
    /// then commits snapshots and releases the ids of despawned entities.
    ///
    /// Users whose stream could not be written or sent are reported in the
    /// returned events. A User that stays connected after such a failure gets
    /// its full visible state again on the next pass.
    pub fn send_all_updates<W: WorldRefType<E>>(&mut self, world: &W) -> Vec<ServerEvent> {
        let component_kinds = &self.protocol.component_kinds;
        let dirty_masks =
            DirtyMasks::collect(component_kinds, &self.allocator, world, &self.snapshots);

        let mut events = Vec::new();
        let mut closed: Vec<(UserKey, ServerError)> = Vec::new();

        for (user_key, user) in self.users.iter_mut() {
            // the scope only advances once the peer has the stream
            let mut next_scope = user.scope().clone();
            let mut writer = ByteWriter::new();
            let written = HostWorldWriter::write_updates(
                component_kinds,
                world,
                &self.allocator,
                &dirty_masks,
                &mut next_scope,
                &mut writer,
            );

            let error: ServerError = match written {
                Ok(_) => match user.connection().send(writer.as_slice()) {
                    Ok(()) => {
                        *user.scope_mut() = next_scope;
                        continue;
                    }
                    Err(error) => {
                        warn!("failed to send update stream to {}: {}", user_key, error);
                        if error == TransportError::Disconnected {
                            closed.push((*user_key, error.into()));
                            continue;
                        }
                        error.into()
                    }
                },
                Err(error) => {
                    error!("failed to write update stream for {}: {}", user_key, error);
                    if self.server_config.close_on_desync {
                        closed.push((*user_key, error.into()));
                        continue;
                    }
                    error.into()
                }
            };

            user.scope_mut().resend_visible();
            events.push(ServerEvent::Error(*user_key, error));
        }

        for (user_key, error) in closed {
            self.users.remove(&user_key);
            info!("{} disconnected: {}", user_key, error);
            events.push(ServerEvent::Disconnected(user_key, error));
        }

        self.update_snapshots(world);
        self.release_despawned(world);

        events
    }

    /// Mirrors the current value of every replicated Component into the
    /// snapshot store, so that it no longer counts as changed
    pub fn update_snapshots<W: WorldRefType<E>>(&mut self, world: &W) {
        for (entity, _) in self.allocator.iter() {
            if !world.has_entity(&entity) {
                continue;
            }
            for codec in self.protocol.component_kinds.iter() {
                codec.update_snapshot(world, &mut self.snapshots, &entity);
            }
        }
    }

    // An id stays bound while any User still owes its peer the deletion record
    fn release_despawned<W: WorldRefType<E>>(&mut self, world: &W) {
        let despawned: Vec<E> = self
            .allocator
            .entities()
            .into_iter()
            .filter(|entity| !world.has_entity(entity))
            .filter(|entity| !self.users.values().any(|user| user.scope().contains(entity)))
            .collect();

        for entity in despawned {
            if let Ok(net_entity) = self.allocator.release_entity(&entity) {
                debug!("released net entity {} of despawned entity {:?}", net_entity, entity);
            }
            self.snapshots.remove_entity(&entity);
        }
    }

    // Receiving

    /// Drains every User's inbound packets into its input buffer
    pub fn receive_input(&mut self) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        let mut closed: Vec<(UserKey, ServerError)> = Vec::new();

        for (user_key, user) in self.users.iter_mut() {
            loop {
                match user.connection_mut().receive() {
                    Ok(Some(packet)) => match Self::read_input(&packet) {
                        Ok(commands) => {
                            let dropped =
                                user.push_input(&commands, self.server_config.max_buffered_input);
                            if dropped > 0 {
                                warn!(
                                    "input buffer of {} is full, dropped {} oldest commands",
                                    user_key, dropped
                                );
                            }
                        }
                        Err(error) => {
                            warn!("dropping input packet from {}: {}", user_key, error);
                            events.push(ServerEvent::Error(*user_key, error));
                        }
                    },
                    Ok(None) => break,
                    Err(error) => {
                        closed.push((*user_key, error.into()));
                        break;
                    }
                }
            }
        }

        for (user_key, error) in closed {
            self.users.remove(&user_key);
            info!("{} disconnected: {}", user_key, error);
            events.push(ServerEvent::Disconnected(user_key, error));
        }

        events
    }

    fn read_input(packet: &[u8]) -> Result<Vec<u8>, ServerError> {
        let mut reader = ByteReader::new(packet);
        let commands = InputBuffer::read(&mut reader)?;
        if !reader.is_empty() {
            return Err(ServerError::TrailingInput {
                remaining: reader.remaining(),
            });
        }
        Ok(commands)
    }

    fn user_mut(&mut self, user_key: &UserKey) -> Result<&mut User<E>, ServerError> {
        self.users
            .get_mut(user_key)
            .ok_or(ServerError::UserNotFound {
                user_key: *user_key,
            })
    }

    fn not_in_scope(user_key: &UserKey, entity: &E) -> ServerError {
        ServerError::EntityNotInScope {
            user_key: *user_key,
            entity: format!("{:?}", entity),
        }
    }
}
