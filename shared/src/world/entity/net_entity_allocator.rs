use std::{collections::HashMap, fmt::Debug, hash::Hash};

use crate::world::entity::{error::NetEntityError, net_entity::NetEntity};

/// Ids `0..MAX_NET_ENTITY` can be handed out; `u16::MAX` is never allocated
pub const MAX_NET_ENTITY: u16 = u16::MAX;

/// Maps local entity handles to wire-visible [`NetEntity`] ids and back.
///
/// Released ids are reused most-recently-freed first, keeping the live range
/// compact. Only ids this allocator issued are recycled: an id bound from
/// inbound data is just unbound on release.
pub struct NetEntityAllocator<E: Copy + Eq + Hash> {
    next_id: u16,
    free_list: Vec<NetEntity>,
    net_to_entity: HashMap<NetEntity, E>,
    entity_to_net: HashMap<E, NetEntity>,
}

impl<E: Copy + Eq + Hash + Debug> Default for NetEntityAllocator<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Copy + Eq + Hash + Debug> NetEntityAllocator<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            free_list: Vec::new(),
            net_to_entity: HashMap::new(),
            entity_to_net: HashMap::new(),
        }
    }

    /// Hands out an unbound id. The caller is expected to `bind` it.
    pub fn allocate(&mut self) -> Result<NetEntity, NetEntityError> {
        if let Some(net_entity) = self.free_list.pop() {
            return Ok(net_entity);
        }

        while self.next_id < MAX_NET_ENTITY {
            let net_entity = NetEntity::new(self.next_id);
            self.next_id += 1;
            // an explicit bind may already have claimed ids above the high-water mark
            if !self.net_to_entity.contains_key(&net_entity) {
                return Ok(net_entity);
            }
        }

        Err(NetEntityError::IdSpaceExhausted {
            capacity: MAX_NET_ENTITY as usize,
        })
    }

    /// Allocates an id and binds it to `entity` in one step
    pub fn allocate_and_bind(&mut self, entity: E) -> Result<NetEntity, NetEntityError> {
        if let Some(existing) = self.entity_to_net.get(&entity) {
            return Err(NetEntityError::AlreadyNetworked {
                entity: format!("{:?}", entity),
                existing: *existing,
            });
        }
        let net_entity = self.allocate()?;
        self.bind(net_entity, entity)?;
        Ok(net_entity)
    }

    pub fn bind(&mut self, net_entity: NetEntity, entity: E) -> Result<(), NetEntityError> {
        if let Some(bound_entity) = self.net_to_entity.get(&net_entity) {
            return Err(NetEntityError::DuplicateNetEntity {
                net_entity,
                entity: format!("{:?}", bound_entity),
            });
        }
        if let Some(existing) = self.entity_to_net.get(&entity) {
            return Err(NetEntityError::DuplicateEntityBinding {
                entity: format!("{:?}", entity),
                existing: *existing,
                requested: net_entity,
            });
        }

        // a bound id must not be handed out again
        if let Some(position) = self.free_list.iter().position(|free| *free == net_entity) {
            self.free_list.remove(position);
        }

        self.net_to_entity.insert(net_entity, entity);
        self.entity_to_net.insert(entity, net_entity);
        Ok(())
    }

    /// Removes both directions of the mapping, returning the entity the id was bound to
    pub fn release(&mut self, net_entity: NetEntity) -> Result<E, NetEntityError> {
        let entity = self
            .net_to_entity
            .remove(&net_entity)
            .ok_or(NetEntityError::NotBound { net_entity })?;
        self.entity_to_net.remove(&entity);

        if net_entity.value() < self.next_id {
            self.free_list.push(net_entity);
        }
        Ok(entity)
    }

    pub fn release_entity(&mut self, entity: &E) -> Result<NetEntity, NetEntityError> {
        let net_entity = self
            .resolve_reverse(entity)
            .ok_or_else(|| NetEntityError::EntityNotNetworked {
                entity: format!("{:?}", entity),
            })?;
        self.release(net_entity)?;
        Ok(net_entity)
    }

    pub fn resolve(&self, net_entity: &NetEntity) -> Option<E> {
        self.net_to_entity.get(net_entity).copied()
    }

    pub fn resolve_reverse(&self, entity: &E) -> Option<NetEntity> {
        self.entity_to_net.get(entity).copied()
    }

    pub fn contains_net_entity(&self, net_entity: &NetEntity) -> bool {
        self.net_to_entity.contains_key(net_entity)
    }

    pub fn contains_entity(&self, entity: &E) -> bool {
        self.entity_to_net.contains_key(entity)
    }

    /// All bound (entity, net entity) pairs, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (E, NetEntity)> + '_ {
        self.entity_to_net.iter().map(|(entity, net)| (*entity, *net))
    }

    pub fn entities(&self) -> Vec<E> {
        self.entity_to_net.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.net_to_entity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.net_to_entity.is_empty()
    }

    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }
}
