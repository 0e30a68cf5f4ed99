use std::{collections::HashMap, hash::Hash, mem};

use crate::world::component::{component_kinds::NetId, component_mask::ComponentMask};

/// One entity relayed to a peer, and which of its Components are visible there
#[derive(Clone)]
pub struct ScopeEntry<E> {
    entity: E,
    visible: ComponentMask,
    // visible components the peer has not been sent since they became visible
    pending: ComponentMask,
    // components the peer holds after the last delivered record
    sent: ComponentMask,
}

impl<E: Copy> ScopeEntry<E> {
    fn new(entity: E, visible: ComponentMask) -> Self {
        Self {
            entity,
            pending: visible.clone(),
            visible,
            sent: ComponentMask::new(),
        }
    }

    pub fn entity(&self) -> E {
        self.entity
    }

    pub fn visible(&self) -> &ComponentMask {
        &self.visible
    }

    pub fn pending(&self) -> &ComponentMask {
        &self.pending
    }

    /// Components the peer currently holds for this entity, hidden ones included
    pub fn sent(&self) -> &ComponentMask {
        &self.sent
    }

    /// Whether the peer currently has this entity
    pub fn is_announced(&self) -> bool {
        !self.sent.is_empty()
    }

    pub(crate) fn take_pending(&mut self) -> ComponentMask {
        mem::take(&mut self.pending)
    }

    pub(crate) fn set_sent(&mut self, sent: ComponentMask) {
        self.sent = sent;
    }

    /// The peer dropped the entity. Everything visible is sent again once it
    /// comes back.
    pub(crate) fn forget_peer(&mut self) {
        self.sent.clear();
        self.pending = self.visible.clone();
    }

    fn resend_visible(&mut self) {
        self.pending = self.visible.clone();
    }
}

/// The ordered set of entities relayed over one connection.
///
/// Iteration follows insertion order, which is also the order records are
/// written in.
#[derive(Clone)]
pub struct EntityScope<E> {
    entries: Vec<ScopeEntry<E>>,
    index: HashMap<E, usize>,
}

impl<E: Copy + Eq + Hash> Default for EntityScope<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<E: Copy + Eq + Hash> EntityScope<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `entity` with the given visible Components. Adding an entity that
    /// is already in scope does nothing and returns false.
    pub fn add_entity(&mut self, entity: E, visible: ComponentMask) -> bool {
        if self.index.contains_key(&entity) {
            return false;
        }
        self.index.insert(entity, self.entries.len());
        self.entries.push(ScopeEntry::new(entity, visible));
        true
    }

    /// Returns false if the entity is not in scope
    pub fn sync_component(&mut self, entity: &E, net_id: NetId) -> bool {
        let Some(entry) = self.get_mut(entity) else {
            return false;
        };
        if entry.visible.insert(net_id) {
            entry.pending.insert(net_id);
        }
        true
    }

    /// Returns false if the entity is not in scope
    pub fn sync_components(&mut self, entity: &E, mask: &ComponentMask) -> bool {
        let Some(entry) = self.get_mut(entity) else {
            return false;
        };
        let widened = mask.difference(&entry.visible);
        entry.visible.union_with(mask);
        entry.pending.union_with(&widened);
        true
    }

    /// Returns false if the entity is not in scope
    pub fn unsync_component(&mut self, entity: &E, net_id: NetId) -> bool {
        let Some(entry) = self.get_mut(entity) else {
            return false;
        };
        entry.visible.remove(net_id);
        entry.pending.remove(net_id);
        true
    }

    /// Marks every visible Component of every entity as not yet sent, so the
    /// next stream carries full visible state again. Used when a stream never
    /// reached the peer.
    pub fn resend_visible(&mut self) {
        for entry in &mut self.entries {
            entry.resend_visible();
        }
    }

    /// Drops the entity from this scope without emitting anything to the peer
    pub fn remove_entity(&mut self, entity: &E) -> Option<ScopeEntry<E>> {
        let position = self.index.remove(entity)?;
        let entry = self.entries.remove(position);
        for later in &self.entries[position..] {
            if let Some(slot) = self.index.get_mut(&later.entity) {
                *slot -= 1;
            }
        }
        Some(entry)
    }

    pub fn contains(&self, entity: &E) -> bool {
        self.index.contains_key(entity)
    }

    pub fn get(&self, entity: &E) -> Option<&ScopeEntry<E>> {
        self.entries.get(*self.index.get(entity)?)
    }

    fn get_mut(&mut self, entity: &E) -> Option<&mut ScopeEntry<E>> {
        let position = *self.index.get(entity)?;
        self.entries.get_mut(position)
    }

    pub(crate) fn entry_at_mut(&mut self, position: usize) -> Option<&mut ScopeEntry<E>> {
        self.entries.get_mut(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScopeEntry<E>> {
        self.entries.iter()
    }

    pub fn entities(&self) -> Vec<E> {
        self.entries.iter().map(|entry| entry.entity).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
