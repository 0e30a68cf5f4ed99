use std::{collections::HashMap, fmt::Debug, hash::Hash};

use crate::world::{
    component::{component_kinds::ComponentKinds, component_mask::ComponentMask},
    entity::net_entity_allocator::NetEntityAllocator,
    snapshot_store::SnapshotStore,
    world_type::WorldRefType,
};

/// Per entity, the registered Components whose live value differs from the
/// last-sent snapshot. Entities without changes have no entry.
pub struct DirtyMasks<E: Copy + Eq + Hash> {
    masks: HashMap<E, ComponentMask>,
}

impl<E: Copy + Eq + Hash> Default for DirtyMasks<E> {
    fn default() -> Self {
        Self {
            masks: HashMap::new(),
        }
    }
}

impl<E: Copy + Eq + Hash + Debug> DirtyMasks<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compares every networked, live entity against its snapshots
    pub fn collect<W: WorldRefType<E>>(
        component_kinds: &ComponentKinds,
        allocator: &NetEntityAllocator<E>,
        world: &W,
        snapshots: &SnapshotStore<E>,
    ) -> Self {
        let mut masks = HashMap::new();
        for (entity, _) in allocator.iter() {
            if !world.has_entity(&entity) {
                continue;
            }
            let mut mask = ComponentMask::new();
            for codec in component_kinds.iter() {
                if codec.is_dirty(world, snapshots, &entity) {
                    mask.insert(codec.net_id());
                }
            }
            if !mask.is_empty() {
                masks.insert(entity, mask);
            }
        }
        Self { masks }
    }

    pub fn insert(&mut self, entity: E, mask: ComponentMask) {
        if mask.is_empty() {
            self.masks.remove(&entity);
        } else {
            self.masks.insert(entity, mask);
        }
    }

    pub fn get(&self, entity: &E) -> Option<&ComponentMask> {
        self.masks.get(entity)
    }

    pub fn is_dirty(&self, entity: &E) -> bool {
        self.masks.contains_key(entity)
    }

    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}
