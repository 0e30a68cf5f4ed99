/// Generational entity/component store for E2E testing.
///
/// Despawning bumps the slot's generation, so stale handles stop being valid
/// even after their slot is reused.

use std::collections::HashMap;

use deltasync_shared::{ComponentKind, ReplicaDyn, Replicate, WorldMutType, WorldRefType};

// TestEntity - slot index plus generation
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct TestEntity {
    index: u32,
    generation: u32,
}

impl TestEntity {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

struct Slot {
    generation: u32,
    components: Option<HashMap<ComponentKind, Box<dyn ReplicaDyn>>>,
}

// TestWorld
#[derive(Default)]
pub struct TestWorld {
    slots: Vec<Slot>,
    free_slots: Vec<u32>,
    flush_count: usize,
}

impl TestWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the replication layer flushed reactive hooks
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    pub fn entity_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.components.is_some())
            .count()
    }

    fn components(&self, entity: &TestEntity) -> Option<&HashMap<ComponentKind, Box<dyn ReplicaDyn>>> {
        let slot = self.slots.get(entity.index as usize)?;
        if slot.generation != entity.generation {
            return None;
        }
        slot.components.as_ref()
    }

    fn components_mut(
        &mut self,
        entity: &TestEntity,
    ) -> Option<&mut HashMap<ComponentKind, Box<dyn ReplicaDyn>>> {
        let slot = self.slots.get_mut(entity.index as usize)?;
        if slot.generation != entity.generation {
            return None;
        }
        slot.components.as_mut()
    }
}

// WorldRefType implementation
impl WorldRefType<TestEntity> for TestWorld {
    fn has_entity(&self, entity: &TestEntity) -> bool {
        self.components(entity).is_some()
    }

    fn entities(&self) -> Vec<TestEntity> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.components.is_some())
            .map(|(index, slot)| TestEntity {
                index: index as u32,
                generation: slot.generation,
            })
            .collect()
    }

    fn has_component<R: Replicate>(&self, entity: &TestEntity) -> bool {
        self.has_component_of_kind(entity, &ComponentKind::of::<R>())
    }

    fn has_component_of_kind(&self, entity: &TestEntity, component_kind: &ComponentKind) -> bool {
        self.components(entity)
            .map_or(false, |components| components.contains_key(component_kind))
    }

    fn component<R: Replicate>(&self, entity: &TestEntity) -> Option<&R> {
        self.component_of_kind(entity, &ComponentKind::of::<R>())?
            .downcast_ref::<R>()
    }

    fn component_of_kind(
        &self,
        entity: &TestEntity,
        component_kind: &ComponentKind,
    ) -> Option<&dyn ReplicaDyn> {
        self.components(entity)?
            .get(component_kind)
            .map(|component| &**component)
    }

    fn component_kinds(&self, entity: &TestEntity) -> Vec<ComponentKind> {
        self.components(entity)
            .map(|components| components.keys().copied().collect())
            .unwrap_or_default()
    }
}

// WorldMutType implementation
impl WorldMutType<TestEntity> for TestWorld {
    fn spawn_entity(&mut self) -> TestEntity {
        if let Some(index) = self.free_slots.pop() {
            let slot = &mut self.slots[index as usize];
            slot.components = Some(HashMap::new());
            return TestEntity {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            components: Some(HashMap::new()),
        });
        TestEntity {
            index,
            generation: 0,
        }
    }

    fn despawn_entity(&mut self, entity: &TestEntity) {
        if self.components(entity).is_none() {
            return;
        }
        let slot = &mut self.slots[entity.index as usize];
        slot.components = None;
        slot.generation += 1;
        self.free_slots.push(entity.index);
    }

    fn component_mut<R: Replicate>(&mut self, entity: &TestEntity) -> Option<&mut R> {
        self.component_mut_of_kind(entity, &ComponentKind::of::<R>())?
            .downcast_mut::<R>()
    }

    fn component_mut_of_kind(
        &mut self,
        entity: &TestEntity,
        component_kind: &ComponentKind,
    ) -> Option<&mut dyn ReplicaDyn> {
        self.components_mut(entity)?
            .get_mut(component_kind)
            .map(|component| &mut **component)
    }

    fn insert_component<R: Replicate>(&mut self, entity: &TestEntity, component: R) {
        self.insert_boxed_component(entity, Box::new(component));
    }

    fn insert_boxed_component(&mut self, entity: &TestEntity, boxed_component: Box<dyn ReplicaDyn>) {
        if let Some(components) = self.components_mut(entity) {
            components.insert(boxed_component.kind(), boxed_component);
        }
    }

    fn remove_component<R: Replicate>(&mut self, entity: &TestEntity) -> Option<R> {
        self.remove_component_of_kind(entity, &ComponentKind::of::<R>())?
            .downcast::<R>()
    }

    fn remove_component_of_kind(
        &mut self,
        entity: &TestEntity,
        component_kind: &ComponentKind,
    ) -> Option<Box<dyn ReplicaDyn>> {
        self.components_mut(entity)?.remove(component_kind)
    }

    fn flush_reactive(&mut self) {
        self.flush_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_protocol::Health;

    #[test]
    fn stale_handles_are_invalid_after_slot_reuse() {
        let mut world = TestWorld::new();
        let first = world.spawn_entity();
        world.insert_component(&first, Health(1));
        world.despawn_entity(&first);

        let second = world.spawn_entity();
        assert_eq!(second.index(), first.index());
        assert_ne!(second, first);
        assert!(!world.has_entity(&first));
        assert!(world.has_entity(&second));
        assert!(!world.has_component::<Health>(&second));
        assert_eq!(world.entity_count(), 1);
    }
}
