use std::{collections::HashMap, hash::Hash};

use crate::world::component::{component_kinds::ComponentKind, replicate::ReplicaDyn};

/// Last-replicated value of every (entity, Component type) pair.
///
/// One side-table per Component type, keyed by entity. A slot holding `None`
/// records that the component was absent when last replicated; for change
/// detection it reads the same as a slot that was never created.
pub struct SnapshotStore<E: Copy + Eq + Hash> {
    tables: HashMap<ComponentKind, HashMap<E, Option<Box<dyn ReplicaDyn>>>>,
}

impl<E: Copy + Eq + Hash> Default for SnapshotStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Copy + Eq + Hash> SnapshotStore<E> {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
        }
    }

    pub fn get(&self, component_kind: &ComponentKind, entity: &E) -> Option<&dyn ReplicaDyn> {
        self.tables
            .get(component_kind)?
            .get(entity)?
            .as_deref()
    }

    /// True once a snapshot slot has been created for the pair, present or not
    pub fn has_slot(&self, component_kind: &ComponentKind, entity: &E) -> bool {
        self.tables
            .get(component_kind)
            .map_or(false, |table| table.contains_key(entity))
    }

    pub fn set(
        &mut self,
        component_kind: ComponentKind,
        entity: E,
        value: Option<Box<dyn ReplicaDyn>>,
    ) {
        self.tables
            .entry(component_kind)
            .or_default()
            .insert(entity, value);
    }

    /// Drops every snapshot of `entity`; called once the entity is gone
    pub fn remove_entity(&mut self, entity: &E) {
        for table in self.tables.values_mut() {
            table.remove(entity);
        }
    }

    pub fn contains_entity(&self, entity: &E) -> bool {
        self.tables.values().any(|table| table.contains_key(entity))
    }

    pub fn clear(&mut self) {
        self.tables.clear();
    }
}
