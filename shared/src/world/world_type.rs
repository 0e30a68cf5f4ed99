use crate::world::component::{
    component_kinds::ComponentKind,
    replicate::{ReplicaDyn, Replicate},
};

/// Structures that implement the WorldRefType trait will be able to be loaded
/// into the Server/Client, and read from during a send pass
pub trait WorldRefType<E> {
    // Entities
    /// check whether entity exists, i.e. whether the handle is still valid
    fn has_entity(&self, entity: &E) -> bool;
    /// get a list of all entities in the World
    fn entities(&self) -> Vec<E>;

    // Components
    /// check whether entity contains component
    fn has_component<R: Replicate>(&self, entity: &E) -> bool;
    /// check whether entity contains component, dynamically
    fn has_component_of_kind(&self, entity: &E, component_kind: &ComponentKind) -> bool;
    /// gets an entity's component
    fn component<R: Replicate>(&self, entity: &E) -> Option<&R>;
    /// gets an entity's component, dynamically
    fn component_of_kind(&self, entity: &E, component_kind: &ComponentKind) -> Option<&dyn ReplicaDyn>;
    /// gets all of an entity's components, as kinds
    fn component_kinds(&self, entity: &E) -> Vec<ComponentKind>;
}

/// Structures that implement the WorldMutType trait will be able to be loaded
/// into the Client, and mutated during a receive pass
pub trait WorldMutType<E>: WorldRefType<E> {
    // Entities
    /// spawn an entity
    fn spawn_entity(&mut self) -> E;
    /// despawn an entity, invalidating its handle
    fn despawn_entity(&mut self, entity: &E);

    // Components
    /// gets an entity's component, mutably
    fn component_mut<R: Replicate>(&mut self, entity: &E) -> Option<&mut R>;
    /// gets an entity's component, mutably and dynamically
    fn component_mut_of_kind(
        &mut self,
        entity: &E,
        component_kind: &ComponentKind,
    ) -> Option<&mut dyn ReplicaDyn>;
    /// insert a component, replacing any previous value of the same kind
    fn insert_component<R: Replicate>(&mut self, entity: &E, component: R);
    /// insert a boxed component, replacing any previous value of the same kind
    fn insert_boxed_component(&mut self, entity: &E, boxed_component: Box<dyn ReplicaDyn>);
    /// remove a component
    fn remove_component<R: Replicate>(&mut self, entity: &E) -> Option<R>;
    /// remove a component by kind
    fn remove_component_of_kind(
        &mut self,
        entity: &E,
        component_kind: &ComponentKind,
    ) -> Option<Box<dyn ReplicaDyn>>;

    // Reactive hooks
    /// deliver all structural-change notifications batched since the last flush
    fn flush_reactive(&mut self);
}
