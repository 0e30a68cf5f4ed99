use crate::world::component::{component_kinds::ComponentKind, replicate::ReplicaDyn};

// ECS Lifecycle Events, in the order the update stream produced them
#[derive(Debug)]
pub enum EntityEvent<E> {
    Spawn(E),
    Despawn(E),
    InsertComponent(E, ComponentKind),
    UpdateComponent(E, ComponentKind),
    RemoveComponent(E, Box<dyn ReplicaDyn>),
}

impl<E: Copy> EntityEvent<E> {
    pub fn entity(&self) -> E {
        match self {
            Self::Spawn(entity) => *entity,
            Self::Despawn(entity) => *entity,
            Self::InsertComponent(entity, _) => *entity,
            Self::UpdateComponent(entity, _) => *entity,
            Self::RemoveComponent(entity, _) => *entity,
        }
    }

    pub fn component_kind(&self) -> Option<ComponentKind> {
        match self {
            Self::Spawn(_) | Self::Despawn(_) => None,
            Self::InsertComponent(_, kind) | Self::UpdateComponent(_, kind) => Some(*kind),
            Self::RemoveComponent(_, component) => Some(component.kind()),
        }
    }
}
