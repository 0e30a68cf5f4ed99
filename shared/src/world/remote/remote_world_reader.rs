use std::{fmt::Debug, hash::Hash};

use log::{debug, warn};

use deltasync_serde::{ByteReader, Serde};

use crate::{
    constants::DELETE_SENTINEL,
    world::{
        component::{component_codec::ComponentChange, component_kinds::ComponentKinds},
        entity::{net_entity::NetEntity, net_entity_allocator::NetEntityAllocator},
        remote::{
            entity_event::EntityEvent,
            error::{ProtocolDesyncError, RemoteWorldError},
        },
        world_type::WorldMutType,
    },
};

pub struct RemoteWorldReader;

impl RemoteWorldReader {
    /// Applies one update stream to `world`, pushing lifecycle events in the
    /// order they happened. Returns how many records were read.
    ///
    /// Records applied before an error stay applied, and so do their events.
    pub fn read_updates<E: Copy + Eq + Hash + Debug, W: WorldMutType<E>>(
        component_kinds: &ComponentKinds,
        allocator: &mut NetEntityAllocator<E>,
        world: &mut W,
        reader: &mut ByteReader,
        events: &mut Vec<EntityEvent<E>>,
    ) -> Result<u32, RemoteWorldError> {
        let record_count = u32::de(reader)?;

        for _ in 0..record_count {
            Self::read_record(component_kinds, allocator, world, reader, events)?;
        }

        if !reader.is_empty() {
            return Err(ProtocolDesyncError::TrailingBytes {
                remaining: reader.remaining(),
            }
            .into());
        }

        debug!("read {} entity records", record_count);

        Ok(record_count)
    }

    fn read_record<E: Copy + Eq + Hash + Debug, W: WorldMutType<E>>(
        component_kinds: &ComponentKinds,
        allocator: &mut NetEntityAllocator<E>,
        world: &mut W,
        reader: &mut ByteReader,
        events: &mut Vec<EntityEvent<E>>,
    ) -> Result<(), RemoteWorldError> {
        let net_entity = NetEntity::de(reader)?;
        let component_count = i16::de(reader)?;

        let local_entity = allocator.resolve(&net_entity);
        if let Some(entity) = local_entity {
            Self::check_binding(world, net_entity, &entity)?;
        }

        if component_count == DELETE_SENTINEL {
            match local_entity {
                Some(entity) => {
                    world.despawn_entity(&entity);
                    allocator
                        .release(net_entity)
                        .map_err(ProtocolDesyncError::from)?;
                    events.push(EntityEvent::Despawn(entity));
                }
                None => {
                    warn!("deletion record for unknown net entity {}, ignoring", net_entity);
                }
            }
            return Ok(());
        }

        if component_count == 0 {
            return Err(ProtocolDesyncError::EmptyRecord {
                net_entity,
                entity: Self::describe(local_entity),
            }
            .into());
        }

        if component_count < DELETE_SENTINEL {
            return Err(ProtocolDesyncError::InvalidComponentCount {
                net_entity,
                count: component_count,
            }
            .into());
        }

        let entity = match local_entity {
            Some(entity) => entity,
            None => {
                let entity = world.spawn_entity();
                allocator
                    .bind(net_entity, entity)
                    .map_err(ProtocolDesyncError::from)?;
                world.insert_component(&entity, net_entity);
                events.push(EntityEvent::Spawn(entity));
                entity
            }
        };

        for _ in 0..component_count {
            let component_id = u16::de(reader)?;
            let codec = component_kinds.codec(component_id).map_err(|_| {
                ProtocolDesyncError::UnknownComponent {
                    net_entity,
                    entity: format!("{:?}", entity),
                    component_id,
                }
            })?;

            match codec.deserialize(world, &entity, reader)? {
                ComponentChange::Inserted => {
                    events.push(EntityEvent::InsertComponent(entity, codec.kind()));
                }
                ComponentChange::Updated => {
                    events.push(EntityEvent::UpdateComponent(entity, codec.kind()));
                }
                ComponentChange::Removed(component) => {
                    events.push(EntityEvent::RemoveComponent(entity, component));
                }
                ComponentChange::Unchanged => {}
            }
        }

        if !component_kinds
            .iter()
            .any(|codec| codec.is_present(world, &entity))
        {
            return Err(ProtocolDesyncError::EmptyNetworkEntity {
                net_entity,
                entity: format!("{:?}", entity),
            }
            .into());
        }

        Ok(())
    }

    fn check_binding<E: Copy + Eq + Hash + Debug, W: WorldMutType<E>>(
        world: &W,
        net_entity: NetEntity,
        entity: &E,
    ) -> Result<(), ProtocolDesyncError> {
        let details = if !world.has_entity(entity) {
            "bound entity no longer exists in the world"
        } else {
            match world.component::<NetEntity>(entity) {
                Some(marker) if *marker == net_entity => return Ok(()),
                Some(_) => "net entity marker component holds another id",
                None => "net entity marker component is missing",
            }
        };
        Err(ProtocolDesyncError::MappingDesync {
            net_entity: Some(net_entity),
            entity: format!("{:?}", entity),
            details,
        })
    }

    fn describe<E: Debug>(entity: Option<E>) -> String {
        match entity {
            Some(entity) => format!("{:?}", entity),
            None => "unbound".to_string(),
        }
    }
}
