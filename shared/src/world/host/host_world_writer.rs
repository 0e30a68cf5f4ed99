use std::{fmt::Debug, hash::Hash};

use log::debug;

use deltasync_serde::{ByteWriter, Serde};

use crate::{
    connection::entity_scope::{EntityScope, ScopeEntry},
    constants::DELETE_SENTINEL,
    world::{
        component::{component_kinds::ComponentKinds, component_mask::ComponentMask},
        entity::{net_entity::NetEntity, net_entity_allocator::NetEntityAllocator},
        host::{dirty_masks::DirtyMasks, error::HostWorldError},
        remote::error::ProtocolDesyncError,
        world_type::WorldRefType,
    },
};

/// Writes one connection's update stream:
/// `RecordCount:u32 (NetEntity:u16 ComponentCount:i16 (ComponentId:u16 Present:bool Payload?)*)*`
pub struct HostWorldWriter;

impl HostWorldWriter {
    /// Writes a record for every entity in `scope` that has something to send,
    /// in scope order, and returns how many records were written.
    ///
    /// Entities whose handle is no longer valid get a deletion record (if the
    /// peer ever saw them) and leave the scope. Their ids stay bound; releasing
    /// them is up to the caller once every connection has been written.
    pub fn write_updates<E: Copy + Eq + Hash + Debug, W: WorldRefType<E>>(
        component_kinds: &ComponentKinds,
        world: &W,
        allocator: &NetEntityAllocator<E>,
        dirty_masks: &DirtyMasks<E>,
        scope: &mut EntityScope<E>,
        writer: &mut ByteWriter,
    ) -> Result<u32, HostWorldError> {
        let count_position = writer.reserve(&0u32);
        let mut record_count: u32 = 0;
        let mut despawned = Vec::new();

        for position in 0..scope.len() {
            let Some(entry) = scope.entry_at_mut(position) else {
                break;
            };
            let entity = entry.entity();

            if !world.has_entity(&entity) {
                despawned.push(entity);
                if !entry.is_announced() {
                    continue;
                }
                let net_entity = Self::net_entity_of(allocator, &entity)?;
                net_entity.ser(writer);
                DELETE_SENTINEL.ser(writer);
                record_count += 1;
                continue;
            }

            if Self::write_record(component_kinds, world, allocator, dirty_masks, entry, writer)? {
                record_count += 1;
            }
        }

        for entity in &despawned {
            scope.remove_entity(entity);
        }

        writer.patch(count_position, &record_count)?;

        debug!(
            "wrote {} entity records ({} bytes), {} entities left scope",
            record_count,
            writer.len(),
            despawned.len()
        );

        Ok(record_count)
    }

    /// Writes one live entity's record, returning false if it had nothing to send
    fn write_record<E: Copy + Eq + Hash + Debug, W: WorldRefType<E>>(
        component_kinds: &ComponentKinds,
        world: &W,
        allocator: &NetEntityAllocator<E>,
        dirty_masks: &DirtyMasks<E>,
        entry: &mut ScopeEntry<E>,
        writer: &mut ByteWriter,
    ) -> Result<bool, HostWorldError> {
        let entity = entry.entity();
        let pending = entry.take_pending();
        let empty = ComponentMask::new();
        let dirty = dirty_masks.get(&entity).unwrap_or(&empty);

        let mut candidates = dirty.union(&pending);
        candidates.intersect_with(entry.visible());
        if candidates.is_empty() {
            return Ok(false);
        }

        let net_entity = Self::net_entity_of(allocator, &entity)?;
        match world.component::<NetEntity>(&entity) {
            Some(marker) if *marker == net_entity => {}
            _ => {
                return Err(ProtocolDesyncError::MappingDesync {
                    net_entity: Some(net_entity),
                    entity: format!("{:?}", entity),
                    details: "net entity marker component is missing or holds another id",
                }
                .into());
            }
        }

        // present components go out with their value; absent ones only if the
        // peer still holds them
        let mut values = ComponentMask::new();
        let mut removals = ComponentMask::new();
        for net_id in candidates.iter() {
            if component_kinds.codec(net_id)?.is_present(world, &entity) {
                values.insert(net_id);
            } else if entry.sent().contains(net_id) {
                removals.insert(net_id);
            }
        }
        if values.is_empty() && removals.is_empty() {
            return Ok(false);
        }

        let mut held = entry.sent().difference(&removals);
        held.union_with(&values);
        if held.is_empty() {
            // the peer would keep an entity without components
            net_entity.ser(writer);
            DELETE_SENTINEL.ser(writer);
            entry.forget_peer();
            debug!(
                "net entity {} has no component left for the peer, deleting it there",
                net_entity
            );
            return Ok(true);
        }

        net_entity.ser(writer);
        let count_position = writer.reserve(&0i16);
        let mut component_count: i16 = 0;
        for net_id in values.union(&removals).iter() {
            let codec = component_kinds.codec(net_id)?;
            net_id.ser(writer);
            codec.serialize(world, &entity, writer);
            component_count += 1;
        }

        if component_count == 0 {
            return Err(ProtocolDesyncError::EmptyRecord {
                net_entity,
                entity: format!("{:?}", entity),
            }
            .into());
        }
        writer.patch(count_position, &component_count)?;
        entry.set_sent(held);

        Ok(true)
    }

    fn net_entity_of<E: Copy + Eq + Hash + Debug>(
        allocator: &NetEntityAllocator<E>,
        entity: &E,
    ) -> Result<NetEntity, ProtocolDesyncError> {
        allocator
            .resolve_reverse(entity)
            .ok_or_else(|| ProtocolDesyncError::MappingDesync {
                net_entity: None,
                entity: format!("{:?}", entity),
                details: "entity in scope has no net entity id",
            })
    }
}
