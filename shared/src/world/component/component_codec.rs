use deltasync_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

use crate::world::{
    component::{
        component_kinds::{ComponentKind, NetId},
        replicate::{ReplicaDyn, Replicate},
    },
    snapshot_store::SnapshotStore,
    world_type::{WorldMutType, WorldRefType},
};

type ReadFn = fn(&mut ByteReader) -> Result<Box<dyn ReplicaDyn>, SerdeErr>;

fn read_boxed<R: Replicate>(reader: &mut ByteReader) -> Result<Box<dyn ReplicaDyn>, SerdeErr> {
    Ok(Box::new(R::de(reader)?))
}

/// What applying one inbound component entry did to the local entity
pub enum ComponentChange {
    Inserted,
    Updated,
    Removed(Box<dyn ReplicaDyn>),
    Unchanged,
}

/// The per-type codec of one registered Component.
///
/// Holds a monomorphised reader so dispatch by net id needs no runtime type
/// lookup; writing goes through the erased [`ReplicaDyn`] interface.
pub struct ComponentCodec {
    kind: ComponentKind,
    net_id: NetId,
    name: &'static str,
    reader: ReadFn,
}

impl ComponentCodec {
    pub(crate) fn new<R: Replicate>(net_id: NetId) -> Self {
        Self {
            kind: ComponentKind::of::<R>(),
            net_id,
            name: R::NAME,
            reader: read_boxed::<R>,
        }
    }

    pub fn kind(&self) -> ComponentKind {
        self.kind
    }

    pub fn net_id(&self) -> NetId {
        self.net_id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Decodes one payload of this type
    pub fn read(&self, reader: &mut ByteReader) -> Result<Box<dyn ReplicaDyn>, SerdeErr> {
        (self.reader)(reader)
    }

    pub fn is_present<E, W: WorldRefType<E>>(&self, world: &W, entity: &E) -> bool {
        world.has_component_of_kind(entity, &self.kind)
    }

    /// True iff the live component and its snapshot disagree, either in
    /// presence or in value
    pub fn is_dirty<E: Copy + Eq + std::hash::Hash, W: WorldRefType<E>>(
        &self,
        world: &W,
        snapshots: &SnapshotStore<E>,
        entity: &E,
    ) -> bool {
        let live = world.component_of_kind(entity, &self.kind);
        let snapshot = snapshots.get(&self.kind, entity);
        match (live, snapshot) {
            (Some(live), Some(snapshot)) => !live.dyn_eq(snapshot),
            (Some(_), None) | (None, Some(_)) => true,
            (None, None) => false,
        }
    }

    /// Mirrors the live value (or its absence) into the snapshot store
    pub fn update_snapshot<E: Copy + Eq + std::hash::Hash, W: WorldRefType<E>>(
        &self,
        world: &W,
        snapshots: &mut SnapshotStore<E>,
        entity: &E,
    ) {
        let value = world
            .component_of_kind(entity, &self.kind)
            .map(|component| component.copy_to_box());
        snapshots.set(self.kind, *entity, value);
    }

    /// Writes the presence flag and, if present, the live value
    pub fn serialize<E, W: WorldRefType<E>>(&self, world: &W, entity: &E, writer: &mut dyn ByteWrite) {
        match world.component_of_kind(entity, &self.kind) {
            Some(component) => {
                true.ser(writer);
                component.write(writer);
            }
            None => false.ser(writer),
        }
    }

    /// Reads the presence flag and applies it to `entity`.
    ///
    /// Presence is taken from the sender as-is: a present entry inserts or
    /// overwrites the local component, an absent entry removes it.
    pub fn deserialize<E, W: WorldMutType<E>>(
        &self,
        world: &mut W,
        entity: &E,
        reader: &mut ByteReader,
    ) -> Result<ComponentChange, SerdeErr> {
        if !bool::de(reader)? {
            return Ok(match world.remove_component_of_kind(entity, &self.kind) {
                Some(removed) => ComponentChange::Removed(removed),
                None => ComponentChange::Unchanged,
            });
        }

        let incoming = self.read(reader)?;
        let change = match world.component_of_kind(entity, &self.kind) {
            None => ComponentChange::Inserted,
            Some(existing) if existing.dyn_eq(incoming.as_ref()) => ComponentChange::Unchanged,
            Some(_) => ComponentChange::Updated,
        };
        if !matches!(change, ComponentChange::Unchanged) {
            world.insert_boxed_component(entity, incoming);
        }
        Ok(change)
    }
}
