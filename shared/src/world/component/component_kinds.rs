use std::{any::TypeId, collections::HashMap};

use crate::world::component::{
    component_codec::ComponentCodec, component_mask::ComponentMask, error::ComponentError,
    replicate::Replicate,
};

/// Component Net ID, the wire-visible id of a registered Component type
pub type NetId = u16;

/// The most Component types a registry accepts; ids must fit a positive `i16` count
pub const MAX_COMPONENT_KINDS: usize = i16::MAX as usize;

/// ComponentKind - should be one unique value for each type of Component
#[derive(Eq, Hash, Copy, Clone, PartialEq, PartialOrd, Ord, Debug)]
pub struct ComponentKind {
    type_id: TypeId,
}

impl From<TypeId> for ComponentKind {
    fn from(type_id: TypeId) -> Self {
        Self { type_id }
    }
}

impl ComponentKind {
    pub fn of<R: Replicate>() -> Self {
        Self::from(TypeId::of::<R>())
    }
}

/// A map to hold all component types.
///
/// Net ids are assigned densely, in registration order, starting from 0.
pub struct ComponentKinds {
    kind_map: HashMap<ComponentKind, NetId>,
    codecs: Vec<ComponentCodec>,
}

impl Default for ComponentKinds {
    fn default() -> Self {
        Self::new()
    }
}

impl ComponentKinds {
    pub fn new() -> Self {
        Self {
            kind_map: HashMap::new(),
            codecs: Vec::new(),
        }
    }

    /// Registers `R`, returning its net id. Registering the same type twice
    /// returns the id it already has.
    pub fn add_component<R: Replicate>(&mut self) -> Result<NetId, ComponentError> {
        let component_kind = ComponentKind::of::<R>();
        if let Some(net_id) = self.kind_map.get(&component_kind) {
            return Ok(*net_id);
        }
        if self.codecs.len() >= MAX_COMPONENT_KINDS {
            return Err(ComponentError::RegistryFull {
                component_name: R::NAME,
                limit: MAX_COMPONENT_KINDS,
            });
        }

        let net_id = self.codecs.len() as NetId;
        self.kind_map.insert(component_kind, net_id);
        self.codecs.push(ComponentCodec::new::<R>(net_id));
        Ok(net_id)
    }

    pub fn net_id_of<R: Replicate>(&self) -> Result<NetId, ComponentError> {
        self.kind_map
            .get(&ComponentKind::of::<R>())
            .copied()
            .ok_or(ComponentError::ComponentNotRegistered {
                component_name: R::NAME,
            })
    }

    pub fn kind_to_net_id(&self, component_kind: &ComponentKind) -> Result<NetId, ComponentError> {
        self.kind_map
            .get(component_kind)
            .copied()
            .ok_or(ComponentError::KindNotFound)
    }

    pub fn net_id_to_kind(&self, net_id: NetId) -> Result<ComponentKind, ComponentError> {
        self.codec(net_id).map(ComponentCodec::kind)
    }

    pub fn codec(&self, net_id: NetId) -> Result<&ComponentCodec, ComponentError> {
        self.codecs
            .get(net_id as usize)
            .ok_or(ComponentError::NetIdNotFound { net_id })
    }

    pub fn codec_of_kind(&self, component_kind: &ComponentKind) -> Result<&ComponentCodec, ComponentError> {
        let net_id = self.kind_to_net_id(component_kind)?;
        self.codec(net_id)
    }

    pub fn kind_to_name(&self, component_kind: &ComponentKind) -> Option<&'static str> {
        self.codec_of_kind(component_kind).ok().map(ComponentCodec::name)
    }

    pub fn contains(&self, component_kind: &ComponentKind) -> bool {
        self.kind_map.contains_key(component_kind)
    }

    /// Codecs in ascending net id order
    pub fn iter(&self) -> impl Iterator<Item = &ComponentCodec> {
        self.codecs.iter()
    }

    /// A mask with every registered net id set
    pub fn all(&self) -> ComponentMask {
        let mut mask = ComponentMask::new();
        for codec in &self.codecs {
            mask.insert(codec.net_id());
        }
        mask
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}
