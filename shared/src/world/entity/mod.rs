pub mod error;
pub mod net_entity;
pub mod net_entity_allocator;
