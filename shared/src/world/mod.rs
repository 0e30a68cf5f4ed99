pub mod component;
pub mod entity;
pub mod host;
pub mod remote;
pub mod snapshot_store;
pub mod world_type;
