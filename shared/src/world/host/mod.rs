pub mod dirty_masks;
pub mod error;
pub mod host_world_writer;
