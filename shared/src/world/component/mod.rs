pub mod component_codec;
pub mod component_kinds;
pub mod component_mask;
pub mod error;
pub mod replicate;
