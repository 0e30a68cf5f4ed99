pub mod connection;
pub mod entity_scope;
pub mod input_buffer;
