pub mod helpers;
pub mod test_world;

pub use helpers::*;
pub use test_protocol::{protocol, Health, Name, Position, Velocity};
pub use test_world::{TestEntity, TestWorld};
