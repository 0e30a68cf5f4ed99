/// Component count of a record that signals "delete this entity"
pub const DELETE_SENTINEL: i16 = -1;

/// Upper bound on input commands queued per tick
pub const MAX_INPUT_COMMANDS: u8 = u8::MAX;

/// Bumped whenever the update stream layout changes; part of the protocol fingerprint
pub const WIRE_VERSION: u16 = 1;
