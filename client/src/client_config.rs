use std::default::Default;

use deltasync_shared::MAX_INPUT_COMMANDS;

/// Contains Config properties which will be used by a Client
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Input commands that can be queued between two flushes. Further
    /// commands are dropped.
    pub max_input_commands: u8,
    /// Whether the connection is closed when an update stream cannot be
    /// applied. When false the error is returned and later packets are still
    /// read.
    pub close_on_desync: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_input_commands: MAX_INPUT_COMMANDS,
            close_on_desync: true,
        }
    }
}
