use std::default::Default;

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Whether a User is disconnected when writing its update stream fails
    /// with a protocol desync. When false the error is reported and the User
    /// stays connected.
    pub close_on_desync: bool,
    /// How many input commands are kept per User until gameplay takes them.
    /// Past this the oldest commands are dropped.
    pub max_buffered_input: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            close_on_desync: true,
            max_buffered_input: 4096,
        }
    }
}
