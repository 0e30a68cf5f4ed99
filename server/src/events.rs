use crate::{error::ServerError, user::UserKey};

/// Something that happened to a User while the Server sent or received
#[derive(Debug)]
pub enum ServerEvent {
    /// The User was removed; the error says why
    Disconnected(UserKey, ServerError),
    /// The User stays connected, but one of its packets could not be handled
    Error(UserKey, ServerError),
}

impl ServerEvent {
    pub fn user_key(&self) -> UserKey {
        match self {
            Self::Disconnected(user_key, _) | Self::Error(user_key, _) => *user_key,
        }
    }

    pub fn error(&self) -> &ServerError {
        match self {
            Self::Disconnected(_, error) | Self::Error(_, error) => error,
        }
    }
}
