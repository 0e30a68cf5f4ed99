use std::{fmt, hash::Hash};

use deltasync_shared::{Connection, EntityScope, PacketReceiver, PacketSender};

// UserKey
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug)]
pub struct UserKey(u64);

impl UserKey {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn to_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user {}", self.0)
    }
}

// User
pub(crate) struct User<E> {
    connection: Connection<E>,
    input: Vec<u8>,
}

impl<E: Copy + Eq + Hash> User<E> {
    pub fn new(sender: Box<dyn PacketSender>, receiver: Box<dyn PacketReceiver>) -> Self {
        Self {
            connection: Connection::new(sender, receiver),
            input: Vec::new(),
        }
    }

    pub fn connection(&self) -> &Connection<E> {
        &self.connection
    }

    pub fn connection_mut(&mut self) -> &mut Connection<E> {
        &mut self.connection
    }

    pub fn scope(&self) -> &EntityScope<E> {
        self.connection.scope()
    }

    pub fn scope_mut(&mut self) -> &mut EntityScope<E> {
        self.connection.scope_mut()
    }

    /// Appends `commands`, keeping at most `limit` of the newest ones.
    /// Returns how many commands were dropped.
    pub fn push_input(&mut self, commands: &[u8], limit: usize) -> usize {
        self.input.extend_from_slice(commands);
        let overflow = self.input.len().saturating_sub(limit);
        if overflow > 0 {
            self.input.drain(..overflow);
        }
        overflow
    }

    pub fn take_input(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.input)
    }
}
