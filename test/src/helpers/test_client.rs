use deltasync_client::{Client, ClientConfig, ClientError, EntityEvent};
use deltasync_shared::{NetEntity, PacketReceiver, PacketSender, Replicate, WorldRefType};

use crate::{test_protocol::protocol, TestEntity, TestWorld};

/// A Client and the world it mirrors into
pub struct TestClient {
    pub client: Client<TestEntity>,
    pub world: TestWorld,
}

impl TestClient {
    pub fn new(
        client_config: ClientConfig,
        sender: Box<dyn PacketSender>,
        receiver: Box<dyn PacketReceiver>,
    ) -> Self {
        Self {
            client: Client::new(client_config, protocol(), sender, receiver),
            world: TestWorld::new(),
        }
    }

    pub fn default_config() -> ClientConfig {
        ClientConfig::default()
    }

    /// Applies every waiting update stream
    pub fn receive(&mut self) -> Result<Vec<EntityEvent<TestEntity>>, ClientError> {
        let mut events = Vec::new();
        self.client.receive_updates(&mut self.world, &mut events)?;
        Ok(events)
    }

    pub fn entity(&self, net_entity: &NetEntity) -> Option<TestEntity> {
        self.client.entity(net_entity)
    }

    /// The local value of Component `R` on the mirror of `net_entity`
    pub fn component<R: Replicate>(&self, net_entity: &NetEntity) -> Option<&R> {
        let entity = self.client.entity(net_entity)?;
        self.world.component::<R>(&entity)
    }

    pub fn has_component<R: Replicate>(&self, net_entity: &NetEntity) -> bool {
        self.component::<R>(net_entity).is_some()
    }
}
