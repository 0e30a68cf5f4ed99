use deltasync_server::{Server, ServerConfig, ServerEvent, UserKey};
use deltasync_shared::{ComponentMask, LocalDisconnect, LocalTransport, NetEntity, Replicate, WorldMutType};

use crate::{test_protocol::protocol, TestClient, TestEntity, TestWorld};

/// A Server and the world it replicates from
pub struct TestServer {
    pub server: Server<TestEntity>,
    pub world: TestWorld,
}

impl Default for TestServer {
    fn default() -> Self {
        Self::new()
    }
}

impl TestServer {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_config(server_config: ServerConfig) -> Self {
        Self {
            server: Server::new(server_config, protocol()),
            world: TestWorld::new(),
        }
    }

    /// Connects a new Client over an in-memory transport
    pub fn connect(&mut self) -> (UserKey, TestClient, LocalDisconnect) {
        self.connect_with(TestClient::default_config())
    }

    pub fn connect_with(
        &mut self,
        client_config: deltasync_client::ClientConfig,
    ) -> (UserKey, TestClient, LocalDisconnect) {
        let transport = LocalTransport::new();
        let disconnect = transport.disconnect_handle();
        let LocalTransport {
            server_sender,
            server_receiver,
            client_sender,
            client_receiver,
            ..
        } = transport;

        let user_key = self.server.connect(server_sender, server_receiver);
        let client = TestClient::new(client_config, client_sender, client_receiver);
        (user_key, client, disconnect)
    }

    /// Spawns a networked entity
    pub fn spawn(&mut self) -> TestEntity {
        self.server
            .spawn_entity(&mut self.world)
            .expect("net entity ids available")
    }

    pub fn insert<R: Replicate>(&mut self, entity: &TestEntity, component: R) {
        self.world.insert_component(entity, component);
    }

    pub fn remove<R: Replicate>(&mut self, entity: &TestEntity) -> Option<R> {
        self.world.remove_component::<R>(entity)
    }

    pub fn despawn(&mut self, entity: &TestEntity) {
        self.world.despawn_entity(entity);
    }

    /// Puts `entity` in the User's scope with every Component visible
    pub fn scope_all(&mut self, user_key: &UserKey, entity: &TestEntity) {
        let all = self.server.component_kinds().all();
        self.scope(user_key, entity, all);
    }

    pub fn scope(&mut self, user_key: &UserKey, entity: &TestEntity, visible: ComponentMask) {
        self.server
            .user_add_entity(user_key, entity, visible)
            .expect("entity is networked and user is connected");
    }

    pub fn net_entity(&self, entity: &TestEntity) -> Option<NetEntity> {
        self.server.net_entity(entity)
    }

    /// Runs one send pass
    pub fn send(&mut self) -> Vec<ServerEvent> {
        self.server.send_all_updates(&self.world)
    }
}
