/// Byte-level checks of the update stream a Server sends and a Client accepts.
///
/// Component ids in the test protocol: Name = 0, Position = 1, Health = 2,
/// Velocity = 3.

use deltasync_client::{Client, ClientConfig, EntityEvent};
use deltasync_shared::{
    ByteWriter, ComponentKind, LocalTransport, NetEntity, PacketReceiver, PacketSender, Serde,
    WorldRefType,
};
use deltasync_test::{protocol, Health, Position, TestEntity, TestServer, TestWorld, Velocity};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn next_packet(receiver: &mut Box<dyn PacketReceiver>) -> Vec<u8> {
    receiver
        .receive()
        .expect("transport is connected")
        .expect("a packet was sent")
}

#[test]
fn net_entity_7_across_three_ticks() {
    init_logger();

    let mut server = TestServer::new();
    let mut transport = LocalTransport::new();
    let user_key = server
        .server
        .connect(transport.server_sender, transport.server_receiver);

    // ids 0..=6 go to entities that are never scoped
    for _ in 0..7 {
        server.spawn();
    }
    let entity = server.spawn();
    assert_eq!(server.net_entity(&entity), Some(NetEntity::new(7)));

    let position = Position::new(1.5, -2.0);
    let health = Health(100);
    server.insert(&entity, position.clone());
    server.insert(&entity, health.clone());
    server.scope_all(&user_key, &entity);

    // tick 1: both components present and changed
    assert!(server.send().is_empty());
    let mut expected = ByteWriter::new();
    1u32.ser(&mut expected);
    7u16.ser(&mut expected);
    2i16.ser(&mut expected);
    1u16.ser(&mut expected);
    true.ser(&mut expected);
    position.ser(&mut expected);
    2u16.ser(&mut expected);
    true.ser(&mut expected);
    health.ser(&mut expected);
    assert_eq!(next_packet(&mut transport.client_receiver), expected.to_bytes());

    // tick 2: Health removed, Position unchanged
    server.remove::<Health>(&entity);
    assert!(server.send().is_empty());
    assert_eq!(
        next_packet(&mut transport.client_receiver),
        vec![1, 0, 0, 0, 7, 0, 1, 0, 2, 0, 0]
    );

    // tick 3: entity deleted
    server.despawn(&entity);
    assert!(server.send().is_empty());
    assert_eq!(
        next_packet(&mut transport.client_receiver),
        vec![1, 0, 0, 0, 7, 0, 0xFF, 0xFF]
    );
    assert_eq!(server.net_entity(&entity), None);

    // nothing further for the deleted entity
    assert!(server.send().is_empty());
    assert_eq!(next_packet(&mut transport.client_receiver), vec![0, 0, 0, 0]);

    // and its id is handed out again
    let reused = server.spawn();
    assert_eq!(server.net_entity(&reused), Some(NetEntity::new(7)));
}

#[test]
fn unseen_net_entity_42_is_created_with_its_components() {
    init_logger();

    let transport = LocalTransport::new();
    let server_sender = transport.server_sender;
    let mut client: Client<TestEntity> = Client::new(
        ClientConfig::default(),
        protocol(),
        transport.client_sender,
        transport.client_receiver,
    );
    let mut world = TestWorld::new();

    let position = Position::new(3.0, 4.0);
    let velocity = Velocity::new(-1.0, 0.5);
    let mut packet = ByteWriter::new();
    1u32.ser(&mut packet);
    42u16.ser(&mut packet);
    2i16.ser(&mut packet);
    1u16.ser(&mut packet);
    true.ser(&mut packet);
    position.ser(&mut packet);
    3u16.ser(&mut packet);
    true.ser(&mut packet);
    velocity.ser(&mut packet);
    server_sender.send(packet.as_slice()).unwrap();

    let mut events = Vec::new();
    assert_eq!(client.receive_updates(&mut world, &mut events), Ok(1));

    let entity = client.entity(&NetEntity::new(42)).expect("net entity 42 is bound");
    assert_eq!(client.net_entity(&entity), Some(NetEntity::new(42)));
    assert_eq!(world.component::<Position>(&entity), Some(&position));
    assert_eq!(world.component::<Velocity>(&entity), Some(&velocity));
    assert_eq!(world.component::<NetEntity>(&entity), Some(&NetEntity::new(42)));
    assert!(!world.has_component::<Health>(&entity));

    assert_eq!(events.len(), 3);
    assert!(matches!(events[0], EntityEvent::Spawn(spawned) if spawned == entity));
    assert!(matches!(
        events[1],
        EntityEvent::InsertComponent(_, kind) if kind == ComponentKind::of::<Position>()
    ));
    assert!(matches!(
        events[2],
        EntityEvent::InsertComponent(_, kind) if kind == ComponentKind::of::<Velocity>()
    ));
    assert_eq!(world.flush_count(), 1);
}

#[test]
fn empty_pass_is_a_bare_record_count() {
    init_logger();

    let mut server = TestServer::new();
    let mut transport = LocalTransport::new();
    server
        .server
        .connect(transport.server_sender, transport.server_receiver);

    assert!(server.send().is_empty());
    assert_eq!(next_packet(&mut transport.client_receiver), vec![0, 0, 0, 0]);
}
