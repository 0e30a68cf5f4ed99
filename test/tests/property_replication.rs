/// PROPERTY-BASED TESTS: the Client mirrors the Server
///
/// Key invariants:
/// 1. Every visible Component of a scoped entity matches on both peers
/// 2. Net entity ids map both ways on both peers
/// 3. Every Client entity mirrors a live Server entity
/// 4. Narrowing, widening and late scoping never desync the Client

use std::collections::HashSet;

use proptest::prelude::*;

use deltasync_server::UserKey;
use deltasync_shared::{ComponentMask, NetEntity, Replicate, WorldRefType};
use deltasync_test::{exchange_packets, Health, Name, TestClient, TestEntity, TestServer};

#[derive(Debug, Clone, Copy)]
enum Kind {
    Name,
    Health,
}

#[derive(Debug, Clone)]
enum Step {
    Spawn(u16),
    Scope(usize, bool, bool),
    Despawn(usize),
    Set(usize, Kind, u16),
    Remove(usize, Kind),
    Sync(usize, Kind),
    Unsync(usize, Kind),
    Send,
}

fn kind_strategy() -> impl Strategy<Value = Kind> {
    prop_oneof![Just(Kind::Name), Just(Kind::Health)]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => any::<u16>().prop_map(Step::Spawn),
        3 => (any::<usize>(), any::<bool>(), any::<bool>())
            .prop_map(|(index, name, health)| Step::Scope(index, name, health)),
        1 => any::<usize>().prop_map(Step::Despawn),
        3 => (any::<usize>(), kind_strategy(), any::<u16>())
            .prop_map(|(index, kind, value)| Step::Set(index, kind, value)),
        2 => (any::<usize>(), kind_strategy()).prop_map(|(index, kind)| Step::Remove(index, kind)),
        2 => (any::<usize>(), kind_strategy()).prop_map(|(index, kind)| Step::Sync(index, kind)),
        2 => (any::<usize>(), kind_strategy()).prop_map(|(index, kind)| Step::Unsync(index, kind)),
        3 => Just(Step::Send),
    ]
}

fn set(server: &mut TestServer, entity: &TestEntity, kind: Kind, value: u16) {
    match kind {
        Kind::Name => server.insert(entity, Name(format!("e{}", value))),
        Kind::Health => server.insert(entity, Health(value)),
    }
}

fn remove(server: &mut TestServer, entity: &TestEntity, kind: Kind) {
    match kind {
        Kind::Name => {
            server.remove::<Name>(entity);
        }
        Kind::Health => {
            server.remove::<Health>(entity);
        }
    }
}

fn sync(server: &mut TestServer, user_key: &UserKey, entity: &TestEntity, kind: Kind, visible: bool) {
    // entities that were never scoped have nothing to change
    let _ = match (kind, visible) {
        (Kind::Name, true) => server.server.user_sync_component::<Name>(user_key, entity),
        (Kind::Health, true) => server.server.user_sync_component::<Health>(user_key, entity),
        (Kind::Name, false) => server.server.user_unsync_component::<Name>(user_key, entity),
        (Kind::Health, false) => server.server.user_unsync_component::<Health>(user_key, entity),
    };
}

fn visible_matches<R: Replicate + std::fmt::Debug>(
    server: &TestServer,
    client: &TestClient,
    visible: &ComponentMask,
    entity: &TestEntity,
    net_entity: &NetEntity,
) -> Result<(), TestCaseError> {
    let net_id = server.server.component_kinds().net_id_of::<R>().unwrap();
    if visible.contains(net_id) {
        prop_assert_eq!(client.component::<R>(net_entity), server.world.component::<R>(entity));
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_client_mirrors_server(steps in prop::collection::vec(step_strategy(), 1..80)) {
        let mut server = TestServer::new();
        let (user_key, mut client, _) = server.connect();
        let name_id = server.server.component_kinds().net_id_of::<Name>().unwrap();
        let health_id = server.server.component_kinds().net_id_of::<Health>().unwrap();
        let mut live: Vec<TestEntity> = Vec::new();

        for step in steps {
            match step {
                Step::Spawn(hp) => {
                    let entity = server.spawn();
                    server.insert(&entity, Name(format!("e{}", hp)));
                    server.insert(&entity, Health(hp));
                    live.push(entity);
                }
                Step::Scope(index, name, health) if !live.is_empty() => {
                    let entity = live[index % live.len()];
                    let mut visible = ComponentMask::new();
                    if name {
                        visible.insert(name_id);
                    }
                    if health {
                        visible.insert(health_id);
                    }
                    server.server.user_add_entity(&user_key, &entity, visible).unwrap();
                }
                Step::Despawn(index) if !live.is_empty() => {
                    let entity = live.remove(index % live.len());
                    server.despawn(&entity);
                }
                Step::Set(index, kind, value) if !live.is_empty() => {
                    let entity = live[index % live.len()];
                    set(&mut server, &entity, kind, value);
                }
                Step::Remove(index, kind) if !live.is_empty() => {
                    let entity = live[index % live.len()];
                    remove(&mut server, &entity, kind);
                }
                Step::Sync(index, kind) if !live.is_empty() => {
                    let entity = live[index % live.len()];
                    sync(&mut server, &user_key, &entity, kind, true);
                }
                Step::Unsync(index, kind) if !live.is_empty() => {
                    let entity = live[index % live.len()];
                    sync(&mut server, &user_key, &entity, kind, false);
                }
                Step::Send => {
                    exchange_packets(&mut server, &mut [&mut client]);
                }
                _ => {}
            }
        }
        exchange_packets(&mut server, &mut [&mut client]);
        prop_assert!(client.client.is_connected());

        let scope = server.server.user_scope(&user_key).unwrap();
        let mut seen = HashSet::new();
        for entity in &live {
            let net_entity: NetEntity = server.net_entity(entity).expect("live entities stay bound");
            prop_assert!(seen.insert(net_entity));
            prop_assert_eq!(server.server.entity(&net_entity), Some(*entity));

            if let Some(mirror) = client.entity(&net_entity) {
                prop_assert_eq!(client.client.net_entity(&mirror), Some(net_entity));
            }
            let Some(entry) = scope.get(entity) else {
                prop_assert_eq!(client.entity(&net_entity), None);
                continue;
            };
            visible_matches::<Name>(&server, &client, entry.visible(), entity, &net_entity)?;
            visible_matches::<Health>(&server, &client, entry.visible(), entity, &net_entity)?;
        }

        // nothing the Server despawned lingers on the Client
        prop_assert_eq!(client.world.entity_count(), client.client.entities().len());
        for mirror in client.client.entities() {
            let net_entity = client.client.net_entity(&mirror).unwrap();
            let origin = server.server.entity(&net_entity);
            prop_assert!(origin.map_or(false, |entity| live.contains(&entity)));
        }
    }
}
