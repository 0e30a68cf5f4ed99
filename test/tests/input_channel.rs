/// Client-to-Server input commands

use deltasync_client::ClientConfig;
use deltasync_server::{ServerConfig, ServerError, ServerEvent};
use deltasync_shared::{LocalTransport, PacketSender};
use deltasync_test::TestServer;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn queued_commands_reach_the_server_in_order() {
    init_logger();

    let mut server = TestServer::new();
    let (user_key, mut client, _) = server.connect();

    for command in [4u8, 8, 15, 16] {
        assert!(client.client.queue_input(command));
    }
    client.client.flush_input().unwrap();
    assert_eq!(client.client.queued_input_count(), 0);
    client.client.queue_input(23);
    client.client.flush_input().unwrap();

    assert!(server.server.receive_input().is_empty());
    assert_eq!(
        server.server.take_user_input(&user_key),
        Ok(vec![4, 8, 15, 16, 23])
    );
    assert_eq!(server.server.take_user_input(&user_key), Ok(vec![]));
}

#[test]
fn commands_past_the_cap_are_dropped() {
    init_logger();

    let mut server = TestServer::new();
    let (user_key, mut client, _) = server.connect_with(ClientConfig {
        max_input_commands: 3,
        ..Default::default()
    });

    assert!(client.client.queue_input(1));
    assert!(client.client.queue_input(2));
    assert!(client.client.queue_input(3));
    assert!(!client.client.queue_input(4));
    client.client.flush_input().unwrap();

    // the cap applies per flush
    assert!(client.client.queue_input(5));
    client.client.flush_input().unwrap();

    server.server.receive_input();
    assert_eq!(server.server.take_user_input(&user_key), Ok(vec![1, 2, 3, 5]));
}

#[test]
fn default_cap_is_255_commands() {
    init_logger();

    let mut server = TestServer::new();
    let (user_key, mut client, _) = server.connect();

    let accepted = (0..300u32)
        .filter(|command| client.client.queue_input(*command as u8))
        .count();
    assert_eq!(accepted, 255);

    client.client.flush_input().unwrap();
    server.server.receive_input();
    assert_eq!(server.server.take_user_input(&user_key).unwrap().len(), 255);
}

#[test]
fn server_keeps_only_the_newest_buffered_commands() {
    init_logger();

    let mut server = TestServer::with_config(ServerConfig {
        max_buffered_input: 4,
        ..Default::default()
    });
    let (user_key, mut client, _) = server.connect();

    for tick in 0..3u8 {
        client.client.queue_input(tick * 2);
        client.client.queue_input(tick * 2 + 1);
        client.client.flush_input().unwrap();
    }

    assert!(server.server.receive_input().is_empty());
    assert_eq!(server.server.take_user_input(&user_key), Ok(vec![2, 3, 4, 5]));
}

#[test]
fn malformed_input_packets_are_reported_and_skipped() {
    init_logger();

    let mut server = TestServer::new();
    let transport = LocalTransport::new();
    let client_sender = transport.client_sender;
    let user_key = server
        .server
        .connect(transport.server_sender, transport.server_receiver);

    // announces five commands, carries one
    client_sender.send(&[5, 1]).unwrap();
    // one command and a stray byte
    client_sender.send(&[1, 7, 9]).unwrap();
    client_sender.send(&[2, 10, 11]).unwrap();

    let events = server.server.receive_input();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        ServerEvent::Error(key, ServerError::MalformedInput(_)) if *key == user_key
    ));
    assert!(matches!(
        &events[1],
        ServerEvent::Error(_, ServerError::TrailingInput { remaining: 1 })
    ));

    assert!(server.server.user_exists(&user_key));
    assert_eq!(server.server.take_user_input(&user_key), Ok(vec![10, 11]));
}
