//! End-to-end tests for the UDP server and the ack/retry delivery layer.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::net::UdpSocket;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pathlink::client::remote::{Remote, UdpRemote};
use pathlink::graph::{GraphDefinition, test_graphs};
use pathlink::log::NoopLogSink;
use pathlink::protocol::bits;
use pathlink::protocol::codec;
use pathlink::protocol::command::{Command, Status};
use pathlink::protocol::payload::{PathQueryPayload, UploadGraphPayload};
use pathlink::server::udp::UdpServer;
use pathlink::transport::reliable::{ReliableChannel, ReliableError};

fn start_server() -> String {
    let server = UdpServer::bind("127.0.0.1:0", Arc::new(NoopLogSink)).unwrap();
    let addr = server.local_addr().unwrap().to_string();
    thread::spawn(move || {
        let _ = server.run();
    });
    addr
}

fn connect_channel(addr: &str) -> ReliableChannel {
    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.connect(addr).unwrap();
    ReliableChannel::new(socket, Arc::new(NoopLogSink))
}

fn upload_payload(graph: &GraphDefinition) -> Vec<u8> {
    codec::encode_upload_graph(&UploadGraphPayload {
        vertex_count: graph.vertex_count,
        edge_count: graph.edge_count,
        incidence_bits: bits::pack_incidence_matrix(&graph.incidence),
        weights: graph.weights.clone(),
    })
}

fn query_payload(source: u16, target: u16) -> Vec<u8> {
    codec::encode_path_query(&PathQueryPayload { source, target })
}

#[test]
fn upload_then_query_over_udp() {
    let addr = start_server();
    let mut channel = connect_channel(&addr);

    let graph = test_graphs::ring(6);
    let (header, _) = channel
        .exchange(Command::UploadGraph, &upload_payload(&graph))
        .unwrap();
    assert_eq!(header.command, Command::UploadGraph);
    assert_eq!(header.status, Status::Ok);

    let (header, body) = channel
        .exchange(Command::PathQuery, &query_payload(0, 2))
        .unwrap();
    assert_eq!(header.command, Command::PathResult);
    let result = codec::decode_path_result(&body).unwrap();
    assert_eq!(result.distance, 2);
    assert_eq!(result.path, vec![0, 1, 2]);
}

#[test]
fn exit_discards_the_session_state() {
    let addr = start_server();
    let mut channel = connect_channel(&addr);

    let graph = test_graphs::ring(6);
    let (header, _) = channel
        .exchange(Command::UploadGraph, &upload_payload(&graph))
        .unwrap();
    assert_eq!(header.status, Status::Ok);

    let (header, _) = channel.exchange(Command::Exit, &[]).unwrap();
    assert_eq!(header.command, Command::Exit);

    // Same socket, same address: the server must have forgotten the graph.
    let (header, _) = channel
        .exchange(Command::PathQuery, &query_payload(0, 1))
        .unwrap();
    assert_eq!(header.command, Command::Error);
    assert_eq!(header.status, Status::NotReady);
}

#[test]
fn sessions_are_keyed_by_source_address() {
    let addr = start_server();
    let mut first = connect_channel(&addr);
    let mut second = connect_channel(&addr);

    let graph = test_graphs::ring(6);
    let (header, _) = first
        .exchange(Command::UploadGraph, &upload_payload(&graph))
        .unwrap();
    assert_eq!(header.status, Status::Ok);

    // The second peer never uploaded anything.
    let (header, _) = second
        .exchange(Command::PathQuery, &query_payload(0, 1))
        .unwrap();
    assert_eq!(header.command, Command::Error);
    assert_eq!(header.status, Status::NotReady);

    let (header, _) = first
        .exchange(Command::PathQuery, &query_payload(0, 1))
        .unwrap();
    assert_eq!(header.command, Command::PathResult);
}

#[test]
fn udp_remote_exchanges_through_the_channel() {
    let addr = start_server();
    let mut remote = UdpRemote::from_channel(connect_channel(&addr));

    let graph = test_graphs::ring(6);
    let (header, _) = remote
        .exchange(Command::UploadGraph, &upload_payload(&graph))
        .unwrap();
    assert_eq!(header.status, Status::Ok);

    let (header, body) = remote
        .exchange(Command::PathQuery, &query_payload(0, 3))
        .unwrap();
    assert_eq!(header.command, Command::PathResult);
    let result = codec::decode_path_result(&body).unwrap();
    assert_eq!(result.distance, 3);
}

#[test]
fn unreachable_server_reports_connectivity_loss() {
    // Bind a socket and drop it so the port is very likely dead.
    let dead_addr = {
        let placeholder = UdpSocket::bind("127.0.0.1:0").unwrap();
        placeholder.local_addr().unwrap().to_string()
    };

    let socket = UdpSocket::bind("127.0.0.1:0").unwrap();
    socket.connect(&dead_addr).unwrap();
    let mut channel =
        ReliableChannel::with_timing(socket, 3, Duration::from_millis(50), Arc::new(NoopLogSink));

    match channel.exchange(Command::Help, &[]) {
        Err(ReliableError::ConnectivityLoss) | Err(ReliableError::Io(_)) => {}
        other => panic!("expected a delivery failure, got {:?}", other),
    }
}

#[test]
fn runt_packets_are_ignored_by_the_server() {
    let addr = start_server();

    // A bare runt packet must not crash the server or produce a reply.
    let prober = UdpSocket::bind("127.0.0.1:0").unwrap();
    prober.connect(&addr).unwrap();
    prober.send(&[0x01, 0x02]).unwrap();
    prober
        .set_read_timeout(Some(Duration::from_millis(200)))
        .unwrap();
    let mut buf = [0u8; 64];
    assert!(prober.recv(&mut buf).is_err(), "runt packet got a reply");

    // The server is still alive for well-formed traffic.
    let mut channel = connect_channel(&addr);
    let (header, _) = channel.exchange(Command::Help, &[]).unwrap();
    assert_eq!(header.command, Command::Help);
}
