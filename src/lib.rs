//! Pathlink is a client/server shortest path query service.
//!
//! It provides three binaries:
//! - `path_server`: serves graph uploads and path queries over TCP or UDP.
//! - `path_client`: an interactive shell for uploading graphs and querying paths.
//! - `path_bench`: sizes how large a graph the engine answers within a second.
//!
//! Clients upload an undirected weighted graph as a bit-packed incidence
//! matrix, then ask for shortest paths between vertex pairs. Every peer gets
//! its own session; graphs are never shared between peers.

/// Interactive client: shell commands and the transport seam beneath them.
pub mod client;
/// Handles configuration loading and management.
pub mod config;
/// Graph model: validation, edge extraction and the shortest path engine.
pub mod graph;
/// Logging utilities for the application.
pub mod log;
/// Wire format: header, commands, payload codecs and bit packing.
pub mod protocol;
/// Server side: request dispatch and the TCP/UDP serving loops.
pub mod server;
/// Message framing over streams and datagrams, plus UDP ack/retry delivery.
pub mod transport;
