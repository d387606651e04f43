use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use crate::graph::GraphDefinition;

/// Per-peer state: at most one uploaded graph at a time.
///
/// A new upload replaces the previous graph wholesale. Sessions never share
/// graphs with each other.
#[derive(Debug, Default)]
pub struct Session {
    pub graph: Option<GraphDefinition>,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_graph(&self) -> bool {
        self.graph.is_some()
    }
}

/// Address-keyed session registry for the datagram server.
///
/// The outer lock covers only map entry operations; each session carries its
/// own lock so request processing holds no map-wide lock.
///
/// Entries are dropped only when a peer sends Exit. There is no idle-timeout
/// eviction: a peer that vanishes without Exit leaves its session in the map
/// for the lifetime of the process.
#[derive(Default)]
pub struct SessionMap {
    inner: Mutex<HashMap<SocketAddr, Arc<Mutex<Session>>>>,
}

impl SessionMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the session for `peer`, creating an empty one on first contact.
    #[must_use]
    pub fn entry(&self, peer: SocketAddr) -> Arc<Mutex<Session>> {
        let mut map = self.inner.lock().expect("session map lock poisoned");
        Arc::clone(map.entry(peer).or_default())
    }

    /// Drops the session state for `peer`, if any.
    pub fn remove(&self, peer: SocketAddr) {
        let mut map = self.inner.lock().expect("session map lock poisoned");
        map.remove(&peer);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("session map lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
