//! Command handling shared by the stream and datagram servers.
//!
//! Both transports deliver a decoded header and payload here and send back
//! whatever reply comes out. Framing problems never reach this module; every
//! request that arrives carries a command from the protocol's closed set.

use crate::graph::{self, GraphDefinition};
use crate::protocol::codec;
use crate::protocol::command::{Command, Status};
use crate::protocol::payload::PathResultPayload;
use crate::protocol::{bits, errors::ProtoError};
use crate::server::session::Session;

/// A fully formed response, ready for either transport to frame and send.
#[derive(Debug)]
pub struct Reply {
    pub command: Command,
    pub status: Status,
    pub payload: Vec<u8>,
}

/// Whether the session stays open after the reply is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Continue,
    Shutdown,
}

const HELP_TEXT: &str = "Commands:\n\
  help            - list available commands\n\
  upload_graph    - upload a graph (incidence matrix + edge weights)\n\
  path_query      - find the shortest path between two vertices\n\
  exit            - close the session\n\
Vertex numbering starts at 0.\n";

/// Processes one request against the peer's session.
pub fn dispatch(session: &mut Session, command: Command, payload: &[u8]) -> (Reply, RequestOutcome) {
    match command {
        Command::Help => (
            Reply {
                command: Command::Help,
                status: Status::Ok,
                payload: text_payload(HELP_TEXT),
            },
            RequestOutcome::Continue,
        ),
        Command::UploadGraph => (handle_upload(session, payload), RequestOutcome::Continue),
        Command::PathQuery => (handle_path_query(session, payload), RequestOutcome::Continue),
        Command::Exit => (
            Reply {
                command: Command::Exit,
                status: Status::Ok,
                payload: text_payload("Goodbye."),
            },
            RequestOutcome::Shutdown,
        ),
        // Valid protocol commands that are never client requests.
        Command::PathResult | Command::Error | Command::Ack => (
            invalid_request(format!("unsupported command {:?}", command)),
            RequestOutcome::Continue,
        ),
    }
}

fn handle_upload(session: &mut Session, payload: &[u8]) -> Reply {
    let graph = match decode_graph(payload) {
        Ok(graph) => graph,
        Err(message) => return invalid_request(message),
    };
    session.graph = Some(graph);
    Reply {
        command: Command::UploadGraph,
        status: Status::Ok,
        payload: text_payload("Graph accepted."),
    }
}

/// Decodes, unpacks and validates an uploaded graph.
///
/// A rejected upload leaves the session's current graph untouched, so the
/// graph is fully built before the caller stores it.
fn decode_graph(payload: &[u8]) -> Result<GraphDefinition, String> {
    let encoded = codec::decode_upload_graph(payload).map_err(describe_proto_error)?;
    let incidence =
        bits::unpack_incidence_matrix(encoded.vertex_count, encoded.edge_count, &encoded.incidence_bits)
            .map_err(describe_proto_error)?;

    let graph = GraphDefinition {
        vertex_count: encoded.vertex_count,
        edge_count: encoded.edge_count,
        incidence,
        weights: encoded.weights,
    };
    let validation = graph::validate_graph(&graph);
    if !validation.ok {
        return Err(validation.message);
    }
    Ok(graph)
}

fn handle_path_query(session: &mut Session, payload: &[u8]) -> Reply {
    let query = match codec::decode_path_query(payload) {
        Ok(query) => query,
        Err(_) => return invalid_request("malformed path query".to_string()),
    };
    let Some(graph) = session.graph.as_ref() else {
        return Reply {
            command: Command::Error,
            status: Status::NotReady,
            payload: text_payload("No graph loaded. Use upload_graph first."),
        };
    };

    let computation = graph::shortest_path(graph, query.source, query.target);
    if !computation.reachable {
        let message = if computation.error.is_empty() {
            "No path found.".to_string()
        } else {
            computation.error
        };
        return Reply {
            command: Command::Error,
            status: Status::NotReady,
            payload: text_payload(&message),
        };
    }

    Reply {
        command: Command::PathResult,
        status: Status::Ok,
        payload: codec::encode_path_result(&PathResultPayload {
            distance: computation.distance,
            path: computation.path,
        }),
    }
}

fn invalid_request(message: String) -> Reply {
    Reply {
        command: Command::Error,
        status: Status::InvalidRequest,
        payload: text_payload(&message),
    }
}

// Server-side strings are short; the length-prefix limit can't be hit.
fn text_payload(text: &str) -> Vec<u8> {
    codec::encode_string(text).unwrap_or_default()
}

fn describe_proto_error(e: ProtoError) -> String {
    format!("invalid graph payload: {e}")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]
    use super::*;
    use crate::graph::test_graphs;
    use crate::protocol::payload::{PathQueryPayload, UploadGraphPayload};

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
    fn help_returns_command_listing() {
        let mut session = Session::new();
        let (reply, outcome) = dispatch(&mut session, Command::Help, &[]);
        assert_eq!(reply.command, Command::Help);
        assert_eq!(reply.status, Status::Ok);
        assert_eq!(outcome, RequestOutcome::Continue);

        let text = codec::decode_string(&reply.payload).unwrap();
        assert!(text.contains("upload_graph"), "got: {text}");
    }

    #[test]
    fn upload_then_query_round_trip() {
        let mut session = Session::new();
        let graph = test_graphs::ring(6);

        let (reply, _) = dispatch(&mut session, Command::UploadGraph, &upload_payload(&graph));
        assert_eq!(reply.command, Command::UploadGraph);
        assert_eq!(reply.status, Status::Ok);
        assert!(session.has_graph());

        let (reply, _) = dispatch(&mut session, Command::PathQuery, &query_payload(0, 3));
        assert_eq!(reply.command, Command::PathResult);
        assert_eq!(reply.status, Status::Ok);

        let result = codec::decode_path_result(&reply.payload).unwrap();
        assert_eq!(result.distance, 3);
        assert_eq!(result.path.first(), Some(&0));
        assert_eq!(result.path.last(), Some(&3));
    }

    #[test]
    fn query_without_graph_is_not_ready() {
        let mut session = Session::new();
        let (reply, _) = dispatch(&mut session, Command::PathQuery, &query_payload(0, 1));
        assert_eq!(reply.command, Command::Error);
        assert_eq!(reply.status, Status::NotReady);
    }

    #[test]
    fn invalid_graph_keeps_previous_graph() {
        let mut session = Session::new();
        let good = test_graphs::ring(6);
        dispatch(&mut session, Command::UploadGraph, &upload_payload(&good));

        // 5 vertices fails validation.
        let bad = test_graphs::ring(5);
        let (reply, _) = dispatch(&mut session, Command::UploadGraph, &upload_payload(&bad));
        assert_eq!(reply.command, Command::Error);
        assert_eq!(reply.status, Status::InvalidRequest);

        // The old graph still answers queries.
        let (reply, _) = dispatch(&mut session, Command::PathQuery, &query_payload(0, 1));
        assert_eq!(reply.command, Command::PathResult);
    }

    #[test]
    fn unreachable_target_reports_not_ready() {
        let mut session = Session::new();
        let graph = test_graphs::disjoint_components(6);
        dispatch(&mut session, Command::UploadGraph, &upload_payload(&graph));

        let (reply, _) = dispatch(&mut session, Command::PathQuery, &query_payload(0, 7));
        assert_eq!(reply.command, Command::Error);
        assert_eq!(reply.status, Status::NotReady);
    }

    #[test]
    fn malformed_query_payload_is_invalid() {
        let mut session = Session::new();
        session.graph = Some(test_graphs::ring(6));

        let (reply, _) = dispatch(&mut session, Command::PathQuery, &[1, 2, 3]);
        assert_eq!(reply.command, Command::Error);
        assert_eq!(reply.status, Status::InvalidRequest);
    }

    #[test]
    fn exit_shuts_the_session_down() {
        let mut session = Session::new();
        let (reply, outcome) = dispatch(&mut session, Command::Exit, &[]);
        assert_eq!(reply.command, Command::Exit);
        assert_eq!(reply.status, Status::Ok);
        assert_eq!(outcome, RequestOutcome::Shutdown);
    }

    #[test]
    fn response_commands_are_rejected_as_requests() {
        let mut session = Session::new();
        for command in [Command::PathResult, Command::Error, Command::Ack] {
            let (reply, outcome) = dispatch(&mut session, command, &[]);
            assert_eq!(reply.command, Command::Error);
            assert_eq!(reply.status, Status::InvalidRequest);
            assert_eq!(outcome, RequestOutcome::Continue);
        }
    }
}
