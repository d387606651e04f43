//! Interactive command shell shared by both client transports.
//!
//! Commands: `help`, `input`, `load <file>`, `query <u> <v>`, `exit`.
//! The shell keeps a local mirror of the last graph the server accepted so
//! `query` can refuse out-of-range vertices without a round trip.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor, Write};

use crate::client::remote::{ClientError, Remote};
use crate::graph::{GraphDefinition, text_format};
use crate::protocol::codec;
use crate::protocol::command::{Command, Status};
use crate::protocol::header::MessageHeader;
use crate::protocol::payload::{PathQueryPayload, UploadGraphPayload};
use crate::protocol::bits;

struct ClientState {
    graph: Option<GraphDefinition>,
}

/// Runs the shell until `exit`, end of input, or a transport failure.
pub fn run_shell<R: Remote, I: BufRead, W: Write>(
    remote: &mut R,
    input: &mut I,
    out: &mut W,
) -> std::io::Result<()> {
    let mut state = ClientState { graph: None };

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };

        let step = match command {
            "help" => command_help(remote, out)?,
            "input" => command_input(remote, input, out, &mut state)?,
            "load" => command_load(remote, words.next(), out, &mut state)?,
            "query" => command_query(remote, words.next(), words.next(), out, &mut state)?,
            "exit" => {
                let step = command_exit(remote, out)?;
                match step {
                    Step::Continue => break,
                    Step::Disconnected => Step::Disconnected,
                }
            }
            _ => {
                writeln!(out, "Unknown command. Use help for the list of commands.")?;
                Step::Continue
            }
        };

        if step == Step::Disconnected {
            break;
        }
    }
    Ok(())
}

/// Whether the session survived the command.
#[derive(PartialEq, Eq, Clone, Copy)]
enum Step {
    Continue,
    Disconnected,
}

fn command_help<R: Remote, W: Write>(remote: &mut R, out: &mut W) -> std::io::Result<Step> {
    match remote.exchange(Command::Help, &[]) {
        Ok((header, payload)) => {
            print_response(out, &header, &payload)?;
            Ok(Step::Continue)
        }
        Err(e) => disconnect(out, &e),
    }
}

fn command_input<R: Remote, I: BufRead, W: Write>(
    remote: &mut R,
    input: &mut I,
    out: &mut W,
    state: &mut ClientState,
) -> std::io::Result<Step> {
    writeln!(
        out,
        "Input format:\n  <vertices> <edges>\n  incidence matrix (vertices x edges, cells 0/1)\n  weight list (one number per edge)"
    )?;
    writeln!(out, "Enter the graph data, blank line to finish:")?;

    let mut buffer = String::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim().is_empty() {
            break;
        }
        buffer.push_str(&line);
    }

    match text_format::read_graph(Cursor::new(buffer)) {
        Ok(graph) => upload_graph(remote, out, state, graph),
        Err(message) => {
            writeln!(out, "Input error: {message}")?;
            Ok(Step::Continue)
        }
    }
}

fn command_load<R: Remote, W: Write>(
    remote: &mut R,
    path: Option<&str>,
    out: &mut W,
    state: &mut ClientState,
) -> std::io::Result<Step> {
    let Some(path) = path else {
        writeln!(out, "Usage: load <file>")?;
        return Ok(Step::Continue);
    };
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            writeln!(out, "Cannot open {path}: {e}")?;
            return Ok(Step::Continue);
        }
    };
    match text_format::read_graph(BufReader::new(file)) {
        Ok(graph) => upload_graph(remote, out, state, graph),
        Err(message) => {
            writeln!(out, "Error reading {path}: {message}")?;
            Ok(Step::Continue)
        }
    }
}

fn upload_graph<R: Remote, W: Write>(
    remote: &mut R,
    out: &mut W,
    state: &mut ClientState,
    graph: GraphDefinition,
) -> std::io::Result<Step> {
    let payload = codec::encode_upload_graph(&UploadGraphPayload {
        vertex_count: graph.vertex_count,
        edge_count: graph.edge_count,
        incidence_bits: bits::pack_incidence_matrix(&graph.incidence),
        weights: graph.weights.clone(),
    });

    match remote.exchange(Command::UploadGraph, &payload) {
        Ok((header, body)) => {
            if header.status == Status::Ok {
                state.graph = Some(graph);
            }
            print_response(out, &header, &body)?;
            Ok(Step::Continue)
        }
        Err(e) => disconnect(out, &e),
    }
}

fn command_query<R: Remote, W: Write>(
    remote: &mut R,
    source: Option<&str>,
    target: Option<&str>,
    out: &mut W,
    state: &mut ClientState,
) -> std::io::Result<Step> {
    let (Some(source), Some(target)) = (source, target) else {
        writeln!(out, "Usage: query <u> <v>")?;
        return Ok(Step::Continue);
    };
    let (Ok(source), Ok(target)) = (source.parse::<u16>(), target.parse::<u16>()) else {
        writeln!(out, "Vertices must be non-negative numbers.")?;
        return Ok(Step::Continue);
    };
    let Some(graph) = state.graph.as_ref() else {
        writeln!(out, "Load a graph first (input/load commands).")?;
        return Ok(Step::Continue);
    };
    if source >= graph.vertex_count || target >= graph.vertex_count {
        writeln!(out, "Vertices out of range [0, {}].", graph.vertex_count - 1)?;
        return Ok(Step::Continue);
    }

    let payload = codec::encode_path_query(&PathQueryPayload { source, target });
    match remote.exchange(Command::PathQuery, &payload) {
        Ok((header, body)) => {
            print_response(out, &header, &body)?;
            Ok(Step::Continue)
        }
        Err(e) => disconnect(out, &e),
    }
}

fn command_exit<R: Remote, W: Write>(remote: &mut R, out: &mut W) -> std::io::Result<Step> {
    match remote.exchange(Command::Exit, &[]) {
        Ok((header, body)) => {
            print_response(out, &header, &body)?;
            Ok(Step::Continue)
        }
        Err(e) => disconnect(out, &e),
    }
}

fn print_response<W: Write>(
    out: &mut W,
    header: &MessageHeader,
    payload: &[u8],
) -> std::io::Result<()> {
    match header.command {
        Command::Error => match codec::decode_string(payload) {
            Ok(text) => writeln!(out, "Server error: {text}"),
            Err(_) => writeln!(out, "Server returned an error without a description."),
        },
        Command::Help | Command::UploadGraph | Command::Exit => {
            match codec::decode_string(payload) {
                Ok(text) => writeln!(out, "{text}"),
                Err(_) => writeln!(out, "Server reply could not be read."),
            }
        }
        Command::PathResult => match codec::decode_path_result(payload) {
            Ok(result) => {
                let route = result
                    .path
                    .iter()
                    .map(u16::to_string)
                    .collect::<Vec<_>>()
                    .join(" -> ");
                writeln!(out, "Path length: {}\nPath: {route}", result.distance)
            }
            Err(e) => writeln!(out, "Could not parse the path result: {e}"),
        },
        Command::Ack | Command::PathQuery => {
            writeln!(out, "Server returned an unexpected command.")
        }
    }
}

fn disconnect<W: Write>(out: &mut W, e: &ClientError) -> std::io::Result<Step> {
    writeln!(out, "{e}")?;
    Ok(Step::Disconnected)
}
