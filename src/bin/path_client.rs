use std::io::{self, BufReader};
use std::net::UdpSocket;
use std::sync::Arc;
use std::{env, process};

use pathlink::client::remote::{TcpRemote, UdpRemote};
use pathlink::client::shell;
use pathlink::config::Config;
use pathlink::log::log_sink::LogSink;
use pathlink::log::logger::Logger;
use pathlink::transport::reliable::{self, ReliableChannel};

fn main() -> std::io::Result<()> {
    // --- Parse CLI args ----------------------------------------------------
    //
    //   cargo run --bin path_client -- 127.0.0.1 tcp 7000
    //   cargo run --bin path_client -- 127.0.0.1 udp 7000

    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: {} <ip> <tcp|udp> <port>", args[0]);
        process::exit(1);
    }
    let ip = args[1].as_str();
    let transport = args[2].as_str();
    let Ok(port) = args[3].parse::<u16>() else {
        eprintln!("Invalid port number: {}", args[3]);
        process::exit(1);
    };
    let addr = format!("{ip}:{port}");

    // --- Load config and start process logger -------------------------------
    let config_path =
        env::var("PATHLINK_CONFIG").unwrap_or_else(|_| "pathlink.ini".to_string());
    let config = Config::load(&config_path).unwrap_or_else(|_| Config::empty());
    let (attempts, ack_timeout) = reliable::timing_from_config(&config);
    let logger = Logger::start_client(1024, Arc::new(config));
    let log_sink: Arc<dyn LogSink> = Arc::new(logger.handle());

    let mut input = BufReader::new(io::stdin());
    let mut out = io::stdout();

    // --- Run shell (blocks until exit or disconnect) ------------------------
    match transport {
        "tcp" => {
            let mut remote = TcpRemote::connect(&addr)?;
            println!("Connected to tcp server {addr}");
            shell::run_shell(&mut remote, &mut input, &mut out)
        }
        "udp" => {
            let socket = UdpSocket::bind("0.0.0.0:0")?;
            socket.connect(&addr)?;
            let channel = ReliableChannel::with_timing(socket, attempts, ack_timeout, log_sink);
            let mut remote = UdpRemote::from_channel(channel);
            println!("Talking to udp server {addr}");
            shell::run_shell(&mut remote, &mut input, &mut out)
        }
        _ => {
            eprintln!("Unknown transport. Use tcp or udp.");
            process::exit(1);
        }
    }
}
