use std::sync::Arc;
use std::{env, process};

use pathlink::config::Config;
use pathlink::log::log_sink::LogSink;
use pathlink::log::logger::Logger;
use pathlink::server::tcp::TcpServer;
use pathlink::server::udp::UdpServer;

fn main() -> std::io::Result<()> {
    // --- Parse CLI args ----------------------------------------------------
    //
    //   cargo run --bin path_server -- tcp 7000
    //   cargo run --bin path_server -- udp 7000

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <tcp|udp> <port>", args[0]);
        process::exit(1);
    }
    let transport = args[1].as_str();
    let Ok(port) = args[2].parse::<u16>() else {
        eprintln!("Invalid port number: {}", args[2]);
        process::exit(1);
    };
    let addr = format!("0.0.0.0:{port}");

    // --- Load config and start process logger -------------------------------
    let config_path =
        env::var("PATHLINK_CONFIG").unwrap_or_else(|_| "pathlink.ini".to_string());
    let config = Config::load(&config_path).unwrap_or_else(|_| Config::empty());
    let logger = Logger::start_server(1024, Arc::new(config));
    let log_sink: Arc<dyn LogSink> = Arc::new(logger.handle());

    eprintln!("[path_server] starting {transport} server on {addr}");
    eprintln!("[path_server] log file: {}", logger.file_path().display());

    // --- Run server (blocks) -----------------------------------------------
    match transport {
        "tcp" => TcpServer::bind(&addr, log_sink)?.run(),
        "udp" => UdpServer::bind(&addr, log_sink)?.run(),
        _ => {
            eprintln!("Unknown transport. Use tcp or udp.");
            process::exit(1);
        }
    }
}
