pub mod remote;
pub mod shell;

pub use remote::{ClientError, Remote, TcpRemote, UdpRemote};
