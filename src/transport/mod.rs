pub mod datagram;
pub mod reliable;
pub mod stream;

pub use reliable::{ReliableChannel, ReliableError};
