pub mod dispatcher;
pub mod session;
pub mod tcp;
pub mod udp;

pub use dispatcher::{Reply, RequestOutcome, dispatch};
pub use session::{Session, SessionMap};
