pub mod bits;
pub mod codec;
pub mod command;
pub mod constants;
pub mod errors;
pub mod header;
pub mod payload;

pub use bits::{pack_incidence_matrix, unpack_incidence_matrix};
pub use command::{Command, Status};
pub use constants::{HEADER_SIZE, INF_DISTANCE, MAX_PAYLOAD_SIZE};
pub use errors::{FrameError, ProtoError};
pub use header::MessageHeader;
pub use payload::{PathQueryPayload, PathResultPayload, UploadGraphPayload};
