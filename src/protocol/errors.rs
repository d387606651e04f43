use std::fmt;
use std::io;

/// Protocol-level errors (header/payload parsing and format issues).
#[derive(Debug)]
pub enum ProtoError {
    UnknownCommand(u8),
    UnknownStatus(u8),
    BadHeaderLength(usize),
    PayloadTooLarge(u32),
    Truncated,
    TrailingBytes,
    InvalidUtf8,
    StringTooLong { max: usize, actual: usize },
    WeightCountMismatch { declared: u32, edges: u16 },
    BitsLengthMismatch { expected: usize, actual: usize },
    EmptyMatrix,
}

impl fmt::Display for ProtoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand(b) => write!(f, "unknown command byte {b}"),
            Self::UnknownStatus(b) => write!(f, "unknown status byte {b}"),
            Self::BadHeaderLength(n) => write!(f, "header must be 12 bytes, got {n}"),
            Self::PayloadTooLarge(n) => write!(f, "payload size {n} exceeds limit"),
            Self::Truncated => write!(f, "payload truncated"),
            Self::TrailingBytes => write!(f, "trailing bytes in payload"),
            Self::InvalidUtf8 => write!(f, "text payload is not valid UTF-8"),
            Self::StringTooLong { max, actual } => {
                write!(f, "string of {actual} bytes exceeds limit of {max}")
            }
            Self::WeightCountMismatch { declared, edges } => {
                write!(f, "weight count {declared} does not match edge count {edges}")
            }
            Self::BitsLengthMismatch { expected, actual } => {
                write!(f, "incidence bit block is {actual} bytes, expected {expected}")
            }
            Self::EmptyMatrix => write!(f, "incidence matrix has no cells"),
        }
    }
}

impl std::error::Error for ProtoError {}

/// Frame-level error wrapper: IO vs protocol.
#[derive(Debug)]
pub enum FrameError {
    Io(io::Error),
    Proto(ProtoError),
}

impl From<io::Error> for FrameError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ProtoError> for FrameError {
    fn from(e: ProtoError) -> Self {
        Self::Proto(e)
    }
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {e}"),
            Self::Proto(e) => write!(f, "protocol error: {e}"),
        }
    }
}

impl std::error::Error for FrameError {}
