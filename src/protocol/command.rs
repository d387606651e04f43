// ---- Command / status bytes ------------------------------------------------

use crate::protocol::errors::ProtoError;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Command {
    Help = 1,
    UploadGraph = 2,
    PathQuery = 3,
    PathResult = 4,
    Error = 5,
    Ack = 6,
    Exit = 7,
}

impl Command {
    pub fn from_u8(v: u8) -> Result<Command, ProtoError> {
        use Command::*;
        match v {
            1 => Ok(Help),
            2 => Ok(UploadGraph),
            3 => Ok(PathQuery),
            4 => Ok(PathResult),
            5 => Ok(Error),
            6 => Ok(Ack),
            7 => Ok(Exit),
            other => Err(ProtoError::UnknownCommand(other)),
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Status {
    Ok = 0,
    InvalidRequest = 1,
    InternalError = 2,
    NotReady = 3,
}

impl Status {
    pub fn from_u8(v: u8) -> Result<Status, ProtoError> {
        match v {
            0 => Ok(Status::Ok),
            1 => Ok(Status::InvalidRequest),
            2 => Ok(Status::InternalError),
            3 => Ok(Status::NotReady),
            other => Err(ProtoError::UnknownStatus(other)),
        }
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
