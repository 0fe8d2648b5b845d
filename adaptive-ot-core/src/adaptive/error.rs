use crate::{commit::CommitError, group::GroupError, one_of_m};

/// Errors that can occur when using the adaptive OT sender.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum SenderError {
    #[error("message grid is malformed: {0}")]
    MalformedGrid(String),
    #[error("message at ({i}, {j}) is {len} bytes, allowed range is 1..={max}")]
    InvalidMessageSize {
        i: usize,
        j: usize,
        len: usize,
        max: usize,
    },
    #[error(transparent)]
    Group(#[from] GroupError),
    #[error(transparent)]
    OneOfM(#[from] one_of_m::SenderError),
}

/// Errors that can occur when using the adaptive OT receiver.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum ReceiverError {
    #[error("published group parameters do not match the expected group")]
    GroupMismatch,
    #[error("malformed public setup: {0}")]
    MalformedSetup(String),
    #[error("query index ({i}, {j}) out of range for grid dimension {m}")]
    IndexOutOfRange { i: usize, j: usize, m: usize },
    #[error("malformed query payload: {0}")]
    MalformedPayload(String),
    #[error(transparent)]
    Group(#[from] GroupError),
    #[error(transparent)]
    OneOfM(#[from] one_of_m::ReceiverError),
    #[error(transparent)]
    Commitment(#[from] CommitError),
}
