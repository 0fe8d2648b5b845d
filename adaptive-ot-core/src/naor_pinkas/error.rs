use crate::group::GroupError;

/// Errors that can occur when using the base OT sender.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum SenderError {
    #[error(transparent)]
    Group(#[from] GroupError),
    #[error("message length mismatch: m0 is {0} bytes, m1 is {1} bytes")]
    LengthMismatch(usize, usize),
}

/// Errors that can occur when using the base OT receiver.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum ReceiverError {
    #[error(transparent)]
    Group(#[from] GroupError),
}
