use crate::naor_pinkas;

/// Errors that can occur when using the 1-out-of-m sender.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum SenderError {
    #[error("payload must not be empty")]
    EmptyPayload,
    #[error("payload element at index {0} is not in Z_q*")]
    InvalidScalar(usize),
    #[error("count mismatch: expected {0} blinded choices, got {1}")]
    CountMismatch(usize, usize),
    #[error(transparent)]
    Base(#[from] naor_pinkas::SenderError),
}

/// Errors that can occur when using the 1-out-of-m receiver.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum ReceiverError {
    #[error("choice index {index} out of range for {count} messages")]
    IndexOutOfRange { index: usize, count: usize },
    #[error("count mismatch: expected {0} base OT messages, got {1}")]
    CountMismatch(usize, usize),
    #[error("malformed payload: {0}")]
    InvalidPayload(String),
    #[error("recovered scalar is not in Z_q*")]
    InvalidScalar,
    #[error(transparent)]
    Base(#[from] naor_pinkas::ReceiverError),
}
