//! Messages for the 1-out-of-m OT.

use serde::{Deserialize, Serialize};

use crate::naor_pinkas;

/// Sender setup message: one base OT setup per bit position plus the masked
/// candidate values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderSetup {
    /// Fresh per-instance session id bound into every pad derivation.
    pub session_id: [u8; 16],
    /// Base OT setup messages, one per bit position.
    pub base: Vec<naor_pinkas::msgs::SenderSetup>,
    /// The m masked scalar values, each `scalar_bytes` wide.
    pub ciphertexts: Vec<Vec<u8>>,
}

/// Receiver payload message: one blinded choice per base OT instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverPayload {
    /// Base OT blinded choices, one per bit position.
    pub blinded_choices: Vec<naor_pinkas::msgs::ReceiverPayload>,
}

/// Sender payload message: the masked seed pairs of every base OT instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderPayload {
    /// Base OT payloads, one per bit position.
    pub ciphertext_pairs: Vec<naor_pinkas::msgs::SenderPayload>,
}
