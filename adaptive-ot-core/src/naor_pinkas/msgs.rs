//! Messages for the base 1-out-of-2 OT.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

/// Sender setup message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderSetup {
    /// The sender's public element `A = g^a`.
    pub public_key: BigUint,
}

/// Receiver payload message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverPayload {
    /// The receiver's blinded choice element `B`.
    pub blinded_choice: BigUint,
}

/// Sender payload message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SenderPayload {
    /// The two PRF-masked messages, indexed by choice bit.
    pub ciphertexts: [Vec<u8>; 2],
}
