//! Messages for the adaptive OT protocol.

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::{hash::HashParams, one_of_m};

/// One-time public setup message, published by the sender exactly once per
/// long-term key set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicSetup {
    /// Grid dimension; the sender holds `m * m` messages.
    pub m: usize,
    /// Group modulus `p`.
    pub group_p: BigUint,
    /// Subgroup order `q`.
    pub group_q: BigUint,
    /// Generator `g`.
    pub group_g: BigUint,
    /// Pairwise-independent hash parameters for key derivation.
    pub hash_params: HashParams,
    /// Commitment grid `Y[i][j]`, committing `X[i][j]` under the key derived
    /// from `g^(R_i * C_j)`.
    pub commitments: Vec<Vec<Vec<u8>>>,
}

/// Per-query payload message.
///
/// Carries the two 1-out-of-m OT setups (row and column, each with its own
/// fresh session id) and the blinded reconstruction element. The underlying
/// blinded scalar sequences never leave the sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryPayload {
    /// Row 1-out-of-m OT setup over `(R_t * r_R mod q)_t`.
    pub row: one_of_m::msgs::SenderSetup,
    /// Column 1-out-of-m OT setup over `(C_t * r_C mod q)_t`.
    pub col: one_of_m::msgs::SenderSetup,
    /// `g^((r_R * r_C)^-1 mod q)`.
    pub g_pow_inv_rr: BigUint,
}

/// The receiver's blinded choices for both 1-out-of-m OT runs of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    /// Row OT blinded choices.
    pub row: one_of_m::msgs::ReceiverPayload,
    /// Column OT blinded choices.
    pub col: one_of_m::msgs::ReceiverPayload,
}

/// The sender's response completing both 1-out-of-m OT runs of one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    /// Row OT masked seed pairs.
    pub row: one_of_m::msgs::SenderPayload,
    /// Column OT masked seed pairs.
    pub col: one_of_m::msgs::SenderPayload,
}
