//! The adaptive OT roles.
//!
//! The sender holds an `m x m` message grid. Setup publishes a grid of
//! decryptable commitments `Y[i][j]` keyed by `h(g^(R_i * C_j))` for
//! long-term secret scalars `R`, `C`. Each query blinds the scalar
//! sequences with fresh `r_R`, `r_C`, serves them through two 1-out-of-m
//! OTs (row and column) and publishes `g^((r_R r_C)^-1)`; the receiver
//! recombines its two OT outputs into `g^(R_i * C_j)` and opens the one
//! commitment it holds the key for. Commitments bind the cell coordinates
//! as associated data, so a key valid for one cell can never open another.

mod config;
mod error;
pub mod msgs;
mod receiver;
mod sender;

pub use config::{
    ReceiverConfig, ReceiverConfigBuilder, ReceiverConfigBuilderError, SenderConfig,
    SenderConfigBuilder, SenderConfigBuilderError, DEFAULT_MAX_MESSAGE_LEN,
};
pub use error::{ReceiverError, SenderError};
pub use receiver::{state as receiver_state, PendingQuery, Receiver};
pub use sender::{state as sender_state, QuerySession, Sender};

pub(crate) const LABEL_ROW: &[u8] = b"ROW";
pub(crate) const LABEL_COL: &[u8] = b"COL";

/// Associated data binding a commitment to its cell coordinates.
pub(crate) fn commitment_aad(i: usize, j: usize) -> [u8; 8] {
    let mut aad = [0u8; 8];
    aad[..4].copy_from_slice(&(i as u32).to_be_bytes());
    aad[4..].copy_from_slice(&(j as u32).to_be_bytes());
    aad
}
