//! A Naor-Pinkas style 1-out-of-2 oblivious transfer over a safe-prime
//! Schnorr group.
//!
//! The sender publishes `A = g^a`. The receiver with choice bit `b` replies
//! with `B = g^k` (b = 0) or `B = A * g^k` (b = 1); the two forms are
//! indistinguishable to the sender. The sender masks `m0` under
//! `K0 = B^a` and `m1` under `K1 = (B / A)^a`; exactly one of the two equals
//! the receiver's `A^k`, so exactly one message can be unmasked. Every group
//! element received over the wire is subgroup-checked before use.

mod error;
pub mod msgs;
mod receiver;
mod sender;

pub use error::{ReceiverError, SenderError};
pub use receiver::{state as receiver_state, Receiver};
pub use sender::{state as sender_state, Sender};

pub(crate) const LABEL_M0: &[u8] = b"OT2|m0";
pub(crate) const LABEL_M1: &[u8] = b"OT2|m1";
