//! Core implementation of DDH-based adaptive oblivious transfer.
//!
//! A sender holds an `m x m` grid of secret messages. After a one-time setup
//! in which the sender publishes a grid of decryptable commitments, the
//! receiver may repeatedly query single cells `(i, j)`: each query runs two
//! 1-out-of-m oblivious transfers (composed from Naor-Pinkas base OTs over a
//! safe-prime Schnorr group) and recovers exactly `X[i][j]`. The sender
//! learns nothing about which cell was queried, and the receiver learns
//! nothing about any other cell.
//!
//! All protocol types in this crate are sans-IO state machines: methods
//! consume and produce serializable messages, and the caller is responsible
//! for delivering them between the two parties.
//!
//! # ⚠️ Warning ⚠️
//!
//! Some implementations make assumptions about invariants which may not be
//! checked if using these low-level APIs naively. Failing to uphold these
//! invariants may result in security vulnerabilities.
//!
//! USE AT YOUR OWN RISK.

#![deny(missing_docs, unreachable_pub, unused_must_use)]
#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod adaptive;
pub mod commit;
pub mod group;
pub mod hash;
pub mod naor_pinkas;
pub mod one_of_m;
pub mod prf;
mod utils;
