use crate::{
    adaptive::{
        commitment_aad,
        msgs::{PublicSetup, QueryPayload, QueryRequest, QueryResponse},
        ReceiverConfig, ReceiverError, LABEL_COL, LABEL_ROW,
    },
    commit,
    group::SchnorrGroup,
    hash::HashParams,
    one_of_m,
};

use num_bigint::BigUint;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

/// An adaptive OT receiver.
///
/// Ingests the sender's public setup once, then queries arbitrary cells
/// `(i, j)` of the message grid. The queried coordinates never appear on the
/// wire.
#[derive(Debug, Default)]
pub struct Receiver<T: state::State = state::Initialized> {
    config: ReceiverConfig,
    /// The current state of the protocol.
    state: T,
}

impl Receiver {
    /// Creates a new receiver.
    ///
    /// # Arguments
    ///
    /// * `config` - The receiver's configuration.
    pub fn new(config: ReceiverConfig) -> Self {
        Self {
            config,
            state: state::Initialized::default(),
        }
    }

    /// Creates a new receiver with the provided RNG seed.
    ///
    /// # Arguments
    ///
    /// * `config` - The receiver's configuration.
    /// * `seed` - The RNG seed.
    pub fn new_with_seed(config: ReceiverConfig, seed: [u8; 32]) -> Self {
        Self {
            config,
            state: state::Initialized {
                rng: ChaCha20Rng::from_seed(seed),
            },
        }
    }

    /// Ingests the sender's public setup.
    ///
    /// The published group parameters are fully re-validated through
    /// [`SchnorrGroup::new`] and compared against the independently
    /// constructed group from the receiver's configuration; any disagreement
    /// is rejected.
    ///
    /// # Arguments
    ///
    /// * `setup` - The sender's public setup message.
    pub fn ingest_setup(
        self,
        setup: PublicSetup,
    ) -> Result<Receiver<state::Setup>, ReceiverError> {
        let state::Initialized { rng } = self.state;
        let PublicSetup {
            m,
            group_p,
            group_q,
            group_g,
            hash_params,
            commitments,
        } = setup;

        let group = SchnorrGroup::new(group_p, group_q, group_g)?;
        if &group != self.config.group() {
            return Err(ReceiverError::GroupMismatch);
        }

        if m == 0 {
            return Err(ReceiverError::MalformedSetup(
                "grid dimension must be positive".to_string(),
            ));
        }
        if commitments.len() != m || commitments.iter().any(|row| row.len() != m) {
            return Err(ReceiverError::MalformedSetup(format!(
                "commitment grid is not {m} x {m}"
            )));
        }

        if hash_params.lambda_bytes == 0 {
            return Err(ReceiverError::MalformedSetup(
                "hash output width must be positive".to_string(),
            ));
        }
        if hash_params.alpha == BigUint::from(0u32)
            || &hash_params.alpha >= group.q()
            || &hash_params.beta >= group.q()
        {
            return Err(ReceiverError::MalformedSetup(
                "hash parameters out of range".to_string(),
            ));
        }

        Ok(Receiver {
            config: self.config,
            state: state::Setup {
                rng,
                group,
                m,
                hash_params,
                commitments,
            },
        })
    }
}

impl Receiver<state::Setup> {
    /// The grid dimension `m`.
    pub fn grid_dim(&self) -> usize {
        self.state.m
    }

    /// Begins one query for cell `(i, j)`, returning the OT request to be
    /// sent to the sender and the pending query that will complete it.
    ///
    /// The indices are validated and the reconstruction element is
    /// subgroup-checked before any OT work is performed.
    ///
    /// # Arguments
    ///
    /// * `i` - Row index, in `[0, m)`.
    /// * `j` - Column index, in `[0, m)`.
    /// * `payload` - The sender's payload for this query.
    pub fn begin_query(
        &mut self,
        i: usize,
        j: usize,
        payload: QueryPayload,
    ) -> Result<(QueryRequest, PendingQuery), ReceiverError> {
        let state::Setup {
            rng,
            group,
            m,
            hash_params,
            commitments,
        } = &mut self.state;
        let m = *m;

        if i >= m || j >= m {
            return Err(ReceiverError::IndexOutOfRange { i, j, m });
        }

        let QueryPayload {
            row,
            col,
            g_pow_inv_rr,
        } = payload;

        // Subgroup check before deriving anything from the element.
        group.check_member(&g_pow_inv_rr)?;

        if row.ciphertexts.len() != m || col.ciphertexts.len() != m {
            return Err(ReceiverError::MalformedPayload(
                "payload size does not match the grid dimension".to_string(),
            ));
        }

        let (row_request, row_receiver) =
            one_of_m::Receiver::new_with_seed(group.clone(), LABEL_ROW.to_vec(), rng.gen())
                .choose(i, row)?;
        let (col_request, col_receiver) =
            one_of_m::Receiver::new_with_seed(group.clone(), LABEL_COL.to_vec(), rng.gen())
                .choose(j, col)?;

        Ok((
            QueryRequest {
                row: row_request,
                col: col_request,
            },
            PendingQuery {
                group: group.clone(),
                hash_params: hash_params.clone(),
                commitment: commitments[i][j].clone(),
                aad: commitment_aad(i, j),
                g_pow_inv_rr,
                row: row_receiver,
                col: col_receiver,
            },
        ))
    }
}

/// The receiver side of one in-flight query.
///
/// Consumed by [`PendingQuery::finish`]; abandoning it simply discards the
/// query's ephemeral state.
#[derive(Debug)]
pub struct PendingQuery {
    group: SchnorrGroup,
    hash_params: HashParams,
    commitment: Vec<u8>,
    aad: [u8; 8],
    g_pow_inv_rr: BigUint,
    row: one_of_m::Receiver<one_of_m::receiver_state::Receive>,
    col: one_of_m::Receiver<one_of_m::receiver_state::Receive>,
}

impl PendingQuery {
    /// Completes the query, recovering the plaintext of the selected cell.
    ///
    /// Combines the two OT outputs into `g^(R_i * C_j)`, derives the
    /// commitment key and opens the commitment with the cell coordinates as
    /// associated data.
    ///
    /// # Arguments
    ///
    /// * `response` - The sender's OT response.
    pub fn finish(self, response: QueryResponse) -> Result<Vec<u8>, ReceiverError> {
        let row_scalar = self.row.receive(response.row)?;
        let col_scalar = self.col.receive(response.col)?;

        // (g^((r_R r_C)^-1))^(R_i r_R * C_j r_C) = g^(R_i C_j)
        let exponent = self.group.mul_mod_q(&row_scalar, &col_scalar);
        let g_pow_rc = self.group.pow(&self.g_pow_inv_rr, &exponent);

        let key = self.hash_params.derive_key(&g_pow_rc, &self.group);
        Ok(commit::open(&self.commitment, &key, &self.aad)?)
    }
}

/// The receiver's state.
pub mod state {
    use super::*;

    mod sealed {
        pub trait Sealed {}

        impl Sealed for super::Initialized {}
        impl Sealed for super::Setup {}
    }

    /// The receiver's state.
    pub trait State: sealed::Sealed {}

    /// The receiver's initial state.
    pub struct Initialized {
        pub(super) rng: ChaCha20Rng,
    }

    impl State for Initialized {}

    opaque_debug::implement!(Initialized);

    impl Default for Initialized {
        fn default() -> Self {
            Self {
                rng: ChaCha20Rng::from_entropy(),
            }
        }
    }

    /// The receiver's state once the public setup has been ingested.
    pub struct Setup {
        pub(super) rng: ChaCha20Rng,
        /// The validated group, reconstructed from the published parameters.
        pub(super) group: SchnorrGroup,
        /// Grid dimension.
        pub(super) m: usize,
        /// Published hash parameters.
        pub(super) hash_params: HashParams,
        /// Published commitment grid, immutable after ingestion.
        pub(super) commitments: Vec<Vec<Vec<u8>>>,
    }

    impl State for Setup {}

    opaque_debug::implement!(Setup);
}
