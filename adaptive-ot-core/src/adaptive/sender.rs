use crate::{
    adaptive::{
        commitment_aad,
        msgs::{PublicSetup, QueryPayload, QueryRequest, QueryResponse},
        SenderConfig, SenderError, LABEL_COL, LABEL_ROW,
    },
    commit,
    hash::HashParams,
    one_of_m,
};

use num_bigint::BigUint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// An adaptive OT sender holding an `m x m` grid of secret messages.
///
/// Setup is performed once: it samples the long-term row/column scalars and
/// publishes the commitment grid. Afterwards any number of queries can be
/// served, each with fresh blinding randomness.
#[derive(Debug, Default)]
pub struct Sender<T: state::State = state::Initialized> {
    config: SenderConfig,
    /// Current state
    state: T,
}

impl Sender {
    /// Creates a new Sender.
    ///
    /// # Arguments
    ///
    /// * `config` - The Sender's configuration.
    pub fn new(config: SenderConfig) -> Self {
        Sender {
            config,
            state: state::Initialized::default(),
        }
    }

    /// Creates a new Sender with the provided RNG seed.
    ///
    /// # Arguments
    ///
    /// * `config` - The Sender's configuration.
    /// * `seed` - The RNG seed.
    pub fn new_with_seed(config: SenderConfig, seed: [u8; 32]) -> Self {
        Sender {
            config,
            state: state::Initialized {
                rng: ChaCha20Rng::from_seed(seed),
            },
        }
    }

    /// Performs the one-time setup over the message grid, returning the
    /// public setup to be sent to the receiver.
    ///
    /// Samples the long-term scalars `R` and `C` and commits every message
    /// `X[i][j]` under the key derived from `g^(R_i * C_j)`, with the cell
    /// coordinates bound as associated data. Re-running setup on a fresh
    /// sender invalidates all previously published commitments.
    ///
    /// # Arguments
    ///
    /// * `grid` - The `m x m` grid of secret messages, row-major.
    pub fn setup(
        self,
        grid: &[Vec<Vec<u8>>],
    ) -> Result<(PublicSetup, Sender<state::Setup>), SenderError> {
        let state::Initialized { mut rng } = self.state;

        let m = grid.len();
        if m == 0 {
            return Err(SenderError::MalformedGrid(
                "grid must not be empty".to_string(),
            ));
        }
        let max = self.config.max_message_len();
        for (i, row) in grid.iter().enumerate() {
            if row.len() != m {
                return Err(SenderError::MalformedGrid(format!(
                    "row {i} has {} entries, expected {m}",
                    row.len()
                )));
            }
            for (j, msg) in row.iter().enumerate() {
                if msg.is_empty() || msg.len() > max {
                    return Err(SenderError::InvalidMessageSize {
                        i,
                        j,
                        len: msg.len(),
                        max,
                    });
                }
            }
        }

        let group = self.config.group().clone();
        let hash_params = HashParams::generate(&group, &mut rng);

        let row_scalars: Vec<BigUint> =
            (0..m).map(|_| group.sample_nonzero(&mut rng)).collect();
        let col_scalars: Vec<BigUint> =
            (0..m).map(|_| group.sample_nonzero(&mut rng)).collect();

        // g^(R_i * C_j) computed as (g^R_i)^C_j.
        let g_pow_row: Vec<BigUint> = row_scalars.iter().map(|r| group.pow_g(r)).collect();

        let commitments = grid
            .iter()
            .enumerate()
            .map(|(i, row)| {
                row.iter()
                    .enumerate()
                    .map(|(j, msg)| {
                        let dh_elem = group.pow(&g_pow_row[i], &col_scalars[j]);
                        let key = hash_params.derive_key(&dh_elem, &group);
                        commit::commit(msg, &key, &commitment_aad(i, j))
                    })
                    .collect()
            })
            .collect();

        let setup = PublicSetup {
            m,
            group_p: group.p().clone(),
            group_q: group.q().clone(),
            group_g: group.g().clone(),
            hash_params,
            commitments,
        };

        Ok((
            setup,
            Sender {
                config: self.config,
                state: state::Setup {
                    rng,
                    row_scalars,
                    col_scalars,
                },
            },
        ))
    }
}

impl Sender<state::Setup> {
    /// Begins serving one query, returning the payload to be sent to the
    /// receiver and the session that will answer its OT request.
    ///
    /// Samples fresh blinding scalars `r_R`, `r_C` on every call; payloads
    /// are never reused across queries.
    pub fn begin_query(&mut self) -> Result<(QueryPayload, QuerySession), SenderError> {
        let state::Setup {
            rng,
            row_scalars,
            col_scalars,
        } = &mut self.state;
        let group = self.config.group();

        let r_row = group.sample_nonzero(rng);
        let r_col = group.sample_nonzero(rng);

        let row_payload: Vec<BigUint> = row_scalars
            .iter()
            .map(|s| group.mul_mod_q(s, &r_row))
            .collect();
        let col_payload: Vec<BigUint> = col_scalars
            .iter()
            .map(|s| group.mul_mod_q(s, &r_col))
            .collect();

        let inv_rr = group.invert_mod_q(&group.mul_mod_q(&r_row, &r_col))?;
        let g_pow_inv_rr = group.pow_g(&inv_rr);

        let (row_setup, row_sender) =
            one_of_m::Sender::new_with_seed(group.clone(), LABEL_ROW.to_vec(), rng.gen())
                .setup(&row_payload)?;
        let (col_setup, col_sender) =
            one_of_m::Sender::new_with_seed(group.clone(), LABEL_COL.to_vec(), rng.gen())
                .setup(&col_payload)?;

        Ok((
            QueryPayload {
                row: row_setup,
                col: col_setup,
                g_pow_inv_rr,
            },
            QuerySession {
                row: row_sender,
                col: col_sender,
            },
        ))
    }
}

/// The sender side of one in-flight query.
///
/// Consumed by [`QuerySession::transfer`]; abandoning it simply discards the
/// query's ephemeral state.
#[derive(Debug)]
pub struct QuerySession {
    row: one_of_m::Sender<one_of_m::sender_state::Transfer>,
    col: one_of_m::Sender<one_of_m::sender_state::Transfer>,
}

impl QuerySession {
    /// Answers the receiver's OT request for this query.
    ///
    /// # Arguments
    ///
    /// * `request` - The receiver's blinded choices.
    pub fn transfer(self, request: QueryRequest) -> Result<QueryResponse, SenderError> {
        Ok(QueryResponse {
            row: self.row.transfer(request.row)?,
            col: self.col.transfer(request.col)?,
        })
    }
}

/// The sender's state.
pub mod state {
    use super::*;

    mod sealed {
        pub trait Sealed {}

        impl Sealed for super::Initialized {}
        impl Sealed for super::Setup {}
    }

    /// The sender's state.
    pub trait State: sealed::Sealed {}

    /// The sender's initial state.
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

    /// The sender's state once setup has been published.
    ///
    /// The long-term scalars are immutable after setup and never leave this
    /// structure.
    pub struct Setup {
        pub(super) rng: ChaCha20Rng,
        /// Long-term row scalars `R`, in `Z_q*`.
        pub(super) row_scalars: Vec<BigUint>,
        /// Long-term column scalars `C`, in `Z_q*`.
        pub(super) col_scalars: Vec<BigUint>,
    }

    impl State for Setup {}

    opaque_debug::implement!(Setup);
}
