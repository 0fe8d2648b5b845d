use crate::{
    group::SchnorrGroup,
    naor_pinkas,
    one_of_m::{
        msgs::{ReceiverPayload, SenderPayload, SenderSetup},
        num_bits, SenderError, SEED_LEN,
    },
    prf::prf_msg,
    utils::{xor, xor_in_place},
};

use num_bigint::BigUint;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// A 1-out-of-m OT sender holding m scalar values.
#[derive(Debug)]
pub struct Sender<T: state::State = state::Initialized> {
    group: SchnorrGroup,
    /// Direction label mixed into every pad derivation.
    label: Vec<u8>,
    /// Current state
    state: T,
}

impl Sender {
    /// Creates a new Sender.
    ///
    /// # Arguments
    ///
    /// * `group` - The DDH group to run the base OTs over.
    /// * `label` - Domain-separation label for this instance's pads.
    pub fn new(group: SchnorrGroup, label: Vec<u8>) -> Self {
        Self {
            group,
            label,
            state: state::Initialized {
                rng: ChaCha20Rng::from_entropy(),
            },
        }
    }

    /// Creates a new Sender with the provided RNG seed.
    ///
    /// # Arguments
    ///
    /// * `group` - The DDH group to run the base OTs over.
    /// * `label` - Domain-separation label for this instance's pads.
    /// * `seed` - The RNG seed.
    pub fn new_with_seed(group: SchnorrGroup, label: Vec<u8>, seed: [u8; 32]) -> Self {
        Self {
            group,
            label,
            state: state::Initialized {
                rng: ChaCha20Rng::from_seed(seed),
            },
        }
    }

    /// Prepares the transfer of `payload`, returning the setup message.
    ///
    /// Samples a fresh session id and one seed pair per bit position, and
    /// publishes every payload element masked under the pad selected by the
    /// bits of its index.
    ///
    /// # Arguments
    ///
    /// * `payload` - The m scalar values, each in `Z_q*`.
    pub fn setup(
        self,
        payload: &[BigUint],
    ) -> Result<(SenderSetup, Sender<state::Transfer>), SenderError> {
        let state::Initialized { mut rng } = self.state;

        if payload.is_empty() {
            return Err(SenderError::EmptyPayload);
        }
        let zero = BigUint::from(0u32);
        for (t, value) in payload.iter().enumerate() {
            if *value == zero || value >= self.group.q() {
                return Err(SenderError::InvalidScalar(t));
            }
        }

        let m = payload.len();
        let l = num_bits(m);
        let session_id: [u8; 16] = rng.gen();

        // Seed arena indexed by (bit position, bit value).
        let seeds: Vec<[[u8; SEED_LEN]; 2]> =
            (0..l).map(|_| [rng.gen(), rng.gen()]).collect();

        let mut base_setups = Vec::with_capacity(l);
        let mut base_senders = Vec::with_capacity(l);
        for _ in 0..l {
            let (setup, sender) =
                naor_pinkas::Sender::new_with_seed(self.group.clone(), rng.gen()).setup();
            base_setups.push(setup);
            base_senders.push(sender);
        }

        let scalar_bytes = self.group.scalar_bytes();
        let ciphertexts = payload
            .iter()
            .enumerate()
            .map(|(t, value)| {
                let mut pad = vec![0u8; scalar_bytes];
                for (k, seed_pair) in seeds.iter().enumerate() {
                    let bit = (t >> k) & 1;
                    xor_in_place(
                        &mut pad,
                        &prf_msg(
                            &seed_pair[bit],
                            &self.label,
                            k as u16,
                            &session_id,
                            scalar_bytes,
                        ),
                    );
                }
                xor(&self.group.encode_scalar(value), &pad)
            })
            .collect();

        Ok((
            SenderSetup {
                session_id,
                base: base_setups,
                ciphertexts,
            },
            Sender {
                group: self.group,
                label: self.label,
                state: state::Transfer {
                    base: base_senders,
                    seeds,
                },
            },
        ))
    }
}

impl Sender<state::Transfer> {
    /// Answers the receiver's blinded choices with the masked seed pairs.
    ///
    /// # Arguments
    ///
    /// * `payload` - The receiver's base OT blinded choices.
    pub fn transfer(self, payload: ReceiverPayload) -> Result<SenderPayload, SenderError> {
        let state::Transfer { base, seeds } = self.state;
        let ReceiverPayload { blinded_choices } = payload;

        if blinded_choices.len() != base.len() {
            return Err(SenderError::CountMismatch(
                base.len(),
                blinded_choices.len(),
            ));
        }

        let ciphertext_pairs = base
            .into_iter()
            .zip(&seeds)
            .zip(blinded_choices)
            .map(|((sender, seed_pair), blinded)| {
                sender.send(&seed_pair[0], &seed_pair[1], blinded)
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SenderPayload { ciphertext_pairs })
    }
}

/// The sender's state.
pub mod state {
    use super::*;

    mod sealed {
        pub trait Sealed {}

        impl Sealed for super::Initialized {}
        impl Sealed for super::Transfer {}
    }

    /// The sender's state.
    pub trait State: sealed::Sealed {}

    /// The sender's initial state.
    pub struct Initialized {
        pub(super) rng: ChaCha20Rng,
    }

    impl State for Initialized {}

    opaque_debug::implement!(Initialized);

    /// The sender's state once the masked payload has been published.
    pub struct Transfer {
        /// Base OT senders, one per bit position.
        pub(super) base: Vec<naor_pinkas::Sender<naor_pinkas::sender_state::Setup>>,
        /// Seed arena indexed by (bit position, bit value).
        pub(super) seeds: Vec<[[u8; SEED_LEN]; 2]>,
    }

    impl State for Transfer {}

    opaque_debug::implement!(Transfer);
}
