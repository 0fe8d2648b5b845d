use crate::{
    group::SchnorrGroup,
    naor_pinkas,
    one_of_m::{
        msgs::{ReceiverPayload, SenderPayload, SenderSetup},
        num_bits, ReceiverError, SEED_LEN,
    },
    prf::prf_msg,
    utils::{xor, xor_in_place},
};

use itybity::ToBits;
use num_bigint::BigUint;
use rand::Rng;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

/// A 1-out-of-m OT receiver.
#[derive(Debug)]
pub struct Receiver<T: state::State = state::Initialized> {
    group: SchnorrGroup,
    /// Direction label mixed into every pad derivation.
    label: Vec<u8>,
    /// The current state of the protocol.
    state: T,
}

impl Receiver {
    /// Creates a new receiver.
    ///
    /// # Arguments
    ///
    /// * `group` - The DDH group to run the base OTs over.
    /// * `label` - Domain-separation label, matching the sender's.
    pub fn new(group: SchnorrGroup, label: Vec<u8>) -> Self {
        Self {
            group,
            label,
            state: state::Initialized {
                rng: ChaCha20Rng::from_entropy(),
            },
        }
    }

    /// Creates a new receiver with the provided RNG seed.
    ///
    /// # Arguments
    ///
    /// * `group` - The DDH group to run the base OTs over.
    /// * `label` - Domain-separation label, matching the sender's.
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

    /// Selects `index`, returning the blinded choices for every base OT
    /// instance.
    ///
    /// The index is validated against the payload size before any base OT
    /// work is performed.
    ///
    /// # Arguments
    ///
    /// * `index` - The index of the value to receive, in `[0, m)`.
    /// * `setup` - The sender's setup message.
    pub fn choose(
        self,
        index: usize,
        setup: SenderSetup,
    ) -> Result<(ReceiverPayload, Receiver<state::Receive>), ReceiverError> {
        let state::Initialized { mut rng } = self.state;
        let SenderSetup {
            session_id,
            base,
            ciphertexts,
        } = setup;

        let m = ciphertexts.len();
        if m == 0 {
            return Err(ReceiverError::InvalidPayload(
                "sender published no ciphertexts".to_string(),
            ));
        }
        if index >= m {
            return Err(ReceiverError::IndexOutOfRange { index, count: m });
        }

        let l = num_bits(m);
        if base.len() != l {
            return Err(ReceiverError::CountMismatch(l, base.len()));
        }

        let scalar_bytes = self.group.scalar_bytes();
        if ciphertexts.iter().any(|ct| ct.len() != scalar_bytes) {
            return Err(ReceiverError::InvalidPayload(
                "ciphertext width does not match the scalar encoding".to_string(),
            ));
        }
        let ciphertext = ciphertexts[index].clone();

        let mut blinded_choices = Vec::with_capacity(l);
        let mut base_receivers = Vec::with_capacity(l);
        for (bit, base_setup) in (index as u64).iter_lsb0().take(l).zip(base) {
            let receiver =
                naor_pinkas::Receiver::new_with_seed(self.group.clone(), bit, rng.gen());
            let (payload, receiver) = receiver.receive_setup(base_setup)?;
            blinded_choices.push(payload);
            base_receivers.push(receiver);
        }

        Ok((
            ReceiverPayload { blinded_choices },
            Receiver {
                group: self.group,
                label: self.label,
                state: state::Receive {
                    base: base_receivers,
                    session_id,
                    ciphertext,
                },
            },
        ))
    }
}

impl Receiver<state::Receive> {
    /// Receives the masked seed pairs and recovers the chosen scalar.
    ///
    /// Only the pad for the receiver's own index can be reconstructed; every
    /// other candidate requires seeds this party never learned.
    ///
    /// # Arguments
    ///
    /// * `payload` - The sender's masked seed pairs.
    pub fn receive(self, payload: SenderPayload) -> Result<BigUint, ReceiverError> {
        let state::Receive {
            base,
            session_id,
            ciphertext,
        } = self.state;
        let SenderPayload { ciphertext_pairs } = payload;

        if ciphertext_pairs.len() != base.len() {
            return Err(ReceiverError::CountMismatch(
                base.len(),
                ciphertext_pairs.len(),
            ));
        }

        let mut pad = vec![0u8; ciphertext.len()];
        for (k, (receiver, pair)) in base.into_iter().zip(ciphertext_pairs).enumerate() {
            let seed = receiver.receive(pair)?;
            if seed.len() != SEED_LEN {
                return Err(ReceiverError::InvalidPayload(
                    "seed length mismatch".to_string(),
                ));
            }
            let pad_len = pad.len();
            xor_in_place(
                &mut pad,
                &prf_msg(&seed, &self.label, k as u16, &session_id, pad_len),
            );
        }

        let value = self.group.decode_scalar(&xor(&ciphertext, &pad));

        // An honest sender only transfers elements of Z_q*.
        if value == BigUint::from(0u32) || &value >= self.group.q() {
            return Err(ReceiverError::InvalidScalar);
        }

        Ok(value)
    }
}

/// The receiver's state.
pub mod state {
    use super::*;

    mod sealed {
        pub trait Sealed {}

        impl Sealed for super::Initialized {}
        impl Sealed for super::Receive {}
    }

    /// The receiver's state.
    pub trait State: sealed::Sealed {}

    /// The receiver's initial state.
    pub struct Initialized {
        pub(super) rng: ChaCha20Rng,
    }

    impl State for Initialized {}

    opaque_debug::implement!(Initialized);

    /// The receiver's state once its blinded choices have been emitted.
    pub struct Receive {
        /// Armed base OT receivers, one per bit position.
        pub(super) base: Vec<naor_pinkas::Receiver<naor_pinkas::receiver_state::Setup>>,
        /// The sender's session id.
        pub(super) session_id: [u8; 16],
        /// The masked value at the chosen index.
        pub(super) ciphertext: Vec<u8>,
    }

    impl State for Receive {}

    opaque_debug::implement!(Receive);
}
