use crate::{
    group::SchnorrGroup,
    naor_pinkas::{
        msgs::{ReceiverPayload, SenderPayload, SenderSetup},
        ReceiverError, LABEL_M0, LABEL_M1,
    },
    prf::prf_labeled,
    utils::xor,
};

use num_bigint::BigUint;
use rand_chacha::ChaCha20Rng;
use rand_core::SeedableRng;

/// A base OT receiver holding a choice bit.
#[derive(Debug)]
pub struct Receiver<T: state::State = state::Initialized> {
    group: SchnorrGroup,
    /// The receiver's choice bit.
    choice: bool,
    /// The current state of the protocol.
    state: T,
}

impl Receiver {
    /// Creates a new receiver.
    ///
    /// # Arguments
    ///
    /// * `group` - The DDH group to run the protocol over.
    /// * `choice` - The receiver's choice bit.
    pub fn new(group: SchnorrGroup, choice: bool) -> Self {
        Self {
            group,
            choice,
            state: state::Initialized {
                rng: ChaCha20Rng::from_entropy(),
            },
        }
    }

    /// Creates a new receiver with the provided RNG seed.
    ///
    /// # Arguments
    ///
    /// * `group` - The DDH group to run the protocol over.
    /// * `choice` - The receiver's choice bit.
    /// * `seed` - The RNG seed.
    pub fn new_with_seed(group: SchnorrGroup, choice: bool, seed: [u8; 32]) -> Self {
        Self {
            group,
            choice,
            state: state::Initialized {
                rng: ChaCha20Rng::from_seed(seed),
            },
        }
    }

    /// Processes the sender's setup message, returning the blinded choice to
    /// be sent back.
    ///
    /// The sender's public element is subgroup-checked before any use.
    ///
    /// # Arguments
    ///
    /// * `setup` - The sender's setup message.
    pub fn receive_setup(
        self,
        setup: SenderSetup,
    ) -> Result<(ReceiverPayload, Receiver<state::Setup>), ReceiverError> {
        let state::Initialized { mut rng } = self.state;
        let SenderSetup { public_key } = setup;

        self.group.check_member(&public_key)?;

        let ephemeral = self.group.sample_nonzero(&mut rng);
        let g_pow_k = self.group.pow_g(&ephemeral);

        // b = 0: B = g^k, b = 1: B = A * g^k
        let blinded_choice = if self.choice {
            self.group.mul(&public_key, &g_pow_k)
        } else {
            g_pow_k
        };

        // Either way the receiver's key is A^k, matching exactly one of the
        // sender's K0/K1.
        let shared_element = self.group.pow(&public_key, &ephemeral);

        Ok((
            ReceiverPayload { blinded_choice },
            Receiver {
                group: self.group,
                choice: self.choice,
                state: state::Setup { shared_element },
            },
        ))
    }
}

impl Receiver<state::Setup> {
    /// Receives the masked message pair, returning the plaintext matching the
    /// receiver's choice bit.
    ///
    /// # Arguments
    ///
    /// * `payload` - The sender's masked messages.
    pub fn receive(self, payload: SenderPayload) -> Result<Vec<u8>, ReceiverError> {
        let state::Setup { shared_element } = self.state;
        let SenderPayload { ciphertexts } = payload;

        let [c0, c1] = ciphertexts;
        let (ciphertext, label) = if self.choice {
            (c1, LABEL_M1)
        } else {
            (c0, LABEL_M0)
        };

        let pad = prf_labeled(
            &self.group.encode_element(&shared_element),
            label,
            ciphertext.len(),
        );

        Ok(xor(&ciphertext, &pad))
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

    /// The receiver's state once its blinded choice has been emitted.
    pub struct Setup {
        /// The shared element `A^k` from which the unmasking pad is derived.
        pub(super) shared_element: BigUint,
    }

    impl State for Setup {}

    opaque_debug::implement!(Setup);
}
