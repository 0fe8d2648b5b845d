use crate::{
    group::SchnorrGroup,
    naor_pinkas::{
        msgs::{ReceiverPayload, SenderPayload, SenderSetup},
        SenderError, LABEL_M0, LABEL_M1,
    },
    prf::prf_labeled,
    utils::xor,
};

use num_bigint::BigUint;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// A base OT sender holding a message pair `(m0, m1)`.
#[derive(Debug)]
pub struct Sender<T: state::State = state::Initialized> {
    group: SchnorrGroup,
    /// Current state
    state: T,
}

impl Sender {
    /// Creates a new Sender.
    ///
    /// # Arguments
    ///
    /// * `group` - The DDH group to run the protocol over.
    pub fn new(group: SchnorrGroup) -> Self {
        Self::new_with_rng(group, &mut ChaCha20Rng::from_entropy())
    }

    /// Creates a new Sender with the provided RNG seed.
    ///
    /// # Arguments
    ///
    /// * `group` - The DDH group to run the protocol over.
    /// * `seed` - The RNG seed.
    pub fn new_with_seed(group: SchnorrGroup, seed: [u8; 32]) -> Self {
        Self::new_with_rng(group, &mut ChaCha20Rng::from_seed(seed))
    }

    fn new_with_rng(group: SchnorrGroup, rng: &mut ChaCha20Rng) -> Self {
        let private_key = group.sample_nonzero(rng);
        let public_key = group.pow_g(&private_key);

        Sender {
            group,
            state: state::Initialized {
                private_key,
                public_key,
            },
        }
    }

    /// Returns the setup message to be sent to the receiver.
    pub fn setup(self) -> (SenderSetup, Sender<state::Setup>) {
        let state::Initialized {
            private_key,
            public_key,
        } = self.state;

        (
            SenderSetup {
                public_key: public_key.clone(),
            },
            Sender {
                group: self.group,
                state: state::Setup {
                    private_key,
                    public_key,
                },
            },
        )
    }
}

impl Sender<state::Setup> {
    /// Obliviously sends one of `(m0, m1)` to the receiver.
    ///
    /// The instance is consumed: a fresh sender must be created for every
    /// transfer so that the blinding exponent is never reused.
    ///
    /// # Arguments
    ///
    /// * `m0` - The message transferred for choice 0.
    /// * `m1` - The message transferred for choice 1.
    /// * `payload` - The receiver's blinded choice.
    pub fn send(
        self,
        m0: &[u8],
        m1: &[u8],
        payload: ReceiverPayload,
    ) -> Result<SenderPayload, SenderError> {
        let state::Setup {
            private_key,
            public_key,
        } = self.state;

        let ReceiverPayload { blinded_choice } = payload;

        if m0.len() != m1.len() {
            return Err(SenderError::LengthMismatch(m0.len(), m1.len()));
        }

        // Mandatory subgroup check: a low-order B would let a cheating
        // receiver correlate the two pads.
        self.group.check_member(&blinded_choice)?;

        // K0 = B^a
        let k0 = self.group.pow(&blinded_choice, &private_key);

        // A has order q, so A^(q-1) = A^-1.
        let public_key_inv = self.group.pow(&public_key, &(self.group.q() - 1u32));
        // K1 = (B / A)^a
        let k1 = self.group.pow(
            &self.group.mul(&blinded_choice, &public_key_inv),
            &private_key,
        );

        let pad0 = prf_labeled(&self.group.encode_element(&k0), LABEL_M0, m0.len());
        let pad1 = prf_labeled(&self.group.encode_element(&k1), LABEL_M1, m1.len());

        Ok(SenderPayload {
            ciphertexts: [xor(m0, &pad0), xor(m1, &pad1)],
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
        /// The blinding exponent `a`.
        pub(super) private_key: BigUint,
        /// The public element `A = g^a`.
        pub(super) public_key: BigUint,
    }

    impl State for Initialized {}

    opaque_debug::implement!(Initialized);

    /// The sender's state once its setup message has been emitted.
    pub struct Setup {
        /// The blinding exponent `a`.
        pub(super) private_key: BigUint,
        /// The public element `A = g^a`.
        pub(super) public_key: BigUint,
    }

    impl State for Setup {}

    opaque_debug::implement!(Setup);
}
