//! A 1-out-of-m oblivious transfer over `Z_q` scalars, composed from
//! `l = ceil(log2 m)` base OT instances.
//!
//! For every bit position `k` the sender holds a fresh seed pair
//! `(seed_{k,0}, seed_{k,1})`; instance `k` transfers exactly the seed
//! matching bit `k` of the receiver's index. Each candidate value `V_t` is
//! published masked under the XOR of the PRF pads of the seeds selected by
//! the bits of `t`, so the receiver can reconstruct the pad for its own
//! index only. Pads are domain-separated by direction label, bit position
//! and a per-instance session id, which makes pad reuse across queries
//! impossible.

mod error;
pub mod msgs;
mod receiver;
mod sender;

pub use error::{ReceiverError, SenderError};
pub use receiver::{state as receiver_state, Receiver};
pub use sender::{state as sender_state, Sender};

/// Number of base OT instances needed to select among `m` messages.
pub(crate) fn num_bits(m: usize) -> usize {
    if m <= 1 {
        0
    } else {
        (usize::BITS - (m - 1).leading_zeros()) as usize
    }
}

/// Width of the per-position seeds transferred by the base OTs.
pub(crate) const SEED_LEN: usize = 32;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::SchnorrGroup;
    use num_bigint::BigUint;
    use rand::Rng;
    use rand_chacha::ChaCha12Rng;
    use rand_core::SeedableRng;
    use rstest::*;

    fn payload(group: &SchnorrGroup, m: usize, seed: u64) -> Vec<BigUint> {
        let mut rng = ChaCha12Rng::seed_from_u64(seed);
        (0..m).map(|_| group.sample_nonzero(&mut rng)).collect()
    }

    fn run(
        group: &SchnorrGroup,
        values: &[BigUint],
        index: usize,
        seed: u8,
    ) -> Result<BigUint, ReceiverError> {
        let sender = Sender::new_with_seed(group.clone(), b"TEST".to_vec(), [seed; 32]);
        let receiver =
            Receiver::new_with_seed(group.clone(), b"TEST".to_vec(), [seed + 1; 32]);

        let (setup, sender) = sender.setup(values).unwrap();
        let (request, receiver) = receiver.choose(index, setup)?;
        let response = sender.transfer(request).unwrap();

        receiver.receive(response)
    }

    #[test]
    fn test_num_bits() {
        assert_eq!(num_bits(1), 0);
        assert_eq!(num_bits(2), 1);
        assert_eq!(num_bits(3), 2);
        assert_eq!(num_bits(4), 2);
        assert_eq!(num_bits(5), 3);
        assert_eq!(num_bits(8), 3);
        assert_eq!(num_bits(9), 4);
    }

    #[rstest]
    #[case::two(2)]
    #[case::four(4)]
    #[case::eight(8)]
    fn test_all_indices_recovered(#[case] m: usize) {
        let group = SchnorrGroup::modp_1024();
        let values = payload(&group, m, m as u64);

        for index in 0..m {
            let recovered = run(&group, &values, index, index as u8).unwrap();
            assert_eq!(recovered, values[index]);
        }
    }

    #[test]
    fn test_non_power_of_two() {
        let group = SchnorrGroup::modp_1024();
        let values = payload(&group, 5, 99);

        for index in [0, 2, 4] {
            assert_eq!(run(&group, &values, index, 10 + index as u8).unwrap(), values[index]);
        }
    }

    #[test]
    fn test_single_message_uses_no_base_ot() {
        let group = SchnorrGroup::modp_1024();
        let values = payload(&group, 1, 7);

        let sender = Sender::new_with_seed(group.clone(), b"TEST".to_vec(), [0u8; 32]);
        let receiver = Receiver::new_with_seed(group.clone(), b"TEST".to_vec(), [1u8; 32]);

        let (setup, sender) = sender.setup(&values).unwrap();
        assert!(setup.base.is_empty());

        let (request, receiver) = receiver.choose(0, setup).unwrap();
        assert!(request.blinded_choices.is_empty());

        let response = sender.transfer(request).unwrap();
        assert_eq!(receiver.receive(response).unwrap(), values[0]);
    }

    #[test]
    fn test_index_out_of_range() {
        let group = SchnorrGroup::modp_1024();
        let values = payload(&group, 4, 3);

        let err = run(&group, &values, 4, 0).unwrap_err();
        assert!(matches!(
            err,
            ReceiverError::IndexOutOfRange { index: 4, count: 4 }
        ));
    }

    #[test]
    fn test_sender_rejects_invalid_payload() {
        let group = SchnorrGroup::modp_1024();

        let sender = Sender::new_with_seed(group.clone(), b"TEST".to_vec(), [0u8; 32]);
        let err = sender.setup(&[]).unwrap_err();
        assert!(matches!(err, SenderError::EmptyPayload));

        let sender = Sender::new_with_seed(group.clone(), b"TEST".to_vec(), [0u8; 32]);
        let err = sender
            .setup(&[BigUint::from(1u32), BigUint::from(0u32)])
            .unwrap_err();
        assert!(matches!(err, SenderError::InvalidScalar(1)));

        let sender = Sender::new_with_seed(group.clone(), b"TEST".to_vec(), [0u8; 32]);
        let err = sender.setup(&[group.q().clone()]).unwrap_err();
        assert!(matches!(err, SenderError::InvalidScalar(0)));
    }

    #[test]
    fn test_tampered_ciphertext_never_yields_original() {
        let group = SchnorrGroup::modp_1024();
        let values = payload(&group, 4, 42);
        let index = 2;

        let sender = Sender::new_with_seed(group.clone(), b"TEST".to_vec(), [5u8; 32]);
        let receiver = Receiver::new_with_seed(group.clone(), b"TEST".to_vec(), [6u8; 32]);

        let (mut setup, sender) = sender.setup(&values).unwrap();
        setup.ciphertexts[index][0] ^= 0x80;

        let (request, receiver) = receiver.choose(index, setup).unwrap();
        let response = sender.transfer(request).unwrap();

        // either rejected as out of range, or a different scalar; never the
        // original value
        match receiver.receive(response) {
            Ok(recovered) => assert_ne!(recovered, values[index]),
            Err(err) => assert!(matches!(err, ReceiverError::InvalidScalar)),
        }
    }

    #[test]
    fn test_session_ids_are_fresh() {
        let group = SchnorrGroup::modp_1024();
        let values = payload(&group, 2, 1);

        let mut rng = ChaCha12Rng::seed_from_u64(0);
        let (setup_a, _) = Sender::new_with_seed(group.clone(), b"TEST".to_vec(), rng.gen())
            .setup(&values)
            .unwrap();
        let (setup_b, _) = Sender::new_with_seed(group.clone(), b"TEST".to_vec(), rng.gen())
            .setup(&values)
            .unwrap();

        assert_ne!(setup_a.session_id, setup_b.session_id);
        assert_ne!(setup_a.ciphertexts, setup_b.ciphertexts);
    }
}
