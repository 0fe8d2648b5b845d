//! Pairwise-independent hash used to extract a symmetric key from a DDH
//! group element.
//!
//! The hash is the affine map `h(v) = (alpha * (v mod q) + beta) mod q`,
//! truncated to `lambda_bytes` after fixed-width serialization. Sender and
//! receiver apply it with identical published parameters so both derive the
//! same key from the same underlying element.

use num_bigint::{BigUint, RandBigInt};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::group::SchnorrGroup;

/// Minimum extracted key width in bytes.
const MIN_LAMBDA_BYTES: usize = 16;

/// Parameters of the pairwise-independent hash, published by the sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashParams {
    /// Multiplier, in `Z_q*`.
    pub alpha: BigUint,
    /// Offset, in `Z_q`.
    pub beta: BigUint,
    /// Width of the extracted key in bytes.
    pub lambda_bytes: usize,
}

impl HashParams {
    /// Samples fresh hash parameters for the given group.
    ///
    /// `lambda_bytes` is half the subgroup order's bit width (leftover-hash
    /// margin), floored at 16 bytes.
    pub fn generate<R: Rng + ?Sized>(group: &SchnorrGroup, rng: &mut R) -> Self {
        let alpha = group.sample_nonzero(rng);
        let beta = rng.gen_biguint_below(group.q());
        let lambda_bytes = MIN_LAMBDA_BYTES.max((group.q().bits() as usize / 2).div_ceil(8));

        Self {
            alpha,
            beta,
            lambda_bytes,
        }
    }

    /// Derives the `lambda_bytes`-wide key for a group element.
    ///
    /// Must be applied identically on both sides: `v = element mod q`,
    /// `y = (alpha * v + beta) mod q`, then the low `8 * lambda_bytes` bits
    /// of `y` encoded big-endian in exactly `lambda_bytes` bytes.
    pub fn derive_key(&self, element: &BigUint, group: &SchnorrGroup) -> Vec<u8> {
        let v = (element % group.p()) % group.q();
        let y = (&self.alpha * v + &self.beta) % group.q();

        let mask_bits = 8 * self.lambda_bytes as u64;
        let y = if y.bits() > mask_bits {
            y & ((BigUint::from(1u32) << mask_bits) - 1u32)
        } else {
            y
        };

        let raw = y.to_bytes_be();
        let mut out = vec![0u8; self.lambda_bytes];
        out[self.lambda_bytes - raw.len()..].copy_from_slice(&raw);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha12Rng;
    use rand_core::SeedableRng;

    #[test]
    fn test_generate_ranges() {
        let group = SchnorrGroup::modp_1024();
        let mut rng = ChaCha12Rng::seed_from_u64(0);

        let params = HashParams::generate(&group, &mut rng);
        assert!(params.alpha >= BigUint::from(1u32));
        assert!(&params.alpha < group.q());
        assert!(&params.beta < group.q());
        // half of a 1023-bit order, rounded up to bytes
        assert_eq!(params.lambda_bytes, 64);
    }

    #[test]
    fn test_derive_key_deterministic_and_fixed_width() {
        let group = SchnorrGroup::modp_1024();
        let mut rng = ChaCha12Rng::seed_from_u64(1);
        let params = HashParams::generate(&group, &mut rng);

        let elem = group.pow_g(&group.sample_nonzero(&mut rng));
        let k1 = params.derive_key(&elem, &group);
        let k2 = params.derive_key(&elem, &group);

        assert_eq!(k1, k2);
        assert_eq!(k1.len(), params.lambda_bytes);
    }

    #[test]
    fn test_derive_key_distinguishes_elements() {
        let group = SchnorrGroup::modp_1024();
        let mut rng = ChaCha12Rng::seed_from_u64(2);
        let params = HashParams::generate(&group, &mut rng);

        let a = group.pow_g(&BigUint::from(3u32));
        let b = group.pow_g(&BigUint::from(4u32));

        assert_ne!(params.derive_key(&a, &group), params.derive_key(&b, &group));
    }

    #[test]
    fn test_small_lambda_truncates() {
        let group = SchnorrGroup::modp_1024();
        let params = HashParams {
            alpha: BigUint::from(2u32),
            beta: BigUint::from(1u32),
            lambda_bytes: 16,
        };

        let elem = group.pow_g(&BigUint::from(7u32));
        let key = params.derive_key(&elem, &group);
        assert_eq!(key.len(), 16);
    }
}
