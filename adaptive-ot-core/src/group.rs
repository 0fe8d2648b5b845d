//! Safe-prime Schnorr group in which the DDH assumption is believed to hold.
//!
//! The group is the order-`q` subgroup of `Z_p*` where `p = 2q + 1` is a safe
//! prime. Every exponent used by the protocol lives in `Z_q`, every group
//! element in the order-`q` subgroup. Elements received over the wire MUST be
//! checked with [`SchnorrGroup::is_member`] before use: accepting an element
//! of a small subgroup silently breaks the sender's privacy.

use num_bigint::{BigUint, RandBigInt};
use once_cell::sync::Lazy;
use rand::Rng;
use thiserror::Error;

/// Errors raised by group parameter validation and arithmetic.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GroupError {
    /// The supplied `(p, q, g)` triple does not describe a safe-prime group
    /// with a generator of exact order `q`.
    #[error("invalid group parameters: {0}")]
    InvalidParams(String),
    /// A group element failed the order-`q` subgroup membership check.
    #[error("group element is not a member of the prime-order subgroup")]
    InvalidElement,
    /// An inverse of a scalar that is `0 mod q` was requested.
    #[error("scalar has no inverse modulo q")]
    NonInvertible,
}

/// RFC 3526 2048-bit MODP group modulus.
const MODP_2048_HEX: &str = "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1\
29024E088A67CC74020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6D\
F25F14374FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE45B3DC2007CB8A163BF0598DA4836\
1C55D39A69163FA8FD24CF5F83655D23DCA3AD961C62F356208552BB9ED5290770969\
66D670C354E4ABC9804F1746C08CA18217C32905E462E36CE3BE39E772C180E86039B27\
83A2EC07A28FB5C55DF06F4C52C9DE2BCBF6955817183995497CEA956AE515D2261898F\
A051015728E5A8AACAA68FFFFFFFFFFFFFFFF";

/// RFC 2409 1024-bit MODP group modulus (second Oakley group).
const MODP_1024_HEX: &str = "FFFFFFFFFFFFFFFFC90FDAA22168C234C4C6628B80DC1CD1\
29024E088A67CC74020BBEA63B139B22514A08798E3404DDEF9519B3CD3A431B302B0A6D\
F25F14374FE1356D6D51C245E485B576625E7EC6F44C42E9A637ED6B0BFF5CB6F406B7ED\
EE386BFB5A899FA5AE9F24117C4B1FE649286651ECE65381FFFFFFFFFFFFFFFF";

static MODP_2048: Lazy<SchnorrGroup> = Lazy::new(|| {
    SchnorrGroup::from_modp_hex(MODP_2048_HEX).expect("RFC 3526 2048-bit group is valid")
});

static MODP_1024: Lazy<SchnorrGroup> = Lazy::new(|| {
    SchnorrGroup::from_modp_hex(MODP_1024_HEX).expect("RFC 2409 1024-bit group is valid")
});

/// A safe-prime group `(p, q, g)` with `p = 2q + 1` and `g` of exact order `q`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchnorrGroup {
    p: BigUint,
    q: BigUint,
    g: BigUint,
}

impl SchnorrGroup {
    /// Creates a group from the given parameters, validating them.
    ///
    /// Checks that `p` is odd and a safe-prime candidate (base-2 Fermat
    /// probe), that `q = (p - 1) / 2`, and that `g` has exact order `q`
    /// (`1 < g < p`, `g^q mod p == 1`).
    pub fn new(p: BigUint, q: BigUint, g: BigUint) -> Result<Self, GroupError> {
        let one = BigUint::from(1u32);
        let two = BigUint::from(2u32);

        if p <= BigUint::from(3u32) || (&p % &two) != one {
            return Err(GroupError::InvalidParams(
                "modulus p must be an odd prime > 3".to_string(),
            ));
        }
        if q != (&p - &one) / &two {
            return Err(GroupError::InvalidParams(
                "q must equal (p - 1) / 2".to_string(),
            ));
        }
        if (&q % &two) != one {
            return Err(GroupError::InvalidParams(
                "subgroup order q must be odd".to_string(),
            ));
        }
        // Fermat probe with base 2. A composite passing this is not a
        // concern for the vetted RFC constants; callers supplying custom
        // parameters are expected to use vetted primes as well.
        if two.modpow(&(&p - &one), &p) != one {
            return Err(GroupError::InvalidParams(
                "modulus p fails the base-2 Fermat primality probe".to_string(),
            ));
        }
        if g <= one || g >= p {
            return Err(GroupError::InvalidParams(
                "generator g must lie in (1, p)".to_string(),
            ));
        }
        // Order divides p - 1 = 2q, so g^q == 1 with g != 1 pins it to q.
        if g.modpow(&q, &p) != one {
            return Err(GroupError::InvalidParams(
                "generator g does not have exact order q".to_string(),
            ));
        }

        Ok(Self { p, q, g })
    }

    /// Returns the RFC 3526 2048-bit MODP group with generator 2.
    pub fn modp_2048() -> Self {
        MODP_2048.clone()
    }

    /// Returns the RFC 2409 1024-bit MODP group with generator 2.
    ///
    /// Too small for production use; retained for interoperability and fast
    /// tests.
    pub fn modp_1024() -> Self {
        MODP_1024.clone()
    }

    fn from_modp_hex(hex: &str) -> Result<Self, GroupError> {
        let p = BigUint::parse_bytes(hex.as_bytes(), 16)
            .ok_or_else(|| GroupError::InvalidParams("malformed modulus constant".to_string()))?;
        let q = (&p - 1u32) >> 1;
        Self::new(p, q, BigUint::from(2u32))
    }

    /// The modulus `p`.
    pub fn p(&self) -> &BigUint {
        &self.p
    }

    /// The subgroup order `q = (p - 1) / 2`.
    pub fn q(&self) -> &BigUint {
        &self.q
    }

    /// The generator `g` of the order-`q` subgroup.
    pub fn g(&self) -> &BigUint {
        &self.g
    }

    /// Samples a scalar uniformly from `Z_q* = [1, q - 1]`.
    pub fn sample_nonzero<R: Rng + ?Sized>(&self, rng: &mut R) -> BigUint {
        rng.gen_biguint_below(&(&self.q - 1u32)) + 1u32
    }

    /// Computes `base^exp mod p`.
    pub fn pow(&self, base: &BigUint, exp: &BigUint) -> BigUint {
        (base % &self.p).modpow(exp, &self.p)
    }

    /// Computes `g^exp mod p`.
    pub fn pow_g(&self, exp: &BigUint) -> BigUint {
        self.g.modpow(exp, &self.p)
    }

    /// Computes `a * b mod p`.
    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.p
    }

    /// Computes `a * b mod q`.
    pub fn mul_mod_q(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.q
    }

    /// Computes the inverse of `x` modulo `q` by Fermat (`q` is prime).
    pub fn invert_mod_q(&self, x: &BigUint) -> Result<BigUint, GroupError> {
        let x = x % &self.q;
        if x == BigUint::from(0u32) {
            return Err(GroupError::NonInvertible);
        }
        Ok(x.modpow(&(&self.q - 2u32), &self.q))
    }

    /// Whether `x` is a member of the order-`q` subgroup (`1 < x < p` and
    /// `x^q mod p == 1`).
    pub fn is_member(&self, x: &BigUint) -> bool {
        let one = BigUint::from(1u32);
        *x > one && *x < self.p && x.modpow(&self.q, &self.p) == one
    }

    /// Checks subgroup membership, failing with [`GroupError::InvalidElement`].
    pub fn check_member(&self, x: &BigUint) -> Result<(), GroupError> {
        if self.is_member(x) {
            Ok(())
        } else {
            Err(GroupError::InvalidElement)
        }
    }

    /// Byte width of a fixed-width big-endian scalar encoding.
    pub fn scalar_bytes(&self) -> usize {
        self.q.bits().div_ceil(8) as usize
    }

    /// Byte width of a fixed-width big-endian element encoding.
    pub fn element_bytes(&self) -> usize {
        self.p.bits().div_ceil(8) as usize
    }

    /// Encodes a scalar as exactly [`Self::scalar_bytes`] big-endian bytes.
    pub fn encode_scalar(&self, s: &BigUint) -> Vec<u8> {
        encode_fixed(s, self.scalar_bytes())
    }

    /// Decodes a big-endian scalar. The value is NOT reduced mod `q`.
    pub fn decode_scalar(&self, bytes: &[u8]) -> BigUint {
        BigUint::from_bytes_be(bytes)
    }

    /// Encodes a group element as exactly [`Self::element_bytes`] big-endian
    /// bytes.
    pub fn encode_element(&self, e: &BigUint) -> Vec<u8> {
        encode_fixed(e, self.element_bytes())
    }
}

fn encode_fixed(value: &BigUint, width: usize) -> Vec<u8> {
    let raw = value.to_bytes_be();
    assert!(raw.len() <= width, "value exceeds the encoding width");
    let mut out = vec![0u8; width];
    out[width - raw.len()..].copy_from_slice(&raw);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::ChaCha12Rng;
    use rand_core::SeedableRng;

    #[test]
    fn test_modp_groups_validate() {
        let g1024 = SchnorrGroup::modp_1024();
        assert_eq!(g1024.p().bits(), 1024);
        assert_eq!(g1024.q(), &((g1024.p() - 1u32) >> 1));

        let g2048 = SchnorrGroup::modp_2048();
        assert_eq!(g2048.p().bits(), 2048);
        assert_eq!(g2048.element_bytes(), 256);
    }

    #[test]
    fn test_new_rejects_bad_params() {
        let group = SchnorrGroup::modp_1024();

        // q != (p - 1) / 2
        let err = SchnorrGroup::new(
            group.p().clone(),
            group.q() - 1u32,
            group.g().clone(),
        )
        .unwrap_err();
        assert!(matches!(err, GroupError::InvalidParams(_)));

        // g = 1 is not a generator
        let err = SchnorrGroup::new(
            group.p().clone(),
            group.q().clone(),
            BigUint::from(1u32),
        )
        .unwrap_err();
        assert!(matches!(err, GroupError::InvalidParams(_)));

        // p - 1 has order 2, not q
        let err = SchnorrGroup::new(
            group.p().clone(),
            group.q().clone(),
            group.p() - 1u32,
        )
        .unwrap_err();
        assert!(matches!(err, GroupError::InvalidParams(_)));

        // even modulus
        let err = SchnorrGroup::new(
            group.p() + 1u32,
            group.q().clone(),
            group.g().clone(),
        )
        .unwrap_err();
        assert!(matches!(err, GroupError::InvalidParams(_)));
    }

    #[test]
    fn test_membership() {
        let group = SchnorrGroup::modp_1024();

        // generator and an arbitrary power are members
        assert!(group.is_member(group.g()));
        assert!(group.is_member(&group.pow_g(&BigUint::from(12345u32))));

        // 0, 1, p - 1 (order 2) and p are not
        assert!(!group.is_member(&BigUint::from(0u32)));
        assert!(!group.is_member(&BigUint::from(1u32)));
        assert!(!group.is_member(&(group.p() - 1u32)));
        assert!(!group.is_member(group.p()));

        assert_eq!(
            group.check_member(&(group.p() - 1u32)),
            Err(GroupError::InvalidElement)
        );
    }

    #[test]
    fn test_sampling_range() {
        let group = SchnorrGroup::modp_1024();
        let mut rng = ChaCha12Rng::seed_from_u64(0);

        for _ in 0..32 {
            let s = group.sample_nonzero(&mut rng);
            assert!(s >= BigUint::from(1u32));
            assert!(&s < group.q());
        }
    }

    #[test]
    fn test_invert_mod_q() {
        let group = SchnorrGroup::modp_1024();
        let mut rng = ChaCha12Rng::seed_from_u64(1);

        let x = group.sample_nonzero(&mut rng);
        let inv = group.invert_mod_q(&x).unwrap();
        assert_eq!(group.mul_mod_q(&x, &inv), BigUint::from(1u32));

        assert_eq!(
            group.invert_mod_q(&BigUint::from(0u32)),
            Err(GroupError::NonInvertible)
        );
        assert_eq!(
            group.invert_mod_q(group.q()),
            Err(GroupError::NonInvertible)
        );
    }

    #[test]
    fn test_fixed_width_encoding() {
        let group = SchnorrGroup::modp_1024();

        let small = BigUint::from(7u32);
        let enc = group.encode_scalar(&small);
        assert_eq!(enc.len(), group.scalar_bytes());
        assert_eq!(group.decode_scalar(&enc), small);

        let elem = group.pow_g(&BigUint::from(99u32));
        assert_eq!(group.encode_element(&elem).len(), group.element_bytes());
    }
}
