//! Property-based tests.

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::One;
use proptest::prelude::*;
use pve::{
    math::{ext_euclid, mod_inverse, mod_pow},
    traits::{PrivateKeyParts, PublicKeyParts},
    Error, PveKeys, RsaPrivateKey,
};
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

const PRIMES: &[u64] = &[
    2, 3, 5, 7, 11, 13, 61, 53, 101, 65537, 65539, 1_000_003, 998_244_353, 1_000_000_007,
];

prop_compose! {
    // WARNING: do *NOT* copy and paste this code. Tiny primes, test-only seeds.
    fn private_key()(
        seed in any::<[u8; 32]>(),
        i in 0..PRIMES.len(),
        j in 0..PRIMES.len() - 1
    ) -> RsaPrivateKey {
        let j = if j >= i { j + 1 } else { j };
        let mut rng = ChaCha8Rng::from_seed(seed);
        RsaPrivateKey::from_primes(&mut rng, &BigUint::from(PRIMES[i]), &BigUint::from(PRIMES[j]))
            .unwrap()
    }
}

proptest! {
    #[test]
    fn rsa_roundtrip(private_key in private_key(), m in any::<u64>()) {
        let m = BigUint::from(m) % private_key.n();
        let public_key = private_key.to_public_key();
        let c = public_key.encrypt(&m).unwrap();
        prop_assert_eq!(private_key.decrypt(&c).unwrap(), m);
    }

    #[test]
    fn key_invariants(private_key in private_key()) {
        prop_assert!(private_key.validate().is_ok());
        prop_assert!(private_key.e() < private_key.phi());
        prop_assert!(private_key.e().gcd(private_key.phi()).is_one());
    }

    #[test]
    fn bezout_identity(a in any::<u64>(), b in any::<u64>()) {
        let (g, x, y) = ext_euclid(&BigUint::from(a), &BigUint::from(b));
        prop_assert_eq!(&g, &BigUint::from(a).gcd(&BigUint::from(b)));
        prop_assert_eq!(BigInt::from(a) * x + BigInt::from(b) * y, BigInt::from(g));
    }

    #[test]
    fn inverse_property(a in 0..u64::MAX, m in 2..u64::MAX) {
        let a = BigUint::from(a);
        let m = BigUint::from(m);
        match mod_inverse(&a, &m) {
            Ok(inv) => {
                prop_assert!(inv < m);
                prop_assert!(((&a * &inv) % &m).is_one());
            }
            Err(err) => {
                prop_assert_eq!(err, Error::NoInverseExists);
                prop_assert!(!a.gcd(&m).is_one());
            }
        }
    }

    #[test]
    fn mod_pow_matches_modpow(base in 1..u64::MAX, exp in any::<u64>(), m in 2..u64::MAX) {
        prop_assume!(base % m != 0);
        let (base, exp, m) = (BigUint::from(base), BigUint::from(exp), BigUint::from(m));
        prop_assert_eq!(mod_pow(&base, &exp, &m).unwrap(), base.modpow(&exp, &m));
    }

    #[test]
    fn pve_product_matches_plaintext_product(seed in any::<[u8; 32]>(), a in 1..3233u64, b in 1..3233u64) {
        use std::collections::BTreeMap;

        prop_assume!(a != b);
        let mut rng = ChaCha8Rng::from_seed(seed);
        let keys = PveKeys::new(&mut rng, &BigUint::from(61u32), &BigUint::from(53u32)).unwrap();
        let mapping = BTreeMap::from([(0u8, BigUint::from(a)), (1u8, BigUint::from(b))]);
        let pve = keys.load(vec![0, 1], mapping).unwrap();

        let x = pve.encrypt(&0).unwrap();
        let y = pve.encrypt(&1).unwrap();
        prop_assert_eq!(pve.compare(&x, &y), (a * b) % 3233 == 1);
    }
}
