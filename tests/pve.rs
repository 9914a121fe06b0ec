//! End-to-end Pair Value Encryption over the example space.

use std::collections::BTreeMap;

use pve::{
    example_space::{xor_example_space, ExampleSpaceBuilder, ScanMode},
    hazmat::{rsa_decrypt, rsa_encrypt, rsa_setup},
    traits::{PrivateKeyParts, PublicKeyParts},
    BigUint, Error, Matcher, PveKeys, RsaPrivateKey, RsaPublicKey,
};
use rand_chacha::{rand_core::SeedableRng, ChaCha8Rng};

fn big(x: u64) -> BigUint {
    BigUint::from(x)
}

#[test]
fn textbook_setup_roundtrip() {
    let mut rng = ChaCha8Rng::from_seed([7; 32]);
    let (n, e, d) = rsa_setup(&mut rng, &big(61), &big(53)).unwrap();
    assert_eq!(n, big(3233));

    for m in 0..3233u64 {
        let c = rsa_encrypt(&big(m), &e, &n).unwrap();
        assert_eq!(rsa_decrypt(&c, &d, &n).unwrap(), big(m));
    }
}

#[test]
fn textbook_concrete_scenario() {
    let n = big(33);
    assert_eq!(rsa_encrypt(&big(5), &big(3), &n).unwrap(), big(26));
    assert_eq!(rsa_decrypt(&big(26), &big(7), &n).unwrap(), big(5));
}

#[test]
fn example_space_matches_across_seeds() {
    for seed in 0..8u8 {
        let mut rng = ChaCha8Rng::from_seed([seed; 32]);
        let keys = PveKeys::new(&mut rng, &big(3), &big(11)).unwrap();
        let (values, mapping) = xor_example_space().unwrap().into_parts();
        let pve = keys.load(values, mapping).unwrap();

        let ciphertexts: Vec<_> = (0..16u64).map(|x| pve.encrypt(&x).unwrap()).collect();
        assert!(pve.compare(&ciphertexts[0], &ciphertexts[15]));

        for (i, x) in ciphertexts.iter().enumerate() {
            for (j, y) in ciphertexts.iter().enumerate() {
                assert_eq!(pve.compare(x, y), i ^ j == 15, "seed {} ({}, {})", seed, i, j);
            }
        }
    }
}

#[test]
fn third_party_matcher() {
    let mut rng = ChaCha8Rng::from_seed([1; 32]);
    let keys = PveKeys::new(&mut rng, &big(3), &big(11)).unwrap();

    // Only n and e leave the key holder.
    let public_key = RsaPublicKey::new(keys.n().clone(), keys.e().clone()).unwrap();
    let matcher = Matcher::new(public_key);

    let (values, mapping) = xor_example_space().unwrap().into_parts();
    let pve = keys.load(values, mapping).unwrap();

    for x in 0..16u64 {
        let a = pve.encrypt(&x).unwrap();
        let b = pve.encrypt(&(x ^ 15)).unwrap();
        let y = (x + 1) % 16;
        let c = pve.encrypt(&y).unwrap();
        assert!(matcher.compare(&a, &b));
        assert_eq!(matcher.compare(&a, &c), x ^ y == 15, "x={} y={}", x, y);
    }
}

#[test]
fn larger_modulus_space() {
    let mut rng = ChaCha8Rng::from_seed([3; 32]);
    let p = big(1_000_000_007);
    let q = big(998_244_353);
    let keys = PveKeys::new(&mut rng, &p, &q).unwrap();

    let space = ExampleSpaceBuilder::new()
        .size(64)
        .mask(63)
        .modulus(keys.n().clone())
        .build()
        .unwrap();
    let pve = keys.load(space.values.clone(), space.mapping.clone()).unwrap();
    let d = pve.keys().d().clone();

    for (i, j) in &space.matches {
        let x = pve.encrypt(i).unwrap();
        let y = pve.encrypt(j).unwrap();
        assert!(pve.compare(&x, &y));
        assert_eq!(pve.decrypt(&x, &d).unwrap(), *i);
        assert_eq!(pve.decrypt(&y, &d).unwrap(), *j);
    }
}

#[test]
fn reference_mapping_is_rejected() {
    let key = RsaPrivateKey::from_primes_with_exp(&big(3), &big(11), &big(3)).unwrap();
    let keys = PveKeys::from_private_key(key);

    let space = ExampleSpaceBuilder::new()
        .scan_mode(ScanMode::Reference)
        .build()
        .unwrap();
    assert_eq!(space.mapping[&0], space.mapping[&15]);
    assert_eq!(
        keys.load(space.values, space.mapping).unwrap_err(),
        Error::InvalidMapping
    );
}

#[test]
fn string_problem_space() {
    let key = RsaPrivateKey::from_primes_with_exp(&big(61), &big(53), &big(17)).unwrap();
    assert_eq!(key.d(), &big(2753));
    let keys = PveKeys::from_private_key(key);

    // 2·1617 = 3234 ≡ 1 (mod 3233)
    let mapping = BTreeMap::from([
        ("alice".to_string(), big(2)),
        ("bob".to_string(), big(1617)),
        ("carol".to_string(), big(5)),
    ]);
    let values = vec!["alice".to_string(), "bob".to_string(), "carol".to_string()];
    let pve = keys.load(values, mapping).unwrap();

    let alice = pve.encrypt(&"alice".to_string()).unwrap();
    let bob = pve.encrypt(&"bob".to_string()).unwrap();
    let carol = pve.encrypt(&"carol".to_string()).unwrap();
    assert!(pve.compare(&alice, &bob));
    assert!(!pve.compare(&alice, &carol));
    assert_eq!(pve.decrypt(&carol, &big(2753)).unwrap(), "carol");
    assert_eq!(pve.decrypt(&carol, &big(17)), Err(Error::Unauthorized));
    assert_eq!(
        pve.encrypt(&"dave".to_string()),
        Err(Error::NotInProblemSpace)
    );
}

#[test]
fn bounded_exponent_search() {
    let mut rng = ChaCha8Rng::from_seed([9; 32]);
    assert_eq!(
        RsaPrivateKey::from_primes_with_limit(&mut rng, &big(3), &big(11), 0).unwrap_err(),
        Error::KeyGenerationFailed
    );
    assert!(RsaPrivateKey::from_primes_with_limit(&mut rng, &big(3), &big(11), 64).is_ok());
}
