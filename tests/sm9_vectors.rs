//! End-to-end integration tests exercising the four schemes together, the way a consumer
//! pulling in this crate as a dependency would: through the public API only, with no access to
//! the internal field/group/pairing plumbing the unit tests inside `src/` already cover.

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sm9::{
    decapsulate, decrypt, encapsulate, encrypt, sign, step_1a, step_1b, step_2a,
    verify_confirmation, verify, EncryptionMasterKeyPair, SigningMasterKeyPair,
};

#[test]
fn signature_round_trips_and_resists_forgery() {
    let mut rng = ChaCha8Rng::seed_from_u64(1000);
    let master = SigningMasterKeyPair::generate(&mut rng).unwrap();
    let alice = master.extract_signing_key(b"alice@example.com", sm9::HID_SIGN).unwrap();

    let message = b"Chinese IBS standard test vector placeholder";
    let signature = sign(&alice, &master.public_key(), message, &mut rng).unwrap();
    verify(&master.public_key(), b"alice@example.com", message, &signature).unwrap();

    // Wrong identity, wrong message, and a bit-flipped signature must all be rejected.
    assert!(verify(&master.public_key(), b"bob@example.com", message, &signature).is_err());
    assert!(verify(&master.public_key(), b"alice@example.com", b"different message", &signature).is_err());
    let mut forged = signature.clone();
    let last = forged.len() - 1;
    forged[last] ^= 0x01;
    assert!(verify(&master.public_key(), b"alice@example.com", message, &forged).is_err());
}

#[test]
fn kem_and_public_key_encryption_agree_on_the_same_master() {
    let mut rng = ChaCha8Rng::seed_from_u64(1001);
    let master = EncryptionMasterKeyPair::generate(&mut rng).unwrap();
    let bob = master.extract_encryption_key(b"bob@example.com", sm9::HID_ENC).unwrap();

    let (sender_key, c) = encapsulate(&master.public_key(), b"bob@example.com", 32, &mut rng).unwrap();
    let receiver_key = decapsulate(&bob, b"bob@example.com", &c, 32).unwrap();
    assert_eq!(sender_key, receiver_key);

    let plaintext = b"a message protected end to end by identity-based encryption";
    let envelope = encrypt(&master.public_key(), b"bob@example.com", plaintext, &mut rng).unwrap();
    let recovered = decrypt(&bob, b"bob@example.com", &envelope).unwrap();
    assert_eq!(recovered, plaintext);

    // Tampering with a single byte anywhere in the envelope must break authentication.
    let mut tampered = envelope.clone();
    tampered[envelope.len() / 2] ^= 0x01;
    assert!(decrypt(&bob, b"bob@example.com", &tampered).is_err());
}

#[test]
fn key_exchange_converges_with_mutual_confirmation() {
    let mut rng = ChaCha8Rng::seed_from_u64(1002);
    let master = EncryptionMasterKeyPair::generate(&mut rng).unwrap();
    let alice_key = master.extract_exchange_key(b"alice@example.com", sm9::HID_EXCH).unwrap();
    let bob_key = master.extract_exchange_key(b"bob@example.com", sm9::HID_EXCH).unwrap();

    let (initiator, r_a) = step_1a(&master.public_key(), b"bob@example.com", &mut rng).unwrap();
    let responder = step_1b(
        &master.public_key(), &bob_key, b"bob@example.com", b"alice@example.com", &r_a, 48, &mut rng,
    )
    .unwrap();
    let initiator_out = step_2a(
        initiator, &master.public_key(), &alice_key, b"alice@example.com", b"bob@example.com",
        &responder.r_b, 48,
    )
    .unwrap();

    assert_eq!(initiator_out.shared_secret, responder.shared_secret);
    assert!(!initiator_out.shared_secret.as_bytes().iter().all(|&b| b == 0));

    verify_confirmation(&initiator_out.expected_peer_confirmation, &responder.confirmation).unwrap();
    verify_confirmation(&responder.expected_peer_confirmation, &initiator_out.confirmation).unwrap();
}

#[test]
fn different_master_key_pairs_never_collide_on_ciphertext() {
    let mut rng_a = ChaCha8Rng::seed_from_u64(1003);
    let mut rng_b = ChaCha8Rng::seed_from_u64(1004);
    let master_a = EncryptionMasterKeyPair::generate(&mut rng_a).unwrap();
    let master_b = EncryptionMasterKeyPair::generate(&mut rng_b).unwrap();

    let key_a = master_a.extract_encryption_key(b"carol@example.com", sm9::HID_ENC).unwrap();
    let envelope = encrypt(&master_a.public_key(), b"carol@example.com", b"secret", &mut rng_a).unwrap();
    assert!(decrypt(&key_a, b"carol@example.com", &envelope).is_ok());

    // A key extracted under a different key-generation center's master key must not decrypt.
    let key_b = master_b.extract_encryption_key(b"carol@example.com", sm9::HID_ENC).unwrap();
    assert!(decrypt(&key_b, b"carol@example.com", &envelope).is_err());
}

#[test]
fn malformed_signature_bytes_return_an_encoding_error_not_a_panic() {
    let mut rng = ChaCha8Rng::seed_from_u64(1005);
    let master = SigningMasterKeyPair::generate(&mut rng).unwrap();
    for candidate in [&b""[..], &[0u8; 1][..], &[0xFFu8; 200][..], &[0x30, 0x03, 0x02, 0x01, 0x00][..]] {
        let result = verify(&master.public_key(), b"dave@example.com", b"message", candidate);
        assert!(result.is_err());
    }
}
