#![no_main]

use libfuzzer_sys::fuzz_target;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sm9::{decrypt, encrypt, sign, verify, EncryptionMasterKeyPair, SigningMasterKeyPair};

#[derive(arbitrary::Arbitrary, Debug)]
struct FuzzInput {
    seed: u64,
    message: Vec<u8>,
    plaintext: Vec<u8>,
    flip_byte: Option<usize>,
}

fuzz_target!(|input: FuzzInput| {
    let mut rng = ChaCha8Rng::seed_from_u64(input.seed);

    let sign_master = SigningMasterKeyPair::generate(&mut rng).unwrap();
    let sign_key = sign_master.extract_signing_key(b"fuzz", sm9::HID_SIGN).unwrap();
    let Ok(mut signature) = sign(&sign_key, &sign_master.public_key(), &input.message, &mut rng) else {
        return;
    };
    if let Some(i) = input.flip_byte {
        if !signature.is_empty() {
            signature[i % signature.len()] ^= 0x01;
        }
    }
    // A corrupted signature must fail verification cleanly, never panic.
    let _ = verify(&sign_master.public_key(), b"fuzz", &input.message, &signature);

    if input.plaintext.len() > sm9::SM9_MAX_PLAINTEXT_SIZE {
        return;
    }
    let enc_master = EncryptionMasterKeyPair::generate(&mut rng).unwrap();
    let enc_key = enc_master.extract_encryption_key(b"fuzz", sm9::HID_ENC).unwrap();
    let Ok(mut envelope) = encrypt(&enc_master.public_key(), b"fuzz", &input.plaintext, &mut rng) else {
        return;
    };
    if let Some(i) = input.flip_byte {
        if !envelope.is_empty() {
            envelope[i % envelope.len()] ^= 0x01;
        }
    }
    let _ = decrypt(&enc_key, b"fuzz", &envelope);
});
