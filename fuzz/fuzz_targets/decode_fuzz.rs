#![no_main]

use libfuzzer_sys::fuzz_target;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sm9::{verify, EncryptionMasterKeyPair, SigningMasterKeyPair};

// Arbitrary bytes must never panic a decoder -- only ever return an error.
fuzz_target!(|data: Vec<u8>| {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let sign_master = SigningMasterKeyPair::generate(&mut rng).unwrap();

    let _ = verify(&sign_master.public_key(), b"fuzz", b"message", &data);

    let enc_master = EncryptionMasterKeyPair::generate(&mut rng).unwrap();
    let key = enc_master.extract_encryption_key(b"fuzz", sm9::HID_ENC).unwrap();
    let _ = sm9::decrypt(&key, b"fuzz", &data);
});
