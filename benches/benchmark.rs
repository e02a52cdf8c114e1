use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sm9::{decapsulate, decrypt, encapsulate, encrypt, sign, step_1a, step_1b, step_2a, verify};
use sm9::{EncryptionMasterKeyPair, SigningMasterKeyPair};

const ALICE: &[u8] = b"Alice";
const BOB: &[u8] = b"Bob";

#[allow(clippy::redundant_closure)]
pub fn criterion_benchmark(c: &mut Criterion) {
    let mut rng = ChaCha8Rng::seed_from_u64(0);

    let sign_master = SigningMasterKeyPair::generate(&mut rng).unwrap();
    let sign_key = sign_master.extract_signing_key(ALICE, sm9::HID_SIGN).unwrap();
    let signature = sign(&sign_key, &sign_master.public_key(), b"benchmark message", &mut rng).unwrap();

    let enc_master = EncryptionMasterKeyPair::generate(&mut rng).unwrap();
    let enc_key = enc_master.extract_encryption_key(BOB, sm9::HID_ENC).unwrap();
    let (_, kem_ct) = encapsulate(&enc_master.public_key(), BOB, 32, &mut rng).unwrap();
    let envelope = encrypt(&enc_master.public_key(), BOB, b"benchmark plaintext", &mut rng).unwrap();

    let exch_key_a = enc_master.extract_exchange_key(ALICE, sm9::HID_EXCH).unwrap();
    let exch_key_b = enc_master.extract_exchange_key(BOB, sm9::HID_EXCH).unwrap();
    let (_, r_a_bytes) = step_1a(&enc_master.public_key(), BOB, &mut rng).unwrap();
    let responder_out =
        step_1b(&enc_master.public_key(), &exch_key_b, BOB, ALICE, &r_a_bytes, 32, &mut rng).unwrap();

    c.bench_function("sign", |b| {
        b.iter(|| sign(&sign_key, &sign_master.public_key(), b"benchmark message", &mut rng));
    });
    c.bench_function("verify", |b| {
        b.iter(|| verify(&sign_master.public_key(), ALICE, b"benchmark message", &signature));
    });

    c.bench_function("encapsulate", |b| {
        b.iter(|| encapsulate(&enc_master.public_key(), BOB, 32, &mut rng));
    });
    c.bench_function("decapsulate", |b| {
        b.iter(|| decapsulate(&enc_key, BOB, &kem_ct, 32));
    });

    c.bench_function("encrypt", |b| {
        b.iter(|| encrypt(&enc_master.public_key(), BOB, b"benchmark plaintext", &mut rng));
    });
    c.bench_function("decrypt", |b| {
        b.iter(|| decrypt(&enc_key, BOB, &envelope));
    });

    c.bench_function("exchange step_1a", |b| {
        b.iter(|| step_1a(&enc_master.public_key(), BOB, &mut rng));
    });
    c.bench_function("exchange step_1b", |b| {
        b.iter(|| step_1b(&enc_master.public_key(), &exch_key_b, BOB, ALICE, &r_a_bytes, 32, &mut rng));
    });
    c.bench_function("exchange step_2a", |b| {
        b.iter_batched(
            || step_1a(&enc_master.public_key(), BOB, &mut rng).unwrap().0,
            |initiator| {
                step_2a(initiator, &enc_master.public_key(), &exch_key_a, ALICE, BOB, &responder_out.r_b, 32)
            },
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
