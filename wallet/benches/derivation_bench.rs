// Derivation & signing benchmarks for the wallet core.
//
// PBKDF2 dominates a full derivation, so the stages are measured separately:
// seed stretching, keystream reads, keypair generation, the full pipeline,
// and Dilithium3 sign/verify.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use dlt_wallet::crypto::{derive_seed, sign, verify, Keystream};
use dlt_wallet::identity::{checksum_address, derive_keys, generate_keypair};

const PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon abandon abandon abandon \
                      abandon abandon abandon abandon abandon abandon abandon art";

fn bench_seed_derivation(c: &mut Criterion) {
    c.bench_function("pbkdf2/derive_seed", |b| {
        b.iter(|| derive_seed(PHRASE));
    });
}

fn bench_keystream(c: &mut Criterion) {
    let seed = derive_seed(PHRASE);
    let mut group = c.benchmark_group("hkdf/keystream_read");

    for size in [32usize, 256, 4096] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut buf = vec![0u8; size];
            b.iter(|| {
                let mut stream = Keystream::new(&seed);
                stream.fill(&mut buf).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_keypair_generation(c: &mut Criterion) {
    let seed = derive_seed(PHRASE);
    c.bench_function("dilithium3/generate_keypair", |b| {
        b.iter(|| generate_keypair(&mut Keystream::new(&seed)).unwrap());
    });
}

fn bench_full_derivation(c: &mut Criterion) {
    c.bench_function("wallet/derive_keys", |b| {
        b.iter(|| {
            let wallet = derive_keys(PHRASE).unwrap();
            checksum_address(&wallet.address)
        });
    });
}

fn bench_sign_message(c: &mut Criterion) {
    let wallet = derive_keys(PHRASE).unwrap();
    let message = b"transfer 500 DLT to dlt1e3b0c44298fc1c149afbf4c8996fb92427ae41e4332d";

    c.bench_function("dilithium3/sign_message", |b| {
        b.iter(|| sign(wallet.keypair.private_key.as_bytes(), message).unwrap());
    });
}

fn bench_verify_signature(c: &mut Criterion) {
    let wallet = derive_keys(PHRASE).unwrap();
    let message = b"transfer 500 DLT to dlt1e3b0c44298fc1c149afbf4c8996fb92427ae41e4332d";
    let signed = sign(wallet.keypair.private_key.as_bytes(), message).unwrap();

    c.bench_function("dilithium3/verify_signature", |b| {
        b.iter(|| verify(wallet.keypair.public_key.as_bytes(), message, &signed.signature));
    });
}

criterion_group!(
    benches,
    bench_seed_derivation,
    bench_keystream,
    bench_keypair_generation,
    bench_full_derivation,
    bench_sign_message,
    bench_verify_signature,
);
criterion_main!(benches);
