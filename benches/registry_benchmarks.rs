use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use keyreg::{KeyRegistry, families, register_all, type_ids};
use rand::{SeedableRng, rngs::StdRng};

fn benchmark_lookup(c: &mut Criterion) {
    let registry = Arc::new(KeyRegistry::new());
    let catalogues = register_all(&registry).unwrap();

    let mut group = c.benchmark_group("lookup");

    group.bench_function("registry", |b| {
        b.iter(|| black_box(registry.lookup(type_ids::CHACHA20_POLY1305).unwrap()));
    });

    group.bench_function("catalogue", |b| {
        b.iter(|| {
            black_box(
                catalogues
                    .aead
                    .get_key_manager(type_ids::CHACHA20_POLY1305, "AEAD", 0)
                    .unwrap(),
            )
        });
    });

    group.finish();
}

fn benchmark_primitive(c: &mut Criterion) {
    let registry = Arc::new(KeyRegistry::new());
    let catalogues = register_all(&registry).unwrap();

    let mut rng = StdRng::seed_from_u64(0);
    let key = registry
        .new_key_data(type_ids::CHACHA20_POLY1305, &[], &mut rng)
        .unwrap();

    c.bench_function("primitive/chacha20poly1305", |b| {
        b.iter(|| black_box(catalogues.aead.primitive(families::AEAD, 0, &key).unwrap()));
    });

    let aead = catalogues
        .aead
        .primitive(families::AEAD, 0, &key)
        .unwrap()
        .into_aead()
        .unwrap();

    let mut group = c.benchmark_group("encrypt");
    for size in [64, 1024, 16384] {
        let data = vec![0x42u8; size];
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &data, |b, data| {
            b.iter(|| black_box(aead.encrypt(data, b"").unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_lookup, benchmark_primitive);
criterion_main!(benches);
