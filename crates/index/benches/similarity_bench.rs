use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use index::{top_similar, ContentArtifacts};

const VOCAB: [&str; 24] = [
    "áo", "thun", "nam", "nữ", "quần", "jean", "váy", "hoa", "sơ_mi", "công_sở", "cotton",
    "thoáng_mát", "co_giãn", "dự_tiệc", "ba_lỗ", "thể_thao", "len", "dạ", "khoác", "gió",
    "đen", "trắng", "xanh", "đỏ",
];

/// Deterministic synthetic catalog of `size` processed descriptions.
fn corpus(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| {
            (0..8)
                .map(|j| VOCAB[(i * 7 + j * 5 + i / 3) % VOCAB.len()])
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn bench_similar(c: &mut Criterion) {
    let mut group = c.benchmark_group("similar");
    let query = ["áo", "thun", "nam", "cotton", "thoáng_mát"];

    for size in [100usize, 1_000, 10_000].iter() {
        let artifacts = ContentArtifacts::from_corpus(corpus(*size));
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_function(format!("lookup_{size}"), |b| {
            b.iter(|| artifacts.similar(black_box(&query), 0.4, 10))
        });
    }
    group.finish();
}

fn bench_top_similar(c: &mut Criterion) {
    let scores: Vec<f32> = (0..10_000).map(|i| ((i * 37) % 1000) as f32 / 1000.0).collect();
    c.bench_function("top_similar_10k", |b| {
        b.iter(|| top_similar(black_box(&scores), 0.4, 10))
    });
}

criterion_group!(benches, bench_similar, bench_top_similar);
criterion_main!(benches);
