use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use shoprec::{ContentArtifacts, Preprocessor, StopwordSet};
use std::hint::black_box;

const GARMENTS: &[&str] = &["áo thun", "áo sơ mi", "quần jean", "quần short", "váy", "giày", "túi"];
const TRAITS: &[&str] = &[
    "cotton", "kaki", "da", "thoáng mát", "co giãn", "form rộng", "ôm", "cổ tròn", "dài tay",
];
const AUDIENCE: &[&str] = &["nam", "nữ", "trẻ em", "công sở", "thể thao"];

/// Deterministic pseudo-catalog: row `i` mixes garment, audience and two traits.
fn synthetic_descriptions(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| {
            format!(
                "{} {} {} và {}, giá {} nghìn",
                GARMENTS[i % GARMENTS.len()],
                AUDIENCE[(i / 3) % AUDIENCE.len()],
                TRAITS[i % TRAITS.len()],
                TRAITS[(i * 7 + 1) % TRAITS.len()],
                100 + i
            )
        })
        .collect()
}

fn preprocessor() -> Preprocessor {
    Preprocessor::with_stopwords(StopwordSet::from_lines(["và", "của", "rất", "giá"], false))
}

/// Preprocess every raw description, then build the artifacts.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_artifacts");
    let pre = preprocessor();

    for size in [100, 1000, 5000].iter() {
        let raw = synthetic_descriptions(*size);
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_function(format!("build_{}", size), |b| {
            b.iter(|| {
                let processed: Vec<String> =
                    raw.iter().map(|text| pre.preprocess(text).text).collect();
                black_box(ContentArtifacts::from_corpus(&processed))
            });
        });
    }

    group.finish();
}

/// One content lookup: preprocess the query, then rank the whole catalog.
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("content_lookup");
    let pre = preprocessor();
    let query = "Áo thun nam cổ tròn, cotton thoáng mát";

    for size in [100, 1000, 5000, 20000].iter() {
        let processed: Vec<String> = synthetic_descriptions(*size)
            .iter()
            .map(|text| pre.preprocess(text).text)
            .collect();
        let artifacts = ContentArtifacts::from_corpus(&processed);

        group.bench_function(format!("lookup_{}", size), |b| {
            b.iter(|| {
                let doc = pre.preprocess(black_box(query));
                black_box(artifacts.similar(doc.tokens.as_slice(), 0.4, 5))
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_lookup);
criterion_main!(benches);
