// benches/extract.rs
use criterion::{ criterion_group, criterion_main, Criterion, black_box };

use revenue_scrape::{ normalize::normalize_rows, specs::companies };

fn load_sample() -> String {
    std::fs::read_to_string(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/companies.html"))
        .expect("read tests/fixtures/companies.html")
}

fn bench_extract(c: &mut Criterion) {
    let doc = load_sample();

    c.bench_function("extract_table", |b| {
        b.iter(|| {
            let table = companies::extract(black_box(&doc)).expect("table");
            black_box(table.rows.len())
        })
    });

    let table = companies::extract(&doc).expect("table");
    c.bench_function("normalize_rows", |b| {
        b.iter(|| {
            let n = normalize_rows(black_box(&table.rows));
            black_box(n.records.len())
        })
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
