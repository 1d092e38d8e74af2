use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tabview::data::datatable::DataTable;
use tabview::search_filter::{run_filter, run_search};

fn build_table(rows: usize, cols: usize) -> DataTable {
    let mut records: Vec<Vec<String>> = Vec::with_capacity(rows + 1);
    records.push((0..cols).map(|c| format!("col_{}", c)).collect());
    for r in 0..rows {
        records.push((0..cols).map(|c| format!("value_{}_{}", r, c)).collect());
    }
    DataTable::new(records, false).unwrap()
}

fn bench_search(c: &mut Criterion) {
    let table = build_table(10_000, 8);
    c.bench_function("search_10k_x8", |b| {
        b.iter_batched(
            || table.clone(),
            |mut t| run_search(&mut t, black_box("value_9000_3")),
            BatchSize::LargeInput,
        )
    });
}

fn bench_filter(c: &mut Criterion) {
    let table = build_table(10_000, 8);
    c.bench_function("filter_10k_x8", |b| {
        b.iter_batched(
            || table.clone(),
            |mut t| run_filter(&mut t, black_box("value_42_")),
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_search, bench_filter);
criterion_main!(benches);
