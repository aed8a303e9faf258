use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pg_explorer::data::datatable::Dataset;
use pg_explorer::search_filter::filter_rows;
use std::sync::Arc;

fn create_test_data(rows: usize) -> Arc<Dataset> {
    let cities = [
        "Lyon",
        "Aarhus",
        "Torino",
        "Riga",
        "Porto",
        "Gdansk",
        "Ghent",
        "Tartu",
    ];

    let data = (0..rows)
        .map(|i| {
            vec![
                i.to_string(),
                format!("customer_{}", i),
                format!("user{}@example.com", i % 997),
                cities[i % cities.len()].to_string(),
                if i % 13 == 0 {
                    "NULL".to_string()
                } else {
                    format!("2024-{:02}-{:02}", i % 12 + 1, i % 28 + 1)
                },
            ]
        })
        .collect();

    Arc::new(Dataset::new(
        "customers",
        ["id", "name", "email", "city", "signup_date"]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        data,
    ))
}

fn benchmark_rescan(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_rows");

    for (label, rows) in [("1k_rows", 1_000), ("10k_rows", 10_000), ("50k_rows", 50_000)] {
        let dataset = create_test_data(rows);

        group.bench_function(format!("{}_selective", label), |b| {
            b.iter(|| filter_rows(&dataset, black_box("GHENT")));
        });

        group.bench_function(format!("{}_no_match", label), |b| {
            b.iter(|| filter_rows(&dataset, black_box("zzz")));
        });

        group.bench_function(format!("{}_empty_query", label), |b| {
            b.iter(|| filter_rows(&dataset, black_box("")));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_rescan);
criterion_main!(benches);
