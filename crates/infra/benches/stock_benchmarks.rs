use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::sync::Arc;

use chrono::NaiveDate;

use almox_infra::{InMemoryStore, IssuanceLog, JsonFileStore, StockLedger, StockStore};
use almox_stock::{default_catalog, NewIssuance, NewMaterial};
use tempfile::tempdir;

fn bench_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
}

fn material_input(name: &str, total: u32) -> NewMaterial {
    NewMaterial {
        name: name.to_string(),
        category: "Outros".to_string(),
        total_quantity: total,
        entry_date: bench_date(),
    }
}

fn issue_input(material_id: almox_core::MaterialId, quantity: u32) -> NewIssuance {
    NewIssuance {
        material_id,
        quantity,
        issue_date: bench_date(),
        recipient: "Bench".to_string(),
        destination: None,
        receipt_number: None,
    }
}

fn setup_services<S: StockStore + Clone>(store: S) -> (StockLedger<S>, IssuanceLog<S>) {
    (
        StockLedger::new(store.clone(), default_catalog()),
        IssuanceLog::new(store),
    )
}

/// Issue-then-reverse keeps the document a constant size, so each iteration
/// measures commit cost rather than collection growth.
fn bench_issue_commit_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("issue_commit_cost");
    group.sample_size(100);

    group.bench_function("in_memory_issue_and_reverse", |b| {
        let (ledger, log) = setup_services(Arc::new(InMemoryStore::new()));
        let material = ledger.create(material_input("Mouse", 10), None).unwrap();

        b.iter(|| {
            let issuance = log.issue(issue_input(material.id, black_box(1))).unwrap();
            log.reverse(issuance.id).unwrap();
        });
    });

    group.bench_function("flat_file_issue_and_reverse", |b| {
        let dir = tempdir().unwrap();
        let store = Arc::new(JsonFileStore::open(dir.path().join("estoque.json")).unwrap());
        let (ledger, log) = setup_services(store);
        let material = ledger.create(material_input("Mouse", 10), None).unwrap();

        b.iter(|| {
            let issuance = log.issue(issue_input(material.id, black_box(1))).unwrap();
            log.reverse(issuance.id).unwrap();
        });
    });

    group.finish();
}

fn bench_material_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("material_listing");

    for count in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(
            BenchmarkId::new("sorted_listing", count),
            count,
            |b, &count| {
                let (ledger, _log) = setup_services(Arc::new(InMemoryStore::new()));
                for i in 0..count {
                    ledger
                        .create(material_input(&format!("Material {i}"), 5), None)
                        .unwrap();
                }

                b.iter(|| black_box(ledger.get_all().unwrap()));
            },
        );
    }

    group.finish();
}

fn bench_history_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("history_scan");

    for count in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(
            BenchmarkId::new("newest_first_scan", count),
            count,
            |b, &count| {
                let (ledger, log) = setup_services(Arc::new(InMemoryStore::new()));
                let material = ledger
                    .create(material_input("Cabo", count as u32), None)
                    .unwrap();
                for _ in 0..count {
                    log.issue(issue_input(material.id, 1)).unwrap();
                }

                b.iter(|| black_box(log.history(None).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_issue_commit_cost,
    bench_material_listing,
    bench_history_scan
);
criterion_main!(benches);
