use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::student::repository::mock::InMemoryStudentRepository;
use service::student::{StudentService, StudentServiceConfig};

fn bench_create_and_lookup(c: &mut Criterion) {
    let repo = Arc::new(InMemoryStudentRepository::default());
    let svc = StudentService::new(repo, StudentServiceConfig::default());
    let rt = tokio::runtime::Runtime::new().unwrap();

    let body = serde_json::json!({"name": "Bench", "surname": "Mark", "age": 42, "email": "bench@example.com"});
    rt.block_on(svc.create(body.as_object().unwrap())).unwrap();

    c.bench_function("student_lookup", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.lookup("bench@example.com")).unwrap();
        });
    });

    let invalid = serde_json::json!({"name": "B3nch", "surname": "Mark", "age": 420, "email": "bench.example.com"});
    c.bench_function("student_create_rejected", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.create(invalid.as_object().unwrap())).unwrap_err();
        });
    });
}

criterion_group!(benches, bench_create_and_lookup);
criterion_main!(benches);
