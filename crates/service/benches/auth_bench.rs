use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use service::auth::service::{AuthService, hash_password};
use service::auth::repository::mock::MockCredentialRepository;
use service::auth::domain::{LoginInput, StoredAdmin};

fn bench_login(c: &mut Criterion) {
    let hash = hash_password("Benchmark1").expect("hash");
    let repo = Arc::new(MockCredentialRepository::with_admin(StoredAdmin::hashed("bench", hash)));
    let svc = AuthService::new(repo);

    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("admin_login_verify", |b| {
        b.iter(|| {
            rt.block_on(svc.login(LoginInput { username: "bench".into(), password: "Benchmark1".into() })).unwrap();
        });
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
