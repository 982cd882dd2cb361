use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use models::{app_user::Profile, enums::{Role, Status}};
use service::auth::service::{AuthService, AuthConfig};
use service::auth::repository::mock::MockAuthRepository;
use service::auth::domain::{RegisterInput, LoginInput};

fn bench_login(c: &mut Criterion) {
    let repo = Arc::new(MockAuthRepository::default());
    let svc = AuthService::new(repo.clone(), AuthConfig::new("bench-secret-0123456789", 12));

    // pre-create user outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let _ = rt.block_on(svc.register(RegisterInput {
        email: "bench@example.com".into(),
        profile: Profile { name: "Bench".into(), surname: "Mark".into(), ..Default::default() },
        company_id: None,
        role: Role::Employee,
        status: Status::Active,
        password: "Benchmark1".into(),
    }));

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt.block_on(svc.login(LoginInput { user_name: "bench@example.com".into(), password: "Benchmark1".into() })).unwrap();
        });
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
