use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;

use chrono::NaiveDate;
use models::Role;
use service::auth::domain::LoginInput;
use service::auth::{AuthConfig, AuthService};
use service::employee::repository::mock::MockEmployeeRepository;
use service::employee::{EmployeeProfile, EmployeeService, NewEmployee};

fn bench_login(c: &mut Criterion) {
    let repo = Arc::new(MockEmployeeRepository::default());
    let auth = AuthService::new(repo.clone(), AuthConfig::new("secret", 1));
    let employees = EmployeeService::new(repo);

    // pre-create the director outside of the benchmark using a tokio runtime
    let rt = tokio::runtime::Runtime::new().unwrap();
    let profile = EmployeeProfile {
        first_name: "Bench".into(),
        last_name: "Mark".into(),
        email: "bench@example.com".into(),
        document_number: "BENCH01".into(),
        birth_date: NaiveDate::from_ymd_opt(1980, 1, 1).unwrap(),
        role: Role::Director,
        manager_id: None,
        phones: vec![],
    };
    let director = rt
        .block_on(employees.bootstrap_director(NewEmployee { profile, password: "Benchmark1".into() }))
        .unwrap()
        .unwrap();

    c.bench_function("auth_login_verify", |b| {
        b.iter(|| {
            let _ = rt.block_on(auth.login(LoginInput { email: "bench@example.com".into(), password: "Benchmark1".into() })).unwrap();
        });
    });

    let (token, _) = auth.issue_token(&director).unwrap();
    c.bench_function("auth_verify_token", |b| {
        b.iter(|| auth.verify_token(&token).unwrap());
    });
}

criterion_group!(benches, bench_login);
criterion_main!(benches);
