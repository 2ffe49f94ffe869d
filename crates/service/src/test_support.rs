#![cfg(test)]
use chrono::{NaiveDate, Utc};
use migration::MigratorTrait;
use models::db::connect_with_config;
use models::Role;
use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::employee::domain::{Employee, EmployeeProfile};
use crate::employee::repository::mock::MockEmployeeRepository;

// Ensure migrations run only once across the entire test process
static MIGRATED: OnceCell<()> = OnceCell::const_new();

fn db_config() -> configs::DatabaseConfig {
    let mut cfg = configs::load_default().map(|c| c.database).unwrap_or_default();
    cfg.normalize_from_env();
    // fail fast when no database is reachable
    cfg.connect_timeout_secs = 5;
    cfg.acquire_timeout_secs = 10;
    cfg
}

pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let cfg = db_config();
    let db = connect_with_config(&cfg).await?;
    MIGRATED
        .get_or_try_init(|| async { migration::Migrator::up(&db, None).await })
        .await?;
    Ok(db)
}

/// A valid adult profile; `tag` drives the last name and keeps email and
/// document number unique.
pub fn profile(tag: &str, role: Role) -> EmployeeProfile {
    let uid = Uuid::new_v4().simple().to_string();
    EmployeeProfile {
        first_name: "Test".into(),
        last_name: tag.to_uppercase(),
        email: format!("{tag}_{uid}@example.com"),
        document_number: format!("D{}", &uid[..12]),
        birth_date: NaiveDate::from_ymd_opt(1990, 5, 17).unwrap(),
        role,
        manager_id: None,
        phones: vec![],
    }
}

/// Store an employee without going through the service (no hashing, no checks).
pub fn seed(repo: &MockEmployeeRepository, tag: &str, role: Role, manager_id: Option<Uuid>) -> Employee {
    let p = profile(tag, role);
    let now = Utc::now();
    repo.seed(
        Employee {
            id: Uuid::new_v4(),
            first_name: p.first_name,
            last_name: p.last_name,
            email: p.email,
            document_number: p.document_number,
            birth_date: p.birth_date,
            role,
            manager_id,
            phones: p.phones,
            created_at: now,
            updated_at: now,
        },
        "not-a-real-hash",
    )
}
