use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Set, TransactionTrait};
use uuid::Uuid;

use models::{employee, employee_phone};

use crate::employee::domain::{from_model, Credentials, Employee};
use crate::employee::repository::EmployeeRepository;
use crate::errors::ServiceError;

pub struct SeaOrmEmployeeRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmEmployeeRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn hydrate(&self, rows: Vec<employee::Model>) -> Result<Vec<Employee>, ServiceError> {
        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let mut phones = employee_phone::numbers_for(&self.db, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|r| {
                let numbers = phones.remove(&r.id).unwrap_or_default();
                from_model(r, numbers)
            })
            .collect())
    }

    async fn hydrate_one(&self, row: Option<employee::Model>) -> Result<Option<Employee>, ServiceError> {
        match row {
            Some(r) => Ok(self.hydrate(vec![r]).await?.pop()),
            None => Ok(None),
        }
    }
}

#[async_trait::async_trait]
impl EmployeeRepository for SeaOrmEmployeeRepository {
    async fn list(&self, page_idx: u64, per_page: u64) -> Result<(Vec<Employee>, u64), ServiceError> {
        let (rows, total) = employee::list_page(&self.db, page_idx, per_page).await?;
        Ok((self.hydrate(rows).await?, total))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(employee::Entity::find().count(&self.db).await?)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Employee>, ServiceError> {
        let row = employee::Entity::find_by_id(id).one(&self.db).await?;
        self.hydrate_one(row).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, ServiceError> {
        let row = employee::find_by_email(&self.db, email).await?;
        self.hydrate_one(row).await
    }

    async fn find_by_document_number(&self, document_number: &str) -> Result<Option<Employee>, ServiceError> {
        let row = employee::find_by_document_number(&self.db, document_number).await?;
        self.hydrate_one(row).await
    }

    async fn get_credentials(&self, email: &str) -> Result<Option<Credentials>, ServiceError> {
        let Some(row) = employee::find_by_email(&self.db, email).await? else { return Ok(None) };
        let password_hash = row.password_hash.clone();
        let employee = self.hydrate(vec![row]).await?.pop();
        Ok(employee.map(|employee| Credentials { employee, password_hash }))
    }

    async fn subordinates(&self, manager_id: Uuid) -> Result<Vec<Employee>, ServiceError> {
        let rows = employee::list_subordinates(&self.db, manager_id).await?;
        self.hydrate(rows).await
    }

    async fn insert(&self, e: &Employee, password_hash: &str) -> Result<Employee, ServiceError> {
        let txn = self.db.begin().await?;
        let am = employee::ActiveModel {
            id: Set(e.id),
            first_name: Set(e.first_name.clone()),
            last_name: Set(e.last_name.clone()),
            email: Set(e.email.clone()),
            document_number: Set(e.document_number.clone()),
            birth_date: Set(e.birth_date),
            role: Set(e.role),
            manager_id: Set(e.manager_id),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(e.created_at.into()),
            updated_at: Set(e.updated_at.into()),
        };
        let row = am.insert(&txn).await?;
        employee_phone::replace_for_employee(&txn, row.id, &e.phones).await?;
        txn.commit().await?;
        Ok(from_model(row, e.phones.clone()))
    }

    async fn update(&self, e: &Employee, password_hash: Option<&str>) -> Result<Employee, ServiceError> {
        let txn = self.db.begin().await?;
        let am = employee::ActiveModel {
            id: Set(e.id),
            first_name: Set(e.first_name.clone()),
            last_name: Set(e.last_name.clone()),
            email: Set(e.email.clone()),
            document_number: Set(e.document_number.clone()),
            birth_date: Set(e.birth_date),
            role: Set(e.role),
            manager_id: Set(e.manager_id),
            password_hash: password_hash.map(|h| Set(h.to_string())).unwrap_or(NotSet),
            created_at: NotSet,
            updated_at: Set(Utc::now().into()),
        };
        let row = match am.update(&txn).await {
            Ok(row) => row,
            Err(DbErr::RecordNotUpdated) => return Err(ServiceError::not_found("employee")),
            Err(err) => return Err(err.into()),
        };
        employee_phone::replace_for_employee(&txn, row.id, &e.phones).await?;
        txn.commit().await?;
        Ok(from_model(row, e.phones.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
        Ok(employee::hard_delete(&self.db, id).await?)
    }
}
