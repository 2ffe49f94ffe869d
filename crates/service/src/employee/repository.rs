use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{Credentials, Employee};
use crate::errors::ServiceError;

/// Repository abstraction for employee persistence.
///
/// Implementations enforce the store-level guarantees: unique email and
/// document number, an existing manager, and no deletion of a manager that
/// still has subordinates.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// One page ordered by last name, first name; returns the page and the total count.
    async fn list(&self, page_idx: u64, per_page: u64) -> Result<(Vec<Employee>, u64), ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
    async fn get(&self, id: Uuid) -> Result<Option<Employee>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, ServiceError>;
    async fn find_by_document_number(&self, document_number: &str) -> Result<Option<Employee>, ServiceError>;
    async fn get_credentials(&self, email: &str) -> Result<Option<Credentials>, ServiceError>;
    async fn subordinates(&self, manager_id: Uuid) -> Result<Vec<Employee>, ServiceError>;

    async fn insert(&self, employee: &Employee, password_hash: &str) -> Result<Employee, ServiceError>;
    /// Replace the stored profile; the hash is only touched when `Some`.
    async fn update(&self, employee: &Employee, password_hash: Option<&str>) -> Result<Employee, ServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockEmployeeRepository {
        rows: Mutex<HashMap<Uuid, (Employee, String)>>, // key: employee id, value: (employee, password hash)
    }

    impl MockEmployeeRepository {
        /// Store a row directly, skipping every check.
        pub fn seed(&self, employee: Employee, password_hash: &str) -> Employee {
            let mut rows = self.rows.lock().unwrap();
            rows.insert(employee.id, (employee.clone(), password_hash.to_string()));
            employee
        }

        pub fn len(&self) -> usize { self.rows.lock().unwrap().len() }

        pub fn is_empty(&self) -> bool { self.len() == 0 }

        fn check_constraints(rows: &HashMap<Uuid, (Employee, String)>, e: &Employee) -> Result<(), ServiceError> {
            for (other, _) in rows.values().filter(|(o, _)| o.id != e.id) {
                if other.email == e.email {
                    return Err(ServiceError::rule("email is already in use"));
                }
                if other.document_number == e.document_number {
                    return Err(ServiceError::rule("document number is already in use"));
                }
            }
            if let Some(mid) = e.manager_id {
                if !rows.contains_key(&mid) {
                    return Err(ServiceError::rule("manager not found"));
                }
            }
            Ok(())
        }
    }

    #[async_trait]
    impl EmployeeRepository for MockEmployeeRepository {
        async fn list(&self, page_idx: u64, per_page: u64) -> Result<(Vec<Employee>, u64), ServiceError> {
            let rows = self.rows.lock().unwrap();
            let mut all: Vec<Employee> = rows.values().map(|(e, _)| e.clone()).collect();
            all.sort_by(|a, b| (&a.last_name, &a.first_name, a.id).cmp(&(&b.last_name, &b.first_name, b.id)));
            let total = all.len() as u64;
            let page = all
                .into_iter()
                .skip((page_idx * per_page) as usize)
                .take(per_page as usize)
                .collect();
            Ok((page, total))
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            Ok(self.rows.lock().unwrap().len() as u64)
        }

        async fn get(&self, id: Uuid) -> Result<Option<Employee>, ServiceError> {
            Ok(self.rows.lock().unwrap().get(&id).map(|(e, _)| e.clone()))
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<Employee>, ServiceError> {
            let email = email.to_lowercase();
            let rows = self.rows.lock().unwrap();
            Ok(rows.values().find(|(e, _)| e.email == email).map(|(e, _)| e.clone()))
        }

        async fn find_by_document_number(&self, document_number: &str) -> Result<Option<Employee>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.values().find(|(e, _)| e.document_number == document_number).map(|(e, _)| e.clone()))
        }

        async fn get_credentials(&self, email: &str) -> Result<Option<Credentials>, ServiceError> {
            let email = email.to_lowercase();
            let rows = self.rows.lock().unwrap();
            Ok(rows
                .values()
                .find(|(e, _)| e.email == email)
                .map(|(e, h)| Credentials { employee: e.clone(), password_hash: h.clone() }))
        }

        async fn subordinates(&self, manager_id: Uuid) -> Result<Vec<Employee>, ServiceError> {
            let rows = self.rows.lock().unwrap();
            Ok(rows.values().filter(|(e, _)| e.manager_id == Some(manager_id)).map(|(e, _)| e.clone()).collect())
        }

        async fn insert(&self, employee: &Employee, password_hash: &str) -> Result<Employee, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            Self::check_constraints(&rows, employee)?;
            rows.insert(employee.id, (employee.clone(), password_hash.to_string()));
            Ok(employee.clone())
        }

        async fn update(&self, employee: &Employee, password_hash: Option<&str>) -> Result<Employee, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            Self::check_constraints(&rows, employee)?;
            let slot = rows.get_mut(&employee.id).ok_or_else(|| ServiceError::not_found("employee"))?;
            slot.0 = employee.clone();
            if let Some(h) = password_hash {
                slot.1 = h.to_string();
            }
            Ok(employee.clone())
        }

        async fn delete(&self, id: Uuid) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().unwrap();
            if rows.values().any(|(e, _)| e.manager_id == Some(id)) {
                return Err(ServiceError::rule("employee still manages other employees; reassign them first"));
            }
            Ok(rows.remove(&id).is_some())
        }
    }
}
