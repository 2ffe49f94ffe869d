use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use common::types::Page;
use models::{employee as rows, employee_phone, Role};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::domain::{Actor, Employee, EmployeeProfile, EmployeeUpdate, NewEmployee};
use super::policy;
use super::repository::EmployeeRepository;
use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::password;

/// Application service encapsulating the roster's business rules.
/// Authorization runs first, then field and hierarchy validation, then persistence.
pub struct EmployeeService<R: EmployeeRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: EmployeeRepository + ?Sized> EmployeeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn list(&self, actor: &Actor, page: Pagination) -> Result<Page<Employee>, ServiceError> {
        let (page_idx, per_page) = page.normalize();
        let (items, total) = self.repo.list(page_idx, per_page).await?;
        let (page, per_page) = page.effective();
        debug!(count = items.len(), total, "list employees");
        Ok(Page { items, page, per_page, total })
    }

    pub async fn get(&self, _actor: &Actor, id: Uuid) -> Result<Employee, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("employee"))
    }

    /// Create an employee on behalf of `actor`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::Role;
    /// use service::employee::{Actor, EmployeeProfile, EmployeeService, NewEmployee};
    /// use service::employee::repository::mock::MockEmployeeRepository;
    /// let svc = EmployeeService::new(Arc::new(MockEmployeeRepository::default()));
    /// let director = Actor { id: uuid::Uuid::new_v4(), role: Role::Director };
    /// let input = NewEmployee {
    ///     profile: EmployeeProfile {
    ///         first_name: "Ada".into(), last_name: "Lovelace".into(),
    ///         email: "Ada@Example.com".into(), document_number: "AL1815".into(),
    ///         birth_date: chrono::NaiveDate::from_ymd_opt(1985, 12, 10).unwrap(),
    ///         role: Role::Leader, manager_id: None, phones: vec![],
    ///     },
    ///     password: "Analytical1".into(),
    /// };
    /// let created = tokio_test::block_on(svc.create(&director, input)).unwrap();
    /// assert_eq!(created.email, "ada@example.com");
    /// ```
    #[instrument(skip(self, actor, input), fields(actor_id = %actor.id, actor_role = %actor.role, role = %input.profile.role))]
    pub async fn create(&self, actor: &Actor, input: NewEmployee) -> Result<Employee, ServiceError> {
        policy::authorize_create(actor, input.profile.role)?;
        let created = self.insert_validated(None, input).await?;
        info!(employee_id = %created.id, role = %created.role, created_by = %actor.id, "employee_created");
        Ok(created)
    }

    #[instrument(skip(self, actor, input), fields(actor_id = %actor.id, actor_role = %actor.role, employee_id = %id))]
    pub async fn update(&self, actor: &Actor, id: Uuid, input: EmployeeUpdate) -> Result<Employee, ServiceError> {
        let target = self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("employee"))?;
        policy::authorize_update(actor, &target, input.profile.role)?;

        let profile = self.validate_profile(Some(id), input.profile, today()).await?;
        if profile.role != target.role {
            let subordinates = self.repo.subordinates(id).await?;
            policy::check_subordinates(profile.role, &subordinates)?;
        }
        let hash = match input.password.as_deref() {
            Some(pw) => {
                password::validate_password(pw)?;
                Some(password::hash_password(pw)?)
            }
            None => None,
        };

        let employee = build(id, profile, target.created_at);
        let updated = self.repo.update(&employee, hash.as_deref()).await?;
        info!(
            employee_id = %updated.id,
            updated_by = %actor.id,
            role_changed = target.role != updated.role,
            password_changed = hash.is_some(),
            "employee_updated"
        );
        Ok(updated)
    }

    #[instrument(skip(self, actor), fields(actor_id = %actor.id, actor_role = %actor.role, employee_id = %id))]
    pub async fn delete(&self, actor: &Actor, id: Uuid) -> Result<(), ServiceError> {
        let target = self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("employee"))?;
        policy::authorize_delete(actor, &target)?;
        let subordinates = self.repo.subordinates(id).await?;
        policy::check_no_subordinates(&target, &subordinates)?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("employee"));
        }
        info!(employee_id = %id, deleted_by = %actor.id, "employee_deleted");
        Ok(())
    }

    /// Create the first Director when the roster is empty. Returns `None` when
    /// employees already exist.
    #[instrument(skip(self, input), fields(email = %input.profile.email))]
    pub async fn bootstrap_director(&self, mut input: NewEmployee) -> Result<Option<Employee>, ServiceError> {
        if self.repo.count().await? > 0 {
            debug!("roster not empty; bootstrap skipped");
            return Ok(None);
        }
        input.profile.role = Role::Director;
        input.profile.manager_id = None;
        let created = self.insert_validated(None, input).await?;
        info!(employee_id = %created.id, email = %created.email, "bootstrap_director_created");
        Ok(Some(created))
    }

    async fn insert_validated(&self, subject: Option<Uuid>, input: NewEmployee) -> Result<Employee, ServiceError> {
        let profile = self.validate_profile(subject, input.profile, today()).await?;
        password::validate_password(&input.password)?;
        let hash = password::hash_password(&input.password)?;
        let employee = build(Uuid::new_v4(), profile, Utc::now());
        self.repo.insert(&employee, &hash).await
    }

    /// Field validation, age, uniqueness and manager checks. `subject` is the
    /// employee being updated, excluded from the uniqueness lookups.
    async fn validate_profile(
        &self,
        subject: Option<Uuid>,
        mut p: EmployeeProfile,
        today: NaiveDate,
    ) -> Result<EmployeeProfile, ServiceError> {
        rows::validate_name("first_name", &p.first_name)?;
        rows::validate_name("last_name", &p.last_name)?;
        p.first_name = p.first_name.trim().to_string();
        p.last_name = p.last_name.trim().to_string();
        p.email = rows::normalize_email(&p.email)?;
        p.document_number = p.document_number.trim().to_string();
        rows::validate_document_number(&p.document_number)?;
        p.phones = p.phones.iter().map(|n| n.trim().to_string()).collect();
        for number in &p.phones {
            employee_phone::validate_number(number)?;
        }
        policy::check_adult(p.birth_date, today)?;

        if let Some(other) = self.repo.find_by_email(&p.email).await? {
            if Some(other.id) != subject {
                return Err(ServiceError::rule("email is already in use"));
            }
        }
        if let Some(other) = self.repo.find_by_document_number(&p.document_number).await? {
            if Some(other.id) != subject {
                return Err(ServiceError::rule("document number is already in use"));
            }
        }

        if let Some(manager_id) = p.manager_id {
            policy::check_not_self_managed(subject, manager_id)?;
            let manager = self
                .repo
                .get(manager_id)
                .await?
                .ok_or_else(|| ServiceError::rule("manager not found"))?;
            policy::check_manager(p.role, &manager)?;
            if let Some(subject) = subject {
                self.check_no_cycle(subject, &manager).await?;
            }
        }
        Ok(p)
    }

    /// Walk up the chain above `manager`; meeting `subject` would close a loop.
    async fn check_no_cycle(&self, subject: Uuid, manager: &Employee) -> Result<(), ServiceError> {
        let mut seen = HashSet::new();
        let mut next = manager.manager_id;
        while let Some(id) = next {
            if id == subject {
                return Err(ServiceError::rule(format!(
                    "{} already reports to this employee; the change would form a management cycle",
                    manager.full_name()
                )));
            }
            if !seen.insert(id) {
                break;
            }
            next = self.repo.get(id).await?.and_then(|e| e.manager_id);
        }
        Ok(())
    }
}

fn today() -> NaiveDate { Utc::now().date_naive() }

fn build(id: Uuid, p: EmployeeProfile, created_at: chrono::DateTime<Utc>) -> Employee {
    Employee {
        id,
        first_name: p.first_name,
        last_name: p.last_name,
        email: p.email,
        document_number: p.document_number,
        birth_date: p.birth_date,
        role: p.role,
        manager_id: p.manager_id,
        phones: p.phones,
        created_at,
        updated_at: Utc::now(),
    }
}
