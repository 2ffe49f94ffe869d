//! Authorization decision table and hierarchy invariants.
//!
//! All checks are pure so they can be exercised without a store. Every
//! refusal is a [`ServiceError::BusinessRule`].
//!
//! | operation    | Employee | Leader                               | Director |
//! |--------------|----------|--------------------------------------|----------|
//! | create       | denied   | requested role must be Employee      | allowed  |
//! | update self  | role fixed | role fixed                         | allowed  |
//! | update other | denied   | target and requested role Employee   | allowed  |
//! | delete self  | denied   | denied                               | denied   |
//! | delete other | denied   | target role Employee                 | allowed  |

use chrono::NaiveDate;
use models::Role;
use uuid::Uuid;

use super::domain::{Actor, Employee};
use crate::errors::ServiceError;

pub const MIN_AGE_YEARS: u32 = 18;

/// May `actor` create an employee holding `requested`?
///
/// ```
/// use models::Role;
/// use service::employee::{policy, Actor};
/// let leader = Actor { id: uuid::Uuid::new_v4(), role: Role::Leader };
/// assert!(policy::authorize_create(&leader, Role::Employee).is_ok());
/// assert!(policy::authorize_create(&leader, Role::Leader).is_err());
/// ```
pub fn authorize_create(actor: &Actor, requested: Role) -> Result<(), ServiceError> {
    match actor.role {
        Role::Employee => Err(ServiceError::rule("employees cannot create other employees")),
        Role::Leader if requested != Role::Employee => Err(ServiceError::rule(
            "leaders can only create employees with the Employee role",
        )),
        Role::Leader | Role::Director => Ok(()),
    }
}

/// May `actor` update `target`, leaving it with role `requested`?
pub fn authorize_update(actor: &Actor, target: &Employee, requested: Role) -> Result<(), ServiceError> {
    if actor.id == target.id {
        if actor.role != Role::Director && requested != target.role {
            return Err(ServiceError::rule("you cannot change your own role"));
        }
        return Ok(());
    }
    match actor.role {
        Role::Employee => Err(ServiceError::rule("employees can only update themselves")),
        Role::Leader if target.role != Role::Employee => Err(ServiceError::rule(
            "leaders can only update employees with the Employee role",
        )),
        Role::Leader if requested != Role::Employee => Err(ServiceError::rule(
            "leaders cannot promote employees above the Employee role",
        )),
        Role::Leader | Role::Director => Ok(()),
    }
}

/// May `actor` delete `target`?
pub fn authorize_delete(actor: &Actor, target: &Employee) -> Result<(), ServiceError> {
    if actor.id == target.id {
        return Err(ServiceError::rule("you cannot delete yourself"));
    }
    match actor.role {
        Role::Employee => Err(ServiceError::rule("employees cannot delete other employees")),
        Role::Leader if target.role != Role::Employee => Err(ServiceError::rule(
            "leaders can only delete employees with the Employee role",
        )),
        Role::Leader | Role::Director => Ok(()),
    }
}

/// Whole years between `birth_date` and `today` must reach [`MIN_AGE_YEARS`].
pub fn check_adult(birth_date: NaiveDate, today: NaiveDate) -> Result<(), ServiceError> {
    match today.years_since(birth_date) {
        None => Err(ServiceError::rule("birth date cannot be in the future")),
        Some(age) if age < MIN_AGE_YEARS => Err(ServiceError::rule(format!(
            "employee must be at least {MIN_AGE_YEARS} years old"
        ))),
        Some(_) => Ok(()),
    }
}

pub fn check_not_self_managed(subject: Option<Uuid>, manager_id: Uuid) -> Result<(), ServiceError> {
    if subject == Some(manager_id) {
        return Err(ServiceError::rule("an employee cannot be their own manager"));
    }
    Ok(())
}

/// `manager` must outrank a subject holding `role` (Director over Director is allowed).
pub fn check_manager(role: Role, manager: &Employee) -> Result<(), ServiceError> {
    if !manager.role.can_manage(role) {
        return Err(ServiceError::rule(format!(
            "manager must have a higher role than {role} (manager {} is {})",
            manager.full_name(),
            manager.role
        )));
    }
    Ok(())
}

/// After a role change the employee must still outrank everyone they manage.
pub fn check_subordinates(new_role: Role, subordinates: &[Employee]) -> Result<(), ServiceError> {
    if let Some(blocking) = subordinates.iter().find(|s| !new_role.can_manage(s.role)) {
        return Err(ServiceError::rule(format!(
            "cannot change role to {new_role} while managing {} ({})",
            blocking.full_name(),
            blocking.role
        )));
    }
    Ok(())
}

pub fn check_no_subordinates(target: &Employee, subordinates: &[Employee]) -> Result<(), ServiceError> {
    if !subordinates.is_empty() {
        return Err(ServiceError::rule(format!(
            "{} still manages {} employee(s); reassign them first",
            target.full_name(),
            subordinates.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Months, Utc};

    fn employee(role: Role) -> Employee {
        let now = Utc::now();
        Employee {
            id: Uuid::new_v4(),
            first_name: "Test".into(),
            last_name: format!("{role}"),
            email: format!("{}@example.com", Uuid::new_v4().simple()),
            document_number: "DOC123".into(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            role,
            manager_id: None,
            phones: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    fn actor_of(e: &Employee) -> Actor { Actor { id: e.id, role: e.role } }

    fn actor(role: Role) -> Actor { Actor { id: Uuid::new_v4(), role } }

    const ROLES: [Role; 3] = [Role::Employee, Role::Leader, Role::Director];

    #[test]
    fn create_matrix() {
        for requested in ROLES {
            assert!(authorize_create(&actor(Role::Employee), requested).is_err());
            assert_eq!(authorize_create(&actor(Role::Leader), requested).is_ok(), requested == Role::Employee);
            assert!(authorize_create(&actor(Role::Director), requested).is_ok());
        }
    }

    #[test]
    fn update_other_matrix() {
        for target_role in ROLES {
            for requested in ROLES {
                let target = employee(target_role);
                assert!(authorize_update(&actor(Role::Employee), &target, requested).is_err());
                let leader_ok = target_role == Role::Employee && requested == Role::Employee;
                assert_eq!(authorize_update(&actor(Role::Leader), &target, requested).is_ok(), leader_ok,
                    "leader updating {target_role} to {requested}");
                assert!(authorize_update(&actor(Role::Director), &target, requested).is_ok());
            }
        }
    }

    #[test]
    fn update_self_keeps_role_unless_director() {
        for role in ROLES {
            let me = employee(role);
            assert!(authorize_update(&actor_of(&me), &me, role).is_ok());
            for requested in ROLES.into_iter().filter(|r| *r != role) {
                let res = authorize_update(&actor_of(&me), &me, requested);
                assert_eq!(res.is_ok(), role == Role::Director, "{role} self-changing to {requested}");
            }
        }
    }

    #[test]
    fn delete_matrix() {
        for target_role in ROLES {
            let target = employee(target_role);
            assert!(authorize_delete(&actor(Role::Employee), &target).is_err());
            assert_eq!(authorize_delete(&actor(Role::Leader), &target).is_ok(), target_role == Role::Employee);
            assert!(authorize_delete(&actor(Role::Director), &target).is_ok());
        }
    }

    #[test]
    fn nobody_deletes_themselves() {
        for role in ROLES {
            let me = employee(role);
            let err = authorize_delete(&actor_of(&me), &me).unwrap_err();
            assert!(err.is_business_rule());
            assert_eq!(err.to_string(), "you cannot delete yourself");
        }
    }

    #[test]
    fn age_boundary() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert!(check_adult(NaiveDate::from_ymd_opt(2006, 6, 15).unwrap(), today).is_ok());
        assert!(check_adult(NaiveDate::from_ymd_opt(2006, 6, 16).unwrap(), today).is_err());
        assert!(check_adult(NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(), today).is_err());
        let seventeen = Utc::now().date_naive().checked_sub_months(Months::new(17 * 12)).unwrap();
        assert!(check_adult(seventeen, Utc::now().date_naive()).is_err());
    }

    #[test]
    fn manager_rules() {
        let id = Uuid::new_v4();
        assert!(check_not_self_managed(Some(id), id).is_err());
        assert!(check_not_self_managed(None, id).is_ok());
        assert!(check_manager(Role::Employee, &employee(Role::Leader)).is_ok());
        assert!(check_manager(Role::Leader, &employee(Role::Leader)).is_err());
        assert!(check_manager(Role::Leader, &employee(Role::Employee)).is_err());
        assert!(check_manager(Role::Director, &employee(Role::Director)).is_ok());
    }

    #[test]
    fn demotion_blocked_by_subordinates() {
        let subs = vec![employee(Role::Employee), employee(Role::Leader)];
        assert!(check_subordinates(Role::Director, &subs).is_ok());
        assert!(check_subordinates(Role::Leader, &subs).is_err());
        assert!(check_subordinates(Role::Employee, &[]).is_ok());
    }

    #[test]
    fn delete_blocked_by_subordinates() {
        let boss = employee(Role::Leader);
        assert!(check_no_subordinates(&boss, &[]).is_ok());
        assert!(check_no_subordinates(&boss, &[employee(Role::Employee)]).is_err());
    }
}
