use chrono::{DateTime, NaiveDate, Utc};
use models::Role;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Employee as seen by callers. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub document_number: String,
    pub birth_date: NaiveDate,
    pub role: Role,
    pub manager_id: Option<Uuid>,
    pub phones: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Fields shared by create and update requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub document_number: String,
    pub birth_date: NaiveDate,
    pub role: Role,
    #[serde(default)]
    pub manager_id: Option<Uuid>,
    #[serde(default)]
    pub phones: Vec<String>,
}

/// Create input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    #[serde(flatten)]
    pub profile: EmployeeProfile,
    pub password: String,
}

/// Update input: full replacement of the profile, password only when supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(flatten)]
    pub profile: EmployeeProfile,
    #[serde(default)]
    pub password: Option<String>,
}

/// The authenticated caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
}

/// Stored credentials for login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub employee: Employee,
    pub password_hash: String,
}

pub(crate) fn from_model(m: models::employee::Model, phones: Vec<String>) -> Employee {
    Employee {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
        document_number: m.document_number,
        birth_date: m.birth_date,
        role: m.role,
        manager_id: m.manager_id,
        phones,
        created_at: m.created_at.with_timezone(&Utc),
        updated_at: m.updated_at.with_timezone(&Utc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_employee_accepts_flat_json() {
        let raw = r#"{
            "first_name": "Grace", "last_name": "Hopper",
            "email": "grace@example.com", "document_number": "GH1906",
            "birth_date": "1906-12-09", "role": "Leader",
            "password": "Cobol1959"
        }"#;
        let input: NewEmployee = serde_json::from_str(raw).unwrap();
        assert_eq!(input.profile.role, Role::Leader);
        assert!(input.profile.manager_id.is_none());
        assert!(input.profile.phones.is_empty());
        assert_eq!(input.password, "Cobol1959");
    }

    #[test]
    fn update_password_is_optional() {
        let raw = r#"{
            "first_name": "Grace", "last_name": "Hopper",
            "email": "grace@example.com", "document_number": "GH1906",
            "birth_date": "1906-12-09", "role": "Employee",
            "phones": ["+1 555 0100"]
        }"#;
        let input: EmployeeUpdate = serde_json::from_str(raw).unwrap();
        assert!(input.password.is_none());
        assert_eq!(input.profile.phones, vec!["+1 555 0100".to_string()]);
    }
}
