use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<DbErr> for ModelError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => {
                debug!(raw = %msg, "unique constraint violated");
                ModelError::Conflict(describe_unique_violation(&msg))
            }
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                debug!(raw = %msg, "foreign key constraint violated");
                ModelError::Conflict(describe_foreign_key_violation(&msg))
            }
            _ => ModelError::Db(e.to_string()),
        }
    }
}

/// Turn a raw unique-index violation into a message naming the field.
pub fn describe_unique_violation(raw: &str) -> String {
    if raw.contains("uniq_employee_email") {
        "email is already in use".into()
    } else if raw.contains("uniq_employee_document_number") {
        "document number is already in use".into()
    } else {
        "value is already in use".into()
    }
}

/// Map a raw foreign-key violation to a fixed message. Postgres reports
/// inserts as "insert or update on ..." and deletes as "update or delete on ...".
pub fn describe_foreign_key_violation(raw: &str) -> String {
    let deleting = raw.contains("update or delete on");
    if raw.contains("fk_employee_manager") {
        if deleting {
            "employee still manages other employees; reassign them first".into()
        } else {
            "manager not found".into()
        }
    } else if raw.contains("fk_employee_phone_employee") {
        "employee not found".into()
    } else {
        "referenced record is missing or still in use".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_names_field() {
        let raw = "duplicate key value violates unique constraint \"uniq_employee_email\"";
        assert_eq!(describe_unique_violation(raw), "email is already in use");
        let raw = "duplicate key value violates unique constraint \"uniq_employee_document_number\"";
        assert_eq!(describe_unique_violation(raw), "document number is already in use");
    }

    #[test]
    fn unknown_unique_index_hides_raw_text() {
        let raw = "duplicate key value violates unique constraint \"pk_secret\" DETAIL: Key (id)=(42)";
        assert_eq!(describe_unique_violation(raw), "value is already in use");
    }

    #[test]
    fn foreign_key_violation_uses_fixed_messages() {
        let insert = "insert or update on table \"employee\" violates foreign key constraint \"fk_employee_manager\" DETAIL: Key (manager_id)=(1b4e) is not present";
        assert_eq!(describe_foreign_key_violation(insert), "manager not found");
        let delete = "update or delete on table \"employee\" violates foreign key constraint \"fk_employee_manager\" on table \"employee\"";
        assert_eq!(describe_foreign_key_violation(delete), "employee still manages other employees; reassign them first");
        let other = "insert or update on table \"x\" violates foreign key constraint \"fk_other\" DETAIL: Key (y)=(z)";
        let msg = describe_foreign_key_violation(other);
        assert!(!msg.contains("DETAIL") && !msg.contains("fk_other"));
    }

    #[test]
    fn generic_db_error_stays_db() {
        let err: ModelError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, ModelError::Db(_)));
    }
}
