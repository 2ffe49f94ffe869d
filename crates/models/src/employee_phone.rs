use std::collections::HashMap;

use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{employee, errors};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee_phone")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub number: String,
    pub position: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Employee }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Employee => Entity::belongs_to(employee::Entity)
                .from(Column::EmployeeId)
                .to(employee::Column::Id)
                .into(),
        }
    }
}

impl Related<employee::Entity> for Entity {
    fn to() -> RelationDef { Relation::Employee.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Digits with an optional leading `+`; spaces and dashes allowed as separators.
pub fn validate_number(number: &str) -> Result<(), errors::ModelError> {
    let len = number.chars().count();
    let body = number.strip_prefix('+').unwrap_or(number);
    let well_formed = body.chars().all(|c| c.is_ascii_digit() || c == ' ' || c == '-')
        && body.chars().any(|c| c.is_ascii_digit());
    if !(7..=20).contains(&len) || !well_formed {
        return Err(errors::ModelError::Validation(format!("invalid phone number: {number}")));
    }
    Ok(())
}

/// Replace every number of an employee, keeping the given order.
pub async fn replace_for_employee<C: ConnectionTrait>(
    db: &C,
    employee_id: Uuid,
    numbers: &[String],
) -> Result<(), errors::ModelError> {
    Entity::delete_many()
        .filter(Column::EmployeeId.eq(employee_id))
        .exec(db)
        .await?;
    if numbers.is_empty() {
        return Ok(());
    }
    let rows = numbers.iter().enumerate().map(|(i, n)| ActiveModel {
        id: Set(Uuid::new_v4()),
        employee_id: Set(employee_id),
        number: Set(n.clone()),
        position: Set(i as i32),
    });
    Entity::insert_many(rows).exec(db).await?;
    Ok(())
}

/// Numbers for a batch of employees, grouped by employee id.
pub async fn numbers_for<C: ConnectionTrait>(
    db: &C,
    employee_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<String>>, errors::ModelError> {
    let mut out: HashMap<Uuid, Vec<String>> = HashMap::new();
    if employee_ids.is_empty() {
        return Ok(out);
    }
    let rows = Entity::find()
        .filter(Column::EmployeeId.is_in(employee_ids.iter().copied()))
        .order_by_asc(Column::EmployeeId)
        .order_by_asc(Column::Position)
        .all(db)
        .await?;
    for row in rows {
        out.entry(row.employee_id).or_default().push(row.number);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::validate_number;

    #[test]
    fn phone_numbers() {
        assert!(validate_number("+55 11 99999-0000").is_ok());
        assert!(validate_number("5550100").is_ok());
        assert!(validate_number("123").is_err());
        assert!(validate_number("+-- ------").is_err());
        assert!(validate_number("555-CALL-NOW").is_err());
        assert!(validate_number(&"1".repeat(21)).is_err());
    }
}
