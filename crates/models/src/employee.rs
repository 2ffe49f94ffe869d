use sea_orm::{entity::prelude::*, ConnectionTrait, QueryOrder, PaginatorTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{employee_phone, errors, role::Role};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "employee")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub document_number: String,
    pub birth_date: Date,
    pub role: Role,
    pub manager_id: Option<Uuid>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Manager,
    Phones,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Manager => Entity::belongs_to(Entity)
                .from(Column::ManagerId)
                .to(Column::Id)
                .into(),
            Relation::Phones => Entity::has_many(employee_phone::Entity).into(),
        }
    }
}

impl Related<employee_phone::Entity> for Entity {
    fn to() -> RelationDef { Relation::Phones.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub const NAME_MAX: usize = 100;
pub const EMAIL_MAX: usize = 255;

pub fn validate_name(field: &str, name: &str) -> Result<(), errors::ModelError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} is required")));
    }
    if trimmed.chars().count() > NAME_MAX {
        return Err(errors::ModelError::Validation(format!("{field} must be at most {NAME_MAX} characters")));
    }
    Ok(())
}

/// Accepts `local@domain.tld`; returns the lower-cased form that is stored.
pub fn normalize_email(email: &str) -> Result<String, errors::ModelError> {
    let email = email.trim().to_lowercase();
    if email.len() > EMAIL_MAX {
        return Err(errors::ModelError::Validation("email too long".into()));
    }
    let invalid = || errors::ModelError::Validation("invalid email".into());
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (host, tld) = domain.rsplit_once('.').ok_or_else(invalid)?;
    if host.is_empty() || tld.is_empty() {
        return Err(invalid());
    }
    Ok(email)
}

pub fn validate_document_number(doc: &str) -> Result<(), errors::ModelError> {
    let len = doc.len();
    if !(3..=32).contains(&len) || !doc.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(errors::ModelError::Validation(
            "document number must be 3 to 32 letters or digits".into(),
        ));
    }
    Ok(())
}

pub async fn find_by_email<C: ConnectionTrait>(db: &C, email: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::Email.eq(email.to_lowercase())).one(db).await?)
}

pub async fn find_by_document_number<C: ConnectionTrait>(db: &C, doc: &str) -> Result<Option<Model>, errors::ModelError> {
    Ok(Entity::find().filter(Column::DocumentNumber.eq(doc)).one(db).await?)
}

pub async fn list_subordinates<C: ConnectionTrait>(db: &C, manager_id: Uuid) -> Result<Vec<Model>, errors::ModelError> {
    Ok(Entity::find()
        .filter(Column::ManagerId.eq(manager_id))
        .order_by_asc(Column::LastName)
        .all(db)
        .await?)
}

/// One page of employees ordered by last then first name. `page_idx` is 0-based.
pub async fn list_page<C: ConnectionTrait>(db: &C, page_idx: u64, per_page: u64) -> Result<(Vec<Model>, u64), errors::ModelError> {
    let paginator = Entity::find()
        .order_by_asc(Column::LastName)
        .order_by_asc(Column::FirstName)
        .order_by_asc(Column::Id)
        .paginate(db, per_page);
    let total = paginator.num_items().await?;
    let rows = paginator.fetch_page(page_idx).await?;
    Ok((rows, total))
}

pub async fn hard_delete<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
