//! Create `employee` table.
//!
//! `manager_id` is a self reference; deleting a manager that still has
//! subordinates is refused by the store as well as by the service layer.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(uuid(Employee::Id).primary_key())
                    .col(string_len(Employee::FirstName, 100).not_null())
                    .col(string_len(Employee::LastName, 100).not_null())
                    .col(string_len(Employee::Email, 255).not_null())
                    .col(string_len(Employee::DocumentNumber, 32).not_null())
                    .col(date(Employee::BirthDate).not_null())
                    .col(integer(Employee::Role).not_null())
                    .col(
                        ColumnDef::new(Employee::ManagerId)
                            .uuid()
                            .null(),
                    )
                    .col(string_len(Employee::PasswordHash, 255).not_null())
                    .col(timestamp_with_time_zone(Employee::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Employee::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_manager")
                            .from(Employee::Table, Employee::ManagerId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Employee::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    Id,
    FirstName,
    LastName,
    Email,
    DocumentNumber,
    BirthDate,
    Role,
    ManagerId,
    PasswordHash,
    CreatedAt,
    UpdatedAt,
}
