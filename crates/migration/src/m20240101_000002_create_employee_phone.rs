//! Create `employee_phone` table holding zero-or-more numbers per employee.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(EmployeePhone::Table)
                    .if_not_exists()
                    .col(uuid(EmployeePhone::Id).primary_key())
                    .col(uuid(EmployeePhone::EmployeeId).not_null())
                    .col(string_len(EmployeePhone::Number, 20).not_null())
                    .col(integer(EmployeePhone::Position).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_employee_phone_employee")
                            .from(EmployeePhone::Table, EmployeePhone::EmployeeId)
                            .to(Employee::Table, Employee::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EmployeePhone::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EmployeePhone {
    Table,
    Id,
    EmployeeId,
    Number,
    Position,
}

#[derive(DeriveIden)]
enum Employee { Table, Id }
