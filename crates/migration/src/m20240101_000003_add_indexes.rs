use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Employee: unique email and document number
        manager
            .create_index(
                Index::create()
                    .name("uniq_employee_email")
                    .table(Employee::Table)
                    .col(Employee::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("uniq_employee_document_number")
                    .table(Employee::Table)
                    .col(Employee::DocumentNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Employee: subordinate lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_manager")
                    .table(Employee::Table)
                    .col(Employee::ManagerId)
                    .to_owned(),
            )
            .await?;

        // EmployeePhone: index on employee_id
        manager
            .create_index(
                Index::create()
                    .name("idx_employee_phone_employee")
                    .table(EmployeePhone::Table)
                    .col(EmployeePhone::EmployeeId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("uniq_employee_email").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("uniq_employee_document_number").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employee_manager").table(Employee::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_employee_phone_employee").table(EmployeePhone::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Employee { Table, Email, DocumentNumber, ManagerId }

#[derive(DeriveIden)]
enum EmployeePhone { Table, EmployeeId }
