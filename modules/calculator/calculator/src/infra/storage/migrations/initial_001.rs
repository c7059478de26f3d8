use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Calculations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Calculations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Calculations::Expression)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Calculations::Result).double().not_null())
                    .col(
                        ColumnDef::new(Calculations::CalculationType)
                            .string_len(50)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Calculations::InputsCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Calculations::Timestamp)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Calculations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Calculations {
    Table,
    Id,
    Expression,
    Result,
    CalculationType,
    InputsCount,
    Timestamp,
}
