use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Member::Id)
                            .big_integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Member::DisplayName).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Group::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Group::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Group::Name).string().not_null())
                    .col(ColumnDef::new(Group::OwnerId).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-group-owner_id")
                            .from(Group::Table, Group::OwnerId)
                            .to(Member::Table, Member::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Membership::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Membership::MemberId).big_integer().not_null())
                    .col(ColumnDef::new(Membership::GroupId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .name("pk-membership")
                            .col(Membership::MemberId)
                            .col(Membership::GroupId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-membership-member_id")
                            .from(Membership::Table, Membership::MemberId)
                            .to(Member::Table, Member::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-membership-group_id")
                            .from(Membership::Table, Membership::GroupId)
                            .to(Group::Table, Group::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Expense::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expense::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expense::GroupId).integer().not_null())
                    .col(ColumnDef::new(Expense::PayerId).big_integer().not_null())
                    .col(ColumnDef::new(Expense::Amount).decimal().not_null())
                    .col(ColumnDef::new(Expense::Description).string().not_null())
                    .col(ColumnDef::new(Expense::Date).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expense-group_id")
                            .from(Expense::Table, Expense::GroupId)
                            .to(Group::Table, Group::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-expense-payer_id")
                            .from(Expense::Table, Expense::PayerId)
                            .to(Member::Table, Member::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Split::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Split::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Split::ExpenseId).integer().not_null())
                    .col(ColumnDef::new(Split::DebtorId).big_integer().not_null())
                    .col(ColumnDef::new(Split::AmountDue).decimal().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-split-expense_id")
                            .from(Split::Table, Split::ExpenseId)
                            .to(Expense::Table, Expense::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-split-debtor_id")
                            .from(Split::Table, Split::DebtorId)
                            .to(Member::Table, Member::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // A participant appears at most once per expense.
        manager
            .create_index(
                Index::create()
                    .name("idx-split-expense_debtor")
                    .table(Split::Table)
                    .col(Split::ExpenseId)
                    .col(Split::DebtorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Settlement::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Settlement::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Settlement::GroupId).integer().not_null())
                    .col(ColumnDef::new(Settlement::PayerId).big_integer().not_null())
                    .col(ColumnDef::new(Settlement::ReceiverId).big_integer().not_null())
                    .col(ColumnDef::new(Settlement::Amount).decimal().not_null())
                    .col(
                        ColumnDef::new(Settlement::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-settlement-group_id")
                            .from(Settlement::Table, Settlement::GroupId)
                            .to(Group::Table, Group::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-settlement-payer_id")
                            .from(Settlement::Table, Settlement::PayerId)
                            .to(Member::Table, Member::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-settlement-receiver_id")
                            .from(Settlement::Table, Settlement::ReceiverId)
                            .to(Member::Table, Member::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Settlement::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Split::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expense::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Membership::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Group::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Member::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Member {
    Table,
    Id,
    DisplayName,
}

#[derive(DeriveIden)]
enum Group {
    Table,
    Id,
    Name,
    OwnerId,
}

#[derive(DeriveIden)]
enum Membership {
    Table,
    MemberId,
    GroupId,
}

#[derive(DeriveIden)]
enum Expense {
    Table,
    Id,
    GroupId,
    PayerId,
    Amount,
    Description,
    Date,
}

#[derive(DeriveIden)]
enum Split {
    Table,
    Id,
    ExpenseId,
    DebtorId,
    AmountDue,
}

#[derive(DeriveIden)]
enum Settlement {
    Table,
    Id,
    GroupId,
    PayerId,
    ReceiverId,
    Amount,
    CreatedAt,
}
