//! Expense and split writes. Every mutation touches the expense row and its
//! splits inside a single transaction.
use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseTransaction,
    EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info};

use crate::entity::{expense, split, ExpenseId, GroupId, MemberId};

use super::{
    check_amount, finish, is_member, require_member, Ledger, LedgerError, LedgerResult,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Everything needed to write an expense. Used both for creation and as the
/// full replacement on edit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpenseDraft {
    pub payer_id: MemberId,
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
    /// Members sharing the expense. The payer does not have to be one of them.
    pub participants: Vec<MemberId>,
}

impl ExpenseDraft {
    /// Checks the input-only rules and returns the trimmed description.
    fn validate(&self) -> LedgerResult<String> {
        check_amount(self.amount)?;
        if self.participants.is_empty() {
            return Err(LedgerError::validation(
                "at least one participant is required",
            ));
        }
        let mut seen = HashSet::with_capacity(self.participants.len());
        for id in &self.participants {
            if !seen.insert(*id) {
                return Err(LedgerError::validation(format!(
                    "participant {id} is listed more than once"
                )));
            }
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(LedgerError::validation("description must not be empty"));
        }
        Ok(description.to_string())
    }
}

/// Parses an expense date written as `YYYY-MM-DD`.
pub fn parse_expense_date(value: &str) -> LedgerResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        LedgerError::validation(format!("invalid date `{value}`, use YYYY-MM-DD"))
    })
}

/// Divides `amount` evenly between `participants`.
///
/// Each share is truncated to `max(scale, 2)` decimal places and whatever is
/// left over goes to the first participant, so the shares always add up to
/// `amount` exactly.
pub fn equal_split(amount: Decimal, participants: &[MemberId]) -> Vec<(MemberId, Decimal)> {
    if participants.is_empty() {
        return Vec::new();
    }

    let count = Decimal::from(participants.len());
    let scale = amount.scale().max(2);
    let share = (amount / count).round_dp_with_strategy(scale, RoundingStrategy::ToZero);
    let remainder = amount - share * count;

    participants
        .iter()
        .enumerate()
        .map(|(idx, &debtor)| {
            let due = if idx == 0 { share + remainder } else { share };
            (debtor, due)
        })
        .collect()
}

impl Ledger {
    /// Writes a new expense and one split per participant.
    pub async fn create_expense(
        &self,
        actor: MemberId,
        group_id: GroupId,
        draft: &ExpenseDraft,
    ) -> LedgerResult<expense::Model> {
        let txn = self.begin().await?;
        let outcome = insert_expense(&txn, actor, group_id, draft).await;
        let created = finish(txn, outcome).await?;

        info!(
            expense_id = created.id,
            group_id,
            payer_id = created.payer_id,
            amount = %created.amount,
            participants = draft.participants.len(),
            "Expense created"
        );
        Ok(created)
    }

    /// Replaces payer, amount, description, date and participants of an
    /// existing expense. The old splits are dropped and rebuilt.
    pub async fn edit_expense(
        &self,
        actor: MemberId,
        group_id: GroupId,
        expense_id: ExpenseId,
        draft: &ExpenseDraft,
    ) -> LedgerResult<expense::Model> {
        let txn = self.begin().await?;
        let outcome = replace_expense(&txn, actor, group_id, expense_id, draft).await;
        let updated = finish(txn, outcome).await?;

        info!(
            expense_id,
            group_id,
            amount = %updated.amount,
            participants = draft.participants.len(),
            "Expense edited"
        );
        Ok(updated)
    }

    /// Deletes an expense together with its splits and returns the removed row.
    pub async fn delete_expense(
        &self,
        actor: MemberId,
        group_id: GroupId,
        expense_id: ExpenseId,
    ) -> LedgerResult<expense::Model> {
        let txn = self.begin().await?;
        let outcome = remove_expense(&txn, actor, group_id, expense_id).await;
        let removed = finish(txn, outcome).await?;

        info!(expense_id, group_id, "Expense deleted");
        Ok(removed)
    }

    /// Loads one expense of the group.
    pub async fn expense(
        &self,
        actor: MemberId,
        group_id: GroupId,
        expense_id: ExpenseId,
    ) -> LedgerResult<expense::Model> {
        require_member(&self.db, group_id, actor).await?;
        find_expense_in_group(&self.db, group_id, expense_id).await
    }

    pub async fn expense_splits(
        &self,
        actor: MemberId,
        group_id: GroupId,
        expense_id: ExpenseId,
    ) -> LedgerResult<Vec<split::Model>> {
        let expense = self.expense(actor, group_id, expense_id).await?;

        Ok(split::Entity::find()
            .filter(split::Column::ExpenseId.eq(expense.id))
            .order_by_asc(split::Column::Id)
            .all(&self.db)
            .await?)
    }
}

async fn insert_expense(
    txn: &DatabaseTransaction,
    actor: MemberId,
    group_id: GroupId,
    draft: &ExpenseDraft,
) -> LedgerResult<expense::Model> {
    require_member(txn, group_id, actor).await?;
    let description = draft.validate()?;
    require_group_members(txn, group_id, draft).await?;

    let created = expense::ActiveModel {
        id: NotSet,
        group_id: Set(group_id),
        payer_id: Set(draft.payer_id),
        amount: Set(draft.amount),
        description: Set(description),
        date: Set(draft.date),
    }
    .insert(txn)
    .await?;

    write_splits(txn, created.id, draft.amount, &draft.participants).await?;
    Ok(created)
}

async fn replace_expense(
    txn: &DatabaseTransaction,
    actor: MemberId,
    group_id: GroupId,
    expense_id: ExpenseId,
    draft: &ExpenseDraft,
) -> LedgerResult<expense::Model> {
    require_member(txn, group_id, actor).await?;
    let existing = find_expense_in_group(txn, group_id, expense_id).await?;
    let description = draft.validate()?;
    require_group_members(txn, group_id, draft).await?;

    let dropped = split::Entity::delete_many()
        .filter(split::Column::ExpenseId.eq(existing.id))
        .exec(txn)
        .await?;
    debug!(expense_id, rows = dropped.rows_affected, "Dropped old splits");

    let mut active: expense::ActiveModel = existing.into();
    active.payer_id = Set(draft.payer_id);
    active.amount = Set(draft.amount);
    active.description = Set(description);
    active.date = Set(draft.date);
    let updated = active.update(txn).await?;

    write_splits(txn, updated.id, draft.amount, &draft.participants).await?;
    Ok(updated)
}

async fn remove_expense(
    txn: &DatabaseTransaction,
    actor: MemberId,
    group_id: GroupId,
    expense_id: ExpenseId,
) -> LedgerResult<expense::Model> {
    require_member(txn, group_id, actor).await?;
    let existing = find_expense_in_group(txn, group_id, expense_id).await?;

    split::Entity::delete_many()
        .filter(split::Column::ExpenseId.eq(existing.id))
        .exec(txn)
        .await?;
    expense::Entity::delete_by_id(existing.id).exec(txn).await?;

    Ok(existing)
}

/// Loads an expense only if it belongs to `group_id`, so ids from another
/// group behave exactly like ids that do not exist.
async fn find_expense_in_group<C: ConnectionTrait>(
    db: &C,
    group_id: GroupId,
    expense_id: ExpenseId,
) -> LedgerResult<expense::Model> {
    expense::Entity::find_by_id(expense_id)
        .filter(expense::Column::GroupId.eq(group_id))
        .one(db)
        .await?
        .ok_or_else(|| LedgerError::NotFound(format!("expense {expense_id}")))
}

async fn require_group_members<C: ConnectionTrait>(
    db: &C,
    group_id: GroupId,
    draft: &ExpenseDraft,
) -> LedgerResult<()> {
    if !is_member(db, group_id, draft.payer_id).await? {
        return Err(LedgerError::validation(format!(
            "payer {} is not a member of group {group_id}",
            draft.payer_id
        )));
    }
    for &participant in &draft.participants {
        if !is_member(db, group_id, participant).await? {
            return Err(LedgerError::validation(format!(
                "participant {participant} is not a member of group {group_id}"
            )));
        }
    }
    Ok(())
}

async fn write_splits(
    txn: &DatabaseTransaction,
    expense_id: ExpenseId,
    amount: Decimal,
    participants: &[MemberId],
) -> LedgerResult<()> {
    for (debtor_id, amount_due) in equal_split(amount, participants) {
        split::ActiveModel {
            id: NotSet,
            expense_id: Set(expense_id),
            debtor_id: Set(debtor_id),
            amount_due: Set(amount_due),
        }
        .insert(txn)
        .await?;
    }
    Ok(())
}
