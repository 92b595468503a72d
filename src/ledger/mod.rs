//! The ledger and balance engine.
//!
//! [`Ledger`] is the only writer of expenses, splits and settlements. Balances
//! and history are recomputed from the stored rows on every call.
use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, EntityTrait, JoinType,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, TransactionTrait,
};
use tracing::error;

use crate::entity::{member, membership, GroupId, MemberId};

mod balance;
mod error;
mod expenses;
mod history;
mod settlements;

pub use balance::{compute_balances, suggest_transfers, MemberBalance, Transfer};
pub use error::{LedgerError, LedgerResult};
pub use expenses::{equal_split, parse_expense_date, ExpenseDraft};
pub use history::{merge_history, HistoryItem};
pub use settlements::RecordedSettlement;

/// Significant digits an amount may carry, counted at the scale its splits
/// are written with. SQLite keeps decimal columns as REAL, which reproduces
/// up to 15 digits exactly.
pub const MAX_AMOUNT_DIGITS: u32 = 15;

#[derive(Clone, Debug)]
pub struct Ledger {
    db: DatabaseConnection,
}

impl Ledger {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Members of `group_id`, ordered by id.
    pub async fn members(
        &self,
        actor: MemberId,
        group_id: GroupId,
    ) -> LedgerResult<Vec<member::Model>> {
        require_member(&self.db, group_id, actor).await?;
        group_members(&self.db, group_id).await
    }

    async fn begin(&self) -> LedgerResult<DatabaseTransaction> {
        Ok(self.db.begin().await?)
    }
}

pub(crate) async fn is_member<C: ConnectionTrait>(
    db: &C,
    group_id: GroupId,
    member_id: MemberId,
) -> LedgerResult<bool> {
    Ok(membership::Entity::find_by_id((member_id, group_id))
        .one(db)
        .await?
        .is_some())
}

/// Fails with [`LedgerError::Forbidden`] unless `actor` belongs to the group.
/// A group that does not exist has no members, so it is reported the same way.
pub(crate) async fn require_member<C: ConnectionTrait>(
    db: &C,
    group_id: GroupId,
    actor: MemberId,
) -> LedgerResult<()> {
    if !is_member(db, group_id, actor).await? {
        return Err(LedgerError::Forbidden(format!(
            "member {actor} does not belong to group {group_id}"
        )));
    }
    Ok(())
}

pub(crate) async fn group_members<C: ConnectionTrait>(
    db: &C,
    group_id: GroupId,
) -> LedgerResult<Vec<member::Model>> {
    Ok(member::Entity::find()
        .join(JoinType::InnerJoin, member::Relation::Membership.def())
        .filter(membership::Column::GroupId.eq(group_id))
        .order_by_asc(member::Column::Id)
        .all(db)
        .await?)
}

/// Accepts positive amounts that survive a round trip through the store.
pub(crate) fn check_amount(amount: Decimal) -> LedgerResult<()> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::validation(format!(
            "amount must be positive, got {amount}"
        )));
    }
    let mut stored = amount;
    stored.rescale(amount.scale().max(2));
    if stored.mantissa() >= 10i128.pow(MAX_AMOUNT_DIGITS) {
        return Err(LedgerError::validation(format!(
            "amount {amount} has more than {MAX_AMOUNT_DIGITS} significant digits"
        )));
    }
    Ok(())
}

/// Commits `txn` when `outcome` is a success, rolls it back otherwise.
async fn finish<T>(txn: DatabaseTransaction, outcome: LedgerResult<T>) -> LedgerResult<T> {
    match outcome {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                error!(?rollback_err, "Rolling back ledger transaction failed");
            }
            Err(err)
        }
    }
}
