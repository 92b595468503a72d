//! Net balances per member.
//!
//! Positive balance: the group owes this member. Negative: the member owes the
//! group. The balances of a group always add up to zero.
use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashSet},
};

use rust_decimal::Decimal;
use sea_orm::{
    ColumnTrait, DatabaseTransaction, EntityTrait, JoinType, QueryFilter, QuerySelect,
    RelationTrait,
};
use tracing::warn;

use crate::entity::{expense, member, settlement, split, GroupId, MemberId};

use super::{finish, group_members, require_member, Ledger, LedgerResult};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberBalance {
    pub member_id: MemberId,
    pub display_name: String,
    pub balance: Decimal,
}

/// A payment that would move `amount` from a debtor to a creditor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub from: MemberId,
    pub to: MemberId,
    pub amount: Decimal,
}

/// Reduces a group's rows into one balance per member, in the order of
/// `members`. Members without any activity get a zero balance.
///
/// Splits whose expense is not among `expenses` are ignored. Rows naming a
/// non-member are skipped and logged.
pub fn compute_balances(
    members: &[member::Model],
    expenses: &[expense::Model],
    splits: &[split::Model],
    settlements: &[settlement::Model],
) -> Vec<MemberBalance> {
    let mut balances: BTreeMap<MemberId, Decimal> =
        members.iter().map(|m| (m.id, Decimal::ZERO)).collect();

    let mut credit = |member_id: MemberId, delta: Decimal| match balances.get_mut(&member_id) {
        Some(balance) => *balance += delta,
        None => warn!(member_id, %delta, "Ledger row references a non-member, skipped"),
    };

    for exp in expenses {
        credit(exp.payer_id, exp.amount);
    }

    let expense_ids: HashSet<i64> = expenses.iter().map(|e| e.id).collect();
    for s in splits.iter().filter(|s| expense_ids.contains(&s.expense_id)) {
        credit(s.debtor_id, -s.amount_due);
    }

    for t in settlements {
        credit(t.payer_id, -t.amount);
        credit(t.receiver_id, t.amount);
    }

    members
        .iter()
        .map(|m| MemberBalance {
            member_id: m.id,
            display_name: m.display_name.clone(),
            balance: balances.get(&m.id).copied().unwrap_or_default(),
        })
        .collect()
}

/// Greedy settle-up plan: the largest debtor pays the largest creditor until
/// one of them reaches zero, then the next one is taken.
pub fn suggest_transfers(balances: &[MemberBalance]) -> Vec<Transfer> {
    let mut creditors: Vec<(MemberId, Decimal)> = Vec::new();
    let mut debtors: Vec<(MemberId, Decimal)> = Vec::new();

    for b in balances {
        match b.balance.cmp(&Decimal::ZERO) {
            Ordering::Greater => creditors.push((b.member_id, b.balance)),
            Ordering::Less => debtors.push((b.member_id, b.balance.abs())),
            Ordering::Equal => (),
        }
    }

    // Largest amounts first, member id as a stable tie-break.
    creditors.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    debtors.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut transfers = Vec::new();
    let (mut d, mut c) = (0, 0);
    while d < debtors.len() && c < creditors.len() {
        let amount = debtors[d].1.min(creditors[c].1);
        transfers.push(Transfer {
            from: debtors[d].0,
            to: creditors[c].0,
            amount,
        });

        debtors[d].1 -= amount;
        creditors[c].1 -= amount;

        if debtors[d].1.is_zero() {
            d += 1;
        }
        if creditors[c].1.is_zero() {
            c += 1;
        }
    }

    transfers
}

impl Ledger {
    /// Current balance of every member of the group, recomputed from scratch.
    pub async fn balances(
        &self,
        actor: MemberId,
        group_id: GroupId,
    ) -> LedgerResult<Vec<MemberBalance>> {
        let txn = self.begin().await?;
        let outcome = load_balances(&txn, actor, group_id).await;
        finish(txn, outcome).await
    }
}

async fn load_balances(
    txn: &DatabaseTransaction,
    actor: MemberId,
    group_id: GroupId,
) -> LedgerResult<Vec<MemberBalance>> {
    require_member(txn, group_id, actor).await?;

    let members = group_members(txn, group_id).await?;
    let expenses = expense::Entity::find()
        .filter(expense::Column::GroupId.eq(group_id))
        .all(txn)
        .await?;
    let splits = split::Entity::find()
        .join(JoinType::InnerJoin, split::Relation::Expense.def())
        .filter(expense::Column::GroupId.eq(group_id))
        .all(txn)
        .await?;
    let settlements = settlement::Entity::find()
        .filter(settlement::Column::GroupId.eq(group_id))
        .all(txn)
        .await?;

    Ok(compute_balances(&members, &expenses, &splits, &settlements))
}
