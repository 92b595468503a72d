use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseTransaction, EntityTrait, QueryFilter};

use crate::entity::{expense, settlement, GroupId, MemberId};

use super::{finish, group_members, require_member, Ledger, LedgerResult};

/// One entry of a group's activity feed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HistoryItem {
    Expense {
        id: i64,
        date: DateTime<Utc>,
        amount: Decimal,
        description: String,
        payer_id: MemberId,
        payer_name: String,
    },
    Settlement {
        id: i64,
        date: DateTime<Utc>,
        amount: Decimal,
        payer_id: MemberId,
        payer_name: String,
        receiver_id: MemberId,
        receiver_name: String,
    },
}

impl HistoryItem {
    pub fn id(&self) -> i64 {
        match self {
            Self::Expense { id, .. } | Self::Settlement { id, .. } => *id,
        }
    }

    /// Recorded date for expenses (midnight UTC), creation time for settlements.
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            Self::Expense { date, .. } | Self::Settlement { date, .. } => *date,
        }
    }

    pub fn amount(&self) -> Decimal {
        match self {
            Self::Expense { amount, .. } | Self::Settlement { amount, .. } => *amount,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Expense { .. } => "expense",
            Self::Settlement { .. } => "settlement",
        }
    }

    // settlements carry a real timestamp, so they win ties against expenses
    fn tie_rank(&self) -> u8 {
        match self {
            Self::Settlement { .. } => 0,
            Self::Expense { .. } => 1,
        }
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Merges expenses and settlements into a single feed, newest first.
///
/// Ties on the date put settlements before expenses, then higher ids first.
pub fn merge_history(
    expenses: &[expense::Model],
    settlements: &[settlement::Model],
    names: &HashMap<MemberId, String>,
) -> Vec<HistoryItem> {
    let name_of = |id: MemberId| {
        names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("#{id}"))
    };

    let mut items: Vec<HistoryItem> = expenses
        .iter()
        .map(|e| HistoryItem::Expense {
            id: e.id,
            date: start_of_day(e.date),
            amount: e.amount,
            description: e.description.clone(),
            payer_id: e.payer_id,
            payer_name: name_of(e.payer_id),
        })
        .chain(settlements.iter().map(|s| HistoryItem::Settlement {
            id: s.id,
            date: s.created_at,
            amount: s.amount,
            payer_id: s.payer_id,
            payer_name: name_of(s.payer_id),
            receiver_id: s.receiver_id,
            receiver_name: name_of(s.receiver_id),
        }))
        .collect();

    items.sort_by(|a, b| {
        b.date()
            .cmp(&a.date())
            .then_with(|| a.tie_rank().cmp(&b.tie_rank()))
            .then_with(|| b.id().cmp(&a.id()))
    });
    items
}

impl Ledger {
    pub async fn history(
        &self,
        actor: MemberId,
        group_id: GroupId,
    ) -> LedgerResult<Vec<HistoryItem>> {
        let txn = self.begin().await?;
        let outcome = load_history(&txn, actor, group_id).await;
        finish(txn, outcome).await
    }
}

async fn load_history(
    txn: &DatabaseTransaction,
    actor: MemberId,
    group_id: GroupId,
) -> LedgerResult<Vec<HistoryItem>> {
    require_member(txn, group_id, actor).await?;

    let names: HashMap<MemberId, String> = group_members(txn, group_id)
        .await?
        .into_iter()
        .map(|m| (m.id, m.display_name))
        .collect();
    let expenses = expense::Entity::find()
        .filter(expense::Column::GroupId.eq(group_id))
        .all(txn)
        .await?;
    let settlements = settlement::Entity::find()
        .filter(settlement::Column::GroupId.eq(group_id))
        .all(txn)
        .await?;

    Ok(merge_history(&expenses, &settlements, &names))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense_on(id: i64, y: i32, m: u32, d: u32) -> expense::Model {
        expense::Model {
            id,
            group_id: 1,
            payer_id: 1,
            amount: Decimal::from(30),
            description: "Taxi".to_string(),
            date: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
        }
    }

    fn settlement_at(id: i64, at: DateTime<Utc>) -> settlement::Model {
        settlement::Model {
            id,
            group_id: 1,
            payer_id: 2,
            receiver_id: 1,
            amount: Decimal::from(10),
            created_at: at,
        }
    }

    fn names() -> HashMap<MemberId, String> {
        HashMap::from([(1, "alice".to_string()), (2, "bob".to_string())])
    }

    #[test]
    fn newest_entries_come_first() {
        let expenses = vec![expense_on(1, 2024, 1, 1), expense_on(2, 2024, 1, 3)];
        let settlements = vec![settlement_at(
            1,
            Utc.with_ymd_and_hms(2024, 1, 2, 12, 0, 0).unwrap(),
        )];

        let history = merge_history(&expenses, &settlements, &names());
        let order: Vec<_> = history.iter().map(|h| (h.kind(), h.id())).collect();
        assert_eq!(
            order,
            vec![("expense", 2), ("settlement", 1), ("expense", 1)]
        );
    }

    #[test]
    fn ties_prefer_settlements_then_higher_ids() {
        let midnight = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        let expenses = vec![expense_on(3, 2024, 5, 1), expense_on(4, 2024, 5, 1)];
        let settlements = vec![settlement_at(7, midnight)];

        let history = merge_history(&expenses, &settlements, &names());
        let order: Vec<_> = history.iter().map(|h| (h.kind(), h.id())).collect();
        assert_eq!(
            order,
            vec![("settlement", 7), ("expense", 4), ("expense", 3)]
        );
    }

    #[test]
    fn names_are_resolved_with_id_fallback() {
        let mut unknown = settlement_at(1, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        unknown.receiver_id = 42;

        let history = merge_history(&[], &[unknown], &names());
        match &history[0] {
            HistoryItem::Settlement {
                payer_name,
                receiver_name,
                ..
            } => {
                assert_eq!(payer_name, "bob");
                assert_eq!(receiver_name, "#42");
            }
            other => panic!("unexpected item {other:?}"),
        }
    }
}
