use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use teloxide::types::{Message, User};

use crate::{
    db,
    entity::{expense, group, member, ExpenseId, GroupId, MemberId},
    ledger::{
        ExpenseDraft, HistoryItem, Ledger, LedgerError, LedgerResult, MemberBalance,
        RecordedSettlement,
    },
};

/// Binds the store and the ledger to the member who sent the current message.
/// That member is the actor of every call and the payer of what they record,
/// except on edits, where the stored payer is kept.
pub struct Controller<'a> {
    pub db: &'a db::Database,
    pub ledger: &'a Ledger,
    pub member: member::Model,
}

impl<'a> Controller<'a> {
    pub async fn register(
        db: &'a db::Database,
        ledger: &'a Ledger,
        member_id: MemberId,
        display_name: &str,
    ) -> anyhow::Result<Controller<'a>> {
        let member = db
            .register_member(member_id, display_name)
            .await
            .map_err(|err| anyhow::anyhow!("Registering member failed. Err: {err}"))?;
        Ok(Self { db, ledger, member })
    }

    pub async fn from_msg(
        db: &'a db::Database,
        ledger: &'a Ledger,
        msg: &Message,
    ) -> anyhow::Result<Controller<'a>> {
        let user = msg
            .from()
            .ok_or(anyhow::anyhow!("😔Sorry, I can't get info about you😔"))?;
        let member_id = MemberId::try_from(user.id.0)
            .map_err(|_| anyhow::anyhow!("Telegram user id {} is out of range", user.id.0))?;

        Self::register(db, ledger, member_id, &author_name(user)).await
    }

    pub async fn create_group(&self, group_name: &str) -> anyhow::Result<group::Model> {
        self.db
            .create_group(group_name, self.member.id)
            .await
            .map_err(|err| anyhow::anyhow!("Group creation failed. Err: {err}"))
    }

    pub async fn join_group(&self, group_id: GroupId) -> anyhow::Result<Option<group::Model>> {
        self.db
            .add_member_to_group(group_id, self.member.id)
            .await
            .map_err(|err| anyhow::anyhow!("Joining group failed. Err: {err}"))
    }

    pub async fn get_my_groups(&self) -> anyhow::Result<Vec<group::Model>> {
        self.db
            .get_member_groups(self.member.id)
            .await
            .map_err(|err| anyhow::anyhow!("Retrieving member groups failed. Err: {err}"))
    }

    pub async fn members(&self, group_id: GroupId) -> LedgerResult<Vec<member::Model>> {
        self.ledger.members(self.member.id, group_id).await
    }

    /// Turns `all` or a list of member ids into the participant set.
    pub async fn resolve_participants(
        &self,
        group_id: GroupId,
        input: &str,
    ) -> LedgerResult<Vec<MemberId>> {
        if input.trim().eq_ignore_ascii_case("all") {
            let members = self.members(group_id).await?;
            return Ok(members.into_iter().map(|m| m.id).collect());
        }
        parse_member_ids(input)
    }

    pub async fn save_expense(
        &self,
        group_id: GroupId,
        expense_id: Option<ExpenseId>,
        amount: Decimal,
        description: &str,
        date: NaiveDate,
        participants: Vec<MemberId>,
    ) -> LedgerResult<expense::Model> {
        let mut draft = ExpenseDraft {
            payer_id: self.member.id,
            amount,
            description: description.to_owned(),
            date,
            participants,
        };
        match expense_id {
            Some(expense_id) => {
                let existing = self
                    .ledger
                    .expense(self.member.id, group_id, expense_id)
                    .await?;
                draft.payer_id = existing.payer_id;
                self.ledger
                    .edit_expense(self.member.id, group_id, expense_id, &draft)
                    .await
            }
            None => {
                self.ledger
                    .create_expense(self.member.id, group_id, &draft)
                    .await
            }
        }
    }

    pub async fn delete_expense(
        &self,
        group_id: GroupId,
        expense_id: ExpenseId,
    ) -> LedgerResult<expense::Model> {
        self.ledger
            .delete_expense(self.member.id, group_id, expense_id)
            .await
    }

    pub async fn settle(
        &self,
        group_id: GroupId,
        receiver_id: MemberId,
        amount: Decimal,
    ) -> LedgerResult<RecordedSettlement> {
        self.ledger
            .record_settlement(
                self.member.id,
                group_id,
                self.member.id,
                receiver_id,
                amount,
                Utc::now(),
            )
            .await
    }

    pub async fn balances(&self, group_id: GroupId) -> LedgerResult<Vec<MemberBalance>> {
        self.ledger.balances(self.member.id, group_id).await
    }

    pub async fn history(&self, group_id: GroupId) -> LedgerResult<Vec<HistoryItem>> {
        self.ledger.history(self.member.id, group_id).await
    }
}

fn author_name(user: &User) -> String {
    match user.username {
        Some(ref username) => format!("@{username}"),
        None => user.full_name(),
    }
}

/// Parses member ids separated by commas and/or whitespace.
pub fn parse_member_ids(input: &str) -> LedgerResult<Vec<MemberId>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<MemberId>()
                .map_err(|_| LedgerError::Validation(format!("`{token}` is not a member id")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_ids_accept_commas_and_spaces() {
        assert_eq!(parse_member_ids("1, 2 3,4").unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(parse_member_ids("  ").unwrap(), Vec::<MemberId>::new());
    }

    #[test]
    fn member_ids_reject_garbage() {
        assert_eq!(
            parse_member_ids("1, bob").unwrap_err(),
            LedgerError::Validation("`bob` is not a member id".to_string())
        );
    }
}
