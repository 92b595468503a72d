use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, EntityTrait, Set};
use tracing::info;

use crate::entity::{member, settlement, GroupId, MemberId};

use super::{check_amount, is_member, require_member, Ledger, LedgerError, LedgerResult};

/// A stored settlement together with the names of both sides.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedSettlement {
    pub settlement: settlement::Model,
    pub payer_name: String,
    pub receiver_name: String,
}

impl Ledger {
    /// Records that `payer_id` paid `amount` to `receiver_id`.
    ///
    /// A single row is written, so no transaction is opened.
    pub async fn record_settlement(
        &self,
        actor: MemberId,
        group_id: GroupId,
        payer_id: MemberId,
        receiver_id: MemberId,
        amount: Decimal,
        created_at: DateTime<Utc>,
    ) -> LedgerResult<RecordedSettlement> {
        require_member(&self.db, group_id, actor).await?;

        check_amount(amount)?;
        if payer_id == receiver_id {
            return Err(LedgerError::validation(
                "payer and receiver cannot be the same member",
            ));
        }
        if !is_member(&self.db, group_id, payer_id).await? {
            return Err(LedgerError::validation(format!(
                "payer {payer_id} is not a member of group {group_id}"
            )));
        }
        if !is_member(&self.db, group_id, receiver_id).await? {
            return Err(LedgerError::validation(format!(
                "receiver {receiver_id} is not a member of group {group_id}"
            )));
        }

        let created = settlement::ActiveModel {
            id: NotSet,
            group_id: Set(group_id),
            payer_id: Set(payer_id),
            receiver_id: Set(receiver_id),
            amount: Set(amount),
            created_at: Set(created_at),
        }
        .insert(&self.db)
        .await?;

        info!(
            settlement_id = created.id,
            group_id,
            payer_id,
            receiver_id,
            amount = %amount,
            "Settlement recorded"
        );

        let payer_name = self.display_name(payer_id).await?;
        let receiver_name = self.display_name(receiver_id).await?;
        Ok(RecordedSettlement {
            settlement: created,
            payer_name,
            receiver_name,
        })
    }

    async fn display_name(&self, member_id: MemberId) -> LedgerResult<String> {
        Ok(member::Entity::find_by_id(member_id)
            .one(&self.db)
            .await?
            .map(|m| m.display_name)
            .unwrap_or_else(|| format!("#{member_id}")))
    }
}
