//! Store bootstrap and the group/membership bookkeeping the bot needs around
//! the ledger.
use std::path::Path;

use sea_orm::{
    sea_query::OnConflict, ActiveModelTrait, ActiveValue::NotSet, ColumnTrait,
    Database as SeaOrmDatabase, DatabaseConnection, DbErr, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use sea_orm_migration::MigratorTrait;
use thiserror::Error;
use tracing::info;

use crate::{
    entity::{group, member, membership, GroupId, MemberId},
    ledger::Ledger,
    migration::Migrator,
};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    #[error("File error: {0}")]
    File(#[from] std::io::Error),
}

#[derive(Clone, Debug)]
pub struct Database {
    pool: DatabaseConnection,
}

impl Database {
    /// Opens (creating if needed) the SQLite file at `db_path`.
    pub async fn new(db_path: &Path) -> Result<Self, Error> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::connect(&format!("sqlite:{}?mode=rwc", db_path.display())).await
    }

    pub async fn connect(url: &str) -> Result<Self, Error> {
        let pool = SeaOrmDatabase::connect(url).await?;
        Ok(Self { pool })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.pool
    }

    pub fn ledger(&self) -> Ledger {
        Ledger::new(self.pool.clone())
    }

    pub async fn apply_migrations(&self) -> Result<(), Error> {
        Ok(Migrator::up(&self.pool, None).await?)
    }

    /// Inserts the member or refreshes its display name.
    pub async fn register_member(
        &self,
        member_id: MemberId,
        display_name: &str,
    ) -> Result<member::Model, Error> {
        let active = member::ActiveModel {
            id: Set(member_id),
            display_name: Set(display_name.to_owned()),
        };
        member::Entity::insert(active)
            .on_conflict(
                OnConflict::column(member::Column::Id)
                    .update_column(member::Column::DisplayName)
                    .to_owned(),
            )
            .exec(&self.pool)
            .await?;

        Ok(member::Model {
            id: member_id,
            display_name: display_name.to_owned(),
        })
    }

    /// Creates a group with `owner_id` as its first member.
    pub async fn create_group(&self, name: &str, owner_id: MemberId) -> Result<group::Model, Error> {
        let txn = self.pool.begin().await?;

        let created = group::ActiveModel {
            id: NotSet,
            name: Set(name.to_owned()),
            owner_id: Set(owner_id),
        }
        .insert(&txn)
        .await?;

        membership::ActiveModel {
            member_id: Set(owner_id),
            group_id: Set(created.id),
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        info!(group_id = created.id, owner_id, "Group created");
        Ok(created)
    }

    /// Adds the member to the group. Returns `None` when the group does not
    /// exist; joining twice is a no-op.
    pub async fn add_member_to_group(
        &self,
        group_id: GroupId,
        member_id: MemberId,
    ) -> Result<Option<group::Model>, Error> {
        let Some(found) = self.get_group_by_id(group_id).await? else {
            return Ok(None);
        };

        let existing = membership::Entity::find_by_id((member_id, group_id))
            .one(&self.pool)
            .await?;
        if existing.is_none() {
            membership::ActiveModel {
                member_id: Set(member_id),
                group_id: Set(group_id),
            }
            .insert(&self.pool)
            .await?;
            info!(group_id, member_id, "Member joined group");
        }

        Ok(Some(found))
    }

    pub async fn get_member_groups(&self, member_id: MemberId) -> Result<Vec<group::Model>, Error> {
        Ok(group::Entity::find()
            .join(JoinType::InnerJoin, group::Relation::Membership.def())
            .filter(membership::Column::MemberId.eq(member_id))
            .order_by_asc(group::Column::Id)
            .all(&self.pool)
            .await?)
    }

    async fn get_group_by_id(&self, group_id: GroupId) -> Result<Option<group::Model>, Error> {
        Ok(group::Entity::find_by_id(group_id).one(&self.pool).await?)
    }
}
