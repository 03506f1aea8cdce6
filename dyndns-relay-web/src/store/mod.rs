//! Database-backed host store using `SeaORM`.
//!
//! `DbStore` implements the core `HostStore` trait against any backend the
//! enabled `SeaORM` drivers support (SQLite, PostgreSQL, MySQL).

pub mod entity;
pub mod migration;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DatabaseTransaction, DbErr, EntityTrait,
    QueryFilter, QueryOrder, TransactionTrait,
};

use dyndns_relay_core::{
    AddressUpdate, CoreError, CoreResult, Host, HostStore, UpdateApplied, UpdateRule,
};

use entity::{host, update_rule};

/// SeaORM-backed implementation of the core `HostStore`.
pub struct DbStore {
    db: DatabaseConnection,
}

impl DbStore {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn storage_err(e: DbErr) -> CoreError {
    CoreError::StorageError(e.to_string())
}

fn parse_timestamp(field: &str, value: &str) -> CoreResult<chrono::DateTime<Utc>> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| CoreError::StorageError(format!("Invalid {field}: {e}")))
}

impl host::Model {
    /// Convert a `SeaORM` row model into a domain `Host`.
    fn into_host(self) -> CoreResult<Host> {
        let modified = parse_timestamp("modified", &self.modified)?;
        let created = parse_timestamp("created", &self.created)?;
        Ok(Host {
            token: self.token,
            name: self.name,
            domain: self.domain,
            zone: self.zone,
            ip4addr: self.ip4addr,
            ip6addr: self.ip6addr,
            modified,
            created,
        })
    }
}

impl update_rule::Model {
    /// Convert a `SeaORM` row model into a domain `UpdateRule`.
    fn into_rule(self) -> CoreResult<UpdateRule> {
        let modified = parse_timestamp("modified", &self.modified)?;
        let created = parse_timestamp("created", &self.created)?;
        Ok(UpdateRule {
            id: self.id,
            token: self.token,
            cmd: self.cmd,
            args: self.args,
            credential_env: self.credential_env,
            modified,
            created,
        })
    }
}

impl DbStore {
    /// Conditionally update one address column, returning whether the row
    /// changed. The guard predicate makes the check-and-set atomic at
    /// statement level: after a competing transaction commits, it
    /// re-evaluates against the committed value.
    async fn stage_column(
        txn: &DatabaseTransaction,
        token: &str,
        column: host::Column,
        value: &str,
        now: &str,
    ) -> CoreResult<bool> {
        let result = host::Entity::update_many()
            .col_expr(column, Expr::value(value.to_string()))
            .col_expr(host::Column::Modified, Expr::value(now.to_string()))
            .filter(host::Column::Token.eq(token))
            .filter(
                Condition::any()
                    .add(column.is_null())
                    .add(column.ne(value.to_string())),
            )
            .exec(txn)
            .await
            .map_err(storage_err)?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl HostStore for DbStore {
    async fn apply_addresses(&self, update: &AddressUpdate) -> CoreResult<UpdateApplied> {
        let txn = self.db.begin().await.map_err(storage_err)?;

        // Touch the row before reading it: the transaction holds the write
        // lock for this token from here on, so a competing update waits
        // instead of comparing against a stale snapshot. The row count
        // doubles as the existence check. A rolled-back transaction leaves
        // the touch without trace.
        let touched = host::Entity::update_many()
            .col_expr(host::Column::Token, Expr::col(host::Column::Token).into())
            .filter(host::Column::Token.eq(update.token.as_str()))
            .exec(&txn)
            .await
            .map_err(storage_err)?;
        if touched.rows_affected == 0 {
            return Err(CoreError::HostNotFound(update.token.clone()));
        }

        let row = host::Entity::find_by_id(update.token.clone())
            .one(&txn)
            .await
            .map_err(storage_err)?
            .ok_or_else(|| CoreError::HostNotFound(update.token.clone()))?;

        if update.domain != row.domain {
            return Err(CoreError::DomainMismatch {
                asserted: update.domain.clone(),
                configured: row.domain,
            });
        }

        let now = Utc::now().to_rfc3339();
        let mut modified = false;

        if let Some(ip4) = &update.ip4 {
            modified |=
                Self::stage_column(&txn, &update.token, host::Column::Ip4addr, ip4, &now).await?;
        }
        if let Some(ip6) = &update.ip6 {
            modified |=
                Self::stage_column(&txn, &update.token, host::Column::Ip6addr, ip6, &now).await?;
        }

        // The pipeline must see the row as persisted, not as submitted.
        let row = if modified {
            host::Entity::find_by_id(update.token.clone())
                .one(&txn)
                .await
                .map_err(storage_err)?
                .ok_or_else(|| CoreError::HostNotFound(update.token.clone()))?
        } else {
            row
        };

        txn.commit().await.map_err(storage_err)?;

        Ok(UpdateApplied {
            host: row.into_host()?,
            modified,
        })
    }

    async fn rules_for(&self, token: &str) -> CoreResult<Vec<UpdateRule>> {
        let rows = update_rule::Entity::find()
            .filter(update_rule::Column::Token.eq(token))
            .order_by_asc(update_rule::Column::Id)
            .all(&self.db)
            .await
            .map_err(storage_err)?;

        rows.into_iter().map(update_rule::Model::into_rule).collect()
    }
}
