//! `SeaORM` entity for the `hosts` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "hosts")]
/// Database row model for a host record.
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub token: String,
    pub name: String,
    pub domain: String,
    pub zone: String,
    pub ip4addr: Option<String>,
    pub ip6addr: Option<String>,
    pub modified: String,
    pub created: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
