//! `SeaORM` entities for the service's two tables.

pub mod host;
pub mod update_rule;
