use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // hosts table
        manager
            .create_table(
                Table::create()
                    .table(Host::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Host::Token)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Host::Name).string().not_null())
                    .col(ColumnDef::new(Host::Domain).string().not_null())
                    .col(ColumnDef::new(Host::Zone).string().not_null())
                    .col(ColumnDef::new(Host::Ip4addr).string().null())
                    .col(ColumnDef::new(Host::Ip6addr).string().null())
                    .col(ColumnDef::new(Host::Modified).string().not_null())
                    .col(ColumnDef::new(Host::Created).string().not_null())
                    .to_owned(),
            )
            .await?;

        // update_rules table
        manager
            .create_table(
                Table::create()
                    .table(UpdateRule::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UpdateRule::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UpdateRule::Token).string().not_null())
                    .col(ColumnDef::new(UpdateRule::Cmd).string().not_null())
                    .col(ColumnDef::new(UpdateRule::Args).string().not_null())
                    .col(ColumnDef::new(UpdateRule::CredentialEnv).string().null())
                    .col(ColumnDef::new(UpdateRule::Modified).string().not_null())
                    .col(ColumnDef::new(UpdateRule::Created).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_update_rules_token")
                            .from(UpdateRule::Table, UpdateRule::Token)
                            .to(Host::Table, Host::Token)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_update_rules_token")
                    .table(UpdateRule::Table)
                    .col(UpdateRule::Token)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UpdateRule::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Host::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Host {
    #[sea_orm(iden = "hosts")]
    Table,
    Token,
    Name,
    Domain,
    Zone,
    Ip4addr,
    Ip6addr,
    Modified,
    Created,
}

#[derive(DeriveIden)]
enum UpdateRule {
    #[sea_orm(iden = "update_rules")]
    Table,
    Id,
    Token,
    Cmd,
    Args,
    CredentialEnv,
    Modified,
    Created,
}
