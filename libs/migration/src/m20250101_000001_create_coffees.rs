use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Coffee::Table)
                    .if_not_exists()
                    .col(pk_auto(Coffee::Id))
                    .col(string(Coffee::Name))
                    .col(string(Coffee::Brand))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Flavor::Table)
                    .if_not_exists()
                    .col(pk_auto(Flavor::Id))
                    .col(string(Flavor::Name))
                    .to_owned(),
            )
            .await?;

        // Flavors are resolved by name, so names must stay unique
        manager
            .create_index(
                Index::create()
                    .name("idx_flavor_name_unique")
                    .table(Flavor::Table)
                    .col(Flavor::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CoffeeFlavorsFlavor::Table)
                    .if_not_exists()
                    .col(integer(CoffeeFlavorsFlavor::CoffeeId))
                    .col(integer(CoffeeFlavorsFlavor::FlavorId))
                    .primary_key(
                        Index::create()
                            .name("pk_coffee_flavors_flavor")
                            .col(CoffeeFlavorsFlavor::CoffeeId)
                            .col(CoffeeFlavorsFlavor::FlavorId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coffee_flavors_flavor_coffee")
                            .from(CoffeeFlavorsFlavor::Table, CoffeeFlavorsFlavor::CoffeeId)
                            .to(Coffee::Table, Coffee::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_coffee_flavors_flavor_flavor")
                            .from(CoffeeFlavorsFlavor::Table, CoffeeFlavorsFlavor::FlavorId)
                            .to(Flavor::Table, Flavor::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_coffee_flavors_flavor_flavor_id")
                    .table(CoffeeFlavorsFlavor::Table)
                    .col(CoffeeFlavorsFlavor::FlavorId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CoffeeFlavorsFlavor::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Flavor::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Coffee::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Coffee {
    Table,
    Id,
    Name,
    Brand,
}

#[derive(DeriveIden)]
enum Flavor {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum CoffeeFlavorsFlavor {
    Table,
    #[sea_orm(iden = "coffeeId")]
    CoffeeId,
    #[sea_orm(iden = "flavorId")]
    FlavorId,
}
