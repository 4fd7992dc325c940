use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string_len(Users::Name, 60).unique_key())
                    .col(string_len(Users::PasswordHash, 128))
                    .col(string_len(Users::Department, 256))
                    .col(string_len(Users::Position, 256))
                    .col(boolean(Users::Active).default(true))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_name")
                    .table(Users::Table)
                    .col(Users::Name)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Create locations table
        manager
            .create_table(
                Table::create()
                    .table(Locations::Table)
                    .if_not_exists()
                    .col(pk_auto(Locations::Id))
                    .col(string_len_null(Locations::Description, 200))
                    .col(boolean(Locations::Active).default(true))
                    .to_owned(),
            )
            .await?;

        // Create inventory table
        manager
            .create_table(
                Table::create()
                    .table(Inventory::Table)
                    .if_not_exists()
                    .col(pk_auto(Inventory::Id))
                    .col(string_len_null(Inventory::InventoryType, 256))
                    .col(string_len_null(Inventory::Manufacturer, 256))
                    .col(string_len_null(Inventory::Model, 256))
                    .col(string_len_null(Inventory::SerialNumber, 256))
                    .col(string_len_null(Inventory::Vendor, 256))
                    .col(double_null(Inventory::Cost))
                    .col(date_time(Inventory::DatePurchased).default(Expr::current_timestamp()))
                    .col(integer(Inventory::PurchasedBy))
                    .col(integer_null(Inventory::Count))
                    .col(integer(Inventory::Location))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_purchased_by")
                            .from(Inventory::Table, Inventory::PurchasedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_inventory_location")
                            .from(Inventory::Table, Inventory::Location)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create assets table. assigned_to and certified_by carry no foreign key.
        manager
            .create_table(
                Table::create()
                    .table(Assets::Table)
                    .if_not_exists()
                    .col(pk_auto(Assets::Id))
                    .col(integer(Assets::InventoryId))
                    .col(integer(Assets::Location))
                    .col(integer(Assets::ManagedBy))
                    .col(integer_null(Assets::AssignedTo))
                    .col(date_time(Assets::AssignedAt).default(Expr::current_timestamp()))
                    .col(integer_null(Assets::CertifiedBy))
                    .col(text_null(Assets::Comments))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assets_inventory")
                            .from(Assets::Table, Assets::InventoryId)
                            .to(Inventory::Table, Inventory::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assets_location")
                            .from(Assets::Table, Assets::Location)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_assets_managed_by")
                            .from(Assets::Table, Assets::ManagedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create ticket_types table
        manager
            .create_table(
                Table::create()
                    .table(TicketTypes::Table)
                    .if_not_exists()
                    .col(pk_auto(TicketTypes::Id))
                    .col(string_len_null(TicketTypes::Description, 256))
                    .col(boolean(TicketTypes::Active).default(true))
                    .to_owned(),
            )
            .await?;

        // Create tickets table. updated_by carries no foreign key.
        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(pk_auto(Tickets::Id))
                    .col(integer(Tickets::TicketType))
                    .col(text_null(Tickets::Description))
                    .col(integer(Tickets::OpenedBy))
                    .col(date_time(Tickets::OpenedAt).default(Expr::current_timestamp()))
                    .col(date_time(Tickets::UpdatedAt).default(Expr::current_timestamp()))
                    .col(date_time(Tickets::DueDate).default(Expr::current_timestamp()))
                    .col(integer_null(Tickets::UpdatedBy))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_ticket_type")
                            .from(Tickets::Table, Tickets::TicketType)
                            .to(TicketTypes::Table, TicketTypes::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_opened_by")
                            .from(Tickets::Table, Tickets::OpenedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(TicketTypes::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Assets::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Inventory::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Locations::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    PasswordHash,
    Department,
    Position,
    Active,
}

#[derive(DeriveIden)]
enum Locations {
    Table,
    Id,
    Description,
    Active,
}

#[derive(DeriveIden)]
enum Inventory {
    Table,
    Id,
    InventoryType,
    Manufacturer,
    Model,
    SerialNumber,
    Vendor,
    Cost,
    DatePurchased,
    PurchasedBy,
    Count,
    Location,
}

#[derive(DeriveIden)]
enum Assets {
    Table,
    Id,
    InventoryId,
    Location,
    ManagedBy,
    AssignedTo,
    AssignedAt,
    CertifiedBy,
    Comments,
}

#[derive(DeriveIden)]
enum TicketTypes {
    Table,
    Id,
    Description,
    Active,
}

#[derive(DeriveIden)]
enum Tickets {
    Table,
    Id,
    TicketType,
    Description,
    OpenedBy,
    OpenedAt,
    UpdatedAt,
    DueDate,
    UpdatedBy,
}
