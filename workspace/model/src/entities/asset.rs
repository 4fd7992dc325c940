use sea_orm::entity::prelude::*;

/// A single tracked item, drawn from an inventory batch and kept at a location.
///
/// `assigned_to` and `certified_by` hold user ids but carry no foreign key;
/// they are loose references and may point at users that no longer exist.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub inventory_id: i32,
    pub location: i32,
    /// The user responsible for this asset. Lists are scoped by this column.
    pub managed_by: i32,
    pub assigned_to: Option<i32>,
    pub assigned_at: DateTime,
    pub certified_by: Option<i32>,
    #[sea_orm(column_type = "Text", nullable)]
    pub comments: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inventory::Entity",
        from = "Column::InventoryId",
        to = "super::inventory::Column::Id"
    )]
    Inventory,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::Location",
        to = "super::location::Column::Id"
    )]
    Location,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ManagedBy",
        to = "super::user::Column::Id"
    )]
    ManagedBy,
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ManagedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
