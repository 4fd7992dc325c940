use sea_orm::entity::prelude::*;

/// A purchased batch of equipment that assets are drawn from.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "inventory")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub inventory_type: Option<String>,
    pub manufacturer: Option<String>,
    #[sea_orm(column_name = "model")]
    pub model_name: Option<String>,
    pub serial_number: Option<String>,
    pub vendor: Option<String>,
    pub cost: Option<f64>,
    pub date_purchased: DateTime,
    /// The user who purchased this inventory. Required.
    pub purchased_by: i32,
    pub count: Option<i32>,
    /// Where the inventory is stored. Required.
    pub location: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::PurchasedBy",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::Location",
        to = "super::location::Column::Id"
    )]
    Location,
    #[sea_orm(has_many = "super::asset::Entity")]
    Asset,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
