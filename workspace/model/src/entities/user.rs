use sea_orm::entity::prelude::*;

/// A person who can log in and manage assets.
///
/// The password is only ever kept as a salted hash; this model intentionally
/// does not implement `Serialize` so the hash cannot leak into templates or JSON.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique, indexed)]
    pub name: String,
    pub password_hash: String,
    pub department: String,
    pub position: String,
    #[sea_orm(default_value = "true")]
    pub active: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Assets managed by this user.
    #[sea_orm(has_many = "super::asset::Entity")]
    Asset,
    /// Tickets opened by this user.
    #[sea_orm(has_many = "super::ticket::Entity")]
    Ticket,
    /// Inventory purchased by this user.
    #[sea_orm(has_many = "super::inventory::Entity")]
    Inventory,
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl Related<super::ticket::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ticket.def()
    }
}

impl Related<super::inventory::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inventory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
