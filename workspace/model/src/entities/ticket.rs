use sea_orm::entity::prelude::*;

/// A work item opened by a user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "tickets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub ticket_type: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub opened_by: i32,
    pub opened_at: DateTime,
    pub updated_at: DateTime,
    pub due_date: DateTime,
    /// Loose user id, no foreign key.
    pub updated_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ticket_type::Entity",
        from = "Column::TicketType",
        to = "super::ticket_type::Column::Id"
    )]
    TicketType,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OpenedBy",
        to = "super::user::Column::Id"
    )]
    OpenedBy,
}

impl Related<super::ticket_type::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TicketType.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OpenedBy.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
