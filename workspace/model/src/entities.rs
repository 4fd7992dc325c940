//! SeaORM entities for the asset tracker.
//!
//! Relations are declared statically: every foreign key has a `belongs_to`
//! on the owning side and a matching `has_many` plus `Related` impl on the
//! referenced side. Columns that hold user ids without a foreign key
//! (`assigned_to`, `certified_by`, `updated_by`) are plain `Option<i32>`.

pub mod asset;
pub mod inventory;
pub mod location;
pub mod ticket;
pub mod ticket_type;
pub mod user;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::asset::Entity as Asset;
    pub use super::inventory::Entity as Inventory;
    pub use super::location::Entity as Location;
    pub use super::ticket::Entity as Ticket;
    pub use super::ticket_type::Entity as TicketType;
    pub use super::user::Entity as User;
}
