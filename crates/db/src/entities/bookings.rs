//! `SeaORM` Entity for the bookings table.
//!
//! `[start_date, end_date]` is a CLOSED interval; a GiST exclusion
//! constraint in the schema guarantees no two bookings for the same listing
//! ever overlap, backstopping the orchestrated availability check.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub listing_id: Uuid,
    pub seeker_id: Uuid,
    pub start_date: Date,
    pub end_date: Date,
    pub vehicle_type: String,
    pub special_requests: Option<String>,
    pub price: Decimal,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::listings::Entity",
        from = "Column::ListingId",
        to = "super::listings::Column::Id"
    )]
    Listings,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SeekerId",
        to = "super::users::Column::Id"
    )]
    Users,
}

impl Related<super::listings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listings.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
