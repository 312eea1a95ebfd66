//! Listing repository for parking-spot CRUD.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    ModelTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::{listings, sea_orm_active_enums::ParkingType, users};

/// Input for creating a listing.
#[derive(Debug, Clone)]
pub struct CreateListingInput {
    /// Owning user.
    pub owner_id: Uuid,
    /// Display name.
    pub name: String,
    /// Street address.
    pub street_address: String,
    /// Country.
    pub country: String,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Free-text description.
    pub description: String,
    /// Price per day.
    pub daily_rate: Decimal,
    /// Latitude coordinate.
    pub latitude: Decimal,
    /// Longitude coordinate.
    pub longitude: Decimal,
    /// Indoor or outdoor.
    pub parking_type: ParkingType,
    /// Base64-encoded image payload.
    pub image_data: String,
    /// MIME type of the image.
    pub image_content_type: String,
}

/// Optional fields for a partial listing update.
#[derive(Debug, Clone, Default)]
pub struct UpdateListingInput {
    /// New display name.
    pub name: Option<String>,
    /// New street address.
    pub street_address: Option<String>,
    /// New country.
    pub country: Option<String>,
    /// New city.
    pub city: Option<String>,
    /// New postal code.
    pub postal_code: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New daily rate.
    pub daily_rate: Option<Decimal>,
    /// New latitude.
    pub latitude: Option<Decimal>,
    /// New longitude.
    pub longitude: Option<Decimal>,
    /// New parking type.
    pub parking_type: Option<ParkingType>,
    /// New image payload with its MIME type.
    pub image: Option<(String, String)>,
}

/// A listing joined with its owner's display name.
#[derive(Debug, Clone)]
pub struct ListingWithOwner {
    /// The listing.
    pub listing: listings::Model,
    /// Owner's first name.
    pub owner_first_name: String,
    /// Owner's last name.
    pub owner_last_name: String,
}

/// Listing repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct ListingRepository {
    db: DatabaseConnection,
}

impl ListingRepository {
    /// Creates a new listing repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateListingInput) -> Result<listings::Model, DbErr> {
        let now = Utc::now().into();
        let listing = listings::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_id: Set(input.owner_id),
            name: Set(input.name),
            street_address: Set(input.street_address),
            country: Set(input.country),
            city: Set(input.city),
            postal_code: Set(input.postal_code),
            description: Set(input.description),
            daily_rate: Set(input.daily_rate),
            latitude: Set(input.latitude),
            longitude: Set(input.longitude),
            parking_type: Set(input.parking_type),
            image_data: Set(input.image_data),
            image_content_type: Set(input.image_content_type),
            created_at: Set(now),
            updated_at: Set(now),
        };

        listing.insert(&self.db).await
    }

    /// Finds a listing by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<listings::Model>, DbErr> {
        listings::Entity::find_by_id(id).one(&self.db).await
    }

    /// Lists all listings owned by a user, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<listings::Model>, DbErr> {
        listings::Entity::find()
            .filter(listings::Column::OwnerId.eq(owner_id))
            .order_by_desc(listings::Column::CreatedAt)
            .all(&self.db)
            .await
    }

    /// Lists every listing with its owner's name, for the public explore
    /// view.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_all_with_owner(&self) -> Result<Vec<ListingWithOwner>, DbErr> {
        let rows = listings::Entity::find()
            .find_also_related(users::Entity)
            .order_by_desc(listings::Column::CreatedAt)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(listing, owner)| {
                owner.map(|o| ListingWithOwner {
                    listing,
                    owner_first_name: o.first_name,
                    owner_last_name: o.last_name,
                })
            })
            .collect())
    }

    /// Applies a partial update, touching only the provided fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update(
        &self,
        listing: listings::Model,
        input: UpdateListingInput,
    ) -> Result<listings::Model, DbErr> {
        let mut active = listing.into_active_model();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(street_address) = input.street_address {
            active.street_address = Set(street_address);
        }
        if let Some(country) = input.country {
            active.country = Set(country);
        }
        if let Some(city) = input.city {
            active.city = Set(city);
        }
        if let Some(postal_code) = input.postal_code {
            active.postal_code = Set(postal_code);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(daily_rate) = input.daily_rate {
            active.daily_rate = Set(daily_rate);
        }
        if let Some(latitude) = input.latitude {
            active.latitude = Set(latitude);
        }
        if let Some(longitude) = input.longitude {
            active.longitude = Set(longitude);
        }
        if let Some(parking_type) = input.parking_type {
            active.parking_type = Set(parking_type);
        }
        if let Some((data, content_type)) = input.image {
            active.image_data = Set(data);
            active.image_content_type = Set(content_type);
        }
        active.updated_at = Set(Utc::now().into());
        active.update(&self.db).await
    }

    /// Deletes a listing. Bookings, reviews, and wishlist rows cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub async fn delete(&self, listing: listings::Model) -> Result<(), DbErr> {
        listing.delete(&self.db).await?;
        Ok(())
    }
}
