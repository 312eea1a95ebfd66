//! Database seeder for ParkFlex development and testing.
//!
//! Seeds a demo owner with a published listing and a funded demo seeker,
//! enough to exercise the booking flow end to end against a local server.
//!
//! Usage: cargo run --bin seeder

use rust_decimal_macros::dec;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use parkflex_core::auth::hash_password;
use parkflex_db::entities::sea_orm_active_enums::ParkingType;
use parkflex_db::repositories::CreateListingInput;
use parkflex_db::{ListingRepository, UserRepository, WalletRepository};

const OWNER_EMAIL: &str = "owner@parkflex.dev";
const SEEKER_EMAIL: &str = "seeker@parkflex.dev";
const DEMO_PASSWORD: &str = "parkflex-demo";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = parkflex_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo owner...");
    let owner_id = seed_user(&db, "Olive", "Owner", OWNER_EMAIL).await;

    println!("Seeding demo seeker...");
    let seeker_id = seed_user(&db, "Sam", "Seeker", SEEKER_EMAIL).await;

    println!("Funding demo seeker wallet...");
    fund_wallet(&db, seeker_id).await;

    println!("Seeding demo listing...");
    seed_listing(&db, owner_id).await;

    println!("Seeding complete!");
}

/// Creates a user with their wallet, or returns the existing one.
async fn seed_user(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    email: &str,
) -> Uuid {
    let repo = UserRepository::new(db.clone());

    if let Ok(Some(existing)) = repo.find_by_email(email).await {
        println!("  {email} already exists, skipping...");
        return existing.id;
    }

    let password_hash = hash_password(DEMO_PASSWORD).expect("Failed to hash demo password");
    let user = repo
        .create_with_wallet(first_name, last_name, email, &password_hash)
        .await
        .expect("Failed to create demo user");

    println!("  Created {email} (password: {DEMO_PASSWORD})");
    user.id
}

/// Tops up the seeker's wallet so bookings can settle.
async fn fund_wallet(db: &DatabaseConnection, user_id: Uuid) {
    let repo = WalletRepository::new(db.clone());

    match repo.find_by_user(user_id).await {
        Ok(Some(wallet)) if wallet.balance > dec!(0) => {
            println!("  Wallet already funded ({}), skipping...", wallet.balance);
        }
        _ => {
            let wallet = repo
                .top_up(user_id, dec!(500))
                .await
                .expect("Failed to fund demo wallet");
            println!("  Funded wallet to {}", wallet.balance);
        }
    }
}

/// Creates a demo listing unless the owner already has one.
async fn seed_listing(db: &DatabaseConnection, owner_id: Uuid) {
    let repo = ListingRepository::new(db.clone());

    match repo.list_by_owner(owner_id).await {
        Ok(existing) if !existing.is_empty() => {
            println!("  Demo listing already exists, skipping...");
        }
        _ => {
            let listing = repo
                .create(CreateListingInput {
                    owner_id,
                    name: "Harbourfront Covered Spot".to_string(),
                    street_address: "1869 Upper Water St".to_string(),
                    country: "Canada".to_string(),
                    city: "Halifax".to_string(),
                    postal_code: "B3J 1S9".to_string(),
                    description: "Covered spot two blocks from the boardwalk. \
                                  Fits a mid-size SUV."
                        .to_string(),
                    daily_rate: dec!(25),
                    latitude: dec!(44.635631),
                    longitude: dec!(-63.595174),
                    parking_type: ParkingType::Indoor,
                    image_data: String::new(),
                    image_content_type: "image/jpeg".to_string(),
                })
                .await
                .expect("Failed to create demo listing");
            println!("  Created listing {} ({})", listing.name, listing.id);
        }
    }
}
