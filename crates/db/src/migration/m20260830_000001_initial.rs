//! Initial database migration.
//!
//! Creates the marketplace schema: enums, tables, the booking overlap
//! exclusion constraint, and `updated_at` triggers.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        // ============================================================
        // PART 1: EXTENSIONS & ENUMS
        // ============================================================
        db.execute_unprepared(EXTENSIONS_SQL).await?;
        db.execute_unprepared(ENUMS_SQL).await?;

        // ============================================================
        // PART 2: USERS & WALLET
        // ============================================================
        db.execute_unprepared(USERS_SQL).await?;
        db.execute_unprepared(WALLETS_SQL).await?;
        db.execute_unprepared(TRANSACTIONS_SQL).await?;

        // ============================================================
        // PART 3: LISTINGS & BOOKINGS
        // ============================================================
        db.execute_unprepared(LISTINGS_SQL).await?;
        db.execute_unprepared(BOOKINGS_SQL).await?;

        // ============================================================
        // PART 4: FEEDBACK LOOP
        // ============================================================
        db.execute_unprepared(NOTIFICATIONS_SQL).await?;
        db.execute_unprepared(REVIEWS_SQL).await?;
        db.execute_unprepared(WISHLISTS_SQL).await?;
        db.execute_unprepared(CUSTOMER_QUERIES_SQL).await?;

        // ============================================================
        // PART 5: TRIGGERS
        // ============================================================
        db.execute_unprepared(TRIGGERS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

/// btree_gist lets the bookings exclusion constraint mix `=` on uuid with
/// `&&` on daterange.
const EXTENSIONS_SQL: &str = r"
CREATE EXTENSION IF NOT EXISTS btree_gist;
";

const ENUMS_SQL: &str = r"
-- Transaction-log entry kinds
CREATE TYPE transaction_kind AS ENUM (
    'top-up',
    'withdrawal',
    'earning',
    'payment'
);

-- Parking spot types
CREATE TYPE parking_type AS ENUM (
    'indoor',
    'outdoor'
);
";

const USERS_SQL: &str = r"
CREATE TABLE users (
    id UUID PRIMARY KEY,
    first_name VARCHAR(100) NOT NULL,
    last_name VARCHAR(100) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    reset_token_hash VARCHAR(64),
    reset_token_expires_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_users_reset_token ON users (reset_token_hash)
    WHERE reset_token_hash IS NOT NULL;
";

const WALLETS_SQL: &str = r"
CREATE TABLE wallets (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
    balance NUMERIC(19, 2) NOT NULL DEFAULT 0 CHECK (balance >= 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const TRANSACTIONS_SQL: &str = r"
CREATE TABLE transactions (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    amount NUMERIC(19, 2) NOT NULL CHECK (amount > 0),
    kind transaction_kind NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_transactions_user_created ON transactions (user_id, created_at DESC);
";

const LISTINGS_SQL: &str = r"
CREATE TABLE listings (
    id UUID PRIMARY KEY,
    owner_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name VARCHAR(255) NOT NULL,
    street_address VARCHAR(255) NOT NULL,
    country VARCHAR(100) NOT NULL,
    city VARCHAR(100) NOT NULL,
    postal_code VARCHAR(20) NOT NULL,
    description TEXT NOT NULL,
    daily_rate NUMERIC(19, 2) NOT NULL CHECK (daily_rate > 0),
    latitude NUMERIC(9, 6) NOT NULL,
    longitude NUMERIC(9, 6) NOT NULL,
    parking_type parking_type NOT NULL,
    image_data TEXT NOT NULL,
    image_content_type VARCHAR(100) NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_listings_owner ON listings (owner_id);
CREATE INDEX idx_listings_location ON listings (latitude, longitude);
";

const BOOKINGS_SQL: &str = r"
CREATE TABLE bookings (
    id UUID PRIMARY KEY,
    listing_id UUID NOT NULL REFERENCES listings(id) ON DELETE CASCADE,
    seeker_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    vehicle_type VARCHAR(100) NOT NULL,
    special_requests TEXT,
    price NUMERIC(19, 2) NOT NULL CHECK (price > 0),
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    CHECK (start_date <= end_date),

    -- Closed-interval overlap guard: no two bookings for the same listing
    -- may share a calendar day. Backstops the orchestrated availability
    -- check against concurrent writers.
    CONSTRAINT bookings_no_overlap EXCLUDE USING gist (
        listing_id WITH =,
        daterange(start_date, end_date, '[]') WITH &&
    )
);

CREATE INDEX idx_bookings_seeker ON bookings (seeker_id);
CREATE INDEX idx_bookings_listing ON bookings (listing_id);
";

const NOTIFICATIONS_SQL: &str = r#"
CREATE TABLE notifications (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    message TEXT NOT NULL,
    "read" BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX idx_notifications_user ON notifications (user_id, created_at DESC);
"#;

const REVIEWS_SQL: &str = r"
CREATE TABLE reviews (
    id UUID PRIMARY KEY,
    listing_id UUID NOT NULL REFERENCES listings(id) ON DELETE CASCADE,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    description TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    UNIQUE (listing_id, user_id)
);

CREATE INDEX idx_reviews_listing ON reviews (listing_id);
";

const WISHLISTS_SQL: &str = r"
CREATE TABLE wishlists (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    listing_id UUID NOT NULL REFERENCES listings(id) ON DELETE CASCADE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),

    UNIQUE (user_id, listing_id)
);
";

const CUSTOMER_QUERIES_SQL: &str = r"
CREATE TABLE customer_queries (
    id UUID PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL,
    message TEXT NOT NULL,
    is_complete BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
";

const TRIGGERS_SQL: &str = r"
CREATE OR REPLACE FUNCTION set_updated_at()
RETURNS TRIGGER AS $$
BEGIN
    NEW.updated_at = NOW();
    RETURN NEW;
END;
$$ LANGUAGE plpgsql;

CREATE TRIGGER users_set_updated_at
    BEFORE UPDATE ON users
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER wallets_set_updated_at
    BEFORE UPDATE ON wallets
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER listings_set_updated_at
    BEFORE UPDATE ON listings
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();

CREATE TRIGGER bookings_set_updated_at
    BEFORE UPDATE ON bookings
    FOR EACH ROW EXECUTE FUNCTION set_updated_at();
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS customer_queries;
DROP TABLE IF EXISTS wishlists;
DROP TABLE IF EXISTS reviews;
DROP TABLE IF EXISTS notifications;
DROP TABLE IF EXISTS bookings;
DROP TABLE IF EXISTS listings;
DROP TABLE IF EXISTS transactions;
DROP TABLE IF EXISTS wallets;
DROP TABLE IF EXISTS users;
DROP TYPE IF EXISTS parking_type;
DROP TYPE IF EXISTS transaction_kind;
DROP FUNCTION IF EXISTS set_updated_at();
";
