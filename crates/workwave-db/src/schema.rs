//! Table names and DDL.
//!
//! Ids are hyphenated UUID strings and timestamps are fixed-width RFC 3339
//! UTC strings, so `ORDER BY created_at` sorts chronologically.

pub const TABLE_USERS: &str = "users";
pub const TABLE_ADMINS: &str = "admins";
pub const TABLE_BUSINESSES: &str = "businesses";
pub const TABLE_SERVICES: &str = "services";
pub const TABLE_BOOKINGS: &str = "bookings";
pub const TABLE_REVIEWS: &str = "reviews";

/// Statements run by [`crate::Database::initialize`], in dependency order.
pub const CREATE_STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id            TEXT PRIMARY KEY,
        name          TEXT NOT NULL,
        email         TEXT NOT NULL UNIQUE,
        phone         TEXT,
        password_hash TEXT NOT NULL,
        created_at    TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS admins (
        id            TEXT PRIMARY KEY,
        name          TEXT NOT NULL,
        email         TEXT NOT NULL UNIQUE,
        phone         TEXT,
        password_hash TEXT NOT NULL,
        created_at    TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS businesses (
        id            TEXT PRIMARY KEY,
        admin_id      TEXT NOT NULL REFERENCES admins(id),
        business_name TEXT NOT NULL,
        description   TEXT,
        address       TEXT,
        category      TEXT,
        created_at    TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS services (
        id          TEXT PRIMARY KEY,
        business_id TEXT NOT NULL REFERENCES businesses(id),
        name        TEXT NOT NULL,
        description TEXT,
        price       REAL NOT NULL,
        created_at  TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS bookings (
        id             TEXT PRIMARY KEY,
        user_id        TEXT NOT NULL REFERENCES users(id),
        business_id    TEXT NOT NULL REFERENCES businesses(id),
        service_id     TEXT REFERENCES services(id),
        name           TEXT NOT NULL,
        email          TEXT NOT NULL,
        date_of_birth  TEXT,
        mobile_number  TEXT NOT NULL,
        guest_count    INTEGER NOT NULL,
        booking_date   TEXT NOT NULL,
        booking_time   TEXT NOT NULL,
        customer_notes TEXT,
        status         TEXT NOT NULL,
        payment_status TEXT NOT NULL,
        payment_id     TEXT,
        created_at     TEXT NOT NULL,
        updated_at     TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_bookings_business_date ON bookings (business_id, booking_date)",
    "CREATE INDEX IF NOT EXISTS idx_bookings_user ON bookings (user_id)",
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id          TEXT PRIMARY KEY,
        business_id TEXT NOT NULL REFERENCES businesses(id),
        user_id     TEXT NOT NULL REFERENCES users(id),
        rating      INTEGER NOT NULL,
        comment     TEXT,
        created_at  TEXT NOT NULL
    )
    "#,
];
