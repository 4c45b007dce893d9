//! Seed helpers for repository tests.

use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;
use workwave_common::{Admin, Booking, Business, NewBooking, Service, User};

use crate::{AdminRepository, BookingRepository, BusinessRepository, Database, ServiceRepository, UserRepository};

pub async fn user(db: &Arc<Database>, email: &str) -> User {
    let user = User::new("Guest".into(), email.into(), None, "hash".into());
    UserRepository::new(db.clone()).insert(&user).await.unwrap();
    user
}

pub async fn admin(db: &Arc<Database>, email: &str) -> Admin {
    let admin = Admin::new("Owner".into(), email.into(), None, "hash".into());
    AdminRepository::new(db.clone()).insert(&admin).await.unwrap();
    admin
}

pub async fn business(db: &Arc<Database>, admin_id: Uuid, name: &str) -> Business {
    let business = Business {
        id: Uuid::new_v4(),
        admin_id,
        business_name: name.into(),
        description: None,
        address: None,
        category: None,
        created_at: Utc::now(),
    };
    BusinessRepository::new(db.clone()).insert(&business).await.unwrap();
    business
}

pub async fn service(db: &Arc<Database>, business_id: Uuid, name: &str, price: f64) -> Service {
    let service = Service {
        id: Uuid::new_v4(),
        business_id,
        name: name.into(),
        description: None,
        price,
        created_at: Utc::now(),
    };
    ServiceRepository::new(db.clone()).insert(&service).await.unwrap();
    service
}

pub async fn booking(
    db: &Arc<Database>,
    user_id: Uuid,
    business_id: Uuid,
    service_id: Option<Uuid>,
    date: &str,
) -> Booking {
    let new = NewBooking {
        name: "Guest".into(),
        email: "guest@example.com".into(),
        date_of_birth: None,
        mobile_number: "9876543210".into(),
        guest_count: 2,
        booking_date: date.into(),
        booking_time: "10:00".into(),
        customer_notes: None,
    };
    let booking = Booking::create(new, user_id, business_id, service_id);
    BookingRepository::new(db.clone()).insert(&booking).await.unwrap();
    booking
}
