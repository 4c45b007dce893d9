//! Axum router: maps all URL paths to handlers.

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    accounts::{login_admin, login_user, register_admin, register_user},
    bookings::{
        add_booking, delete_booking, list_businesses_with_bookings, update_booking, update_payment,
        update_status,
    },
    business::{create_business, get_business},
    dashboard::user_bookings,
    earnings::last_10_days,
    orders::{create_order, verify_payment},
    otp::{send_admin_otp, send_user_otp, verify_admin_otp, verify_user_otp},
    reviews::{create_review, list_reviews},
    root::{health, root},
    services::{create_service, list_services},
};
use crate::state::{AppState, SharedState};

/// Browser origins allowed to call the API with credentials. An empty list
/// allows any origin without credentials.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::permissive();
    }
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

/// Build and return the full Axum router.
pub fn build_router(state: AppState, cors_origins: &[String]) -> Router {
    let shared: SharedState = Arc::new(state);

    let accounts = Router::new()
        .route("/user/register",  post(register_user))
        .route("/user/login",     post(login_user))
        .route("/admin/register", post(register_admin))
        .route("/admin/login",    post(login_admin))
        .route("/usdashboard/bookings", get(user_bookings));

    let catalogue = Router::new()
        .route("/business",               post(create_business))
        .route("/business/{id}",          get(get_business))
        .route("/services/{businessId}",  get(list_services).post(create_service))
        .route("/reviews/{businessId}",   get(list_reviews).post(create_review));

    let booking = Router::new()
        .route("/addbooking/{businessId}/{serviceId}", post(add_booking))
        .route("/updateStatus",          post(update_status))
        .route("/updatePayment",         put(update_payment))
        .route("/getBooking",            get(list_businesses_with_bookings))
        .route("/update-booking/{id}",   post(update_booking))
        .route("/delete-booking/{id}",   post(delete_booking))
        .route("/getBookingLast10Days",  get(last_10_days));

    let otp = Router::new()
        .route("/sendOtp",      post(send_user_otp))
        .route("/verify",       post(verify_user_otp))
        .route("/sendOtpAdmin", post(send_admin_otp))
        .route("/verifyAdmin",  post(verify_admin_otp));

    Router::new()
        .route("/",       get(root))
        .route("/health", get(health))
        .route("/orders",        post(create_order))
        .route("/orders/verify", post(verify_payment))
        .merge(accounts)
        .merge(catalogue)
        .nest("/booking", booking)
        .nest("/otp", otp)

        // Middleware
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
