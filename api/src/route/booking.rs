use axum::{
    routing::{get, post},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    check_availability, create_booking, owner_dashboard, show_my_bookings,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let booking_routers = Router::new()
        .route("/", post(create_booking))
        .route("/availability", post(check_availability))
        .route("/mine", get(show_my_bookings))
        .route("/dashboard", get(owner_dashboard));

    Router::new().nest("/bookings", booking_routers)
}
