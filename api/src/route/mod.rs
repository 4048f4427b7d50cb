pub mod auth;
pub mod booking;
pub mod health;
pub mod room;
pub mod user;
pub mod v1;
