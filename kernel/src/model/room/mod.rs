pub mod event;

use crate::model::{id::RoomId, user::RoomOwner};

#[derive(Debug)]
pub struct Room {
    pub room_id: RoomId,
    pub name: String,
    pub description: String,
    pub price_per_night: i64,
    pub hotel_name: String,
    pub address: String,
    pub city: String,
    pub capacity: i32,
    pub amenities: Vec<String>,
    pub image_url: String,
    pub owner: RoomOwner,
}
