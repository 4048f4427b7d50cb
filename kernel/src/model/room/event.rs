use crate::model::id::{RoomId, UserId};

pub struct CreateRoom {
    pub name: String,
    pub description: String,
    pub price_per_night: i64,
    pub hotel_name: String,
    pub address: String,
    pub city: String,
    pub capacity: i32,
    pub amenities: Vec<String>,
    pub image_url: String,
}

#[derive(Debug)]
pub struct UpdateRoom {
    pub room_id: RoomId,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_per_night: Option<i64>,
    pub hotel_name: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<i32>,
    pub amenities: Option<Vec<String>>,
    pub image_url: Option<String>,
    // 所有者本人からの操作であることを必ず検査する
    pub requested_user: UserId,
}

#[derive(Debug)]
pub struct DeleteRoom {
    pub room_id: RoomId,
    pub requested_user: UserId,
}
