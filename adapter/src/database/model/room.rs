use kernel::model::{
    id::{RoomId, UserId},
    room::Room,
    user::RoomOwner,
};

#[derive(sqlx::FromRow)]
pub struct RoomRow {
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
    pub owned_by: UserId,
    pub owner_name: String,
}

impl From<RoomRow> for Room {
    fn from(value: RoomRow) -> Self {
        let RoomRow {
            room_id,
            name,
            description,
            price_per_night,
            hotel_name,
            address,
            city,
            capacity,
            amenities,
            image_url,
            owned_by,
            owner_name,
        } = value;
        Room {
            room_id,
            name,
            description,
            price_per_night,
            hotel_name,
            address,
            city,
            capacity,
            amenities,
            image_url,
            owner: RoomOwner {
                owner_id: owned_by,
                owner_name,
            },
        }
    }
}
