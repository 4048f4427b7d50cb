use crate::model::{id::UserId, role::Role};
pub mod event;

#[derive(Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: Role,
    pub image_url: String,
}

impl User {
    pub fn is_hotel_owner(&self) -> bool {
        self.role == Role::HotelOwner
    }
}

#[derive(Debug)]
pub struct RoomOwner {
    pub owner_id: UserId,
    pub owner_name: String,
}
