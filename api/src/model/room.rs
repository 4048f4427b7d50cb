use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{RoomId, UserId},
    room::{
        event::{CreateRoom, UpdateRoom},
        Room,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub description: String,
    #[garde(range(min = 0))]
    pub price_per_night: i64,
    #[garde(length(min = 1))]
    pub hotel_name: String,
    #[garde(skip)]
    pub address: String,
    #[garde(length(min = 1))]
    pub city: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
    #[garde(skip)]
    #[serde(default)]
    pub amenities: Vec<String>,
    // 画像はアップロード済みの URL を受け取る。アップロード自体は外部ストレージの責務
    #[garde(length(min = 1))]
    pub image_url: String,
}

impl From<CreateRoomRequest> for CreateRoom {
    fn from(value: CreateRoomRequest) -> Self {
        let CreateRoomRequest {
            name,
            description,
            price_per_night,
            hotel_name,
            address,
            city,
            capacity,
            amenities,
            image_url,
        } = value;
        CreateRoom {
            name,
            description,
            price_per_night,
            hotel_name,
            address,
            city,
            capacity,
            amenities,
            image_url,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    #[garde(inner(length(min = 1)))]
    pub name: Option<String>,
    #[garde(skip)]
    pub description: Option<String>,
    #[garde(inner(range(min = 0)))]
    pub price_per_night: Option<i64>,
    #[garde(inner(length(min = 1)))]
    pub hotel_name: Option<String>,
    #[garde(skip)]
    pub address: Option<String>,
    #[garde(inner(length(min = 1)))]
    pub city: Option<String>,
    #[garde(inner(range(min = 1)))]
    pub capacity: Option<i32>,
    #[garde(skip)]
    pub amenities: Option<Vec<String>>,
    #[garde(inner(length(min = 1)))]
    pub image_url: Option<String>,
}

#[derive(new)]
pub struct UpdateRoomRequestWithIds(RoomId, UserId, UpdateRoomRequest);

impl From<UpdateRoomRequestWithIds> for UpdateRoom {
    fn from(value: UpdateRoomRequestWithIds) -> Self {
        let UpdateRoomRequestWithIds(
            room_id,
            requested_user,
            UpdateRoomRequest {
                name,
                description,
                price_per_night,
                hotel_name,
                address,
                city,
                capacity,
                amenities,
                image_url,
            },
        ) = value;
        UpdateRoom {
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
            requested_user,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
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
    pub owner_id: UserId,
    pub owner_name: String,
}

impl From<Room> for RoomResponse {
    fn from(value: Room) -> Self {
        let Room {
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
            owner,
        } = value;
        Self {
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
            owner_id: owner.owner_id,
            owner_name: owner.owner_name,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsResponse {
    pub items: Vec<RoomResponse>,
}

impl From<Vec<Room>> for RoomsResponse {
    fn from(value: Vec<Room>) -> Self {
        Self {
            items: value.into_iter().map(RoomResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedRoomResponse {
    pub room_id: RoomId,
}
