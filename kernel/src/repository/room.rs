use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    id::{RoomId, UserId},
    room::{
        event::{CreateRoom, DeleteRoom, UpdateRoom},
        Room,
    },
};

#[async_trait]
pub trait RoomRepository: Send + Sync {
    // 客室を登録する
    async fn create(&self, event: CreateRoom, owner_id: UserId) -> AppResult<RoomId>;
    // 公開中の全客室を取得する
    async fn find_all(&self) -> AppResult<Vec<Room>>;
    // 客室 ID から客室を取得する
    async fn find_by_id(&self, room_id: RoomId) -> AppResult<Option<Room>>;
    // オーナー ID に紐づく客室一覧を取得する
    async fn find_by_owner_id(&self, owner_id: UserId) -> AppResult<Vec<Room>>;
    // 客室を更新する。requested_user が所有者でなければ失敗する
    async fn update(&self, event: UpdateRoom) -> AppResult<()>;
    // 客室を削除する。requested_user が所有者でなければ失敗する
    async fn delete(&self, event: DeleteRoom) -> AppResult<()>;
}
