use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    booking::{
        event::CreateBooking,
        stay::StayRange,
        Booking, CreatedBooking, OwnerSummary,
    },
    id::{RoomId, UserId},
};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    // 空き確認と予約作成を単一のトランザクションで行う（reserve-if-available）。
    // 期間が重なる確定済み予約が存在する場合は RoomUnavailable を返す
    async fn create(&self, event: CreateBooking) -> AppResult<CreatedBooking>;
    // 指定客室の確定済み予約の宿泊期間一覧を取得する（空き確認用の読み取り）
    async fn find_confirmed_stays_by_room_id(&self, room_id: RoomId) -> AppResult<Vec<StayRange>>;
    // ユーザー ID に紐づく予約一覧を客室情報付きで取得する
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>>;
    // オーナーの全客室に対する予約の件数・売上・直近 5 件を集計する
    async fn owner_summary(&self, owner_id: UserId) -> AppResult<OwnerSummary>;
}
