pub mod event;
pub mod stay;

use chrono::{DateTime, Utc};
use strum::{AsRefStr, EnumString};

use crate::model::id::{BookingId, RoomId, UserId};
use stay::StayRange;

/// 決済状態。決済ゲートウェイは未接続のため、Completed へ遷移する経路は
/// リポジトリ外部（手動オペレーション）にしか存在しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
pub enum PaymentStatus {
    #[strum(serialize = "pending")]
    Pending,
    #[strum(serialize = "completed")]
    Completed,
}

/// 予約状態。キャンセル API は提供していないが、状態自体はモデルに持つ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
pub enum BookingStatus {
    #[strum(serialize = "confirmed")]
    Confirmed,
    #[strum(serialize = "cancelled")]
    Cancelled,
}

#[derive(Debug)]
pub struct Booking {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub stay: StayRange,
    pub guest_count: i32,
    // 予約作成時点の宿泊数 × 一泊料金で確定し、以後再計算しない
    pub total_price: i64,
    pub payment_status: PaymentStatus,
    pub booking_status: BookingStatus,
    pub created_at: DateTime<Utc>,
    pub room: BookingRoom,
}

#[derive(Debug)]
pub struct BookingRoom {
    pub room_id: RoomId,
    pub name: String,
    pub hotel_name: String,
    pub city: String,
    pub image_url: String,
    pub price_per_night: i64,
}

/// 予約作成の戻り値。ID と確定金額だけを返す。
#[derive(Debug)]
pub struct CreatedBooking {
    pub booking_id: BookingId,
    pub total_price: i64,
}

/// オーナーダッシュボード用の集計結果。
/// 売上は決済状態に関わらず全予約の total_price を合算する。
#[derive(Debug)]
pub struct OwnerSummary {
    pub total_bookings: i64,
    pub total_revenue: i64,
    pub recent_bookings: Vec<RecentBooking>,
}

#[derive(Debug)]
pub struct RecentBooking {
    pub booking_id: BookingId,
    pub guest_name: String,
    pub room_name: String,
    pub stay: StayRange,
    pub total_price: i64,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_round_trip_through_db_strings() {
        assert_eq!(
            "pending".parse::<PaymentStatus>().unwrap(),
            PaymentStatus::Pending
        );
        assert_eq!(PaymentStatus::Completed.as_ref(), "completed");
        assert_eq!(
            "confirmed".parse::<BookingStatus>().unwrap(),
            BookingStatus::Confirmed
        );
        assert_eq!(BookingStatus::Cancelled.as_ref(), "cancelled");
    }
}
