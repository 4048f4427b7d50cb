use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    booking::{
        stay::StayRange, Booking, BookingRoom, BookingStatus, OwnerSummary, PaymentStatus,
        RecentBooking,
    },
    id::{BookingId, RoomId, UserId},
};
use shared::error::{AppError, AppResult};

fn parse_payment_status(s: &str) -> AppResult<PaymentStatus> {
    PaymentStatus::from_str(s)
        .map_err(|e| AppError::ConversionEntityError(format!("不明な決済状態です: {e}")))
}

fn parse_booking_status(s: &str) -> AppResult<BookingStatus> {
    BookingStatus::from_str(s)
        .map_err(|e| AppError::ConversionEntityError(format!("不明な予約状態です: {e}")))
}

// 予約一覧を客室情報付きで取得する際に使う型
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub total_price: i64,
    pub payment_status: String,
    pub booking_status: String,
    pub created_at: DateTime<Utc>,
    pub room_name: String,
    pub hotel_name: String,
    pub city: String,
    pub image_url: String,
    pub price_per_night: i64,
}

impl BookingRow {
    pub fn into_booking(self) -> AppResult<Booking> {
        let BookingRow {
            booking_id,
            user_id,
            room_id,
            check_in,
            check_out,
            guest_count,
            total_price,
            payment_status,
            booking_status,
            created_at,
            room_name,
            hotel_name,
            city,
            image_url,
            price_per_night,
        } = self;
        Ok(Booking {
            booking_id,
            booked_by: user_id,
            stay: StayRange::new(check_in, check_out)?,
            guest_count,
            total_price,
            payment_status: parse_payment_status(&payment_status)?,
            booking_status: parse_booking_status(&booking_status)?,
            created_at,
            room: BookingRoom {
                room_id,
                name: room_name,
                hotel_name,
                city,
                image_url,
                price_per_night,
            },
        })
    }
}

// 空き確認で確定済み予約の期間だけを読むための型
#[derive(sqlx::FromRow)]
pub struct StayRow {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

impl StayRow {
    pub fn into_stay(self) -> AppResult<StayRange> {
        StayRange::new(self.check_in, self.check_out)
    }
}

// ダッシュボードの件数・売上集計用の型
#[derive(sqlx::FromRow)]
pub struct OwnerStatsRow {
    pub total_bookings: i64,
    pub total_revenue: i64,
}

// 直近の予約にゲスト名・客室名を付与した型
#[derive(sqlx::FromRow)]
pub struct RecentBookingRow {
    pub booking_id: BookingId,
    pub guest_name: String,
    pub room_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: i64,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
}

impl RecentBookingRow {
    pub fn into_recent_booking(self) -> AppResult<RecentBooking> {
        let RecentBookingRow {
            booking_id,
            guest_name,
            room_name,
            check_in,
            check_out,
            total_price,
            payment_status,
            created_at,
        } = self;
        Ok(RecentBooking {
            booking_id,
            guest_name,
            room_name,
            stay: StayRange::new(check_in, check_out)?,
            total_price,
            payment_status: parse_payment_status(&payment_status)?,
            created_at,
        })
    }
}

pub fn build_owner_summary(
    stats: OwnerStatsRow,
    recent_rows: Vec<RecentBookingRow>,
) -> AppResult<OwnerSummary> {
    let recent_bookings = recent_rows
        .into_iter()
        .map(RecentBookingRow::into_recent_booking)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(OwnerSummary {
        total_bookings: stats.total_bookings,
        total_revenue: stats.total_revenue,
        recent_bookings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn booking_row_maps_statuses_and_stay() {
        let row = BookingRow {
            booking_id: Uuid::new_v4().into(),
            user_id: Uuid::new_v4().into(),
            room_id: Uuid::new_v4().into(),
            check_in: date("2024-06-01"),
            check_out: date("2024-06-04"),
            guest_count: 2,
            total_price: 6000,
            payment_status: "pending".into(),
            booking_status: "confirmed".into(),
            created_at: Utc::now(),
            room_name: "Deluxe Sea View".into(),
            hotel_name: "Roomin Resort".into(),
            city: "Naha".into(),
            image_url: "https://example.com/room.jpg".into(),
            price_per_night: 2000,
        };
        let booking = row.into_booking().unwrap();
        assert_eq!(booking.payment_status, PaymentStatus::Pending);
        assert_eq!(booking.booking_status, BookingStatus::Confirmed);
        assert_eq!(booking.stay.nights(), 3);
        assert_eq!(booking.total_price, 6000);
    }

    #[test]
    fn corrupt_status_string_is_a_conversion_error() {
        let row = RecentBookingRow {
            booking_id: Uuid::new_v4().into(),
            guest_name: "guest".into(),
            room_name: "room".into(),
            check_in: date("2024-06-01"),
            check_out: date("2024-06-02"),
            total_price: 2000,
            payment_status: "paid".into(),
            created_at: Utc::now(),
        };
        assert!(matches!(
            row.into_recent_booking(),
            Err(AppError::ConversionEntityError(_))
        ));
    }

    #[test]
    fn owner_summary_keeps_pending_revenue() {
        let stats = OwnerStatsRow {
            total_bookings: 3,
            total_revenue: 6000,
        };
        let summary = build_owner_summary(stats, vec![]).unwrap();
        assert_eq!(summary.total_bookings, 3);
        assert_eq!(summary.total_revenue, 6000);
    }
}
