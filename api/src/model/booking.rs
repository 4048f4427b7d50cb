use chrono::{DateTime, NaiveDate, Utc};
use kernel::model::{
    booking::{
        Booking, BookingRoom, BookingStatus, CreatedBooking, OwnerSummary, PaymentStatus,
        RecentBooking,
    },
    id::{BookingId, RoomId, UserId},
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};

// 決済・予約状態のワイヤ表現。DB の小文字表記とは別に、
// クライアントへは先頭大文字で返す
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentStatusName {
    Pending,
    Completed,
}

impl From<PaymentStatus> for PaymentStatusName {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Pending => Self::Pending,
            PaymentStatus::Completed => Self::Completed,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum BookingStatusName {
    Confirmed,
    Cancelled,
}

impl From<BookingStatus> for BookingStatusName {
    fn from(value: BookingStatus) -> Self {
        match value {
            BookingStatus::Confirmed => Self::Confirmed,
            BookingStatus::Cancelled => Self::Cancelled,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckAvailabilityRequest {
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub available: bool,
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub room_id: RoomId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
}

impl CreateBookingRequest {
    // 定員との比較はリポジトリ側で行う。ここでは人数が正であることだけを見る
    pub fn validate_guest_count(&self) -> AppResult<()> {
        if self.guest_count < 1 {
            return Err(AppError::InvalidGuestCount(format!(
                "宿泊人数（{}）は 1 以上である必要があります",
                self.guest_count
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedBookingResponse {
    pub booking_id: BookingId,
    pub total_price: i64,
}

impl From<CreatedBooking> for CreatedBookingResponse {
    fn from(value: CreatedBooking) -> Self {
        let CreatedBooking {
            booking_id,
            total_price,
        } = value;
        Self {
            booking_id,
            total_price,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub booking_id: BookingId,
    pub booked_by: UserId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guest_count: i32,
    pub total_price: i64,
    pub payment_status: PaymentStatusName,
    pub booking_status: BookingStatusName,
    pub created_at: DateTime<Utc>,
    pub room: BookingRoomResponse,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            booking_id,
            booked_by,
            stay,
            guest_count,
            total_price,
            payment_status,
            booking_status,
            created_at,
            room,
        } = value;
        Self {
            booking_id,
            booked_by,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            guest_count,
            total_price,
            payment_status: payment_status.into(),
            booking_status: booking_status.into(),
            created_at,
            room: room.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRoomResponse {
    pub room_id: RoomId,
    pub name: String,
    pub hotel_name: String,
    pub city: String,
    pub image_url: String,
    pub price_per_night: i64,
}

impl From<BookingRoom> for BookingRoomResponse {
    fn from(value: BookingRoom) -> Self {
        let BookingRoom {
            room_id,
            name,
            hotel_name,
            city,
            image_url,
            price_per_night,
        } = value;
        Self {
            room_id,
            name,
            hotel_name,
            city,
            image_url,
            price_per_night,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_bookings: i64,
    pub total_revenue: i64,
    pub recent_bookings: Vec<RecentBookingResponse>,
}

impl From<OwnerSummary> for DashboardResponse {
    fn from(value: OwnerSummary) -> Self {
        let OwnerSummary {
            total_bookings,
            total_revenue,
            recent_bookings,
        } = value;
        Self {
            total_bookings,
            total_revenue,
            recent_bookings: recent_bookings
                .into_iter()
                .map(RecentBookingResponse::from)
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentBookingResponse {
    pub booking_id: BookingId,
    pub guest_name: String,
    pub room_name: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub total_price: i64,
    pub payment_status: PaymentStatusName,
    pub created_at: DateTime<Utc>,
}

impl From<RecentBooking> for RecentBookingResponse {
    fn from(value: RecentBooking) -> Self {
        let RecentBooking {
            booking_id,
            guest_name,
            room_name,
            stay,
            total_price,
            payment_status,
            created_at,
        } = value;
        Self {
            booking_id,
            guest_name,
            room_name,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
            total_price,
            payment_status: payment_status.into(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::booking::stay::StayRange;
    use uuid::Uuid;

    #[test]
    fn zero_guests_is_an_invalid_guest_count() {
        let req = CreateBookingRequest {
            room_id: Uuid::new_v4().into(),
            check_in: "2024-06-01".parse().unwrap(),
            check_out: "2024-06-04".parse().unwrap(),
            guest_count: 0,
        };
        assert!(matches!(
            req.validate_guest_count(),
            Err(AppError::InvalidGuestCount(_))
        ));
    }

    #[test]
    fn positive_guest_count_passes() {
        let req = CreateBookingRequest {
            room_id: Uuid::new_v4().into(),
            check_in: "2024-06-01".parse().unwrap(),
            check_out: "2024-06-04".parse().unwrap(),
            guest_count: 2,
        };
        assert!(req.validate_guest_count().is_ok());
    }

    #[test]
    fn statuses_serialize_capitalized() {
        assert_eq!(
            serde_json::to_string(&PaymentStatusName::Pending).unwrap(),
            r#""Pending""#
        );
        assert_eq!(
            serde_json::to_string(&BookingStatusName::Confirmed).unwrap(),
            r#""Confirmed""#
        );
    }

    #[test]
    fn booking_response_uses_camel_case_and_flattened_dates() {
        let stay = StayRange::new(
            "2024-06-01".parse().unwrap(),
            "2024-06-04".parse().unwrap(),
        )
        .unwrap();
        let booking = Booking {
            booking_id: Uuid::new_v4().into(),
            booked_by: Uuid::new_v4().into(),
            stay,
            guest_count: 2,
            total_price: 6000,
            payment_status: PaymentStatus::Pending,
            booking_status: BookingStatus::Confirmed,
            created_at: Utc::now(),
            room: BookingRoom {
                room_id: Uuid::new_v4().into(),
                name: "Deluxe Sea View".into(),
                hotel_name: "Roomin Resort".into(),
                city: "Naha".into(),
                image_url: "https://example.com/room.jpg".into(),
                price_per_night: 2000,
            },
        };
        let json = serde_json::to_value(BookingResponse::from(booking)).unwrap();
        assert_eq!(json["checkIn"], "2024-06-01");
        assert_eq!(json["checkOut"], "2024-06-04");
        assert_eq!(json["totalPrice"], 6000);
        assert_eq!(json["paymentStatus"], "Pending");
        assert_eq!(json["bookingStatus"], "Confirmed");
        assert_eq!(json["room"]["hotelName"], "Roomin Resort");
    }
}
