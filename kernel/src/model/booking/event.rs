use derive_new::new;

use crate::model::booking::stay::StayRange;
use crate::model::id::{RoomId, UserId};

#[derive(new)]
pub struct CreateBooking {
    pub room_id: RoomId,
    pub booked_by: UserId,
    pub stay: StayRange,
    pub guest_count: i32,
}
