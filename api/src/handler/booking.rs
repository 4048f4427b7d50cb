use axum::{extract::State, http::StatusCode, Json};
use kernel::model::booking::{event::CreateBooking, stay::StayRange};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::booking::{
        AvailabilityResponse, BookingsResponse, CheckAvailabilityRequest, CreateBookingRequest,
        CreatedBookingResponse, DashboardResponse,
    },
};

/// 空き確認。認証不要で、その時点のスナップショットに対する判定を返す。
/// 確約が必要なら予約作成を呼ぶこと（こちらはトランザクション内で再検査する）。
pub async fn check_availability(
    State(registry): State<AppRegistry>,
    Json(req): Json<CheckAvailabilityRequest>,
) -> AppResult<Json<AvailabilityResponse>> {
    let requested = StayRange::new(req.check_in, req.check_out)?;

    // 客室の存在確認は空き判定の前に行う
    if registry
        .room_repository()
        .find_by_id(req.room_id)
        .await?
        .is_none()
    {
        return Err(AppError::EntityNotFound(format!(
            "客室（{}）が見つかりませんでした",
            req.room_id
        )));
    }

    let stays = registry
        .booking_repository()
        .find_confirmed_stays_by_room_id(req.room_id)
        .await?;
    let conflict = stays.iter().any(|existing| existing.overlaps(&requested));

    let res = if conflict {
        AvailabilityResponse {
            available: false,
            message: "指定の期間には既に予約が入っています".into(),
        }
    } else {
        AvailabilityResponse {
            available: true,
            message: "指定の期間は空室です".into(),
        }
    };
    Ok(Json(res))
}

pub async fn create_booking(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<CreatedBookingResponse>)> {
    req.validate_guest_count()?;
    let stay = StayRange::new(req.check_in, req.check_out)?;

    let event = CreateBooking::new(req.room_id, user.id(), stay, req.guest_count);
    let created = registry.booking_repository().create(event).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

pub async fn show_my_bookings(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    registry
        .booking_repository()
        .find_by_user_id(user.id())
        .await
        .map(BookingsResponse::from)
        .map(Json)
}

pub async fn owner_dashboard(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<DashboardResponse>> {
    if !user.is_hotel_owner() {
        return Err(AppError::ForbiddenOperation);
    }

    registry
        .booking_repository()
        .owner_summary(user.id())
        .await
        .map(DashboardResponse::from)
        .map(Json)
}
