use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{id::RoomId, room::event::DeleteRoom};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::room::{
        CreateRoomRequest, CreatedRoomResponse, RoomResponse, RoomsResponse, UpdateRoomRequest,
        UpdateRoomRequestWithIds,
    },
};

// 客室の登録・更新・削除はホテルオーナーのみに許可する
fn ensure_hotel_owner(user: &AuthorizedUser) -> AppResult<()> {
    if !user.is_hotel_owner() {
        return Err(AppError::ForbiddenOperation);
    }
    Ok(())
}

pub async fn register_room(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateRoomRequest>,
) -> AppResult<(StatusCode, Json<CreatedRoomResponse>)> {
    ensure_hotel_owner(&user)?;
    req.validate(&())?;

    registry
        .room_repository()
        .create(req.into(), user.id())
        .await
        .map(|room_id| (StatusCode::CREATED, Json(CreatedRoomResponse { room_id })))
}

pub async fn show_room_list(
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomsResponse>> {
    registry
        .room_repository()
        .find_all()
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn show_room(
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomResponse>> {
    registry
        .room_repository()
        .find_by_id(room_id)
        .await
        .and_then(|room| match room {
            Some(room) => Ok(Json(room.into())),
            None => Err(AppError::EntityNotFound(format!(
                "客室（{room_id}）が見つかりませんでした"
            ))),
        })
}

pub async fn show_my_rooms(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<RoomsResponse>> {
    ensure_hotel_owner(&user)?;

    registry
        .room_repository()
        .find_by_owner_id(user.id())
        .await
        .map(RoomsResponse::from)
        .map(Json)
}

pub async fn update_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateRoomRequest>,
) -> AppResult<StatusCode> {
    ensure_hotel_owner(&user)?;
    req.validate(&())?;

    let update_room = UpdateRoomRequestWithIds::new(room_id, user.id(), req);
    registry
        .room_repository()
        .update(update_room.into())
        .await
        .map(|_| StatusCode::OK)
}

pub async fn delete_room(
    user: AuthorizedUser,
    Path(room_id): Path<RoomId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    ensure_hotel_owner(&user)?;

    let delete_room = DeleteRoom {
        room_id,
        requested_user: user.id(),
    };
    registry
        .room_repository()
        .delete(delete_room)
        .await
        .map(|_| StatusCode::OK)
}
