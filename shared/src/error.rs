use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // 業務エラー。Presentation 層がそのまま表示できるメッセージを持つ。
    #[error("{0}")]
    InvalidStayRange(String),
    #[error("{0}")]
    InvalidGuestCount(String),
    #[error("{0}")]
    RoomUnavailable(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    EntityAlreadyExists(String),
    #[error("{0}")]
    UnprocessableEntity(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    // 認証・認可
    #[error("ログインが必要です")]
    UnauthenticatedError,
    #[error("許可されていない操作です")]
    ForbiddenOperation,
    // インフラ起因のエラー。呼び出し元には詳細を返さない。
    #[error("トランザクションを実行できませんでした")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理の実行中にエラーが発生しました")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("No rows affected: {0}")]
    NoRowsAffectedError(String),
    #[error("{0}")]
    ConversionEntityError(String),
    #[error(transparent)]
    KeyValueStoreError(#[from] redis::RedisError),
    #[error(transparent)]
    BcryptError(#[from] bcrypt::BcryptError),
    #[error(transparent)]
    ConvertToUuidError(#[from] uuid::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            AppError::InvalidStayRange(_)
            | AppError::InvalidGuestCount(_)
            | AppError::ValidationError(_)
            | AppError::ConvertToUuidError(_) => StatusCode::BAD_REQUEST,
            AppError::UnauthenticatedError => StatusCode::UNAUTHORIZED,
            AppError::ForbiddenOperation => StatusCode::FORBIDDEN,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::RoomUnavailable(_) | AppError::EntityAlreadyExists(_) => {
                StatusCode::CONFLICT
            }
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            e @ (AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::NoRowsAffectedError(_)
            | AppError::ConversionEntityError(_)
            | AppError::KeyValueStoreError(_)
            | AppError::BcryptError(_)) => {
                tracing::error!(
                    error.cause_chain = ?e,
                    error.message = %e,
                    "Unexpected error happened"
                );
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // 5xx のときは内部事情をクライアントへ漏らさない
        let message = if status_code.is_server_error() {
            "サーバー内部でエラーが発生しました".to_string()
        } else {
            self.to_string()
        };

        (
            status_code,
            Json(json!({ "success": false, "message": message })),
        )
            .into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn business_errors_map_to_client_statuses() {
        let cases = [
            (
                AppError::InvalidStayRange("bad".into()).into_response(),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::UnauthenticatedError.into_response(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::ForbiddenOperation.into_response(),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::EntityNotFound("missing".into()).into_response(),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::RoomUnavailable("taken".into()).into_response(),
                StatusCode::CONFLICT,
            ),
            (
                AppError::EntityAlreadyExists("dup".into()).into_response(),
                StatusCode::CONFLICT,
            ),
            (
                AppError::UnprocessableEntity("nope".into()).into_response(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];
        for (res, expected) in cases {
            assert_eq!(res.status(), expected);
        }
    }

    #[test]
    fn infra_errors_are_masked_as_internal() {
        let res = AppError::NoRowsAffectedError("no booking created".into()).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
