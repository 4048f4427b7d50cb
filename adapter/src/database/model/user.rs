use std::str::FromStr;

use kernel::model::{id::UserId, role::Role, user::User};
use shared::error::{AppError, AppResult};

#[derive(sqlx::FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role_name: String,
    pub image_url: String,
}

impl UserRow {
    // ロール名が不正なレコードは DB 側の制約で本来作れないが、
    // 変換失敗はエラーとして呼び出し元へ伝播する
    pub fn into_user(self) -> AppResult<User> {
        let UserRow {
            user_id,
            user_name,
            email,
            role_name,
            image_url,
        } = self;
        let role = Role::from_str(&role_name).map_err(|e| {
            AppError::ConversionEntityError(format!("不明なロール名です: {e}"))
        })?;
        Ok(User {
            user_id,
            user_name,
            email,
            role,
            image_url,
        })
    }
}
