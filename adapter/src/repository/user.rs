use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{event::CreateUser, User},
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

use crate::database::{model::user::UserRow, ConnectionPool};

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

// プロフィール画像が未指定のときに使うイニシャルアバターの生成 URL
fn default_avatar_url(user_name: &str) -> String {
    format!(
        "https://ui-avatars.com/api/?name={}&background=random&color=fff",
        user_name.replace(' ', "+")
    )
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let user_id = UserId::new();
        let password_hash = bcrypt::hash(&event.password, bcrypt::DEFAULT_COST)?;
        let image_url = event
            .image_url
            .unwrap_or_else(|| default_avatar_url(&event.user_name));

        let res = sqlx::query(
            r#"
                INSERT INTO users (user_id, user_name, email, password_hash, role_name, image_url)
                VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(user_id)
        .bind(&event.user_name)
        .bind(&event.email)
        .bind(&password_hash)
        .bind(event.role.as_ref())
        .bind(&image_url)
        .execute(self.db.inner_ref())
        .await;

        match res {
            Ok(_) => Ok(User {
                user_id,
                user_name: event.user_name,
                email: event.email,
                role: event.role,
                image_url,
            }),
            // メールアドレスの一意制約違反はサインアップ時の重複として返す
            Err(e)
                if e.as_database_error()
                    .map(|db_err| db_err.is_unique_violation())
                    .unwrap_or(false) =>
            {
                Err(AppError::EntityAlreadyExists(format!(
                    "メールアドレス（{}）は既に登録されています",
                    event.email
                )))
            }
            Err(e) => Err(AppError::SpecificOperationError(e)),
        }
    }

    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
                SELECT user_id, user_name, email, role_name, image_url
                FROM users
                WHERE user_id = $1
            "#,
        )
        .bind(current_user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(UserRow::into_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_url_encodes_spaces() {
        assert_eq!(
            default_avatar_url("John Doe"),
            "https://ui-avatars.com/api/?name=John+Doe&background=random&color=fff"
        );
    }
}
