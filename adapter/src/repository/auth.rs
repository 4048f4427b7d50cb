use std::sync::Arc;

use async_trait::async_trait;
use kernel::model::{
    auth::{event::CreateToken, AccessToken},
    id::UserId,
};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use uuid::Uuid;

use crate::{database::ConnectionPool, redis::RedisClient};

pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

impl AuthRepositoryImpl {
    pub fn new(db: ConnectionPool, kv: Arc<RedisClient>, ttl: u64) -> Self {
        Self { db, kv, ttl }
    }
}

fn token_key(access_token: &AccessToken) -> String {
    format!("auth:{}", access_token.0)
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let value = self.kv.get(&token_key(access_token)).await?;
        value
            .map(|id| id.parse::<UserId>().map_err(AppError::ConvertToUuidError))
            .transpose()
    }

    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId> {
        let row: Option<(UserId, String)> = sqlx::query_as(
            r#"
                SELECT user_id, password_hash
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        // 未登録のメールアドレスとパスワード不一致は出し分けない
        let Some((user_id, password_hash)) = row else {
            return Err(AppError::UnauthenticatedError);
        };

        let valid = bcrypt::verify(password, &password_hash)?;
        if !valid {
            return Err(AppError::UnauthenticatedError);
        }

        Ok(user_id)
    }

    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken> {
        // UUID を二つ連結した推測不能な不透明トークン
        let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        let access_token = AccessToken(token);
        self.kv
            .set_ex(
                &token_key(&access_token),
                &event.user_id.to_string(),
                self.ttl,
            )
            .await?;
        Ok(access_token)
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        self.kv.delete(&token_key(&access_token)).await
    }
}
