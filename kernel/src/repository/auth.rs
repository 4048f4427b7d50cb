use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    auth::{event::CreateToken, AccessToken},
    id::UserId,
};

#[async_trait]
pub trait AuthRepository: Send + Sync {
    // アクセストークンからユーザー ID を引く。存在しなければ None
    async fn fetch_user_id_from_token(&self, access_token: &AccessToken)
        -> AppResult<Option<UserId>>;
    // メールアドレスとパスワードを検証し、一致すればユーザー ID を返す
    async fn verify_user(&self, email: &str, password: &str) -> AppResult<UserId>;
    // アクセストークンを発行して TTL 付きで保存する
    async fn create_token(&self, event: CreateToken) -> AppResult<AccessToken>;
    // ログアウト。トークンを削除する
    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()>;
}
