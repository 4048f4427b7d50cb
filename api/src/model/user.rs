use garde::Validate;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{event::CreateUser, User},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoleName {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "hotelOwner")]
    HotelOwner,
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::User => Self::User,
            Role::HotelOwner => Self::HotelOwner,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::User => Self::User,
            RoleName::HotelOwner => Self::HotelOwner,
        }
    }
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[garde(length(min = 1))]
    pub user_name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 6))]
    pub password: String,
    // ロールはサインアップ時に確定する。未指定なら一般ユーザー
    #[garde(skip)]
    pub role: Option<RoleName>,
    #[garde(skip)]
    pub image_url: Option<String>,
}

impl From<CreateUserRequest> for CreateUser {
    fn from(value: CreateUserRequest) -> Self {
        let CreateUserRequest {
            user_name,
            email,
            password,
            role,
            image_url,
        } = value;
        CreateUser {
            user_name,
            email,
            password,
            role: role.map(Role::from).unwrap_or_default(),
            image_url,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub role: RoleName,
    pub image_url: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            user_id,
            user_name,
            email,
            role,
            image_url,
        } = value;
        Self {
            user_id,
            user_name,
            email,
            role: RoleName::from(role),
            image_url,
        }
    }
}

/// サインアップ直後からログイン済みとして扱えるよう、
/// 作成したユーザーと発行済みトークンをまとめて返す
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedUserResponse {
    pub user: UserResponse,
    pub access_token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_name_matches_wire_format() {
        assert_eq!(
            serde_json::to_string(&RoleName::HotelOwner).unwrap(),
            r#""hotelOwner""#
        );
        assert_eq!(
            serde_json::from_str::<RoleName>(r#""user""#).unwrap(),
            RoleName::User
        );
    }

    #[test]
    fn signup_role_defaults_to_user() {
        let req = CreateUserRequest {
            user_name: "John Doe".into(),
            email: "john@example.com".into(),
            password: "secret".into(),
            role: None,
            image_url: None,
        };
        let event = CreateUser::from(req);
        assert_eq!(event.role, Role::User);
    }
}
