use crate::model::role::Role;

#[derive(Debug)]
pub struct CreateUser {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub image_url: Option<String>,
}
