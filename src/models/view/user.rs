use crate::entities::user_auth::local_user_entity::{LocalUser, Role};
use crate::middleware::utils::string_utils::record_key;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct UserView {
    pub id: String,
    pub full_name: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub role: Role,
}

impl From<LocalUser> for UserView {
    fn from(user: LocalUser) -> Self {
        UserView {
            id: record_key(&user.id),
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            role: user.role,
        }
    }
}

/// Returned by register and login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoggedUserView {
    pub id: String,
    pub full_name: Option<String>,
    pub email: String,
    pub role: Role,
    pub token: String,
}

impl From<(LocalUser, String)> for LoggedUserView {
    fn from((user, token): (LocalUser, String)) -> Self {
        LoggedUserView {
            id: record_key(&user.id),
            full_name: user.full_name,
            email: user.email,
            role: user.role,
            token,
        }
    }
}
