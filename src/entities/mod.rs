pub mod community;
pub mod like;
pub mod user_auth;
