pub mod grill;
pub mod like;
pub mod user;
