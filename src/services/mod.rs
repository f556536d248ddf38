pub mod auth_service;
pub mod grill_service;
pub mod like_service;
