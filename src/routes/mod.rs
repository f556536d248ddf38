pub mod auth_routes;
pub mod grills;
pub mod users;
