pub const LIKE_TABLE_NAME: &str = "like";
