use dotenvy;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_namespace: String,
    pub db_database: String,
    pub db_password: Option<String>,
    pub db_username: Option<String>,
    pub db_url: String,
    pub jwt_secret: String,
    pub jwt_duration_days: i64,
    pub init_server_password: Option<String>,
    pub admin_email: String,
    pub port: u16,
    pub cors_origin: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let db_namespace = std::env::var("DB_NAMESPACE").unwrap_or("namespace".to_string());
        let db_database = std::env::var("DB_DATABASE").unwrap_or("database".to_string());
        let db_password = std::env::var("DB_PASSWORD").ok();
        let db_username = std::env::var("DB_USERNAME").ok();
        let db_url = std::env::var("DB_URL").unwrap_or("mem://".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").expect("Missing JWT_SECRET in env");
        let jwt_duration_days = std::env::var("JWT_DURATION_DAYS")
            .unwrap_or("30".to_string())
            .parse::<i64>()
            .expect("JWT_DURATION_DAYS must be number");

        let init_server_password = std::env::var("START_PASSWORD")
            .ok()
            .filter(|v| !v.is_empty());
        let admin_email =
            std::env::var("ADMIN_EMAIL").unwrap_or("admin@grill.local".to_string());

        let port = std::env::var("PORT")
            .unwrap_or("3001".to_string())
            .parse::<u16>()
            .expect("PORT must be number");
        let cors_origin = std::env::var("CORS_ORIGIN").ok().filter(|v| !v.is_empty());

        Self {
            db_namespace,
            db_database,
            db_password,
            db_username,
            db_url,
            jwt_secret,
            jwt_duration_days,
            init_server_password,
            admin_email,
            port,
            cors_origin,
        }
    }
}
