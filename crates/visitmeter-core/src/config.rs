#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub db_host: String,
    pub db_port: u16,
    pub db_user: String,
    pub db_password: String,
    pub db_name: String,
    pub db_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: std::env::var("VISITMETER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            db_host: std::env::var("DB_HOST").map_err(|_| "DB_HOST is required".to_string())?,
            db_port: std::env::var("DB_PORT")
                .unwrap_or_else(|_| "3306".to_string())
                .parse()
                .map_err(|e| format!("invalid DB_PORT: {e}"))?,
            db_user: std::env::var("DB_USER").map_err(|_| "DB_USER is required".to_string())?,
            // An empty password is valid for local development databases.
            db_password: std::env::var("DB_PASSWORD").unwrap_or_default(),
            db_name: std::env::var("DB_NAME").map_err(|_| "DB_NAME is required".to_string())?,
            db_max_connections: std::env::var("VISITMETER_DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .unwrap_or(5),
        })
    }
}
