use std::env;

/// Runtime configuration, loaded once at startup from the environment.
///
/// Required variables: `DATABASE_URL`, `JWT_SECRET`, `APP_ENV`
/// ("development" or "production"). Optional: `PORT` (default 5000),
/// `SERVER_HOST` (default 127.0.0.1), `TOKEN_TTL_HOURS` (default 24).
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub environment: String,
    pub server_port: u16,
    pub server_host: String,
    pub token_ttl_hours: i64,
}

impl Config {
    /// Reads the configuration from the environment, failing fast (panicking)
    /// if a required value is absent or malformed.
    pub fn from_env() -> Self {
        let environment = env::var("APP_ENV").expect("APP_ENV must be set");
        if environment != "development" && environment != "production" {
            panic!("APP_ENV must be either 'development' or 'production'");
        }

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            environment,
            server_port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .expect("PORT must be a number"),
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            token_ttl_hours: env::var("TOKEN_TTL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .expect("TOKEN_TTL_HOURS must be a number"),
        }
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required environment variables
        env::set_var("DATABASE_URL", "postgres://test");
        env::set_var("JWT_SECRET", "test-secret");
        env::set_var("APP_ENV", "development");

        let config = Config::from_env();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.jwt_secret, "test-secret");
        assert_eq!(config.environment, "development");
        assert_eq!(config.server_port, 5000);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.token_ttl_hours, 24);

        // Test custom values
        env::set_var("PORT", "3000");
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("TOKEN_TTL_HOURS", "2");

        let config = Config::from_env();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.server_host, "0.0.0.0");
        assert_eq!(config.token_ttl_hours, 2);
        assert_eq!(config.server_url(), "http://0.0.0.0:3000");
    }
}
