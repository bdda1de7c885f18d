use std::env;

use crate::constants::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub jwt_secret: String,
    pub allowed_origins: Vec<String>,
    pub rate_limit_requests: u32,
    pub rate_limit_window_secs: u64,
    pub bcrypt_cost: u32,
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_path = env::var("DATABASE_PATH")
            .unwrap_or_else(|_| "./data/affiliate_hub.redb".to_string());

        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| "JWT_SECRET must be set for token signing")?;
        if jwt_secret.is_empty() {
            return Err("JWT_SECRET must not be empty".to_string());
        }

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let rate_limit_requests = env::var("RATE_LIMIT_REQUESTS")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|_| "Invalid RATE_LIMIT_REQUESTS")?;

        let rate_limit_window_secs = env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "900".to_string())
            .parse()
            .map_err(|_| "Invalid RATE_LIMIT_WINDOW_SECS")?;

        let bcrypt_cost =
            parse_bcrypt_cost(&env::var("BCRYPT_COST").unwrap_or_else(|_| "10".to_string()))?;

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        Ok(Config {
            server_host,
            server_port,
            database_path,
            jwt_secret,
            allowed_origins,
            rate_limit_requests,
            rate_limit_window_secs,
            bcrypt_cost,
            environment,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Parse a bcrypt work factor, rejecting values bcrypt would refuse at hash time
fn parse_bcrypt_cost(raw: &str) -> Result<u32, String> {
    let cost: u32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("Invalid BCRYPT_COST: {}", raw))?;

    if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) {
        return Err(format!(
            "BCRYPT_COST must be between {} and {}, got {}",
            MIN_BCRYPT_COST, MAX_BCRYPT_COST, cost
        ));
    }

    Ok(cost)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcrypt_cost_in_range() {
        assert_eq!(parse_bcrypt_cost("10"), Ok(10));
        assert_eq!(parse_bcrypt_cost("4"), Ok(4));
        assert_eq!(parse_bcrypt_cost("31"), Ok(31));
    }

    #[test]
    fn test_bcrypt_cost_out_of_range() {
        assert!(parse_bcrypt_cost("3").is_err());
        assert!(parse_bcrypt_cost("0").is_err());
        assert!(parse_bcrypt_cost("32").is_err());
    }

    #[test]
    fn test_bcrypt_cost_not_a_number() {
        assert!(parse_bcrypt_cost("ten").is_err());
        assert!(parse_bcrypt_cost("-1").is_err());
    }
}
