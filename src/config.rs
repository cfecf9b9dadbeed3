use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub database_path: String,
    pub max_connections: u32,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let host = env_map
            .get("HOST")
            .map(|s| s.as_str())
            .unwrap_or("0.0.0.0")
            .parse::<IpAddr>()
            .map_err(|_| {
                ConfigError::InvalidValue("HOST".to_string(), "must be an IP address".to_string())
            })?;

        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = match env_map.get("DATABASE_PATH") {
            Some(path) if path.trim().is_empty() => {
                return Err(ConfigError::MissingEnv("DATABASE_PATH".to_string()))
            }
            Some(path) => path.clone(),
            None => "./items.db".to_string(),
        };

        let max_connections = env_map
            .get("DATABASE_MAX_CONNECTIONS")
            .map(|s| s.as_str())
            .unwrap_or("5")
            .parse::<u32>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ConfigError::InvalidValue(
                    "DATABASE_MAX_CONNECTIONS".to_string(),
                    "must be a positive integer".to_string(),
                )
            })?;

        Ok(Config {
            host,
            port,
            database_path,
            max_connections,
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::from_env_map(HashMap::new()).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path, "./items.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.listen_addr().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn test_overrides() {
        let mut env_map = HashMap::new();
        env_map.insert("HOST".to_string(), "127.0.0.1".to_string());
        env_map.insert("PORT".to_string(), "3000".to_string());
        env_map.insert("DATABASE_PATH".to_string(), "/tmp/items.db".to_string());
        env_map.insert("DATABASE_MAX_CONNECTIONS".to_string(), "1".to_string());

        let config = Config::from_env_map(env_map).unwrap();
        assert_eq!(config.listen_addr().to_string(), "127.0.0.1:3000");
        assert_eq!(config.database_path, "/tmp/items.db");
        assert_eq!(config.max_connections, 1);
    }

    #[test]
    fn test_invalid_port() {
        let mut env_map = HashMap::new();
        env_map.insert("PORT".to_string(), "not_a_number".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "PORT"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_invalid_host() {
        let mut env_map = HashMap::new();
        env_map.insert("HOST".to_string(), "localhost:80".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "HOST"),
            _ => panic!("Expected InvalidValue error"),
        }
    }

    #[test]
    fn test_empty_database_path() {
        let mut env_map = HashMap::new();
        env_map.insert("DATABASE_PATH".to_string(), "  ".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::MissingEnv(s)) => assert_eq!(s, "DATABASE_PATH"),
            _ => panic!("Expected MissingEnv error"),
        }
    }

    #[test]
    fn test_zero_max_connections() {
        let mut env_map = HashMap::new();
        env_map.insert("DATABASE_MAX_CONNECTIONS".to_string(), "0".to_string());
        let result = Config::from_env_map(env_map);
        match result {
            Err(ConfigError::InvalidValue(k, _)) => assert_eq!(k, "DATABASE_MAX_CONNECTIONS"),
            _ => panic!("Expected InvalidValue error"),
        }
    }
}
