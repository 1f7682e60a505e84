use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    /// Externally reachable base URL, used for payment redirect and webhook URLs.
    pub public_base_url: String,
    /// Absence is only an error once a checkout is actually initiated.
    pub mollie_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").context("Cannot load HOST env variable")?;
        let port: u16 = std::env::var("PORT")
            .context("Cannot load PORT env variable")?
            .parse()
            .context("PORT must be a number")?;
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://{host}:{port}"));

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            mollie_api_key: std::env::var("MOLLIE_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            host,
            port,
            public_base_url,
        })
    }

    /// Fixed configuration for offline tests.
    pub fn test_default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            database_url: "postgres://localhost/liftlog_test".to_string(),
            public_base_url: "http://127.0.0.1:5000".to_string(),
            mollie_api_key: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_gateway_credential() {
        let config = Config::test_default();
        assert!(config.mollie_api_key.is_none());
        assert!(config.public_base_url.starts_with("http://"));
    }
}
