use std::net::SocketAddr;

use anyhow::Context;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8088";
const DEFAULT_DB_PATH: &str = "./db/app.db";

/// Server configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    /// Allowed CORS origins; `*` allows any origin.
    pub cors_allow_origins: Vec<String>,
}

impl Config {
    /// Loads `.env` when present, then reads `BL_*` variables, falling back
    /// to defaults for anything unset.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr = std::env::var("BL_LISTEN_ADDR")
            .unwrap_or_else(|_| DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr = listen_addr
            .parse()
            .with_context(|| format!("invalid BL_LISTEN_ADDR '{}'", listen_addr))?;

        let db_path = std::env::var("BL_DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        let cors_allow_origins =
            parse_origins(&std::env::var("BL_CORS_ALLOW_ORIGINS").unwrap_or_else(|_| "*".into()));

        Ok(Config {
            listen_addr,
            db_path,
            cors_allow_origins,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_trims_and_skips_blanks() {
        assert_eq!(
            parse_origins(" http://localhost:3000 , ,https://app.example.com"),
            vec!["http://localhost:3000", "https://app.example.com"]
        );
        assert_eq!(parse_origins("*"), vec!["*"]);
        assert!(parse_origins("").is_empty());
    }
}
