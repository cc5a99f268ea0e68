use std::net::SocketAddr;

use anyhow::Context;

use crate::models::ReferencePolicy;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub max_connections: u32,
    pub reference_policy: ReferencePolicy,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://catalog.db?mode=rwc".to_string());

        let max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse()
            .context("DB_MAX_CONNECTIONS")?;

        let reference_policy: ReferencePolicy = std::env::var("REFERENCE_DELETE_POLICY")
            .unwrap_or_else(|_| "dangle".to_string())
            .parse()
            .context("REFERENCE_DELETE_POLICY")?;

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            database_url,
            max_connections,
            reference_policy,
        })
    }
}
