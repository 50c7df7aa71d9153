use std::env;
use std::net::SocketAddr;

use crate::error::{invalid_config_error, Error};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Postgres connection string; places are kept in memory without one.
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| env::var(key))
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, env::VarError>,
    {
        let database_url = optional(&lookup, "DATABASE_URL")?;

        let max_connections = match optional(&lookup, "DATABASE_MAX_CONNECTIONS")? {
            Some(value) => value
                .parse()
                .map_err(|_| invalid_config_error("DATABASE_MAX_CONNECTIONS"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let bind_addr = optional(&lookup, "BIND_ADDR")?
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.into())
            .parse()
            .map_err(|_| invalid_config_error("BIND_ADDR"))?;

        Ok(Self {
            database_url,
            max_connections,
            bind_addr,
        })
    }
}

fn optional<F>(lookup: &F, key: &str) -> Result<Option<String>, Error>
where
    F: Fn(&str) -> Result<String, env::VarError>,
{
    match lookup(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(err) => Err(err.into()),
    }
}
