use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
};

use anyhow::Context;

pub const DEFAULT_FULL_NAME: &str = "John Doe";
pub const DEFAULT_DOB: &str = "17091999";
pub const DEFAULT_EMAIL: &str = "john@xyz.com";
pub const DEFAULT_ROLL_NUMBER: &str = "ABCD123";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen_addr: SocketAddr,
    pub identity: IdentityConfig,
}

/// Values used to decorate every `/bfhl` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub full_name: String,
    pub dob_ddmmyyyy: String,
    pub email: String,
    pub roll_number: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            full_name: DEFAULT_FULL_NAME.to_string(),
            dob_ddmmyyyy: DEFAULT_DOB.to_string(),
            email: DEFAULT_EMAIL.to_string(),
            roll_number: DEFAULT_ROLL_NUMBER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup, so callers other than
    /// `main` never have to touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = match lookup("HOST") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .with_context(|| format!("HOST is not a valid IP address: {raw:?}"))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port number: {raw:?}"))?,
            None => DEFAULT_PORT,
        };

        let identity = IdentityConfig {
            full_name: lookup("FULL_NAME").unwrap_or_else(|| DEFAULT_FULL_NAME.to_string()),
            dob_ddmmyyyy: lookup("DOB_DDMMYYYY").unwrap_or_else(|| DEFAULT_DOB.to_string()),
            email: lookup("EMAIL").unwrap_or_else(|| DEFAULT_EMAIL.to_string()),
            roll_number: lookup("ROLL_NUMBER").unwrap_or_else(|| DEFAULT_ROLL_NUMBER.to_string()),
        };

        Ok(Self {
            listen_addr: SocketAddr::new(host, port),
            identity,
        })
    }
}
