use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
};

use thiserror::Error;

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Environment variable API_HOST is not a valid IP address: {0:?}")]
    InvalidHost(String),
    #[error("Environment variable API_PORT is not a valid port: {0:?}")]
    InvalidPort(String),
}

/// Configuration for the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The interface to listen on. Defaults to `0.0.0.0`. Can be overridden with the `API_HOST`
    /// environment variable.
    pub http_host: IpAddr,
    /// The port to listen on. Defaults to 5000. Can be overridden with the `API_PORT` environment
    /// variable.
    pub http_port: u16,
    /// Serve Swagger UI and the OpenAPI document. Off unless `API_DOCS` is set to `true`.
    pub api_docs: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { http_host: DEFAULT_HOST, http_port: DEFAULT_PORT, api_docs: false }
    }
}

impl Config {
    pub fn new() -> Result<Self, Error> {
        Ok(Self {
            http_host: parse_var("API_HOST", DEFAULT_HOST).map_err(Error::InvalidHost)?,
            http_port: parse_var("API_PORT", DEFAULT_PORT).map_err(Error::InvalidPort)?,
            api_docs: envmnt::is_or("API_DOCS", false),
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http_host, self.http_port)
    }
}

/// Unset or blank falls back to `default`. The offending value is returned when parsing fails.
fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, String> {
    let value = envmnt::get_or(key, "");
    match value.trim() {
        "" => Ok(default),
        trimmed => trimmed.parse().map_err(|_| trimmed.to_owned()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.socket_addr(), "0.0.0.0:5000".parse().unwrap());
        assert!(!config.api_docs);
    }

    // The only test touching the process environment, so it cannot race with another.
    #[test]
    fn test_env_overrides() {
        envmnt::set("API_HOST", "127.0.0.1");
        envmnt::set("API_PORT", "8080");
        envmnt::set("API_DOCS", "true");
        let config = Config::new().unwrap();
        assert_eq!(config.socket_addr(), "127.0.0.1:8080".parse().unwrap());
        assert!(config.api_docs);

        envmnt::set("API_HOST", "  ");
        envmnt::set("API_PORT", " 9000 ");
        let config = Config::new().unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:9000".parse().unwrap());

        envmnt::set("API_HOST", "not-an-ip");
        assert!(matches!(Config::new(), Err(Error::InvalidHost(host)) if host == "not-an-ip"));
        envmnt::remove("API_HOST");

        for port in ["abc", "70000", "-1"] {
            envmnt::set("API_PORT", port);
            assert!(matches!(Config::new(), Err(Error::InvalidPort(value)) if value == port));
        }

        envmnt::remove("API_PORT");
        envmnt::remove("API_DOCS");
        assert_eq!(Config::new().unwrap(), Config::default());
    }
}
