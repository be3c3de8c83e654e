use std::net::SocketAddr;

use thiserror::Error;

use crate::common::env_check::env_value;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

/// Gets the listen address from the env vars HOST and PORT.
/// Uses defaults `127.0.0.1:3000` if env vars are unset or empty.
pub fn get_bind_address() -> Result<SocketAddr, HostPortError> {
    bind_address(env_value("HOST").as_deref(), env_value("PORT").as_deref())
}

/// Builds the listen address from optional host and port strings.
pub fn bind_address(host: Option<&str>, port: Option<&str>) -> Result<SocketAddr, HostPortError> {
    let host = host.unwrap_or(DEFAULT_HOST);
    let port = match port {
        Some(p) => p.trim().parse::<u16>()?,
        None => DEFAULT_PORT,
    };
    let address = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    Ok(address)
}

#[derive(Debug, Error)]
pub enum HostPortError {
    #[error("Invalid port: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),

    #[error("Invalid hostname: {0}")]
    InvalidHostname(#[from] std::net::AddrParseError),
}
