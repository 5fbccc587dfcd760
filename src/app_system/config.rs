use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::PathBuf;

use tracing::warn;

pub const DEFAULT_BIND: SocketAddr = SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::LOCALHOST, 5000));
pub const DEFAULT_INVENTORY_PATH: &str = "sweets.csv";
pub const DEFAULT_BILLING_PATH: &str = "customer.csv";
pub const DEFAULT_MAILBOX_SIZE: usize = 100;

/// Startup configuration, read once from the environment and handed to the
/// system explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub inventory_path: PathBuf,
    pub billing_path: PathBuf,
    pub mailbox_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND,
            inventory_path: PathBuf::from(DEFAULT_INVENTORY_PATH),
            billing_path: PathBuf::from(DEFAULT_BILLING_PATH),
            mailbox_size: DEFAULT_MAILBOX_SIZE,
        }
    }
}

impl Config {
    /// Reads `SWEETS_BIND`, `SWEETS_INVENTORY_PATH`, `SWEETS_BILLING_PATH` and
    /// `SWEETS_MAILBOX_SIZE`. Unset variables keep their defaults; unparsable
    /// ones are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: parse_or(&lookup, "SWEETS_BIND", defaults.bind_addr),
            inventory_path: lookup("SWEETS_INVENTORY_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.inventory_path),
            billing_path: lookup("SWEETS_BILLING_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.billing_path),
            mailbox_size: parse_or(&lookup, "SWEETS_MAILBOX_SIZE", defaults.mailbox_size)
                .max(1),
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!(key, value = %raw, error = %e, fallback = %default, "Invalid configuration value");
            default
        }),
        None => default,
    }
}
