use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
    time::Duration,
};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/state.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub data_path: PathBuf,
    /// Pause applied before a submission is recorded.
    pub submit_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            submit_delay: Duration::ZERO,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from `HOST`, `PORT`, `APP_DATA_PATH` and `SUBMIT_DELAY_MS`.
    /// Unparseable values fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: parse_or("HOST", &lookup, defaults.host),
            port: parse_or("PORT", &lookup, defaults.port),
            data_path: lookup("APP_DATA_PATH")
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.data_path),
            submit_delay: Duration::from_millis(parse_or("SUBMIT_DELAY_MS", &lookup, 0)),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> T {
    match lookup(key) {
        Some(value) => value.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring invalid {key}={value:?}");
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]);
        assert_eq!(config.addr(), "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.data_path, PathBuf::from("data/state.json"));
        assert!(config.submit_delay.is_zero());
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("HOST", "0.0.0.0"),
            ("PORT", "9191"),
            ("APP_DATA_PATH", "/tmp/garden.json"),
            ("SUBMIT_DELAY_MS", "800"),
        ]);
        assert_eq!(config.addr(), "0.0.0.0:9191".parse().unwrap());
        assert_eq!(config.data_path, PathBuf::from("/tmp/garden.json"));
        assert_eq!(config.submit_delay, Duration::from_millis(800));
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config_from(&[("PORT", "eighty"), ("SUBMIT_DELAY_MS", "-5"), ("APP_DATA_PATH", " ")]);
        assert_eq!(config.port, 8080);
        assert!(config.submit_delay.is_zero());
        assert_eq!(config.data_path, PathBuf::from("data/state.json"));
    }
}
