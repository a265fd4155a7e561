use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Process configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub osm: OsmConfig,
    pub openflow_controller: String,
    pub netconf: NetconfConfig,
    pub database_path: String,
    pub bind_addr: String,
    pub latency: SimulatedLatency,
}

#[derive(Debug, Clone)]
pub struct OsmConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct NetconfConfig {
    pub port: u16,
    pub username: String,
    pub password: String,
}

/// Artificial delays standing in for orchestrator and device round trips.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulatedLatency {
    pub deployment: Duration,
    pub flow_configuration: Duration,
    pub device_configuration: Duration,
    /// start / stop / delete
    pub lifecycle: Duration,
}

impl SimulatedLatency {
    pub fn from_unit(unit: Duration) -> Self {
        Self {
            deployment: unit,
            flow_configuration: unit / 2,
            device_configuration: unit / 2,
            lifecycle: unit,
        }
    }

    pub fn none() -> Self {
        Self::from_unit(Duration::ZERO)
    }
}

impl Default for SimulatedLatency {
    fn default() -> Self {
        Self::from_unit(Duration::from_millis(1000))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            osm: OsmConfig {
                host: "localhost".into(),
                port: 9999,
                username: "admin".into(),
                password: "admin".into(),
            },
            openflow_controller: "http://localhost:8080".into(),
            netconf: NetconfConfig {
                port: 830,
                username: "admin".into(),
                password: "admin".into(),
            },
            database_path: "database/firewalls.db".into(),
            bind_addr: "0.0.0.0:5000".into(),
            latency: SimulatedLatency::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let latency_ms: u64 = parse_var("SIMULATED_LATENCY_MS", 1000);

        Self {
            osm: OsmConfig {
                host: string_var("OSM_HOST", &defaults.osm.host),
                port: parse_var("OSM_PORT", defaults.osm.port),
                username: string_var("OSM_USERNAME", &defaults.osm.username),
                password: string_var("OSM_PASSWORD", &defaults.osm.password),
            },
            openflow_controller: string_var("OPENFLOW_CONTROLLER", &defaults.openflow_controller),
            netconf: NetconfConfig {
                port: parse_var("NETCONF_PORT", defaults.netconf.port),
                username: string_var("NETCONF_USERNAME", &defaults.netconf.username),
                password: string_var("NETCONF_PASSWORD", &defaults.netconf.password),
            },
            database_path: string_var("DATABASE_PATH", &defaults.database_path),
            bind_addr: string_var("BIND_ADDR", &defaults.bind_addr),
            latency: SimulatedLatency::from_unit(Duration::from_millis(latency_ms)),
        }
    }

    pub fn database_url(&self) -> String {
        format!("sqlite://{}?mode=rwc", self.database_path)
    }
}

fn string_var(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value {:?} for {}, using {}", raw, key, default);
            default
        }),
        Err(_) => default,
    }
}
