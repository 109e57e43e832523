use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Hospital Registry";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);
pub const DEFAULT_PORT: u16 = 5000;

/// File names of the two tables inside the data directory.
pub const PATIENT_FILE: &str = "patients.csv";
pub const DOCTOR_FILE: &str = "doctors.csv";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "hospital_registry=info,tower_http=warn"
}

/// Tables live next to the process, like the spreadsheets they replace.
pub fn data_dir() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

/// Where and how the HTTP server runs.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
    pub data_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST,
            port: DEFAULT_PORT,
            data_dir: data_dir(),
        }
    }
}

impl ServerConfig {
    /// Read `HOST` and `PORT`; anything missing or unparsable keeps its default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(host) = lookup("HOST") {
            match host.trim().parse::<IpAddr>() {
                Ok(ip) => config.host = ip,
                Err(_) => tracing::warn!(host, "Ignoring invalid HOST"),
            }
        }
        if let Some(port) = lookup("PORT") {
            match port.trim().parse::<u16>() {
                Ok(p) => config.port = p,
                Err(_) => tracing::warn!(port, "Ignoring invalid PORT"),
            }
        }
        config
    }
}
