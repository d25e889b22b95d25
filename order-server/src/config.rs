//! Process configuration from environment variables.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `BIND_ADDR` | `127.0.0.1:3000` |
//! | `OTP_BASE_URL` | `http://localhost:8080` |
//! | `OTP_ROUTER` | `default` |
//! | `OTP_TIMEOUT_SECS` | `20` |
//! | `NOMINATIM_BASE_URL` | `https://nominatim.openstreetmap.org` |
//! | `NOMINATIM_TIMEOUT_SECS` | `15` |
//! | `RAIL_FEED` | unset (no rail) |
//! | `RAIL_PRELOAD` | `false` |
//! | `RAIL_PENALTY_SECS` | `120` |
//! | `SHORT_WALK_METERS` | `1200` |
//! | `TRANSFER_SECS` | `120` |
//! | `GEOCODE_PAUSE_MS` | `350` |
//! | `PLANNER_PAUSE_MS` | `120` |

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::cache::CacheConfig;
use crate::feed::FeedSource;
use crate::geocode::GeocodeConfig;
use crate::otp::OtpConfig;
use crate::planner::OptimizerConfig;
use crate::rail::RailConfig;

/// A variable that is set but cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid value for {key}: {value:?}")]
pub struct ConfigError {
    pub key: &'static str,
    pub value: String,
}

/// Everything `main` needs to start the server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub otp: OtpConfig,
    pub geocode: GeocodeConfig,
    pub cache: CacheConfig,
    pub rail: RailConfig,
    pub optimizer: OptimizerConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            otp: OtpConfig::default(),
            geocode: GeocodeConfig::default(),
            cache: CacheConfig::default(),
            rail: RailConfig::default(),
            optimizer: OptimizerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Unset or blank variables keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = parse("BIND_ADDR", &addr)?;
        }

        if let Some(url) = get("OTP_BASE_URL") {
            config.otp = OtpConfig::new(url.trim());
        }
        if let Some(router) = get("OTP_ROUTER") {
            config.otp = config.otp.with_router(router.trim());
        }
        if let Some(secs) = get("OTP_TIMEOUT_SECS") {
            config.otp = config.otp.with_timeout(parse("OTP_TIMEOUT_SECS", &secs)?);
        }

        if let Some(url) = get("NOMINATIM_BASE_URL") {
            config.geocode = GeocodeConfig::new(url.trim());
        }
        if let Some(secs) = get("NOMINATIM_TIMEOUT_SECS") {
            config.geocode = config
                .geocode
                .with_timeout(parse("NOMINATIM_TIMEOUT_SECS", &secs)?);
        }

        if let Some(feed) = get("RAIL_FEED") {
            config.rail.feed = Some(FeedSource::parse(&feed));
        }
        if let Some(preload) = get("RAIL_PRELOAD") {
            config.rail = config.rail.with_preload(parse_bool("RAIL_PRELOAD", &preload)?);
        }
        if let Some(secs) = get("TRANSFER_SECS") {
            config.rail = config.rail.with_transfer_secs(parse("TRANSFER_SECS", &secs)?);
        }

        let mut hybrid = config.optimizer.hybrid.clone();
        if let Some(secs) = get("RAIL_PENALTY_SECS") {
            hybrid = hybrid.with_rail_penalty(parse("RAIL_PENALTY_SECS", &secs)?);
        }
        if let Some(metres) = get("SHORT_WALK_METERS") {
            hybrid = hybrid.with_short_walk(parse("SHORT_WALK_METERS", &metres)?);
        }
        config.optimizer = config.optimizer.with_hybrid(hybrid);

        let optimizer = &mut config.optimizer;
        if let Some(ms) = get("GEOCODE_PAUSE_MS") {
            optimizer.geocode_pause = Duration::from_millis(parse("GEOCODE_PAUSE_MS", &ms)?);
        }
        if let Some(ms) = get("PLANNER_PAUSE_MS") {
            optimizer.planner_pause = Duration::from_millis(parse("PLANNER_PAUSE_MS", &ms)?);
        }

        Ok(config)
    }
}

fn parse<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError {
            key,
            value: value.to_string(),
        }),
    }
}
