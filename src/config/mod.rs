use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::geodesy::Unit;
use crate::observer::NotifyPolicy;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub track: TrackConfig,
    pub logging: LoggingConfig,
    pub replay: ReplayConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// Settings every new `TrackState` starts from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrackConfig {
    pub default_unit: Unit,
    pub notify_policy: NotifyPolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set
    pub filter: String,
    pub with_target: bool,
}

/// Smallest accepted replay speedup; slower values would stretch a
/// millisecond gap past any sensible sleep
pub const MIN_REPLAY_SPEEDUP: f64 = 0.01;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Divides the recorded gaps between samples in real-time replay
    pub speedup: f64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::for_environment(env::var("WALK_ENV").ok().as_deref())
            .with_overrides(|key| env::var(key).ok())
    }

    fn for_environment(name: Option<&str>) -> Self {
        match name {
            Some("production") | Some("prod") => Self::production(),
            Some("staging") | Some("stage") => Self::staging(),
            _ => Self::development(),
        }
    }

    /// Apply per-key overrides; unparseable values keep the preset
    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        // Track overrides
        if let Some(v) = lookup("WALK_DEFAULT_UNIT") {
            self.track.default_unit = v.parse().unwrap_or(self.track.default_unit);
        }
        if let Some(v) = lookup("WALK_NOTIFY_POLICY") {
            self.track.notify_policy = v.parse().unwrap_or(self.track.notify_policy);
        }

        // Logging overrides
        if let Some(v) = lookup("WALK_LOG_FILTER") {
            if !v.trim().is_empty() {
                self.logging.filter = v;
            }
        }
        if let Some(v) = lookup("WALK_LOG_WITH_TARGET") {
            self.logging.with_target = v.parse().unwrap_or(self.logging.with_target);
        }

        // Replay overrides
        if let Some(v) = lookup("WALK_REPLAY_SPEEDUP") {
            self.replay.speedup = v
                .parse::<f64>()
                .ok()
                .filter(|s| s.is_finite() && *s >= MIN_REPLAY_SPEEDUP)
                .unwrap_or(self.replay.speedup);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            track: TrackConfig {
                default_unit: Unit::Meters,
                notify_policy: NotifyPolicy::FailFast,
            },
            logging: LoggingConfig {
                filter: "walk_track=debug,info".to_string(),
                with_target: true,
            },
            replay: ReplayConfig { speedup: 10.0 },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            track: TrackConfig {
                default_unit: Unit::Meters,
                notify_policy: NotifyPolicy::Isolate,
            },
            logging: LoggingConfig {
                filter: "walk_track=info,warn".to_string(),
                with_target: true,
            },
            replay: ReplayConfig { speedup: 1.0 },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            track: TrackConfig {
                default_unit: Unit::Meters,
                notify_policy: NotifyPolicy::Isolate,
            },
            logging: LoggingConfig {
                filter: "warn".to_string(),
                with_target: false,
            },
            replay: ReplayConfig { speedup: 1.0 },
        }
    }
}

// Global singleton config - initialized once on first access
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
