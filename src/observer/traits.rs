use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::observer::error::ObserverError;

/// Receiver of state snapshots pushed by a `Subject`.
///
/// `update` runs synchronously on the notifying thread, so implementations
/// should return quickly. Observers take `&self`; anything they record needs
/// interior mutability.
pub trait Observer<T>: Send + Sync {
    /// Observer name for logging and failure reports
    fn name(&self) -> &str {
        "observer"
    }

    fn update(&self, snapshot: &T) -> Result<(), ObserverError>;
}

/// How a `Subject` reacts when one observer fails during `notify`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotifyPolicy {
    /// Record the failure and keep delivering to the remaining observers
    #[default]
    Isolate,
    /// Stop at the first failure; later observers are not called
    FailFast,
}

impl FromStr for NotifyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "isolate" => Ok(NotifyPolicy::Isolate),
            "fail-fast" | "fail_fast" | "failfast" => Ok(NotifyPolicy::FailFast),
            other => Err(format!("unknown notify policy: {}", other)),
        }
    }
}

impl fmt::Display for NotifyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotifyPolicy::Isolate => f.write_str("isolate"),
            NotifyPolicy::FailFast => f.write_str("fail-fast"),
        }
    }
}
