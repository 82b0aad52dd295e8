// Ordered observer list with synchronous fan-out

use std::fmt;
use std::sync::Arc;

use crate::observer::error::{NotifyReport, ObserverError, ObserverFailure};
use crate::observer::traits::{NotifyPolicy, Observer};

/// Holds observers in registration order and pushes snapshots to them.
///
/// Registering the same observer twice is allowed and yields two deliveries
/// per notify.
pub struct Subject<T> {
    observers: Vec<Arc<dyn Observer<T>>>,
    policy: NotifyPolicy,
}

impl<T> Subject<T> {
    pub fn new() -> Self {
        Self::with_policy(NotifyPolicy::default())
    }

    pub fn with_policy(policy: NotifyPolicy) -> Self {
        Self {
            observers: Vec::new(),
            policy,
        }
    }

    pub fn register(&mut self, observer: Arc<dyn Observer<T>>) {
        tracing::debug!(
            "Registered observer '{}' at position {}",
            observer.name(),
            self.observers.len()
        );
        self.observers.push(observer);
    }

    /// Remove the first registration of `observer`, compared by identity.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, observer: &Arc<dyn Observer<T>>) -> bool {
        match self.observers.iter().position(|o| Arc::ptr_eq(o, observer)) {
            Some(index) => {
                let removed = self.observers.remove(index);
                tracing::debug!("Removed observer '{}' from position {}", removed.name(), index);
                true
            }
            None => false,
        }
    }

    /// Deliver `snapshot` to every observer once, in registration order.
    ///
    /// Under `Isolate` this never returns `Err`; failures are collected in the
    /// report. Under `FailFast` the first failure ends the fan-out and comes
    /// back as `ObserverError::Aborted`.
    pub fn notify(&self, snapshot: &T) -> Result<NotifyReport, ObserverError> {
        let mut report = NotifyReport::default();

        for (index, observer) in self.observers.iter().enumerate() {
            match observer.update(snapshot) {
                Ok(()) => {
                    report.delivered += 1;
                    tracing::trace!("Observer: {} received snapshot", observer.name());
                }
                Err(error) => match self.policy {
                    NotifyPolicy::Isolate => {
                        tracing::warn!("Observer: {} failed: {}", observer.name(), error);
                        report.failures.push(ObserverFailure {
                            observer: observer.name().to_string(),
                            index,
                            error,
                        });
                    }
                    NotifyPolicy::FailFast => {
                        tracing::error!(
                            "Observer: {} failed, aborting notification: {}",
                            observer.name(),
                            error
                        );
                        return Err(ObserverError::Aborted {
                            observer: observer.name().to_string(),
                            delivered: report.delivered,
                            source: Box::new(error),
                        });
                    }
                },
            }
        }

        Ok(report)
    }

    pub fn policy(&self) -> NotifyPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: NotifyPolicy) {
        self.policy = policy;
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl<T> Default for Subject<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Subject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subject")
            .field("observers", &self.observers.iter().map(|o| o.name()).collect::<Vec<_>>())
            .field("policy", &self.policy)
            .finish()
    }
}
