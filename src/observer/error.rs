use thiserror::Error;

/// Observer system errors with structured error types
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ObserverError {
    #[error("Observer rejected snapshot: {0}")]
    Rejected(String),

    #[error("Observer failed: {0}")]
    Failed(String),

    #[error("Notification aborted at observer '{observer}' after {delivered} deliveries")]
    Aborted {
        observer: String,
        delivered: usize,
        #[source]
        source: Box<ObserverError>,
    },
}

/// A failed delivery recorded while notifying under `NotifyPolicy::Isolate`
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverFailure {
    pub observer: String,
    /// Position of the observer in registration order
    pub index: usize,
    pub error: ObserverError,
}

/// Outcome of one `Subject::notify` call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NotifyReport {
    pub delivered: usize,
    pub failures: Vec<ObserverFailure>,
}

impl NotifyReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}
