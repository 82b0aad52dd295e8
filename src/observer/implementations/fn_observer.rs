use std::marker::PhantomData;

use crate::observer::error::ObserverError;
use crate::observer::traits::Observer;

/// Adapts a closure into an `Observer`
pub struct FnObserver<T, F> {
    name: String,
    callback: F,
    _snapshot: PhantomData<fn(&T)>,
}

impl<T, F> FnObserver<T, F>
where
    F: Fn(&T) -> Result<(), ObserverError> + Send + Sync,
{
    pub fn new(name: impl Into<String>, callback: F) -> Self {
        Self {
            name: name.into(),
            callback,
            _snapshot: PhantomData,
        }
    }
}

impl<T, F> Observer<T> for FnObserver<T, F>
where
    F: Fn(&T) -> Result<(), ObserverError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn update(&self, snapshot: &T) -> Result<(), ObserverError> {
        (self.callback)(snapshot)
    }
}
