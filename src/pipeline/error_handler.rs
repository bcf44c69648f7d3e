use log::debug;
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::MergeError;

/// First error reported by either side of the pipeline. Later errors are logged and dropped.
#[derive(Clone, Default)]
pub struct FirstError(Arc<Mutex<Option<MergeError>>>);

impl FirstError {
    /// Store `err` unless an earlier error is already held. Returns true if stored.
    pub fn record(&self, err: MergeError) -> bool {
        let mut slot = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            debug!("later pipeline error suppressed: {}", err);
            return false;
        }
        *slot = Some(err);
        true
    }

    /// Ok value passes through; an error is recorded and turned into `None`.
    pub fn capture<T>(&self, result: Result<T, MergeError>) -> Option<T> {
        match result {
            Ok(v) => Some(v),
            Err(e) => {
                self.record(e);
                None
            }
        }
    }

    pub fn take(&self) -> Option<MergeError> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

/// Check pipeline result after both threads are joined: the first recorded error wins.
pub fn check_for_first_error(first_error: &FirstError) -> Result<(), MergeError> {
    match first_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
