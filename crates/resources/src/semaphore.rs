//! Semaphore utilities for slot availability
//!
//! A slot publishes "a resource is here" as a single permit. These helpers
//! give consistent error handling for waiting and non-waiting acquisition.

use dine_errors::ResourceError;
use tokio::sync::{Semaphore, SemaphorePermit, TryAcquireError};

/// Wait for a slot permit
///
/// Cancellation-safe: dropping the future before it resolves leaves the
/// permit in the semaphore.
///
/// # Errors
///
/// Returns an error if the semaphore is closed.
pub async fn acquire_slot_permit(
    semaphore: &Semaphore,
    slot: usize,
) -> Result<SemaphorePermit<'_>, ResourceError> {
    semaphore
        .acquire()
        .await
        .map_err(|_| ResourceError::SlotClosed { slot })
}

/// Try to acquire a slot permit without waiting
///
/// Returns `Ok(Some(permit))` if successful, `Ok(None)` if it would block.
///
/// # Errors
///
/// Returns an error if the semaphore is closed.
pub fn try_acquire_slot_permit(
    semaphore: &Semaphore,
    slot: usize,
) -> Result<Option<SemaphorePermit<'_>>, ResourceError> {
    match semaphore.try_acquire() {
        Ok(permit) => Ok(Some(permit)),
        Err(TryAcquireError::NoPermits) => Ok(None),
        Err(TryAcquireError::Closed) => Err(ResourceError::SlotClosed { slot }),
    }
}
