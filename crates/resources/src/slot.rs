//! Single-capacity handoff points between neighbouring agents

use crate::resource::Resource;
use crate::semaphore::{acquire_slot_permit, try_acquire_slot_permit};
use dine_errors::ResourceError;
use dine_types::{AgentId, ResourceId, SlotTopology};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::Semaphore;

/// Holds zero or one [`Resource`] and is shared by exactly two agents
///
/// Availability is published through a semaphore that carries one permit
/// while the slot is full and none while it is empty. Taking consumes the
/// permit before touching the cell, so at most one taker can ever observe
/// the resource.
#[derive(Debug)]
pub struct Slot {
    topology: SlotTopology,
    available: Semaphore,
    cell: Mutex<Option<Resource>>,
}

impl Slot {
    /// Create an empty slot
    #[must_use]
    pub fn new(topology: SlotTopology) -> Self {
        Self {
            topology,
            available: Semaphore::new(0),
            cell: Mutex::new(None),
        }
    }

    /// Slot index; matches the id of the resource it is stocked with
    #[must_use]
    pub fn id(&self) -> ResourceId {
        self.topology.resource
    }

    #[must_use]
    pub fn topology(&self) -> SlotTopology {
        self.topology
    }

    #[must_use]
    pub fn left_agent(&self) -> AgentId {
        self.topology.left_agent
    }

    #[must_use]
    pub fn right_agent(&self) -> AgentId {
        self.topology.right_agent
    }

    /// Whether a resource currently sits in the slot
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.cell().is_some()
    }

    /// Deposit a resource into the empty slot
    ///
    /// Never waits: under the acquisition protocol the slot is always empty
    /// when its resource comes back.
    ///
    /// # Errors
    ///
    /// Returns `SlotOccupied` if the slot already holds a resource; the
    /// rejected resource is dropped in that case.
    pub fn place(&self, resource: Resource) -> Result<(), ResourceError> {
        let mut cell = self.cell();
        if let Some(held) = cell.as_ref() {
            return Err(ResourceError::SlotOccupied {
                slot: self.index(),
                held: held.id().index(),
                placed: resource.id().index(),
            });
        }
        *cell = Some(resource);
        drop(cell);
        self.available.add_permits(1);
        Ok(())
    }

    /// Take the resource, waiting until one is placed
    ///
    /// Cancellation-safe, so it can be raced against another slot in
    /// `tokio::select!` without losing a resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot has been closed.
    pub async fn take(&self) -> Result<Resource, ResourceError> {
        let permit = acquire_slot_permit(&self.available, self.index()).await?;
        permit.forget();
        self.remove()
    }

    /// Take the resource if one is present right now
    ///
    /// # Errors
    ///
    /// Returns an error if the slot has been closed.
    pub fn try_take(&self) -> Result<Option<Resource>, ResourceError> {
        match try_acquire_slot_permit(&self.available, self.index())? {
            Some(permit) => {
                permit.forget();
                self.remove().map(Some)
            }
            None => Ok(None),
        }
    }

    /// Fail all current and future waiting takers
    pub fn close(&self) {
        self.available.close();
    }

    fn remove(&self) -> Result<Resource, ResourceError> {
        self.cell()
            .take()
            .ok_or(ResourceError::SlotDesynchronized { slot: self.index() })
    }

    fn index(&self) -> usize {
        self.topology.resource.index()
    }

    fn cell(&self) -> MutexGuard<'_, Option<Resource>> {
        // The guarded section never panics, so a poisoned lock still holds
        // a consistent value.
        self.cell.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    fn slot(index: usize) -> Slot {
        Slot::new(SlotTopology::for_slot(index, 3))
    }

    #[test]
    fn try_take_on_empty_slot_returns_none() {
        let slot = slot(0);
        assert!(slot.try_take().unwrap().is_none());
        assert!(!slot.is_occupied());
    }

    #[test]
    fn place_then_try_take_round_trips() {
        let slot = slot(1);
        slot.place(Resource::new(ResourceId(1))).unwrap();
        assert!(slot.is_occupied());

        let taken = slot.try_take().unwrap().unwrap();
        assert_eq!(taken.id(), ResourceId(1));
        assert!(slot.try_take().unwrap().is_none());
    }

    #[test]
    fn placing_into_full_slot_is_rejected() {
        let slot = slot(2);
        slot.place(Resource::new(ResourceId(2))).unwrap();
        let err = slot.place(Resource::new(ResourceId(0))).unwrap_err();
        assert!(matches!(
            err,
            ResourceError::SlotOccupied {
                slot: 2,
                held: 2,
                placed: 0
            }
        ));
        // The first occupant stays put
        assert_eq!(slot.try_take().unwrap().unwrap().id(), ResourceId(2));
    }

    #[test]
    fn topology_is_reported() {
        let slot = slot(2);
        assert_eq!(slot.left_agent(), AgentId(2));
        assert_eq!(slot.right_agent(), AgentId(0));
    }

    #[tokio::test]
    async fn take_waits_for_placement() {
        let slot = Arc::new(slot(0));
        let waiter = tokio::spawn({
            let slot = Arc::clone(&slot);
            async move { slot.take().await }
        });

        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        slot.place(Resource::new(ResourceId(0))).unwrap();
        let taken = waiter.await.unwrap().unwrap();
        assert_eq!(taken.id(), ResourceId(0));
        assert!(!slot.is_occupied());
    }

    #[tokio::test]
    async fn cancelled_take_does_not_lose_the_resource() {
        let slot = slot(1);
        let timed_out = tokio::time::timeout(Duration::from_millis(5), slot.take()).await;
        assert!(timed_out.is_err());

        slot.place(Resource::new(ResourceId(1))).unwrap();
        assert!(slot.try_take().unwrap().is_some());
    }

    #[tokio::test]
    async fn closed_slot_fails_waiters() {
        let slot = slot(0);
        slot.close();
        assert!(matches!(
            slot.take().await,
            Err(ResourceError::SlotClosed { slot: 0 })
        ));
        assert!(slot.try_take().is_err());
    }
}
