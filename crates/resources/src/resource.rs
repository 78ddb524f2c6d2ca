//! Exclusive resource units

use dine_types::{ResourceId, ResourceReport};

/// One exclusive unit with usage counters
///
/// A `Resource` is never cloned. It moves by value from a [`Slot`] into an
/// agent's hand and back, so whoever owns it is its only mutator.
///
/// [`Slot`]: crate::Slot
#[derive(Debug, PartialEq, Eq)]
pub struct Resource {
    id: ResourceId,
    grab_count: u64,
    use_count: u64,
}

impl Resource {
    /// Create a fresh resource with zeroed counters
    #[must_use]
    pub fn new(id: ResourceId) -> Self {
        Self {
            id,
            grab_count: 0,
            use_count: 0,
        }
    }

    #[must_use]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    #[must_use]
    pub fn grab_count(&self) -> u64 {
        self.grab_count
    }

    #[must_use]
    pub fn use_count(&self) -> u64 {
        self.use_count
    }

    /// Count one pick-up
    pub fn record_grab(&mut self) {
        self.grab_count += 1;
    }

    /// Count one serving consumed with this resource in hand
    pub fn record_use(&mut self) {
        self.use_count += 1;
    }

    /// Snapshot for the end-of-run report
    #[must_use]
    pub fn report(&self) -> ResourceReport {
        ResourceReport {
            id: self.id,
            grab_count: self.grab_count,
            use_count: self.use_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_start_at_zero() {
        let resource = Resource::new(ResourceId(3));
        assert_eq!(resource.id(), ResourceId(3));
        assert_eq!(resource.grab_count(), 0);
        assert_eq!(resource.use_count(), 0);
    }

    #[test]
    fn report_reflects_counters() {
        let mut resource = Resource::new(ResourceId(1));
        resource.record_grab();
        resource.record_grab();
        resource.record_use();

        let report = resource.report();
        assert_eq!(report.grab_count, 2);
        assert_eq!(report.use_count, 1);
        assert!(report.grab_count >= report.use_count);
    }
}
