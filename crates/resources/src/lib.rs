#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Shared resources for the dine simulator
//!
//! This crate provides the three things agents compete over or draw from:
//! exclusive [`Resource`] units, the single-capacity [`Slot`]s that hand them
//! between neighbours, and the depletable [`ServingSource`].

pub mod resource;
pub mod semaphore;
pub mod serving;
pub mod slot;

pub use resource::Resource;
pub use semaphore::{acquire_slot_permit, try_acquire_slot_permit};
pub use serving::{serving_source, Serving, ServingProducer, ServingSource, TakeOutcome};
pub use slot::Slot;
