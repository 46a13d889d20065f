//! Centralized TSCH link scheduling.
//!
//! One run goes through the following stages, each in its own module:
//! - [`demand`]: per-mote demand towards the parent, aggregated along the routing tree.
//! - [`compatibility`]: which links may share a timeslot.
//! - [`grid_scheduler`]: greedy placement onto the [`slot_frame`] and channel randomization.
//! - [`publisher`]: per-mote schedule entries handed back to the motes.
//!
//! [`link_scheduler::LinkScheduler`] runs the stages in order and re-arms itself on the engine.

pub mod compatibility;
pub mod demand;
pub mod grid_scheduler;
pub mod link;
pub mod link_scheduler;
pub mod link_store;
pub mod publisher;
pub mod run_summary;
pub mod schedule_entry;
pub mod slot_frame;
