//! Plain data types shared by the coordinator, the actors and the presentation layer.

pub mod chef;
pub mod customer;
pub mod event;

pub use chef::*;
pub use customer::*;
pub use event::*;

/// A point on the simulated clock, in whole simulated time units.
pub type SimTime = i64;
