//! # System Lifecycle & Orchestration
//!
//! The customers and chefs are simple on their own; this module is the conductor that
//! starts them, feeds arrivals in on time and shuts everything down cleanly.
//!
//! **Key Responsibilities:**
//! 1. **Chef Pool** - spawn one [`ChefWorker`](crate::chef_actor::ChefWorker) per configured chef
//! 2. **Arrivals** - replay a [`Schedule`](crate::schedule::Schedule) against the clock
//! 3. **Completion** - block on the completion tracker until every visit has ended
//! 4. **Graceful Shutdown** - raise the shutdown flag and join every task
//! 5. **Observability Setup** - initialize tracing
//!
//! ## Graceful Shutdown
//!
//! 1. **Wait for completion** - every customer task is terminal (served or rejected)
//! 2. **Join customers** - collect outcomes, report failures
//! 3. **Raise shutdown** - refused unless the shop is empty and every queue drained
//! 4. **Join chefs** - idle chefs wake on the broadcast, see the flag and exit
//!
//! No task is left blocked: customers have all returned before step 3, and chefs only
//! ever block on the broadcast that step 3 fires.

pub mod bakery_system;
pub mod tracing;

pub use bakery_system::*;
pub use tracing::*;
