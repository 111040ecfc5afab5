//! # The Coordinator
//!
//! [`Bakery`] is the one object every customer and chef task shares (through an `Arc`).
//! It owns:
//!
//! - the [`FloorState`] behind a single `std::sync::Mutex` (never held across `.await`),
//! - the "work available" [`Notify`] that idle chefs sleep on,
//! - the [`CashRegister`], independent of the floor lock,
//! - the [`CompletionTracker`], with its own synchronization,
//! - the clock and the event stream.
//!
//! ## Wake Protocol
//!
//! Broadcasts are used only for "new work may be available" (a seat was taken, a payment
//! was queued, shutdown was raised). Everything else is a point-to-point `oneshot`
//! created for exactly one waiter: seat grants, chef assignments, order
//! acknowledgements, bake completion and payment completion.
//!
//! Chefs register interest in the broadcast *before* inspecting the queues (see
//! [`Bakery::work_available`]), so work published between the check and the wait is
//! never missed.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::futures::Notified;
use tokio::sync::{mpsc, oneshot, Notify};
use tracing::{debug, info, warn};

use super::{
    Assignment, CashRegister, CompletionTracker, FloorError, FloorSnapshot, FloorState, Job, Rejected, SitOutcome,
};
use crate::clock::Clock;
use crate::config::{BakeryConfig, StagePauses};
use crate::model::{BakeryEvent, CustomerId, SimTime, VisitId, Visitor};

pub struct Bakery {
    config: BakeryConfig,
    clock: Arc<dyn Clock>,
    floor: Mutex<FloorState>,
    work: Notify,
    register: CashRegister,
    completions: CompletionTracker,
    visits: AtomicU64,
    events: mpsc::UnboundedSender<BakeryEvent>,
}

impl Bakery {
    /// Creates the coordinator and the receiving end of its event stream.
    pub fn new(config: BakeryConfig, clock: Arc<dyn Clock>) -> (Arc<Self>, mpsc::UnboundedReceiver<BakeryEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        let bakery = Self {
            floor: Mutex::new(FloorState::new(config.shop_capacity, config.seat_capacity)),
            config,
            clock,
            work: Notify::new(),
            register: CashRegister::new(),
            completions: CompletionTracker::new(),
            visits: AtomicU64::new(0),
            events,
        };
        (Arc::new(bakery), receiver)
    }

    fn floor(&self) -> MutexGuard<'_, FloorState> {
        self.floor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn config(&self) -> &BakeryConfig {
        &self.config
    }

    pub fn pauses(&self) -> &StagePauses {
        &self.config.pauses
    }

    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    /// Suspends the caller for `units` of simulated time.
    pub async fn pause(&self, units: u64) {
        self.clock.pause(units).await;
    }

    /// Publishes an event. A dropped receiver only means nobody is watching.
    pub fn emit(&self, event: BakeryEvent) {
        let _ = self.events.send(event);
    }

    // =========================================================================
    // Admission
    // =========================================================================

    /// Opens a new visit for `customer`. Repeated customer ids get distinct visits.
    pub fn next_visit(&self, customer: CustomerId) -> Visitor {
        Visitor {
            visit: VisitId(self.visits.fetch_add(1, Ordering::Relaxed)),
            customer,
        }
    }

    /// Lets `customer` in and returns the simulated arrival time, or rejects at capacity.
    pub fn try_enter(&self, customer: CustomerId) -> Result<SimTime, Rejected> {
        let mut floor = self.floor();
        match floor.try_enter() {
            Ok(()) => {
                let arrival = self.clock.now();
                debug!(%customer, arrival, inside = floor.snapshot().inside, "Admitted");
                Ok(arrival)
            }
            Err(rejected) => {
                debug!(%customer, "Shop full, turned away");
                Err(rejected)
            }
        }
    }

    pub fn leave(&self, customer: CustomerId) {
        self.floor().leave();
        debug!(%customer, "Left the shop");
    }

    // =========================================================================
    // Seating
    // =========================================================================

    /// Sits down if a seat is free (and wakes the chefs), otherwise starts standing.
    pub fn sit(&self, visitor: Visitor, arrival: SimTime) -> SitOutcome {
        let outcome = self.floor().sit(visitor, arrival);
        if matches!(outcome, SitOutcome::Seated(_)) {
            self.work.notify_waiters();
        }
        outcome
    }

    /// Called by a standing customer once its seat grant arrived.
    pub fn seat_granted(&self, visitor: Visitor) -> oneshot::Receiver<Assignment> {
        let assigned = self.floor().seat_granted(visitor);
        self.work.notify_waiters();
        assigned
    }

    /// Frees `customer`'s seat, handing it to the earliest standing customer if any.
    pub fn release_seat(&self, visitor: Visitor) -> Option<Visitor> {
        let granted = self.floor().release_seat();
        if let Some(next) = granted {
            debug!(customer = %visitor, %next, "Seat handed over");
        }
        granted
    }

    // =========================================================================
    // Order board
    // =========================================================================

    pub fn enqueue_for_payment(&self, visitor: Visitor) -> oneshot::Receiver<()> {
        let settled = self.floor().enqueue_for_payment(visitor);
        self.work.notify_waiters();
        settled
    }

    // =========================================================================
    // Chef side
    // =========================================================================

    /// Future resolving at the next "work available" broadcast.
    ///
    /// Pin it and call `enable()` before [`next_job`](Self::next_job); awaiting it after
    /// an `Idle` answer then cannot miss work queued in between.
    pub fn work_available(&self) -> Notified<'_> {
        self.work.notified()
    }

    pub fn next_job(&self) -> Job {
        self.floor().next_job(&self.register)
    }

    pub fn register(&self) -> &CashRegister {
        &self.register
    }

    // =========================================================================
    // Completion & shutdown
    // =========================================================================

    pub fn completions(&self) -> &CompletionTracker {
        &self.completions
    }

    /// Raises the shutdown flag and wakes every idle chef.
    ///
    /// Refused with [`FloorError::NotQuiescent`] while anybody is still inside or any
    /// queue holds work.
    pub fn begin_shutdown(&self) -> Result<(), FloorError> {
        let raised = self.floor().begin_shutdown();
        match raised {
            Ok(()) => {
                info!(completed = self.completions.completed(), "Shutdown raised");
                self.work.notify_waiters();
                Ok(())
            }
            Err(snapshot) => {
                warn!(?snapshot, "Shutdown refused");
                Err(FloorError::NotQuiescent(snapshot))
            }
        }
    }

    pub fn snapshot(&self) -> FloorSnapshot {
        self.floor().snapshot()
    }
}
