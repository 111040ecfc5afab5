//! Shared state of the shop floor: both counters, all three queues and the shutdown flag.
//!
//! Everything here is synchronous and lives behind the single lock owned by
//! [`Bakery`](super::Bakery). Every mutation re-checks the capacity invariants and every
//! queue insertion checks that the customer is not already queued elsewhere; a failure
//! is a bug in the coordinator and panics.

use super::{
    AdmissionGate, Assignment, CashRegister, OrderBoard, PaymentTicket, Rejected, RegisterTicket, SeatTicket,
    SeatingArea, SitOutcome,
};
use crate::model::{SimTime, VisitId, Visitor};
use tokio::sync::oneshot;

/// What a chef should do next.
#[derive(Debug)]
pub enum Job {
    /// Process a payment. `place` is the chef's turn at the register.
    Payment {
        ticket: PaymentTicket,
        place: RegisterTicket,
    },
    /// Serve a seated customer.
    Bake(SeatTicket),
    /// Nothing to do.
    Idle,
    Shutdown,
}

/// Point-in-time copy of the floor, for observers and tests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FloorSnapshot {
    pub inside: usize,
    pub seated: usize,
    pub seated_unserved: Vec<Visitor>,
    pub standing: Vec<Visitor>,
    pub payment: Vec<Visitor>,
    pub shutdown: bool,
}

impl FloorSnapshot {
    /// Nobody inside, no seat taken, every queue empty.
    pub fn is_quiescent(&self) -> bool {
        self.inside == 0
            && self.seated == 0
            && self.seated_unserved.is_empty()
            && self.standing.is_empty()
            && self.payment.is_empty()
    }

    /// No visit appears twice across the three queues.
    pub fn membership_is_exclusive(&self) -> bool {
        let mut all: Vec<VisitId> = self
            .seated_unserved
            .iter()
            .chain(&self.standing)
            .chain(&self.payment)
            .map(|v| v.visit)
            .collect();
        let total = all.len();
        all.sort();
        all.dedup();
        all.len() == total
    }
}

#[derive(Debug)]
pub struct FloorState {
    gate: AdmissionGate,
    seating: SeatingArea,
    board: OrderBoard,
    shutdown: bool,
}

impl FloorState {
    pub fn new(shop_capacity: usize, seat_capacity: usize) -> Self {
        Self {
            gate: AdmissionGate::new(shop_capacity),
            seating: SeatingArea::new(seat_capacity),
            board: OrderBoard::new(),
            shutdown: false,
        }
    }

    pub fn try_enter(&mut self) -> Result<(), Rejected> {
        let entered = self.gate.try_enter();
        self.check_invariants();
        entered
    }

    pub fn leave(&mut self) {
        self.gate.leave();
        self.check_invariants();
    }

    pub fn sit(&mut self, visitor: Visitor, arrival: SimTime) -> SitOutcome {
        self.assert_not_queued(visitor);
        let outcome = self.seating.sit(visitor, arrival);
        self.check_invariants();
        outcome
    }

    pub fn seat_granted(&mut self, visitor: Visitor) -> oneshot::Receiver<Assignment> {
        self.assert_not_queued(visitor);
        self.seating.seat_granted(visitor)
    }

    pub fn release_seat(&mut self) -> Option<Visitor> {
        let granted = self.seating.release_seat();
        self.check_invariants();
        granted
    }

    pub fn enqueue_for_payment(&mut self, visitor: Visitor) -> oneshot::Receiver<()> {
        self.assert_not_queued(visitor);
        self.board.enqueue_for_payment(visitor)
    }

    /// Picks the next job for a free chef. Payments always win over baking.
    pub fn next_job(&mut self, register: &CashRegister) -> Job {
        if self.shutdown {
            return Job::Shutdown;
        }
        if let Some(ticket) = self.board.take_payment() {
            // Drawn under the floor lock so register order matches queue order.
            let place = register.issue_ticket();
            return Job::Payment { ticket, place };
        }
        match self.seating.take_seated() {
            Some(ticket) => Job::Bake(ticket),
            None => Job::Idle,
        }
    }

    /// Raises the shutdown flag, refusing while the shop is not quiescent.
    pub fn begin_shutdown(&mut self) -> Result<(), FloorSnapshot> {
        let snapshot = self.snapshot();
        if !snapshot.is_quiescent() {
            return Err(snapshot);
        }
        self.shutdown = true;
        Ok(())
    }

    pub fn snapshot(&self) -> FloorSnapshot {
        FloorSnapshot {
            inside: self.gate.inside(),
            seated: self.seating.seated(),
            seated_unserved: self.seating.unserved(),
            standing: self.seating.standing(),
            payment: self.board.visitors(),
            shutdown: self.shutdown,
        }
    }

    fn assert_not_queued(&self, visitor: Visitor) {
        assert!(
            !self.seating.contains(visitor.visit) && !self.board.contains(visitor.visit),
            "customer {visitor} is already queued"
        );
    }

    fn check_invariants(&self) {
        let inside = self.gate.inside();
        let seated = self.seating.seated();
        assert!(
            inside <= self.gate.capacity(),
            "{inside} customers inside, capacity {}",
            self.gate.capacity()
        );
        assert!(
            seated <= self.seating.capacity(),
            "{seated} seats taken, capacity {}",
            self.seating.capacity()
        );
        assert!(seated <= inside, "{seated} seated but only {inside} inside");
    }
}
