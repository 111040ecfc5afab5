//! # Seating Area
//!
//! The sofa and its two queues:
//!
//! - **seated-unserved**: customers holding a seat and waiting for a chef (FIFO),
//! - **standing**: customers waiting for a seat, ordered by arrival time with ties broken
//!   by insertion order.
//!
//! A seat freed by [`SeatingArea::release_seat`] is handed straight to the earliest
//! standing customer, so `seated` never drops below capacity while someone is standing
//! and a newcomer can never take a seat ahead of them.

use std::collections::{BTreeMap, VecDeque};
use tokio::sync::oneshot;

use super::{Assignment, FloorError, Handshake};
use crate::model::{CustomerId, SimTime, VisitId, Visitor};

/// A seated customer waiting for a chef.
#[derive(Debug)]
pub struct SeatTicket {
    visitor: Visitor,
    assign: oneshot::Sender<Assignment>,
}

impl SeatTicket {
    pub fn customer(&self) -> CustomerId {
        self.visitor.customer
    }

    /// Wakes the customer with its chef assignment.
    pub fn assign(self, assignment: Assignment) -> Result<(), FloorError> {
        self.assign
            .send(assignment)
            .map_err(|_| FloorError::broken(self.visitor.customer, Handshake::ChefAssignment))
    }
}

#[derive(Debug)]
struct StandingTicket {
    visitor: Visitor,
    grant: oneshot::Sender<()>,
}

/// Result of trying to sit down.
#[derive(Debug)]
pub enum SitOutcome {
    /// A seat was free. Resolves with the chef assignment.
    Seated(oneshot::Receiver<Assignment>),
    /// The sofa is full. Resolves when a seat has been handed over.
    Standing(oneshot::Receiver<()>),
}

#[derive(Debug)]
pub struct SeatingArea {
    capacity: usize,
    seated: usize,
    unserved: VecDeque<SeatTicket>,
    standing: BTreeMap<(SimTime, u64), StandingTicket>,
    next_seq: u64,
}

impl SeatingArea {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            seated: 0,
            unserved: VecDeque::new(),
            standing: BTreeMap::new(),
            next_seq: 0,
        }
    }

    /// Takes a free seat and joins the seated-unserved queue, or starts standing.
    pub fn sit(&mut self, visitor: Visitor, arrival: SimTime) -> SitOutcome {
        if self.seated < self.capacity {
            self.seated += 1;
            SitOutcome::Seated(self.wait_for_chef(visitor))
        } else {
            let (grant, granted) = oneshot::channel();
            let seq = self.next_seq;
            self.next_seq += 1;
            self.standing.insert((arrival, seq), StandingTicket { visitor, grant });
            SitOutcome::Standing(granted)
        }
    }

    /// Queues a customer whose seat was handed over by [`release_seat`](Self::release_seat).
    /// The seat itself is already counted.
    pub fn seat_granted(&mut self, visitor: Visitor) -> oneshot::Receiver<Assignment> {
        self.wait_for_chef(visitor)
    }

    fn wait_for_chef(&mut self, visitor: Visitor) -> oneshot::Receiver<Assignment> {
        let (assign, assigned) = oneshot::channel();
        self.unserved.push_back(SeatTicket { visitor, assign });
        assigned
    }

    /// Pops the longest-waiting seated customer. The seat stays taken.
    pub fn take_seated(&mut self) -> Option<SeatTicket> {
        self.unserved.pop_front()
    }

    /// Frees one seat and hands it to the earliest standing customer, if any.
    /// Returns the customer who got the seat.
    pub fn release_seat(&mut self) -> Option<Visitor> {
        assert!(self.seated > 0, "release_seat() with no seat taken");
        self.seated -= 1;
        while let Some((_, waiter)) = self.standing.pop_first() {
            self.seated += 1;
            if waiter.grant.send(()).is_ok() {
                return Some(waiter.visitor);
            }
            // Waiter is gone; offer the seat to the next one.
            self.seated -= 1;
        }
        None
    }

    pub fn seated(&self) -> usize {
        self.seated
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn unserved(&self) -> Vec<Visitor> {
        self.unserved.iter().map(|t| t.visitor).collect()
    }

    /// Standing customers in the order they will be seated.
    pub fn standing(&self) -> Vec<Visitor> {
        self.standing.values().map(|t| t.visitor).collect()
    }

    pub(crate) fn contains(&self, visit: VisitId) -> bool {
        self.unserved.iter().any(|t| t.visitor.visit == visit)
            || self.standing.values().any(|t| t.visitor.visit == visit)
    }
}
