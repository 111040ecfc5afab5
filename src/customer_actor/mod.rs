//! Customer agent: drives one customer through its visit.
//!
//! ```text
//! Arriving ─┬─> Rejected
//!           └─> Entered ─┬─> Seated ───────────────┐
//!                        └─> Standing ─> Seated ───┤
//!   ┌──────────────────────────────────────────────┘
//!   └─> AssignedChef ─> OrderPlaced ─> BakeComplete ─> AwaitingPayment
//!         ─> Paid ─> SeatReleased ─> Left
//! ```
//!
//! Admission and sitting down are immediate decisions of the coordinator. Every later
//! step waits on a point-to-point wake from exactly one counterpart: the customer who
//! freed a seat, or the chef serving this customer.

pub mod error;

pub use error::*;

use std::sync::Arc;
use tracing::{debug, instrument};

use crate::floor::{Bakery, FloorError, Handshake, SitOutcome};
use crate::model::{BakeryEvent, Customer, CustomerId, CustomerState, Visitor};

/// How a visit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Served, paid and left.
    Served,
    /// Turned away at the door.
    Rejected,
}

/// One customer task.
pub struct CustomerAgent {
    bakery: Arc<Bakery>,
    visitor: Visitor,
    customer: Customer,
}

impl CustomerAgent {
    pub fn new(bakery: Arc<Bakery>, id: CustomerId) -> Self {
        let visitor = bakery.next_visit(id);
        Self {
            bakery,
            visitor,
            customer: Customer::new(id),
        }
    }

    /// Runs the whole visit. Every visit records exactly one completion: served,
    /// rejected, failed, panicked or aborted.
    #[instrument(name = "customer", skip(self), fields(id = %self.customer.id, visit = self.visitor.visit.0))]
    pub async fn run(mut self) -> Result<Outcome, CustomerError> {
        let bakery = Arc::clone(&self.bakery);
        let _completion = bakery.completions().guard();
        self.visit().await
    }

    async fn visit(&mut self) -> Result<Outcome, CustomerError> {
        let id = self.customer.id;
        let visitor = self.visitor;
        let bakery = Arc::clone(&self.bakery);
        let pauses = *bakery.pauses();

        let arrival = match bakery.try_enter(id) {
            Ok(arrival) => arrival,
            Err(_) => {
                self.advance(CustomerState::Rejected)?;
                return Ok(Outcome::Rejected);
            }
        };
        self.customer.arrival = Some(arrival);
        self.advance(CustomerState::Entered)?;
        bakery.pause(pauses.enter).await;

        let assigned = match bakery.sit(visitor, arrival) {
            SitOutcome::Seated(assigned) => {
                self.advance(CustomerState::Seated)?;
                assigned
            }
            SitOutcome::Standing(granted) => {
                self.advance(CustomerState::Standing)?;
                granted.await.map_err(FloorError::on_recv(id, Handshake::SeatGrant))?;
                let assigned = bakery.seat_granted(visitor);
                self.advance(CustomerState::Seated)?;
                assigned
            }
        };
        bakery.pause(pauses.settle).await;

        let assignment = assigned
            .await
            .map_err(FloorError::on_recv(id, Handshake::ChefAssignment))?;
        let chef = assignment.chef();
        if !self.customer.assign_chef(chef) {
            return Err(CustomerError::ChefReassigned {
                customer: id,
                current: self.customer.chef.unwrap_or(chef),
                second: chef,
            });
        }
        self.advance(CustomerState::AssignedChef)?;

        self.advance(CustomerState::OrderPlaced)?;
        bakery.pause(pauses.order).await;
        let baked = assignment.place_order()?;
        baked.await.map_err(FloorError::on_recv(id, Handshake::BakeDone))?;
        self.advance(CustomerState::BakeComplete)?;

        bakery.pause(pauses.to_register).await;
        let paid = bakery.enqueue_for_payment(visitor);
        self.advance(CustomerState::AwaitingPayment)?;
        paid.await.map_err(FloorError::on_recv(id, Handshake::PaymentDone))?;
        self.advance(CustomerState::Paid)?;

        bakery.release_seat(visitor);
        self.advance(CustomerState::SeatReleased)?;
        bakery.pause(pauses.exit).await;

        bakery.leave(id);
        self.advance(CustomerState::Left)?;
        Ok(Outcome::Served)
    }

    fn advance(&mut self, next: CustomerState) -> Result<(), CustomerError> {
        let id = self.customer.id;
        self.customer
            .advance(next)
            .map_err(|(from, to)| CustomerError::IllegalTransition { customer: id, from, to })?;
        let time = self.bakery.now();
        debug!(time, state = ?next, chef = ?self.customer.chef, "Customer transition");
        self.bakery
            .emit(BakeryEvent::customer(time, id, next, self.customer.chef));
        Ok(())
    }
}
