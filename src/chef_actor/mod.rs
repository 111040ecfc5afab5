//! Chef worker: one task per chef, alive until shutdown.
//!
//! ```text
//! Idle ─> SelectingWork ─┬─> ServingPayment ─┐
//!   ^                    ├─> Baking ─────────┤
//!   └────────────────────┴───────────────────┘
//!                        └─> Shutdown
//! ```
//!
//! Payments always preempt baking. A chef with nothing to do sleeps on the coordinator's
//! "work available" broadcast. A customer who vanishes mid-handshake is logged and
//! abandoned; the chef carries on with the next job.

pub mod error;

pub use error::*;

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::floor::{Assignment, Bakery, FloorError, Job, PaymentTicket, RegisterTicket, SeatTicket};
use crate::model::{BakeryEvent, ChefAction, ChefId, ChefState, CustomerId};

/// What a chef did during the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChefReport {
    pub chef: ChefId,
    pub cakes_baked: usize,
    pub payments_taken: usize,
    /// Jobs cut short because the customer's side of the handshake was gone.
    pub abandoned: usize,
}

/// One chef task.
pub struct ChefWorker {
    id: ChefId,
    state: ChefState,
    bakery: Arc<Bakery>,
    cakes_baked: usize,
    payments_taken: usize,
    abandoned: usize,
}

impl ChefWorker {
    pub fn new(bakery: Arc<Bakery>, id: ChefId) -> Self {
        Self {
            id,
            state: ChefState::Idle,
            bakery,
            cakes_baked: 0,
            payments_taken: 0,
            abandoned: 0,
        }
    }

    /// Runs the worker loop until shutdown is raised.
    #[instrument(name = "chef", skip(self), fields(id = %self.id))]
    pub async fn run(mut self) -> ChefReport {
        info!("Chef started");
        self.emit(ChefAction::Started, None);
        let bakery = Arc::clone(&self.bakery);

        loop {
            let notified = bakery.work_available();
            tokio::pin!(notified);
            notified.as_mut().enable();

            self.state = ChefState::SelectingWork;
            let served = match bakery.next_job() {
                Job::Payment { ticket, place } => self.serve_payment(ticket, place).await,
                Job::Bake(ticket) => self.bake(ticket).await,
                Job::Idle => {
                    self.state = ChefState::Idle;
                    notified.await;
                    Ok(())
                }
                Job::Shutdown => break,
            };
            if let Err(e) = served {
                warn!(error = %e, "Customer abandoned");
                self.abandoned += 1;
            }
            self.state = ChefState::Idle;
        }

        self.state = ChefState::Shutdown;
        self.emit(ChefAction::ShutDown, None);
        info!(
            cakes_baked = self.cakes_baked,
            payments_taken = self.payments_taken,
            abandoned = self.abandoned,
            "Chef stopped"
        );
        ChefReport {
            chef: self.id,
            cakes_baked: self.cakes_baked,
            payments_taken: self.payments_taken,
            abandoned: self.abandoned,
        }
    }

    async fn serve_payment(&mut self, ticket: PaymentTicket, place: RegisterTicket) -> Result<(), ChefError> {
        self.state = ChefState::ServingPayment;
        let bakery = Arc::clone(&self.bakery);
        let customer = ticket.customer();

        let session = bakery
            .register()
            .open(place, self.id, customer)
            .await
            .map_err(self.fail())?;
        self.emit(ChefAction::PaymentAccepted, Some(customer));
        bakery.pause(bakery.pauses().payment).await;
        self.emit(ChefAction::PaymentFinished, Some(customer));
        drop(session);

        ticket.settle().map_err(self.fail())?;
        self.payments_taken += 1;
        Ok(())
    }

    async fn bake(&mut self, ticket: SeatTicket) -> Result<(), ChefError> {
        self.state = ChefState::Baking;
        let bakery = Arc::clone(&self.bakery);
        let customer = ticket.customer();

        let (assignment, mut order) = Assignment::pair(self.id, customer);
        ticket.assign(assignment).map_err(self.fail())?;
        self.emit(ChefAction::AssignedTo, Some(customer));

        order.wait_for_order().await.map_err(self.fail())?;
        self.emit(ChefAction::BakeStarted, Some(customer));
        bakery.pause(bakery.pauses().bake).await;

        order.finish().map_err(self.fail())?;
        self.emit(ChefAction::BakeFinished, Some(customer));
        self.cakes_baked += 1;
        Ok(())
    }

    fn fail(&self) -> impl FnOnce(FloorError) -> ChefError {
        let chef = self.id;
        move |source| ChefError::Floor { chef, source }
    }

    fn emit(&self, action: ChefAction, customer: Option<CustomerId>) {
        let time = self.bakery.now();
        debug!(time, ?action, state = ?self.state, customer = ?customer, "Chef action");
        self.bakery.emit(BakeryEvent::chef(time, self.id, action, customer));
    }
}
