use std::collections::VecDeque;
use tokio::sync::oneshot;

use super::{FloorError, Handshake};
use crate::model::{CustomerId, VisitId, Visitor};

/// A customer waiting at the register.
#[derive(Debug)]
pub struct PaymentTicket {
    visitor: Visitor,
    paid: oneshot::Sender<()>,
}

impl PaymentTicket {
    pub fn customer(&self) -> CustomerId {
        self.visitor.customer
    }

    /// Wakes the customer: the payment went through.
    pub fn settle(self) -> Result<(), FloorError> {
        self.paid
            .send(())
            .map_err(|_| FloorError::broken(self.visitor.customer, Handshake::PaymentDone))
    }
}

/// FIFO of customers who have their cake and are waiting to pay.
#[derive(Debug, Default)]
pub struct OrderBoard {
    queue: VecDeque<PaymentTicket>,
}

impl OrderBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `visitor` for payment. The receiver resolves once a chef has processed it.
    pub fn enqueue_for_payment(&mut self, visitor: Visitor) -> oneshot::Receiver<()> {
        let (paid, settled) = oneshot::channel();
        self.queue.push_back(PaymentTicket { visitor, paid });
        settled
    }

    pub fn take_payment(&mut self) -> Option<PaymentTicket> {
        self.queue.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn visitors(&self) -> Vec<Visitor> {
        self.queue.iter().map(|t| t.visitor).collect()
    }

    pub(crate) fn contains(&self, visit: VisitId) -> bool {
        self.queue.iter().any(|t| t.visitor.visit == visit)
    }
}
