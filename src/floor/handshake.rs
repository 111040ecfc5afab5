//! # Customer ↔ Chef Handshake
//!
//! Baking is a two-step rendezvous between a chef and the customer it picked off the
//! sofa queue:
//!
//! 1. The chef sends an [`Assignment`] to the customer and waits for the order.
//! 2. The customer states its order ([`Assignment::place_order`]); only then does the
//!    chef start baking, and it reports completion through the same assignment.
//!
//! Each step is a `oneshot` channel created by the chef for this customer alone, so an
//! acknowledgement sent before the chef starts waiting is never lost.

use tokio::sync::oneshot;

use super::{FloorError, Handshake};
use crate::model::{ChefId, CustomerId};

/// Customer side of a chef assignment.
#[derive(Debug)]
pub struct Assignment {
    chef: ChefId,
    customer: CustomerId,
    order_placed: oneshot::Sender<()>,
    bake_done: oneshot::Receiver<()>,
}

/// Chef side of a chef assignment.
#[derive(Debug)]
pub struct BakeOrder {
    customer: CustomerId,
    order_placed: Option<oneshot::Receiver<()>>,
    bake_done: oneshot::Sender<()>,
}

impl Assignment {
    /// Creates both halves of the handshake between `chef` and `customer`.
    pub fn pair(chef: ChefId, customer: CustomerId) -> (Assignment, BakeOrder) {
        let (placed_tx, placed_rx) = oneshot::channel();
        let (done_tx, done_rx) = oneshot::channel();
        (
            Assignment {
                chef,
                customer,
                order_placed: placed_tx,
                bake_done: done_rx,
            },
            BakeOrder {
                customer,
                order_placed: Some(placed_rx),
                bake_done: done_tx,
            },
        )
    }

    pub fn chef(&self) -> ChefId {
        self.chef
    }

    /// Hands the order to the chef. The returned receiver resolves once the cake is baked.
    pub fn place_order(self) -> Result<oneshot::Receiver<()>, FloorError> {
        self.order_placed
            .send(())
            .map_err(|_| FloorError::broken(self.customer, Handshake::OrderPlaced))?;
        Ok(self.bake_done)
    }
}

impl BakeOrder {
    pub fn customer(&self) -> CustomerId {
        self.customer
    }

    /// Waits until the customer has stated its order.
    pub async fn wait_for_order(&mut self) -> Result<(), FloorError> {
        let placed = self
            .order_placed
            .take()
            .ok_or(FloorError::broken(self.customer, Handshake::OrderPlaced))?;
        placed
            .await
            .map_err(FloorError::on_recv(self.customer, Handshake::OrderPlaced))
    }

    /// Tells the customer the cake is ready.
    pub fn finish(self) -> Result<(), FloorError> {
        self.bake_done
            .send(())
            .map_err(|_| FloorError::broken(self.customer, Handshake::BakeDone))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_order_placed_before_chef_waits_is_not_lost() {
        let (assignment, mut order) = Assignment::pair(ChefId(1), CustomerId(9));

        // Customer acknowledges before the chef has started waiting.
        let bake_done = assignment.place_order().unwrap();
        order.wait_for_order().await.unwrap();

        order.finish().unwrap();
        bake_done.await.unwrap();
    }

    #[tokio::test]
    async fn test_vanished_customer_breaks_handshake() {
        let (assignment, mut order) = Assignment::pair(ChefId(2), CustomerId(3));
        drop(assignment);
        assert_eq!(
            order.wait_for_order().await,
            Err(FloorError::HandshakeBroken {
                customer: CustomerId(3),
                handshake: Handshake::OrderPlaced
            })
        );
    }
}
