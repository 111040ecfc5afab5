//! Error types for the customer agent.

use thiserror::Error;

use crate::floor::FloorError;
use crate::model::{ChefId, CustomerId, CustomerState};

/// Errors that can end a customer's visit early.
///
/// Being turned away at the door is not among them: that is
/// [`Outcome::Rejected`](super::Outcome::Rejected).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CustomerError {
    /// The agent tried to skip or repeat a lifecycle stage.
    #[error("Customer {customer}: illegal transition {from:?} -> {to:?}")]
    IllegalTransition {
        customer: CustomerId,
        from: CustomerState,
        to: CustomerState,
    },

    /// A second chef claimed a customer who already had one.
    #[error("Customer {customer} already served by chef {current}, chef {second} tried to take over")]
    ChefReassigned {
        customer: CustomerId,
        current: ChefId,
        second: ChefId,
    },

    /// A coordinator handshake failed.
    #[error(transparent)]
    Floor(#[from] FloorError),
}
