//! Error types for the shop floor coordinator.

use std::fmt;
use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;

use super::FloorSnapshot;
use crate::model::CustomerId;

/// The point-to-point handshakes between customers, chefs and the seating area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handshake {
    SeatGrant,
    ChefAssignment,
    OrderPlaced,
    BakeDone,
    PaymentDone,
}

impl fmt::Display for Handshake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Handshake::SeatGrant => "seat grant",
            Handshake::ChefAssignment => "chef assignment",
            Handshake::OrderPlaced => "order placed",
            Handshake::BakeDone => "bake done",
            Handshake::PaymentDone => "payment done",
        };
        f.write_str(name)
    }
}

/// Errors raised by the coordinator.
///
/// None of these occur in a correct run: they report a counterpart task that vanished
/// mid-handshake, or a shutdown requested while work was still in flight.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FloorError {
    /// The other side of a handshake dropped its end of the channel.
    #[error("{handshake} handshake broken for customer {customer}")]
    HandshakeBroken {
        customer: CustomerId,
        handshake: Handshake,
    },

    /// Shutdown was requested while customers or queued work remained.
    #[error("Shop is not quiescent: {0:?}")]
    NotQuiescent(FloorSnapshot),

    /// The cash register stopped serving tickets.
    #[error("Cash register closed")]
    RegisterClosed,
}

impl FloorError {
    pub(crate) fn broken(customer: CustomerId, handshake: Handshake) -> Self {
        FloorError::HandshakeBroken { customer, handshake }
    }

    /// Adapter for `map_err` on a one-shot receive.
    pub(crate) fn on_recv(customer: CustomerId, handshake: Handshake) -> impl FnOnce(RecvError) -> Self {
        move |_| Self::broken(customer, handshake)
    }
}
