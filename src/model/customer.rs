use serde::{Deserialize, Serialize};
use std::fmt;

use super::{ChefId, SimTime};

/// Identifier of a customer, as given by the arrival schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(pub u32);

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of one admission attempt, unique for the lifetime of a [`Bakery`](crate::floor::Bakery).
///
/// Customer ids come from the input and may repeat; visits never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VisitId(pub u64);

/// A customer on one particular visit. Queues hold visitors, not bare ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Visitor {
    pub visit: VisitId,
    pub customer: CustomerId,
}

impl fmt::Display for Visitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (visit {})", self.customer, self.visit.0)
    }
}

/// Lifecycle state of a customer.
///
/// The happy path is
/// `Arriving → Entered → Seated → AssignedChef → OrderPlaced → BakeComplete →
/// AwaitingPayment → Paid → SeatReleased → Left`, with a detour through `Standing`
/// when the sofa is full. `Rejected` and `Left` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerState {
    Arriving,
    Rejected,
    Entered,
    Standing,
    Seated,
    AssignedChef,
    OrderPlaced,
    BakeComplete,
    AwaitingPayment,
    Paid,
    SeatReleased,
    Left,
}

impl CustomerState {
    /// Whether `next` is a legal successor of `self`.
    pub fn can_advance_to(self, next: CustomerState) -> bool {
        use CustomerState::*;
        matches!(
            (self, next),
            (Arriving, Rejected)
                | (Arriving, Entered)
                | (Entered, Seated)
                | (Entered, Standing)
                | (Standing, Seated)
                | (Seated, AssignedChef)
                | (AssignedChef, OrderPlaced)
                | (OrderPlaced, BakeComplete)
                | (BakeComplete, AwaitingPayment)
                | (AwaitingPayment, Paid)
                | (Paid, SeatReleased)
                | (SeatReleased, Left)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, CustomerState::Rejected | CustomerState::Left)
    }
}

/// A customer as tracked by its own agent task.
///
/// Queue entries and the serving chef only ever refer to a customer by [`CustomerId`];
/// the agent is the sole owner of this struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub id: CustomerId,
    /// Simulated time of admission. `None` until the gate lets the customer in.
    pub arrival: Option<SimTime>,
    pub state: CustomerState,
    /// Set exactly once, when a chef picks this customer off the sofa queue.
    pub chef: Option<ChefId>,
}

impl Customer {
    pub fn new(id: CustomerId) -> Self {
        Self {
            id,
            arrival: None,
            state: CustomerState::Arriving,
            chef: None,
        }
    }

    /// Moves to `next`, returning the previous state, or `Err((from, to))` when the
    /// transition is not part of the lifecycle.
    pub fn advance(&mut self, next: CustomerState) -> Result<CustomerState, (CustomerState, CustomerState)> {
        if !self.state.can_advance_to(next) {
            return Err((self.state, next));
        }
        let previous = self.state;
        self.state = next;
        Ok(previous)
    }

    /// Records the serving chef. Returns `false` if a chef was already assigned.
    pub fn assign_chef(&mut self, chef: ChefId) -> bool {
        if self.chef.is_some() {
            return false;
        }
        self.chef = Some(chef);
        true
    }
}
