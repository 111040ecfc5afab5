//! Observable events emitted by the coordinator.
//!
//! Every customer transition and every chef action produces one [`BakeryEvent`].
//! The core never formats text itself; [`BakeryEvent::transcript_line`] is the
//! presentation helper used by the binary to print the classic bakery log.

use serde::{Deserialize, Serialize};

use super::{ChefId, CustomerId, CustomerState, SimTime};

/// Who performed an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actor {
    Customer(CustomerId),
    Chef(ChefId),
}

/// Something a chef did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChefAction {
    Started,
    AssignedTo,
    BakeStarted,
    BakeFinished,
    PaymentAccepted,
    PaymentFinished,
    ShutDown,
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// The customer entered this state.
    Customer(CustomerState),
    Chef(ChefAction),
}

/// `(simulated_time, actor, action, other party)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BakeryEvent {
    pub time: SimTime,
    pub actor: Actor,
    pub action: Action,
    /// The counterpart, if any: the serving chef for a customer event, the served
    /// customer for a chef event.
    pub other: Option<u32>,
}

impl BakeryEvent {
    pub fn customer(time: SimTime, id: CustomerId, state: CustomerState, chef: Option<ChefId>) -> Self {
        Self {
            time,
            actor: Actor::Customer(id),
            action: Action::Customer(state),
            other: chef.map(|c| c.0),
        }
    }

    pub fn chef(time: SimTime, id: ChefId, action: ChefAction, customer: Option<CustomerId>) -> Self {
        Self {
            time,
            actor: Actor::Chef(id),
            action: Action::Chef(action),
            other: customer.map(|c| c.0),
        }
    }

    /// The customer this event is about, whichever side emitted it.
    pub fn customer_id(&self) -> Option<CustomerId> {
        match self.actor {
            Actor::Customer(id) => Some(id),
            Actor::Chef(_) => self.other.map(CustomerId),
        }
    }

    /// Renders the line the console transcript shows for this event, if it shows one.
    pub fn transcript_line(&self) -> Option<String> {
        let t = self.time;
        match (self.actor, self.action) {
            (Actor::Customer(id), Action::Customer(state)) => {
                let verb = match state {
                    CustomerState::Entered => "enters",
                    CustomerState::Seated => "sits",
                    CustomerState::OrderPlaced => "requests cake",
                    // Announced with the cake in hand, before the walk to the register.
                    CustomerState::BakeComplete => "pays",
                    CustomerState::SeatReleased => "leaves",
                    _ => return None,
                };
                Some(format!("{t} Customer {id} {verb}"))
            }
            (Actor::Chef(id), Action::Chef(action)) => {
                let customer = self.other?;
                match action {
                    ChefAction::BakeStarted => Some(format!("{t} Chef {id} bakes for Customer {customer}")),
                    ChefAction::PaymentAccepted => {
                        Some(format!("{t} Chef {id} accepts payment for Customer {customer}"))
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_lines() {
        let id = CustomerId(12);
        let line = |state| BakeryEvent::customer(5, id, state, None).transcript_line();
        assert_eq!(line(CustomerState::Entered).as_deref(), Some("5 Customer 12 enters"));
        assert_eq!(line(CustomerState::Seated).as_deref(), Some("5 Customer 12 sits"));
        assert_eq!(line(CustomerState::OrderPlaced).as_deref(), Some("5 Customer 12 requests cake"));
        assert_eq!(line(CustomerState::BakeComplete).as_deref(), Some("5 Customer 12 pays"));
        assert_eq!(line(CustomerState::AwaitingPayment), None);
        assert_eq!(line(CustomerState::SeatReleased).as_deref(), Some("5 Customer 12 leaves"));
        assert_eq!(line(CustomerState::Standing), None);
        assert_eq!(line(CustomerState::Rejected), None);
    }

    #[test]
    fn test_chef_lines() {
        let bake = BakeryEvent::chef(9, ChefId(2), ChefAction::BakeStarted, Some(CustomerId(4)));
        assert_eq!(bake.transcript_line().as_deref(), Some("9 Chef 2 bakes for Customer 4"));

        let pay = BakeryEvent::chef(11, ChefId(1), ChefAction::PaymentAccepted, Some(CustomerId(4)));
        assert_eq!(
            pay.transcript_line().as_deref(),
            Some("11 Chef 1 accepts payment for Customer 4")
        );
        assert_eq!(pay.customer_id(), Some(CustomerId(4)));

        let stop = BakeryEvent::chef(20, ChefId(1), ChefAction::ShutDown, None);
        assert_eq!(stop.transcript_line(), None);
    }
}
