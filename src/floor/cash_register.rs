//! # Cash Register
//!
//! One register, one transaction at a time. The register is a ticket lock: a chef draws
//! a [`RegisterTicket`] at the moment it takes a customer off the payment queue, and
//! transactions run strictly in ticket order. Payments therefore complete in the order
//! customers queued, however many chefs are serving the register.
//!
//! The register is independent of the shop floor lock so a payment in progress never
//! blocks chefs who are baking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tokio::sync::watch;
use tracing::trace;

use super::FloorError;
use crate::model::{ChefId, CustomerId};

/// Place in the register line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RegisterTicket(u64);

#[derive(Debug)]
pub struct CashRegister {
    next_ticket: AtomicU64,
    now_serving: watch::Sender<u64>,
    holder: Mutex<Option<(ChefId, CustomerId)>>,
}

impl Default for CashRegister {
    fn default() -> Self {
        Self::new()
    }
}

impl CashRegister {
    pub fn new() -> Self {
        let (now_serving, _) = watch::channel(0);
        Self {
            next_ticket: AtomicU64::new(0),
            now_serving,
            holder: Mutex::new(None),
        }
    }

    pub fn issue_ticket(&self) -> RegisterTicket {
        RegisterTicket(self.next_ticket.fetch_add(1, Ordering::SeqCst))
    }

    /// Waits for `ticket`'s turn and takes the register. The register is released when
    /// the returned session is dropped.
    pub async fn open(
        &self,
        ticket: RegisterTicket,
        chef: ChefId,
        customer: CustomerId,
    ) -> Result<RegisterSession<'_>, FloorError> {
        let mut turn = self.now_serving.subscribe();
        turn.wait_for(|serving| *serving == ticket.0)
            .await
            .map(|_| ())
            .map_err(|_| FloorError::RegisterClosed)?;

        let mut holder = self.holder.lock().unwrap_or_else(PoisonError::into_inner);
        assert!(
            holder.is_none(),
            "cash register already held by {:?} while chef {chef} opens it for customer {customer}",
            *holder
        );
        *holder = Some((chef, customer));
        trace!(%chef, %customer, ticket = ticket.0, "Register opened");
        Ok(RegisterSession { register: self })
    }

    /// The (chef, customer) pair currently at the register.
    pub fn holder(&self) -> Option<(ChefId, CustomerId)> {
        *self.holder.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Exclusive hold on the register.
#[derive(Debug)]
pub struct RegisterSession<'a> {
    register: &'a CashRegister,
}

impl Drop for RegisterSession<'_> {
    fn drop(&mut self) {
        self.register
            .holder
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        self.register.now_serving.send_modify(|serving| *serving += 1);
    }
}
