//! # Shop Floor Coordination
//!
//! The synchronization core. Customers and chefs never touch each other's state; they
//! meet only through the [`Bakery`] coordinator and the one-shot handshakes it hands out.
//!
//! # Main Components
//!
//! - [`AdmissionGate`] - caps how many customers are inside
//! - [`SeatingArea`] - the sofa, the seated-unserved queue and the standing queue
//! - [`OrderBoard`] - customers waiting to pay
//! - [`CashRegister`] - single-holder, ticket-ordered register
//! - [`CompletionTracker`] - finished visits, for the driver
//! - [`Assignment`] / [`BakeOrder`] - the customer ↔ chef baking handshake
//! - [`FloorState`] - all of the above that shares the one floor lock
//! - [`Bakery`] - the shared coordinator

pub mod admission;
pub mod bakery;
pub mod cash_register;
pub mod completion;
pub mod error;
pub mod handshake;
pub mod order_board;
pub mod seating;
pub mod state;

pub use admission::*;
pub use bakery::*;
pub use cash_register::*;
pub use completion::*;
pub use error::*;
pub use handshake::*;
pub use order_board::*;
pub use seating::*;
pub use state::*;
