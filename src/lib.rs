//! # Bakery Sim
//!
//! > **Customers, chefs, a sofa and one cash register, coordinated without races.**
//!
//! This crate is the synchronization core of a small bakery simulation built on Tokio.
//! Up to 25 customers may be inside, four of them on the sofa, while a pool of chefs
//! bakes cakes and takes payments at a single register.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### One Coordinator, Many Handshakes
//!
//! All shared state (who is inside, who holds a seat, the three queues) lives in one
//! [`Bakery`](floor::Bakery) behind one lock. Tasks never wait on that lock for long and
//! never hold it across an `.await`. Waiting happens on purpose-built signals:
//! - a single **broadcast** ("work may be available") that idle chefs sleep on,
//! - **one-shot channels** for every point-to-point wake: seat granted, chef assigned,
//!   order placed, cake baked, payment done.
//!
//! A one-shot channel keeps its value until the receiver looks, so no acknowledgement can
//! be lost because the other side was not waiting yet.
//!
//! ### Scheduling Rules
//! - **Payments first**: a free chef always serves the register queue before baking.
//! - **Fair seating**: a freed seat goes straight to the earliest-arrived standing
//!   customer (ties by arrival order), never to a newcomer.
//! - **Ordered register**: payments go through one at a time, in queue order.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Core ([`floor`])
//! Admission gate, seating area, order board, cash register, completion tracker and the
//! [`Bakery`](floor::Bakery) coordinator that ties them together.
//!
//! ### 2. The Actors ([`customer_actor`], [`chef_actor`])
//! - [`CustomerAgent`](customer_actor::CustomerAgent): one task per customer, a state machine from arrival to departure.
//! - [`ChefWorker`](chef_actor::ChefWorker): one task per chef, looping until shutdown.
//!
//! ### 3. The Orchestrator ([`lifecycle`])
//! [`BakerySystem`](lifecycle::BakerySystem) spawns the chefs, replays arrivals on time,
//! waits for every visit to finish and shuts down cleanly.
//!
//! ### 4. The Edges ([`schedule`], [`clock`], [`config`], [`model`])
//! Input parsing, simulated time, configuration and the event types the transcript is
//! rendered from.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! printf '0 Customer 1\n0 Customer 2\n3 Customer 3\n<EOF>\n' | RUST_LOG=info cargo run
//! ```
//!
//! Set `BAKERY_TIME_UNIT_MS=100` to run ten times faster than real time.
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod chef_actor;
pub mod clock;
pub mod config;
pub mod customer_actor;
pub mod floor;
pub mod lifecycle;
pub mod model;
pub mod schedule;
