//! # Observability & Tracing
//!
//! [`setup_tracing`] installs structured logging for the whole bakery.
//!
//! ## Configuration
//!
//! Logs go to **stderr** in the compact format without module paths, so stdout carries
//! nothing but the bakery transcript. Verbosity follows `RUST_LOG`:
//!
//! ```bash
//! # Lifecycle only: bakery open, chefs started/stopped, shutdown
//! RUST_LOG=info cargo run < arrivals.txt
//!
//! # Every customer transition and chef action with structured fields
//! RUST_LOG=debug cargo run < arrivals.txt
//!
//! # Also register turns
//! RUST_LOG=trace cargo run < arrivals.txt
//! ```
//!
//! ## What Gets Traced
//!
//! - **Lifecycle**: bakery open, all arrivals dispatched, shutdown raised or refused, bakery closed
//! - **Chefs**: start and stop (with totals) inside a `chef{id=..}` span, each action at `debug`
//! - **Customers**: each state transition at `debug` inside a `customer{id=..}` span
//! - **Input**: skipped arrival lines at `warn`
//!
//! With `RUST_LOG=debug` a single visit reads:
//!
//! ```text
//! DEBUG customer{id=1 visit=0}: Admitted customer=1 arrival=0 inside=1
//! DEBUG customer{id=1 visit=0}: Customer transition time=0 state=Entered chef=None
//! DEBUG customer{id=1 visit=0}: Customer transition time=1 state=Seated chef=None
//! DEBUG chef{id=1}: Chef action time=1 action=AssignedTo customer=Some(CustomerId(1))
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
