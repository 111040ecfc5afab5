use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, Instrument};

use crate::chef_actor::{ChefReport, ChefWorker};
use crate::clock::{Clock, ScaledClock};
use crate::config::{BakeryConfig, ConfigError};
use crate::customer_actor::{CustomerAgent, CustomerError, Outcome};
use crate::floor::Bakery;
use crate::model::{BakeryEvent, ChefId, CustomerId};
use crate::schedule::Schedule;

/// Totals for a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub served: usize,
    pub rejected: usize,
    pub chefs: Vec<ChefReport>,
}

/// The runtime orchestrator for one bakery.
///
/// `BakerySystem` is responsible for:
/// - **Lifecycle Management**: starting the chef pool and stopping it once every customer is done
/// - **Arrivals**: spawning one customer task per arrival, on time
/// - **Completion**: waiting on the completion tracker instead of polling
///
/// # Example
///
/// ```ignore
/// let clock = Arc::new(ScaledClock::start(schedule.baseline().unwrap_or(0), config.time_unit));
/// let (mut system, mut events) = BakerySystem::start(config, clock)?;
///
/// system.run_schedule(&schedule).await;
/// let summary = system.shutdown().await?;
/// ```
pub struct BakerySystem {
    bakery: Arc<Bakery>,
    chefs: Vec<JoinHandle<ChefReport>>,
    customers: Vec<JoinHandle<Result<Outcome, CustomerError>>>,
}

impl BakerySystem {
    /// Validates `config`, builds the coordinator and spawns the chef pool.
    ///
    /// Returns the system and the receiving end of its event stream.
    pub fn start(
        config: BakeryConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<BakeryEvent>), ConfigError> {
        config.validate()?;
        let chef_count = config.chef_count;
        let (bakery, events) = Bakery::new(config, clock);

        let chefs = (1..=chef_count as u32)
            .map(|n| tokio::spawn(ChefWorker::new(Arc::clone(&bakery), ChefId(n)).run()))
            .collect();
        info!(chefs = chef_count, "Bakery open");

        Ok((
            Self {
                bakery,
                chefs,
                customers: Vec::new(),
            },
            events,
        ))
    }

    pub fn bakery(&self) -> &Arc<Bakery> {
        &self.bakery
    }

    /// Number of customers spawned so far.
    pub fn admitted(&self) -> usize {
        self.customers.len()
    }

    /// Spawns the task for one arriving customer.
    pub fn admit(&mut self, customer: CustomerId) {
        let agent = CustomerAgent::new(Arc::clone(&self.bakery), customer);
        self.customers.push(tokio::spawn(agent.run()));
    }

    /// Replays `schedule`, spawning each customer when the clock reaches its arrival time.
    #[instrument(skip_all, fields(arrivals = schedule.len()))]
    pub async fn run_schedule(&mut self, schedule: &Schedule) {
        for arrival in schedule.arrivals() {
            self.bakery.clock().wait_until(arrival.time).await;
            self.admit(arrival.customer);
        }
        info!("All arrivals dispatched");
    }

    /// Resolves once every spawned customer has finished its visit.
    pub async fn wait_until_complete(&self) {
        self.bakery.completions().wait_for(self.admitted()).await;
    }

    /// Waits for every customer, raises shutdown and joins all tasks.
    ///
    /// # Returns
    ///
    /// - `Ok(RunSummary)` if every customer and chef finished cleanly
    /// - `Err(String)` if a task failed, panicked, or the shop was not quiescent
    pub async fn shutdown(self) -> Result<RunSummary, String> {
        self.wait_until_complete().await;
        info!(completed = self.bakery.completions().completed(), "All customers done");

        let mut summary = RunSummary {
            served: 0,
            rejected: 0,
            chefs: Vec::new(),
        };
        let mut failures = Vec::new();

        for handle in self.customers {
            match handle.await {
                Ok(Ok(Outcome::Served)) => summary.served += 1,
                Ok(Ok(Outcome::Rejected)) => summary.rejected += 1,
                Ok(Err(e)) => failures.push(format!("Customer failed: {e}")),
                Err(e) => failures.push(format!("Customer task failed: {e:?}")),
            }
        }

        if let Err(e) = self.bakery.begin_shutdown() {
            for chef in &self.chefs {
                chef.abort();
            }
            failures.push(e.to_string());
        }

        for handle in self.chefs {
            match handle.await {
                Ok(report) => summary.chefs.push(report),
                Err(e) if e.is_cancelled() => {}
                Err(e) => failures.push(format!("Chef task failed: {e:?}")),
            }
        }

        if !failures.is_empty() {
            for failure in &failures {
                error!(%failure, "Shutdown problem");
            }
            return Err(failures.join("; "));
        }

        info!(served = summary.served, rejected = summary.rejected, "Bakery closed");
        Ok(summary)
    }
}

/// Runs a whole schedule on a [`ScaledClock`] and collects every event.
pub async fn simulate(config: BakeryConfig, schedule: &Schedule) -> Result<(RunSummary, Vec<BakeryEvent>), String> {
    let clock = Arc::new(ScaledClock::start(schedule.baseline().unwrap_or(0), config.time_unit));
    let (mut system, mut events) = BakerySystem::start(config, clock).map_err(|e| e.to_string())?;

    system
        .run_schedule(schedule)
        .instrument(tracing::info_span!("simulation"))
        .await;
    let summary = system.shutdown().await?;

    let mut collected = Vec::new();
    while let Some(event) = events.recv().await {
        collected.push(event);
    }
    Ok((summary, collected))
}
