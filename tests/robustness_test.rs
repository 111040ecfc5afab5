use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bakery_sim::clock::{Clock, ScaledClock};
use bakery_sim::config::{BakeryConfig, StagePauses};
use bakery_sim::lifecycle::{simulate, BakerySystem};
use bakery_sim::model::{Action, CustomerId, CustomerState, SimTime};
use bakery_sim::schedule::Schedule;

/// Far longer than any run here takes; with paused time a hang shows up as a timeout.
const DEADLINE: Duration = Duration::from_secs(3600);

/// Delegates to a [`ScaledClock`] but panics the first time a pause of `fault` units is requested.
struct FaultyClock {
    inner: ScaledClock,
    fault: u64,
    tripped: AtomicBool,
}

#[async_trait]
impl Clock for FaultyClock {
    fn now(&self) -> SimTime {
        self.inner.now()
    }

    async fn pause(&self, units: u64) {
        if units == self.fault && !self.tripped.swap(true, Ordering::SeqCst) {
            panic!("clock fault during a {units}-unit pause");
        }
        self.inner.pause(units).await;
    }

    async fn wait_until(&self, time: SimTime) {
        self.inner.wait_until(time).await;
    }
}

/// Two arrivals with the same id are two separate visits, and both are served.
#[tokio::test(start_paused = true)]
async fn test_repeated_customer_id_is_served_twice() {
    let schedule = Schedule::parse("0 Customer 1\n0 Customer 1\n<EOF>\n");
    let (summary, events) = tokio::time::timeout(DEADLINE, simulate(BakeryConfig::default(), &schedule))
        .await
        .expect("Run did not terminate")
        .expect("Simulation failed");

    assert_eq!(summary.served, 2);
    let left = events
        .iter()
        .filter(|e| e.customer_id() == Some(CustomerId(1)) && e.action == Action::Customer(CustomerState::Left))
        .count();
    assert_eq!(left, 2);
}

/// Repeated ids also share the standing queue and the payment queue without conflict.
#[tokio::test(start_paused = true)]
async fn test_repeated_customer_id_through_every_queue() {
    let config = BakeryConfig::default().with_seat_capacity(1).with_chef_count(1);
    let text: String = (0..5).map(|t| format!("{} Customer 42\n", t % 2)).collect();
    let (summary, events) = tokio::time::timeout(DEADLINE, simulate(config, &Schedule::parse(&text)))
        .await
        .expect("Run did not terminate")
        .expect("Simulation failed");

    assert_eq!(summary.served, 5);
    let stood = events
        .iter()
        .filter(|e| e.action == Action::Customer(CustomerState::Standing))
        .count();
    assert!(stood >= 3, "Only one seat, so most visits should stand");
}

/// A customer task that panics mid-visit still ends the run: the driver gets an error
/// instead of waiting forever, and the chef keeps serving everybody else.
#[tokio::test(start_paused = true)]
async fn test_panicked_customer_does_not_hang_shutdown() {
    // The settle pause is the only 3-unit pause, so exactly one customer trips over it.
    let pauses = StagePauses {
        settle: 3,
        ..StagePauses::default()
    };
    let config = BakeryConfig::default().with_chef_count(1).with_pauses(pauses);
    let clock = Arc::new(FaultyClock {
        inner: ScaledClock::start(0, config.time_unit),
        fault: 3,
        tripped: AtomicBool::new(false),
    });
    let (mut system, mut events) = BakerySystem::start(config, clock).expect("Failed to start");

    system.admit(CustomerId(1));
    system.admit(CustomerId(2));
    let bakery = Arc::clone(system.bakery());

    let result = tokio::time::timeout(DEADLINE, system.shutdown())
        .await
        .expect("Shutdown hung after a customer panicked");

    let err = result.expect_err("A panicked visit must fail the run");
    assert!(err.contains("Customer task failed"), "Unexpected error: {err}");
    assert!(err.contains("not quiescent"), "Unexpected error: {err}");
    assert_eq!(bakery.completions().completed(), 2);

    // The surviving customer was served to the end.
    drop(bakery);
    let mut left = 0;
    while let Ok(event) = events.try_recv() {
        if event.action == Action::Customer(CustomerState::Left) {
            left += 1;
        }
    }
    assert_eq!(left, 1);
}
