use bakery_sim::config::BakeryConfig;
use bakery_sim::lifecycle::simulate;
use bakery_sim::model::{Action, Actor, BakeryEvent, ChefAction, CustomerId, CustomerState};
use bakery_sim::schedule::Schedule;

// --- Helpers ---

fn customer_states(events: &[BakeryEvent], id: u32) -> Vec<(i64, CustomerState)> {
    events
        .iter()
        .filter_map(|e| match (e.actor, e.action) {
            (Actor::Customer(c), Action::Customer(state)) if c == CustomerId(id) => Some((e.time, state)),
            _ => None,
        })
        .collect()
}

fn customers_reaching(events: &[BakeryEvent], wanted: CustomerState) -> Vec<(i64, CustomerId)> {
    events
        .iter()
        .filter_map(|e| match (e.actor, e.action) {
            (Actor::Customer(c), Action::Customer(state)) if state == wanted => Some((e.time, c)),
            _ => None,
        })
        .collect()
}

fn chef_actions(events: &[BakeryEvent], wanted: ChefAction) -> Vec<(i64, CustomerId)> {
    events
        .iter()
        .filter_map(|e| match e.action {
            Action::Chef(action) if action == wanted => Some((e.time, e.customer_id()?)),
            _ => None,
        })
        .collect()
}

fn simultaneous(count: u32) -> Schedule {
    let text: String = (1..=count).map(|id| format!("0 Customer {id}\n")).collect();
    Schedule::parse(&text)
}

/// A lone customer walks through every stage in order, on the default timings.
#[tokio::test(start_paused = true)]
async fn test_single_customer_full_visit() {
    let (summary, events) = simulate(BakeryConfig::default(), &simultaneous(1))
        .await
        .expect("Simulation failed");

    assert_eq!(summary.served, 1);
    assert_eq!(summary.rejected, 0);

    use CustomerState::*;
    assert_eq!(
        customer_states(&events, 1),
        vec![
            (0, Entered),
            (1, Seated),
            (2, AssignedChef),
            (2, OrderPlaced),
            (5, BakeComplete),
            (6, AwaitingPayment),
            (8, Paid),
            (8, SeatReleased),
            (9, Left),
        ]
    );

    // The serving chef is recorded on every event after assignment.
    let paid = events
        .iter()
        .find(|e| e.action == Action::Customer(Paid))
        .expect("No payment");
    assert!(paid.other.is_some());
}

/// The console transcript reads like the classic bakery log, offset by the baseline.
#[tokio::test(start_paused = true)]
async fn test_transcript_for_one_customer() {
    let config = BakeryConfig::default().with_chef_count(1);
    let schedule = Schedule::parse("10 Customer 4\n<EOF>\n");
    let (_, events) = simulate(config, &schedule).await.expect("Simulation failed");

    let lines: Vec<String> = events.iter().filter_map(BakeryEvent::transcript_line).collect();
    assert_eq!(
        lines,
        vec![
            "10 Customer 4 enters",
            "11 Customer 4 sits",
            "12 Customer 4 requests cake",
            "13 Chef 1 bakes for Customer 4",
            "15 Customer 4 pays",
            "16 Chef 1 accepts payment for Customer 4",
            "18 Customer 4 leaves",
        ]
    );
}

/// Five customers arrive together: four sit, one stands and gets the first freed seat.
#[tokio::test(start_paused = true)]
async fn test_fifth_customer_waits_for_seat() {
    let (summary, events) = simulate(BakeryConfig::default(), &simultaneous(5))
        .await
        .expect("Simulation failed");
    assert_eq!(summary.served, 5);

    let standing = customers_reaching(&events, CustomerState::Standing);
    assert_eq!(standing.len(), 1, "Exactly one customer should stand");
    let (_, standing_id) = standing[0];

    let seated = customers_reaching(&events, CustomerState::Seated);
    assert_eq!(seated.len(), 5);
    let immediate: Vec<_> = seated.iter().filter(|(t, _)| *t == 1).collect();
    assert_eq!(immediate.len(), 4);
    assert!(immediate.iter().all(|(_, id)| *id != standing_id));

    // The standing customer sits down the moment the first seat is released.
    let first_release = events
        .iter()
        .position(|e| e.action == Action::Customer(CustomerState::SeatReleased))
        .expect("No seat released");
    let standing_seated = events
        .iter()
        .position(|e| e.actor == Actor::Customer(standing_id) && e.action == Action::Customer(CustomerState::Seated))
        .expect("Standing customer never sat");
    assert!(standing_seated > first_release);
    assert_eq!(events[standing_seated].time, events[first_release].time);
}

/// Twenty-six customers at once: the shop holds twenty-five, one is turned away.
#[tokio::test(start_paused = true)]
async fn test_twenty_sixth_customer_is_rejected() {
    let (summary, events) = simulate(BakeryConfig::default(), &simultaneous(26))
        .await
        .expect("Simulation failed");

    assert_eq!(summary.rejected, 1);
    assert_eq!(summary.served, 25);

    let rejected = customers_reaching(&events, CustomerState::Rejected);
    assert_eq!(rejected.len(), 1);
    let (_, rejected_id) = rejected[0];

    // Turned away at the door: the rejection is the only thing that ever happens to them.
    assert_eq!(
        customer_states(&events, rejected_id.0),
        vec![(0, CustomerState::Rejected)]
    );
    assert!(events.iter().all(|e| e.actor == Actor::Customer(rejected_id) || e.customer_id() != Some(rejected_id)));
}

/// Two customers finish baking together and queue at the register at the same moment.
#[tokio::test(start_paused = true)]
async fn test_simultaneous_payments_are_serialized_in_queue_order() {
    let config = BakeryConfig::default().with_chef_count(2);
    let (summary, events) = simulate(config, &simultaneous(2)).await.expect("Simulation failed");
    assert_eq!(summary.served, 2);

    let baked = customers_reaching(&events, CustomerState::BakeComplete);
    assert_eq!(baked.len(), 2);
    assert_eq!(baked[0].0, baked[1].0, "Both cakes should finish together");

    let queued: Vec<CustomerId> = customers_reaching(&events, CustomerState::AwaitingPayment)
        .into_iter()
        .map(|(_, id)| id)
        .collect();
    let accepted = chef_actions(&events, ChefAction::PaymentAccepted);
    let accepted_ids: Vec<CustomerId> = accepted.iter().map(|(_, id)| *id).collect();
    assert_eq!(accepted_ids, queued, "Register must follow payment queue order");

    // One at a time: the second transaction starts when the first one ends.
    let payment = BakeryConfig::default().pauses.payment as i64;
    assert_eq!(accepted[1].0 - accepted[0].0, payment);

    let paid = customers_reaching(&events, CustomerState::Paid);
    assert_eq!(paid.len(), 2);
    assert_eq!(paid[0].1, queued[0]);
}

/// Customers standing for a seat are seated in arrival order.
#[tokio::test(start_paused = true)]
async fn test_standing_customers_seated_by_arrival() {
    let config = BakeryConfig::default().with_seat_capacity(1).with_chef_count(1);
    let schedule = Schedule::parse("0 Customer 7\n1 Customer 3\n2 Customer 9\n3 Customer 1\n<EOF>\n");
    let (summary, events) = simulate(config, &schedule).await.expect("Simulation failed");
    assert_eq!(summary.served, 4);

    let seated: Vec<u32> = customers_reaching(&events, CustomerState::Seated)
        .into_iter()
        .map(|(_, id)| id.0)
        .collect();
    assert_eq!(seated, vec![7, 3, 9, 1]);
}

/// An empty schedule opens and closes the bakery without anybody in it.
#[tokio::test(start_paused = true)]
async fn test_empty_schedule() {
    let (summary, events) = simulate(BakeryConfig::default(), &Schedule::parse("<EOF>\n"))
        .await
        .expect("Simulation failed");
    assert_eq!(summary.served + summary.rejected, 0);
    assert_eq!(summary.chefs.len(), 4);
    assert!(events.iter().all(|e| matches!(e.actor, Actor::Chef(_))));
}
