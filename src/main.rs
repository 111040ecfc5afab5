use bakery_sim::clock::ScaledClock;
use bakery_sim::config::BakeryConfig;
use bakery_sim::lifecycle::{setup_tracing, BakerySystem};
use bakery_sim::schedule::Schedule;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();
    let config = BakeryConfig::from_env().map_err(|e| e.to_string())?;

    println!("Welcome to the bakery! Enter your orders:");
    let schedule = Schedule::read(std::io::stdin().lock()).map_err(|e| e.to_string())?;
    let Some(baseline) = schedule.baseline() else {
        return Ok(());
    };
    info!(arrivals = schedule.len(), baseline, "Schedule loaded");

    let clock = Arc::new(ScaledClock::start(baseline, config.time_unit));
    let (mut system, mut events) = BakerySystem::start(config, clock).map_err(|e| e.to_string())?;

    // Print the transcript as it happens.
    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            if let Some(line) = event.transcript_line() {
                println!("{line}");
            }
        }
    });

    system.run_schedule(&schedule).await;
    let summary = system.shutdown().await?;
    printer.await.map_err(|e| e.to_string())?;

    info!(served = summary.served, rejected = summary.rejected, "Run complete");
    println!("All orders processed. Bakery is closing. Thank you!");
    Ok(())
}
