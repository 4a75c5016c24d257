//! Traffic Light State Machine
//!
//! This example drives a cyclic machine through a few phases while a
//! listener prints every event it receives.
//!
//! Key concepts:
//! - Cyclic state transitions (states repeat)
//! - A transition action guarded by a recovery
//! - Asynchronous observers
//! - Kill semantics
//!
//! Run with: cargo run --example traffic_light
//! Set RUST_LOG=statekeeper=trace to see ignored triggers as well.

use statekeeper::builder::{recoverable_transition, MachineBuilder};
use statekeeper::{transitions, Event, EventKind, MachineConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("statekeeper=debug,warn"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    println!("=== Traffic Light State Machine ===\n");

    // The lamp controller fails every other switch to yellow; the backup
    // lamp always works.
    let switches = Arc::new(AtomicUsize::new(0));
    let lamp = Arc::clone(&switches);

    let mut machine = MachineBuilder::new()
        .config(MachineConfig::default().with_name("traffic-light"))
        .start("red")
        .transitions(transitions![
            ("red" => "green", "next"),
            ("yellow" => "red", "next"),
        ])
        .add_transition(recoverable_transition(
            "green",
            "yellow",
            "next",
            move || {
                if lamp.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
                    Err("primary yellow lamp did not light".into())
                } else {
                    Ok(())
                }
            },
            || Ok(()),
        ))
        .observer(Arc::new(|event: &Event| match event.kind {
            EventKind::StateReached => println!("  -> {}", event.state),
            EventKind::Inconsistency => println!("  !! {}", event.message),
            EventKind::Killed => println!("  xx stopped in {}", event.state),
        }))
        .build()?;

    machine.run()?;
    println!("Initial state: {}\n", machine.current_state());

    println!("Cycling twice:");
    for _ in 0..6 {
        machine.trigger("next")?;
    }
    // Nothing declares "flash"; the light ignores it.
    machine.trigger("flash")?;

    machine.kill()?;
    machine.join()?;

    println!("\nFinal state: {}", machine.current_state());
    println!(
        "Yellow lamp switched {} times",
        switches.load(Ordering::SeqCst)
    );

    Ok(())
}
