//! Checkout Flow
//!
//! This example drives a multi-step checkout screen.
//!
//! Key concepts:
//! - Hooks that react to entering and leaving a step
//! - A guard that sends anonymous users to a login step first
//! - Sticky per-step data for rendering titles
//! - Back navigation through the history stack
//!
//! Run with: RUST_LOG=uism=debug cargo run --example checkout_flow

use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use uism::builder::{StateBuilder, TableBuilder};
use uism::{GuardDecision, Machine};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Checkout Flow Example ===\n");

    let logged_in = Arc::new(AtomicBool::new(false));
    let session = Arc::clone(&logged_in);

    let table = TableBuilder::new()
        .state(
            "cart",
            StateBuilder::new()
                .on("CHECKOUT", "shipping")
                .data(json!({ "title": "Your cart" })),
        )
        .state(
            "login",
            StateBuilder::new()
                .on("LOGGED_IN", "shipping")
                .enter(move |_, _| {
                    println!("  (login form shown)");
                    session.store(true, Ordering::SeqCst);
                }),
        )
        .state(
            "shipping",
            StateBuilder::new()
                .on("CONTINUE", "payment")
                .data(json!({ "title": "Shipping address" }))
                .leave(|_, payload| println!("  saving address: {payload:?}")),
        )
        .state(
            "payment",
            StateBuilder::new()
                .on("PAY", "confirmed")
                .data(json!({ "title": "Payment" })),
        )
        .state("confirmed", StateBuilder::new())
        .build()
        .expect("checkout table declares states");

    let guard_session = Arc::clone(&logged_in);
    let mut machine = Machine::builder(table)
        .initial("cart")
        .before_each(move |to, _from| {
            if to == "shipping" && !guard_session.load(Ordering::SeqCst) {
                GuardDecision::redirect("login")
            } else {
                GuardDecision::proceed()
            }
        })
        .on_state_change(|change| {
            let title = change
                .data
                .and_then(|data| data.get("title"))
                .and_then(|title| title.as_str())
                .unwrap_or("-");
            println!(
                "-> {} (title: {title}, history depth: {})",
                change.state,
                change.history.len()
            );
        })
        .start()
        .expect("cart is a declared state");

    machine.emit("CHECKOUT", None);
    machine.emit("LOGGED_IN", None);
    machine.emit("CONTINUE", Some(json!({ "street": "1 Main St" })));

    println!("\nAvailable events: {:?}", machine.events().unwrap_or_default());

    println!("\nGoing back...");
    machine.go_to_prev_state(None);

    println!("\nUnknown event (reported, ignored):");
    machine.emit("TELEPORT", None);
    println!("Still at: {:?}", machine.state());

    machine.emit("CONTINUE", None).emit("PAY", None);
    println!("\nApplied events: {:?}", machine.event_log().unwrap_or_default());

    println!("\n=== Example Complete ===");
}
