#![doc(test(attr(deny(warnings))))]

//! Economy Core simulates a small city economy: regions of income-producing
//! buildings, an append-only ledger, loans with daily compounding interest and
//! a simulated calendar that never runs ahead of the real one.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod economy;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Economy Core tracing initialized.");
    });
}
