#![doc(test(attr(deny(warnings))))]

//! Spending Tracker ties the ledger and budget engine to durable JSON storage,
//! user configuration, file exports, and a command-line front end.

pub mod cli;
pub mod errors;
pub mod export;
pub mod utils;

use std::sync::Once;

pub use errors::AppError;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Spending Tracker tracing initialized.");
    });
}
