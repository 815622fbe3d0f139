#![doc(test(attr(deny(warnings))))]

//! Pay-cycle bill tracking: projects recurring bills into pay-cycle windows and
//! summarizes what has fallen due and what is still upcoming.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::{
    aggregate, align_to_today, project, shift, window_end, CycleReport, CycleService,
    CycleTotals, CycleTracker, CycleWindow, Occurrence, ShiftDirection,
};
pub use domain::{Bill, BillCategory, PayCycle, RecurrenceRule};
pub use errors::CycleError;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Paycycle core tracing initialized.");
    });
}
