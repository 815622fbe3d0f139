pub mod cycle_service;

pub use cycle_service::{CycleReport, CycleService};
