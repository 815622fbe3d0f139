//! Projection engine: window alignment, per-bill occurrence expansion and totals.
//! Everything here is a pure function of its inputs apart from [`clock::SystemClock`].

pub mod aggregation;
pub mod clock;
pub mod projection;
pub mod services;
pub mod tracker;
pub mod window;

pub use aggregation::{
    aggregate, Aggregation, CycleTotals, Occurrence, OccurrenceStatus, SkippedBill,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use projection::{occurrence_count, project};
pub use services::{CycleReport, CycleService};
pub use tracker::CycleTracker;
pub use window::{align_to_today, shift, window_end, CycleWindow, ShiftDirection};
