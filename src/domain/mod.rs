//! Bill and pay-cycle records as handed over by the record store, plus the
//! recurrence rules and category tags they carry. No I/O lives here.

pub mod bill;
pub mod category;
pub mod common;
pub mod pay_cycle;
pub mod recurrence;

pub use bill::Bill;
pub use category::{BillCategory, StyleToken};
pub use common::{Amounted, Displayable, Identifiable, NamedEntity, OwnedByUser};
pub use pay_cycle::{PayCycle, PayCyclePreset};
pub use recurrence::RecurrenceRule;
