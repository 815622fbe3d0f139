//! Shared traits implemented by the stored records.

use uuid::Uuid;

/// Exposes a stable identifier for records kept in the store.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Provides read-only access to a record's display name.
pub trait NamedEntity {
    fn name(&self) -> &str;
}

/// Links a record to the user account that owns it.
pub trait OwnedByUser {
    fn user_id(&self) -> Uuid;
}

/// Supplies a common contract for retrieving numeric amounts.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Converts a record into a user-facing display label.
pub trait Displayable {
    fn display_label(&self) -> String;
}
