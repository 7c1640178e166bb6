pub mod aggregate;
pub mod error;
pub mod ledger;
pub mod models;
pub mod openfoodfacts;
pub mod presets;
pub mod staging;

pub use error::{LedgerError, RemoteError};
pub use ledger::{Ledger, LedgerStore};
pub use models::{DateRollup, Entry, MacroTotals, NewEntry};
pub use staging::{StagedImport, StagingSlot};
