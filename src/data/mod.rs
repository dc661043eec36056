//! Data module - roster loading, auditing, cleaning, transforming and writing

pub mod audit;
pub mod cleaner;
pub mod loader;
pub mod transformer;
pub mod writer;

pub use audit::{audit, AuditReport};
pub use cleaner::{clean, CleanError};
pub use loader::{load_roster, LoaderError};
pub use transformer::{add_percentage, TransformError};
pub use writer::{write_roster, WriteError};
