//! Trio-level records and the per-family merge.

pub mod merge;
pub mod record;

pub use merge::{merge_family_calls, FamilyCalls};
pub use record::TrioVariantRecord;
