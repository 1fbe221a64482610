//! Data structures and types

pub mod error;
pub mod lookup;
pub mod responses;

pub use error::{GuardError, Result};
pub use lookup::{LookupDetails, LookupRecord, NewLookup, NormalizedLookup, Reputation, ScanRow};
