//! External transport for the sponsorship sheet.
//!
//! `SheetsClient` reads named ranges from the values API and performs
//! assignment writes through the script RPC. `SheetError` is the failure
//! taxonomy shared by every operation in the crate.

pub mod client;
pub mod error;

pub use client::SheetsClient;
pub use error::SheetError;
