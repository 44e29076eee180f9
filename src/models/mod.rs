//! Domain models for sponsorship data.
//!
//! - `Merchant`: a sheet row materialized into a record, with the
//!   configurable column mapping and address synthesis
//! - `Volunteer`: derived from the assignee column, never persisted

pub mod merchant;
pub mod volunteer;

pub use merchant::{
    format_address, merchant_from_row, AddressColumns, ColumnMap, Merchant,
};
pub use volunteer::{volunteers_from_rows, Volunteer};
