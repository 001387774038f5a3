//! Record projections for the two remote collections.
//!
//! The client never holds authoritative copies of these records: every
//! in-memory list is a disposable cache valid only until the next fetch.

pub mod cart;
pub mod product;

pub use cart::{CartEntry, CartEntryRow, CartEntryView, NewCartEntry};
pub use product::{NewProduct, Product};
