//! Lending domain module.
//!
//! Business rules for a lending library: the item catalog, the user registry
//! and the borrow/return protocol linking them. Pure in-memory bookkeeping
//! (no IO, no rendering); callers receive structured results and decide how
//! to present them.

pub mod catalog;
pub mod error;
pub mod event;
pub mod item;
pub mod user;

pub use catalog::{Catalog, LoanOutcome};
pub use error::{CatalogError, LoanError};
pub use event::{ItemBorrowed, ItemReturned, LoanEvent};
pub use item::{BookDetails, Describe, Item, ItemKind, ItemStatus, MagazineDetails};
pub use user::User;
