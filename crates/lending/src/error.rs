//! Lending failures.
//!
//! Two families, with different propagation rules:
//! - [`LoanError`]: routine outcomes of the borrow/return protocol. A direct
//!   `User` call returns them as `Err`; the `Catalog` recovers them into
//!   [`crate::LoanOutcome::Declined`].
//! - [`CatalogError`]: the catalog cannot service the request at all. Always
//!   propagated to the caller.

use thiserror::Error;

use shelfkeep_core::{ItemId, UserId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoanError {
    /// The item's borrowed flag is already set, whoever holds it.
    #[error("{title} is already borrowed by someone else")]
    AlreadyBorrowed { item_id: ItemId, title: String },

    /// The item is not in this user's loan collection.
    #[error("{title} is not borrowed by {user}")]
    NotHeldByUser {
        item_id: ItemId,
        title: String,
        user: String,
    },
}

impl LoanError {
    pub fn item_id(&self) -> ItemId {
        match self {
            LoanError::AlreadyBorrowed { item_id, .. } => *item_id,
            LoanError::NotHeldByUser { item_id, .. } => *item_id,
        }
    }
}

/// `title` is known when the catalog has a record of the item (for example
/// one removed earlier) and `None` for ids it has never stored.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// Loan requested for an item that is not a current catalog member.
    #[error("{} is not available in the library", item_label(.item_id, .title))]
    ItemNotInCatalog {
        item_id: ItemId,
        title: Option<String>,
    },

    /// Removal requested for an item that is not a current catalog member.
    #[error("{} not found in library collection", item_label(.item_id, .title))]
    ItemNotFound {
        item_id: ItemId,
        title: Option<String>,
    },

    /// The user handle was never registered with this catalog.
    #[error("user {user_id} is not registered")]
    UserNotRegistered { user_id: UserId },
}

fn item_label(item_id: &ItemId, title: &Option<String>) -> String {
    match title {
        Some(title) => title.clone(),
        None => format!("item {item_id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_name_the_title_when_known() {
        let err = CatalogError::ItemNotInCatalog {
            item_id: ItemId::new(),
            title: Some("Dune".to_string()),
        };
        assert_eq!(err.to_string(), "Dune is not available in the library");
    }

    #[test]
    fn catalog_errors_fall_back_to_the_id() {
        let item_id = ItemId::new();
        let err = CatalogError::ItemNotFound { item_id, title: None };
        assert_eq!(
            err.to_string(),
            format!("item {item_id} not found in library collection")
        );
    }
}
