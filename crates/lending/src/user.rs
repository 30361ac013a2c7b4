use chrono::Utc;
use serde::Serialize;

use shelfkeep_core::error::ensure_not_blank;
use shelfkeep_core::{DomainResult, Entity, ItemId, UserId};

use crate::error::LoanError;
use crate::event::{ItemBorrowed, ItemReturned, LoanEvent};
use crate::item::Item;

/// A library user and the items currently checked out to them.
///
/// The loan collection is a set of item identities kept in borrow order.
/// Every id in it refers to an item whose borrowed flag is set, and no other
/// user holds the same id.
///
/// `User` is not `Clone`: a copy would carry the same id and loans, and two
/// registered copies would both hold the same item.
///
/// ```compile_fail
/// let user = shelfkeep_lending::User::new("Alice").unwrap();
/// let copy = user.clone();
/// ```
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct User {
    id: UserId,
    name: String,
    loans: Vec<ItemId>,
}

impl User {
    /// Create a user with an empty loan collection. Fails on a blank name.
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        ensure_not_blank("name", &name)?;
        Ok(Self {
            id: UserId::new(),
            name,
            loans: Vec::new(),
        })
    }

    pub fn id_typed(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Items currently held, in the order they were borrowed.
    pub fn list_borrowed_items(&self) -> &[ItemId] {
        &self.loans
    }

    pub fn holds(&self, item_id: ItemId) -> bool {
        self.loans.contains(&item_id)
    }

    /// Check the item out to this user.
    ///
    /// Refused with [`LoanError::AlreadyBorrowed`] whenever the item's flag is
    /// set, including when this same user is the holder.
    pub fn borrow(&mut self, item: &mut Item) -> Result<LoanEvent, LoanError> {
        if item.is_borrowed() {
            return Err(LoanError::AlreadyBorrowed {
                item_id: item.id_typed(),
                title: item.title().to_string(),
            });
        }

        self.loans.push(item.id_typed());
        item.mark_borrowed();

        Ok(LoanEvent::ItemBorrowed(ItemBorrowed {
            item_id: item.id_typed(),
            user_id: self.id,
            title: item.title().to_string(),
            user_name: self.name.clone(),
            occurred_at: Utc::now(),
        }))
    }

    /// Give the item back.
    ///
    /// Checked against this user's own loans, not the global flag: an item
    /// held by someone else fails with [`LoanError::NotHeldByUser`].
    pub fn return_item(&mut self, item: &mut Item) -> Result<LoanEvent, LoanError> {
        let item_id = item.id_typed();
        let Some(pos) = self.loans.iter().position(|id| *id == item_id) else {
            return Err(LoanError::NotHeldByUser {
                item_id,
                title: item.title().to_string(),
                user: self.name.clone(),
            });
        };

        self.loans.remove(pos);
        item.mark_returned();

        Ok(LoanEvent::ItemReturned(ItemReturned {
            item_id,
            user_id: self.id,
            title: item.title().to_string(),
            user_name: self.name.clone(),
            occurred_at: Utc::now(),
        }))
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
