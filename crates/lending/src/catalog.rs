//! The library catalog: aggregate root over items and users.
//!
//! Items live in an arena that only grows; membership of the catalog is a
//! separate insertion-ordered list of ids. Removing an item drops it from the
//! membership list but keeps its record, so a removed item that is still on
//! loan stays resolvable from its holder's loan collection.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use shelfkeep_core::{DomainError, DomainResult, ItemId, UserId};
use shelfkeep_events::{Event, EventBus};

use crate::error::{CatalogError, LoanError};
use crate::event::LoanEvent;
use crate::item::Item;
use crate::user::User;

/// Result of a catalog-mediated borrow or return.
///
/// A refusal by the borrow/return protocol is an expected outcome, reported
/// here rather than as an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanOutcome {
    Completed(LoanEvent),
    Declined(LoanError),
}

impl LoanOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, LoanOutcome::Completed(_))
    }

    pub fn event(&self) -> Option<&LoanEvent> {
        match self {
            LoanOutcome::Completed(event) => Some(event),
            LoanOutcome::Declined(_) => None,
        }
    }

    pub fn declined_reason(&self) -> Option<&LoanError> {
        match self {
            LoanOutcome::Completed(_) => None,
            LoanOutcome::Declined(reason) => Some(reason),
        }
    }
}

#[derive(Default)]
pub struct Catalog {
    /// Every item ever added, including removed ones.
    items: Vec<Item>,
    /// Current members, in insertion order.
    shelf: Vec<ItemId>,
    /// Registered users, in registration order.
    users: Vec<User>,
    bus: Option<Arc<dyn EventBus<LoanEvent>>>,
}

impl fmt::Debug for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Catalog")
            .field("items", &self.items)
            .field("shelf", &self.shelf)
            .field("users", &self.users)
            .field("bus_attached", &self.bus.is_some())
            .finish()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish every completed loan event to `bus`.
    pub fn with_bus(mut self, bus: Arc<dyn EventBus<LoanEvent>>) -> Self {
        self.bus = Some(bus);
        self
    }

    pub fn add_item(&mut self, item: Item) -> ItemId {
        let item_id = item.id_typed();
        info!(item_id = %item_id, title = item.title(), "item added");
        self.shelf.push(item_id);
        self.items.push(item);
        item_id
    }

    /// Take the item out of circulation.
    ///
    /// The borrowed flag and any holder's loan entry are left untouched.
    pub fn remove_item(&mut self, item_id: ItemId) -> Result<(), CatalogError> {
        let pos = self
            .shelf
            .iter()
            .position(|id| *id == item_id)
            .ok_or_else(|| CatalogError::ItemNotFound {
                item_id,
                title: self.title_of(item_id),
            })?;
        self.shelf.remove(pos);

        match self.item(item_id) {
            Some(item) if item.is_borrowed() => {
                warn!(item_id = %item_id, title = item.title(), "removed an item that is still on loan");
            }
            Some(item) => info!(item_id = %item_id, title = item.title(), "item removed"),
            None => info!(item_id = %item_id, "item removed"),
        }
        Ok(())
    }

    pub fn register_user(&mut self, user: User) -> UserId {
        let user_id = user.id_typed();
        info!(user_id = %user_id, name = user.name(), "user registered");
        self.users.push(user);
        user_id
    }

    /// Try to lend `item_id` to `user_id`.
    ///
    /// Fails only when the catalog cannot process the request (item not a
    /// member, user unknown). An item that is already out comes back as
    /// [`LoanOutcome::Declined`].
    pub fn borrow_item(
        &mut self,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<LoanOutcome, CatalogError> {
        if !self.contains(item_id) {
            return Err(CatalogError::ItemNotInCatalog {
                item_id,
                title: self.title_of(item_id),
            });
        }
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id_typed() == user_id)
            .ok_or(CatalogError::UserNotRegistered { user_id })?;
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id_typed() == item_id)
            .ok_or(CatalogError::ItemNotInCatalog {
                item_id,
                title: None,
            })?;

        let outcome = match user.borrow(item) {
            Ok(event) => {
                info!(user_id = %user_id, item_id = %item_id, title = item.title(), "item borrowed");
                LoanOutcome::Completed(event)
            }
            Err(reason) => {
                warn!(user_id = %user_id, item_id = %item_id, reason = %reason, "borrow declined");
                LoanOutcome::Declined(reason)
            }
        };

        if let LoanOutcome::Completed(event) = &outcome {
            self.publish(event);
        }
        Ok(outcome)
    }

    /// Take `item_id` back from `user_id`.
    ///
    /// Catalog membership is not checked, so an item removed while on loan can
    /// still be returned. A user who does not hold the item gets
    /// [`LoanOutcome::Declined`].
    pub fn return_item(
        &mut self,
        user_id: UserId,
        item_id: ItemId,
    ) -> Result<LoanOutcome, CatalogError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id_typed() == user_id)
            .ok_or(CatalogError::UserNotRegistered { user_id })?;
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id_typed() == item_id)
            .ok_or(CatalogError::ItemNotInCatalog {
                item_id,
                title: None,
            })?;

        let outcome = match user.return_item(item) {
            Ok(event) => {
                info!(user_id = %user_id, item_id = %item_id, title = item.title(), "item returned");
                LoanOutcome::Completed(event)
            }
            Err(reason) => {
                warn!(user_id = %user_id, item_id = %item_id, reason = %reason, "return declined");
                LoanOutcome::Declined(reason)
            }
        };

        if let LoanOutcome::Completed(event) = &outcome {
            self.publish(event);
        }
        Ok(outcome)
    }

    /// Whether `item_id` is currently a member of the catalog.
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.shelf.contains(&item_id)
    }

    /// Look up an item record, including items removed while on loan.
    pub fn item(&self, item_id: ItemId) -> Option<&Item> {
        self.items.iter().find(|i| i.id_typed() == item_id)
    }

    pub fn user(&self, user_id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id_typed() == user_id)
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Current members, in insertion order.
    pub fn list_items(&self) -> Vec<&Item> {
        debug!(count = self.shelf.len(), "listing items");
        self.shelf.iter().filter_map(|id| self.item(*id)).collect()
    }

    pub fn list_available_items(&self) -> Vec<&Item> {
        self.list_items()
            .into_iter()
            .filter(|item| !item.is_borrowed())
            .collect()
    }

    /// The items a registered user holds, in borrow order.
    pub fn borrowed_items_of(&self, user_id: UserId) -> Result<Vec<&Item>, CatalogError> {
        let user = self
            .user(user_id)
            .ok_or(CatalogError::UserNotRegistered { user_id })?;
        Ok(self.resolve_loans(user).collect())
    }

    /// Every outstanding loan as `(item, holder)`, by registration order then
    /// borrow order.
    pub fn borrowed_summary(&self) -> Vec<(&Item, &User)> {
        self.users
            .iter()
            .flat_map(move |user| self.resolve_loans(user).map(move |item| (item, user)))
            .collect()
    }

    /// Check that every flagged item has exactly one holder and every
    /// unflagged item has none.
    pub fn audit(&self) -> DomainResult<()> {
        for item in &self.items {
            let holders = self
                .users
                .iter()
                .filter(|u| u.holds(item.id_typed()))
                .count();
            let consistent = if item.is_borrowed() {
                holders == 1
            } else {
                holders == 0
            };
            if !consistent {
                return Err(DomainError::invariant(format!(
                    "item {} (borrowed: {}) has {} holders",
                    item.id_typed(),
                    item.is_borrowed(),
                    holders
                )));
            }
        }
        Ok(())
    }

    fn title_of(&self, item_id: ItemId) -> Option<String> {
        self.item(item_id).map(|item| item.title().to_string())
    }

    fn resolve_loans<'a>(&'a self, user: &'a User) -> impl Iterator<Item = &'a Item> + 'a {
        user.list_borrowed_items().iter().filter_map(move |id| {
            let item = self.item(*id);
            if item.is_none() {
                // Borrowed outside this catalog before the user registered.
                warn!(user_id = %user.id_typed(), item_id = %id, "loan refers to an unknown item");
            }
            item
        })
    }

    fn publish(&self, event: &LoanEvent) {
        let Some(bus) = &self.bus else {
            return;
        };
        if let Err(err) = bus.publish(event.clone()) {
            warn!(event_type = event.event_type(), error = %err, "failed to publish loan event");
        }
    }
}
