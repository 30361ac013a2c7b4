use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelfkeep_core::{ItemId, UserId};
use shelfkeep_events::Event;

/// Event: ItemBorrowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemBorrowed {
    pub item_id: ItemId,
    pub user_id: UserId,
    pub title: String,
    pub user_name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemReturned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemReturned {
    pub item_id: ItemId,
    pub user_id: UserId,
    pub title: String,
    pub user_name: String,
    pub occurred_at: DateTime<Utc>,
}

/// Confirmation of a completed borrow or return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoanEvent {
    ItemBorrowed(ItemBorrowed),
    ItemReturned(ItemReturned),
}

impl LoanEvent {
    pub fn item_id(&self) -> ItemId {
        match self {
            LoanEvent::ItemBorrowed(e) => e.item_id,
            LoanEvent::ItemReturned(e) => e.item_id,
        }
    }

    pub fn user_id(&self) -> UserId {
        match self {
            LoanEvent::ItemBorrowed(e) => e.user_id,
            LoanEvent::ItemReturned(e) => e.user_id,
        }
    }
}

impl Event for LoanEvent {
    fn event_type(&self) -> &'static str {
        match self {
            LoanEvent::ItemBorrowed(_) => "lending.item.borrowed",
            LoanEvent::ItemReturned(_) => "lending.item.returned",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            LoanEvent::ItemBorrowed(e) => e.occurred_at,
            LoanEvent::ItemReturned(e) => e.occurred_at,
        }
    }
}
