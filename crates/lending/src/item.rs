use serde::Serialize;

use shelfkeep_core::error::ensure_not_blank;
use shelfkeep_core::{DomainError, DomainResult, Entity, ItemId};

/// Capability shared by every circulating item: a human-readable summary.
///
/// Consumers (catalog listings, the demo renderer) only rely on this trait,
/// so a new kind of item does not require changes on their side.
pub trait Describe {
    fn describe(&self) -> String;
}

/// Availability of an item, derived from its borrowed flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Available,
    Borrowed,
}

/// Book-only fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookDetails {
    pages: u32,
}

impl BookDetails {
    pub fn pages(&self) -> u32 {
        self.pages
    }
}

/// Magazine-only fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MagazineDetails {
    issue: String,
}

impl MagazineDetails {
    pub fn issue(&self) -> &str {
        &self.issue
    }
}

/// Variant-specific part of an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ItemKind {
    Book(BookDetails),
    Magazine(MagazineDetails),
}

impl ItemKind {
    /// Display label of the variant ("Book", "Magazine").
    pub fn label(&self) -> &'static str {
        match self {
            ItemKind::Book(_) => "Book",
            ItemKind::Magazine(_) => "Magazine",
        }
    }
}

impl Describe for ItemKind {
    fn describe(&self) -> String {
        match self {
            ItemKind::Book(book) => format!("Pages: {}", book.pages),
            ItemKind::Magazine(magazine) => format!("Issue: {}", magazine.issue),
        }
    }
}

/// A circulating item: shared bibliographic record plus its variant.
///
/// The borrowed flag has no public setter. It only changes through
/// [`crate::User::borrow`] and [`crate::User::return_item`], which keep it in
/// step with the holder's loan collection.
///
/// `Item` is deliberately not `Clone`: each value is one physical unit with a
/// unique [`ItemId`].
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct Item {
    id: ItemId,
    title: String,
    author: String,
    year: i32,
    #[serde(flatten)]
    kind: ItemKind,
    borrowed: bool,
}

impl Item {
    /// Create a book. Fails on a blank title or zero pages.
    pub fn book(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        pages: u32,
    ) -> DomainResult<Self> {
        if pages == 0 {
            return Err(DomainError::validation("pages must be positive"));
        }
        Self::new(title.into(), author.into(), year, ItemKind::Book(BookDetails { pages }))
    }

    /// Create a magazine issue. Fails on a blank title.
    pub fn magazine(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        issue: impl Into<String>,
    ) -> DomainResult<Self> {
        let issue = issue.into();
        Self::new(
            title.into(),
            author.into(),
            year,
            ItemKind::Magazine(MagazineDetails { issue }),
        )
    }

    fn new(title: String, author: String, year: i32, kind: ItemKind) -> DomainResult<Self> {
        ensure_not_blank("title", &title)?;
        Ok(Self {
            id: ItemId::new(),
            title,
            author,
            year,
            kind,
            borrowed: false,
        })
    }

    pub fn id_typed(&self) -> ItemId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn is_borrowed(&self) -> bool {
        self.borrowed
    }

    pub fn status(&self) -> ItemStatus {
        if self.borrowed {
            ItemStatus::Borrowed
        } else {
            ItemStatus::Available
        }
    }

    pub(crate) fn mark_borrowed(&mut self) {
        self.borrowed = true;
    }

    pub(crate) fn mark_returned(&mut self) {
        self.borrowed = false;
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Describe for Item {
    fn describe(&self) -> String {
        format!(
            "{}: {}, Author: {}, Year: {}, {}",
            self.kind.label(),
            self.title,
            self.author,
            self.year,
            self.kind.describe()
        )
    }
}
