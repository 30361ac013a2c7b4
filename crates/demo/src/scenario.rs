//! The scripted demo run: sample data plus a fixed sequence of requests.

use std::sync::Arc;

use anyhow::Context;

use shelfkeep_core::{ItemId, UserId};
use shelfkeep_events::{EventBus, InMemoryEventBus, Subscription};
use shelfkeep_lending::{Catalog, CatalogError, Item, LoanEvent, LoanOutcome, User};

use crate::config::{DemoConfig, OutputMode};
use crate::render;

/// Drives a catalog and collects the transcript lines.
struct Session {
    catalog: Catalog,
    confirmations: Subscription<LoanEvent>,
    output: OutputMode,
    lines: Vec<String>,
}

impl Session {
    fn new(output: OutputMode) -> Self {
        let bus = Arc::new(InMemoryEventBus::<LoanEvent>::new());
        let confirmations = bus.subscribe();
        Self {
            catalog: Catalog::new().with_bus(bus),
            confirmations,
            output,
            lines: Vec::new(),
        }
    }

    fn add(&mut self, item: Item) -> ItemId {
        self.lines.push(render::added(&item));
        self.catalog.add_item(item)
    }

    fn register(&mut self, user: User) -> UserId {
        self.lines.push(render::registered(&user));
        self.catalog.register_user(user)
    }

    fn borrow(&mut self, user: UserId, item: ItemId) {
        let result = self.catalog.borrow_item(user, item);
        self.report(result);
    }

    fn give_back(&mut self, user: UserId, item: ItemId) {
        let result = self.catalog.return_item(user, item);
        self.report(result);
    }

    fn report(&mut self, result: Result<LoanOutcome, CatalogError>) {
        match result {
            Ok(LoanOutcome::Completed(_)) => {
                let confirmed = self.confirmations.drain();
                self.lines.extend(confirmed.iter().map(render::loan_event));
            }
            Ok(LoanOutcome::Declined(reason)) => self.lines.push(render::declined(&reason)),
            Err(err) => self.lines.push(render::catalog_error(&err)),
        }
    }

    fn show_user_loans(&mut self, user_id: UserId) -> anyhow::Result<()> {
        let user = self
            .catalog
            .user(user_id)
            .context("demo user missing from catalog")?;
        let loans = self.catalog.borrowed_items_of(user_id)?;
        match self.output {
            OutputMode::Text => self.lines.extend(render::user_loans(user, &loans)),
            OutputMode::Json => {
                let key = format!("{}_loans", user.name().to_lowercase());
                self.lines.push(render::json(&key, &loans)?);
            }
        }
        Ok(())
    }

    fn show_available(&mut self) -> anyhow::Result<()> {
        let available = self.catalog.list_available_items();
        match self.output {
            OutputMode::Text => self.lines.extend(render::available_items(&available)),
            OutputMode::Json => self.lines.push(render::json("available_items", &available)?),
        }
        Ok(())
    }

    fn show_summary(&mut self) -> anyhow::Result<()> {
        let summary = self.catalog.borrowed_summary();
        match self.output {
            OutputMode::Text => self.lines.extend(render::borrowed_summary(&summary)),
            OutputMode::Json => {
                let rows = render::summary_rows(&summary);
                self.lines.push(render::json("borrowed_summary", &rows)?);
            }
        }
        Ok(())
    }
}

/// Run the demo and return the transcript, one entry per output line.
pub fn run(config: &DemoConfig) -> anyhow::Result<Vec<String>> {
    let mut session = Session::new(config.output);

    let fault = session.add(Item::book("The Fault in Our Stars", "John Green", 2012, 313)?);
    let potter = session.add(Item::book(
        "Harry Potter and the Sorcerer's Stone",
        "J.K Rowling, Olly Moss",
        1997,
        333,
    )?);
    session.add(Item::book("The Hunger Games", "Suzanne Collins", 2008, 374)?);
    let vogue = session.add(Item::magazine("Vogue on location", "Collectif", 2019, "October")?);
    session.add(Item::magazine("Vogue and the met", "Malle Chloe", 2020, "May")?);

    let sofia = session.register(User::new("Sofia")?);
    let nikita = session.register(User::new("Nikita")?);

    session.borrow(sofia, fault);
    session.borrow(nikita, vogue);
    session.borrow(sofia, potter);
    session.borrow(nikita, fault);

    session.show_user_loans(sofia)?;
    session.show_user_loans(nikita)?;

    session.give_back(sofia, fault);

    session.show_available()?;
    session.show_summary()?;

    session.catalog.audit()?;
    Ok(session.lines)
}
