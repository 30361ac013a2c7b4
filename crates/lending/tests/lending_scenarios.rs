//! Black-box lending scenarios through the public API only.

use std::sync::Arc;

use shelfkeep_events::{EventBus, InMemoryEventBus};
use shelfkeep_lending::{
    Catalog, CatalogError, Describe, Item, LoanError, LoanEvent, LoanOutcome, User,
};

#[test]
fn dune_and_wired_scenario() {
    let mut catalog = Catalog::new();
    let dune = catalog.add_item(Item::book("Dune", "Herbert", 1965, 412).unwrap());
    let wired = catalog.add_item(Item::magazine("Wired", "Staff", 2021, "March").unwrap());
    let alice = catalog.register_user(User::new("Alice").unwrap());
    let bob = catalog.register_user(User::new("Bob").unwrap());

    let first = catalog.borrow_item(alice, dune).unwrap();
    assert!(first.is_completed());
    assert!(catalog.item(dune).unwrap().is_borrowed());

    let second = catalog.borrow_item(bob, dune).unwrap();
    assert!(matches!(
        second,
        LoanOutcome::Declined(LoanError::AlreadyBorrowed { .. })
    ));
    assert!(catalog.user(alice).unwrap().holds(dune));
    assert!(catalog.user(bob).unwrap().list_borrowed_items().is_empty());

    let back = catalog.return_item(alice, dune).unwrap();
    assert!(back.is_completed());
    assert!(!catalog.item(dune).unwrap().is_borrowed());

    let available: Vec<String> = catalog
        .list_available_items()
        .iter()
        .map(|item| item.describe())
        .collect();
    assert_eq!(
        available,
        vec![
            "Book: Dune, Author: Herbert, Year: 1965, Pages: 412".to_string(),
            "Magazine: Wired, Author: Staff, Year: 2021, Issue: March".to_string(),
        ]
    );
    assert!(catalog.borrowed_summary().is_empty());
    assert!(catalog.contains(wired));
    catalog.audit().unwrap();
}

#[test]
fn failed_requests_do_not_abort_a_batch() {
    let mut catalog = Catalog::new();
    let book = catalog.add_item(Item::book("The Hunger Games", "Suzanne Collins", 2008, 374).unwrap());
    let sofia = catalog.register_user(User::new("Sofia").unwrap());
    let nikita = catalog.register_user(User::new("Nikita").unwrap());

    let batch = [(sofia, book), (nikita, book), (sofia, book)];
    let outcomes: Vec<bool> = batch
        .iter()
        .map(|(user, item)| catalog.borrow_item(*user, *item).unwrap().is_completed())
        .collect();

    assert_eq!(outcomes, vec![true, false, false]);
    assert_eq!(catalog.borrowed_summary().len(), 1);
}

#[test]
fn catalog_refuses_items_it_does_not_own() {
    let mut catalog = Catalog::new();
    let alice = catalog.register_user(User::new("Alice").unwrap());
    let elsewhere = Item::book("Dune", "Herbert", 1965, 412).unwrap();

    let err = catalog.borrow_item(alice, elsewhere.id_typed()).unwrap_err();

    assert_eq!(
        err,
        CatalogError::ItemNotInCatalog {
            item_id: elsewhere.id_typed(),
            title: None,
        }
    );
    assert!(!elsewhere.is_borrowed());
}

#[test]
fn same_title_items_are_lent_independently() {
    let mut catalog = Catalog::new();
    let copy_a = catalog.add_item(Item::book("Dune", "Herbert", 1965, 412).unwrap());
    let copy_b = catalog.add_item(Item::book("Dune", "Herbert", 1965, 412).unwrap());
    let alice = catalog.register_user(User::new("Alice").unwrap());
    let bob = catalog.register_user(User::new("Bob").unwrap());

    assert!(catalog.borrow_item(alice, copy_a).unwrap().is_completed());
    assert!(catalog.borrow_item(bob, copy_b).unwrap().is_completed());

    let outcome = catalog.return_item(bob, copy_a).unwrap();
    assert!(matches!(
        outcome,
        LoanOutcome::Declined(LoanError::NotHeldByUser { .. })
    ));
    catalog.audit().unwrap();
}

#[test]
fn confirmations_reach_subscribers() {
    let bus = Arc::new(InMemoryEventBus::<LoanEvent>::new());
    let subscription = bus.subscribe();
    let mut catalog = Catalog::new().with_bus(bus);
    let mag = catalog.add_item(Item::magazine("Vogue on location", "Collectif", 2019, "October").unwrap());
    let nikita = catalog.register_user(User::new("Nikita").unwrap());

    catalog.borrow_item(nikita, mag).unwrap();

    let events = subscription.drain();
    assert_eq!(events.len(), 1);
    match &events[0] {
        LoanEvent::ItemBorrowed(e) => {
            assert_eq!(e.title, "Vogue on location");
            assert_eq!(e.user_name, "Nikita");
            assert_eq!(e.user_id, nikita);
        }
        other => panic!("Expected ItemBorrowed, got {other:?}"),
    }
}

#[test]
fn loans_made_before_registration_are_tracked_once() {
    let mut alice = User::new("Alice").unwrap();
    let mut dune = Item::book("Dune", "Herbert", 1965, 412).unwrap();
    alice.borrow(&mut dune).unwrap();

    let mut catalog = Catalog::new();
    let dune_id = catalog.add_item(dune);
    let alice_id = catalog.register_user(alice);
    let bob_id = catalog.register_user(User::new("Bob").unwrap());

    let summary = catalog.borrowed_summary();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0].0.id_typed(), dune_id);
    assert_eq!(summary[0].1.id_typed(), alice_id);
    catalog.audit().unwrap();

    assert!(!catalog.borrow_item(bob_id, dune_id).unwrap().is_completed());
    assert!(catalog.return_item(alice_id, dune_id).unwrap().is_completed());
    assert!(!catalog.item(dune_id).unwrap().is_borrowed());
    assert!(catalog.borrowed_summary().is_empty());
    catalog.audit().unwrap();
}

#[test]
fn loans_of_items_the_catalog_never_stored_are_left_out_of_queries() {
    let mut alice = User::new("Alice").unwrap();
    let mut elsewhere = Item::book("Dune", "Herbert", 1965, 412).unwrap();
    alice.borrow(&mut elsewhere).unwrap();

    let mut catalog = Catalog::new();
    let alice_id = catalog.register_user(alice);

    assert_eq!(
        catalog.user(alice_id).unwrap().list_borrowed_items(),
        &[elsewhere.id_typed()]
    );
    assert!(catalog.borrowed_summary().is_empty());
    assert!(catalog.borrowed_items_of(alice_id).unwrap().is_empty());
    catalog.audit().unwrap();

    let err = catalog.return_item(alice_id, elsewhere.id_typed()).unwrap_err();
    assert_eq!(
        err,
        CatalogError::ItemNotInCatalog {
            item_id: elsewhere.id_typed(),
            title: None,
        }
    );
    assert!(elsewhere.is_borrowed());
}
