//! Console rendering of lending results.

use serde::Serialize;

use shelfkeep_lending::{CatalogError, Describe, Item, LoanError, LoanEvent, User};

fn bulleted(heading: String, empty: String, rows: Vec<String>) -> Vec<String> {
    if rows.is_empty() {
        return vec![empty];
    }
    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(heading);
    lines.extend(rows.into_iter().map(|row| format!(" - {row}")));
    lines
}

pub fn added(item: &Item) -> String {
    format!("Added {} to the library.", item.title())
}

pub fn registered(user: &User) -> String {
    format!("Registered user: {}", user.name())
}

pub fn loan_event(event: &LoanEvent) -> String {
    match event {
        LoanEvent::ItemBorrowed(e) => format!("{} borrowed {}.", e.user_name, e.title),
        LoanEvent::ItemReturned(e) => format!("{} returned {}.", e.user_name, e.title),
    }
}

pub fn declined(reason: &LoanError) -> String {
    format!("{reason}.")
}

pub fn catalog_error(err: &CatalogError) -> String {
    format!("{err}.")
}

pub fn items(items: &[&Item]) -> Vec<String> {
    bulleted(
        "Library items:".to_string(),
        "No items in the library.".to_string(),
        items.iter().map(|item| item.describe()).collect(),
    )
}

pub fn available_items(items: &[&Item]) -> Vec<String> {
    bulleted(
        "Available items:".to_string(),
        "No items are currently available.".to_string(),
        items.iter().map(|item| item.describe()).collect(),
    )
}

pub fn user_loans(user: &User, items: &[&Item]) -> Vec<String> {
    bulleted(
        format!("{} has borrowed the following items:", user.name()),
        format!("{} has not borrowed any items.", user.name()),
        items.iter().map(|item| item.describe()).collect(),
    )
}

pub fn borrowed_summary(summary: &[(&Item, &User)]) -> Vec<String> {
    bulleted(
        "Borrowed Items Summary:".to_string(),
        "No items are currently borrowed.".to_string(),
        summary
            .iter()
            .map(|(item, user)| format!("{} is borrowed by {}", item.title(), user.name()))
            .collect(),
    )
}

/// JSON row for one outstanding loan.
#[derive(Debug, Serialize)]
pub struct SummaryRow<'a> {
    pub item: &'a Item,
    pub borrower: &'a str,
}

pub fn summary_rows<'a>(summary: &[(&'a Item, &'a User)]) -> Vec<SummaryRow<'a>> {
    summary
        .iter()
        .map(|&(item, user)| SummaryRow {
            item,
            borrower: user.name(),
        })
        .collect()
}

/// Serialize a query result as a single JSON line, tagged with its name.
pub fn json<T: Serialize + ?Sized>(name: &str, value: &T) -> serde_json::Result<String> {
    let mut tagged = serde_json::Map::new();
    tagged.insert(name.to_string(), serde_json::to_value(value)?);
    serde_json::to_string(&serde_json::Value::Object(tagged))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_listings_use_their_own_message() {
        assert_eq!(items(&[]), vec!["No items in the library."]);
        assert_eq!(available_items(&[]), vec!["No items are currently available."]);
        assert_eq!(borrowed_summary(&[]), vec!["No items are currently borrowed."]);

        let user = User::new("Sofia").unwrap();
        assert_eq!(user_loans(&user, &[]), vec!["Sofia has not borrowed any items."]);
    }

    #[test]
    fn listings_are_bulleted_under_a_heading() {
        let book = Item::book("Dune", "Herbert", 1965, 412).unwrap();
        assert_eq!(
            items(&[&book]),
            vec![
                "Library items:",
                " - Book: Dune, Author: Herbert, Year: 1965, Pages: 412",
            ]
        );
    }

    #[test]
    fn summary_names_item_and_holder() {
        let book = Item::book("Dune", "Herbert", 1965, 412).unwrap();
        let user = User::new("Alice").unwrap();
        assert_eq!(
            borrowed_summary(&[(&book, &user)]),
            vec!["Borrowed Items Summary:", " - Dune is borrowed by Alice"]
        );
    }

    #[test]
    fn catalog_errors_name_the_item_title() {
        let book = Item::book("Dune", "Herbert", 1965, 412).unwrap();
        let err = CatalogError::ItemNotInCatalog {
            item_id: book.id_typed(),
            title: Some(book.title().to_string()),
        };
        assert_eq!(catalog_error(&err), "Dune is not available in the library.");
    }

    #[test]
    fn json_lines_are_tagged() {
        let book = Item::book("Dune", "Herbert", 1965, 412).unwrap();
        let user = User::new("Alice").unwrap();
        let line = json("borrowed_summary", &summary_rows(&[(&book, &user)])).unwrap();

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        let row = &value["borrowed_summary"][0];
        assert_eq!(row["borrower"], "Alice");
        assert_eq!(row["item"]["title"], "Dune");
        assert_eq!(row["item"]["kind"], "book");
        assert_eq!(row["item"]["pages"], 412);
    }
}
