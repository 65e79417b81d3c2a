use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

/// Opaque id of a shopping list entry, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemId(Uuid);

impl ItemId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ItemId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppingItem {
    pub id: ItemId,
    pub quantity: Option<f64>,
    pub unit: Option<String>,
    pub name: String,
}

/// Shopping list entries in insertion order
///
/// Entries are never merged: adding the same ingredient twice yields two
/// entries with distinct ids.
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    items: Vec<ShoppingItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_item(
        &mut self,
        quantity: Option<f64>,
        unit: Option<String>,
        name: impl Into<String>,
    ) -> &ShoppingItem {
        self.items.push(ShoppingItem {
            id: ItemId::generate(),
            quantity,
            unit,
            name: name.into(),
        });
        &self.items[self.items.len() - 1]
    }

    /// Overwrite an entry's quantity; the value is stored as given
    ///
    /// Returns `false` when no entry has this id.
    pub fn update_count(&mut self, id: &ItemId, quantity: f64) -> bool {
        match self.items.iter_mut().find(|item| item.id == *id) {
            Some(item) => {
                item.quantity = Some(quantity);
                true
            }
            None => false,
        }
    }

    /// Remove an entry; returns it, or `None` when no entry has this id
    pub fn delete_item(&mut self, id: &ItemId) -> Option<ShoppingItem> {
        let index = self.items.iter().position(|item| item.id == *id)?;
        Some(self.items.remove(index))
    }

    pub fn get(&self, id: &ItemId) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    pub fn items(&self) -> &[ShoppingItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_then_delete_leaves_list_empty() {
        let mut list = ShoppingList::new();
        let id = list.add_item(Some(2.0), Some("cup".to_string()), "flour").id;
        assert_eq!(list.len(), 1);

        let removed = list.delete_item(&id).unwrap();
        assert_eq!(removed.name, "flour");
        assert!(list.is_empty());
    }

    #[test]
    fn test_identical_items_get_distinct_ids() {
        let mut list = ShoppingList::new();
        let first = list.add_item(Some(1.0), None, "egg").id;
        let second = list.add_item(Some(1.0), None, "egg").id;
        assert_ne!(first, second);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_update_count_unknown_id_is_noop() {
        let mut list = ShoppingList::new();
        list.add_item(Some(1.0), None, "milk");
        let before = list.items().to_vec();

        assert!(!list.update_count(&ItemId::generate(), 5.0));
        assert_eq!(list.items(), before.as_slice());
    }

    #[test]
    fn test_update_count_stores_value_as_given() {
        let mut list = ShoppingList::new();
        let id = list.add_item(None, None, "salt").id;

        assert!(list.update_count(&id, -3.0));
        assert_eq!(list.get(&id).unwrap().quantity, Some(-3.0));

        assert!(list.update_count(&id, f64::NAN));
        assert!(list.get(&id).unwrap().quantity.unwrap().is_nan());
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut list = ShoppingList::new();
        list.add_item(Some(1.0), None, "butter");
        assert!(list.delete_item(&ItemId::generate()).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_insertion_order_survives_deletion() {
        let mut list = ShoppingList::new();
        let a = list.add_item(None, None, "a").id;
        list.add_item(None, None, "b");
        list.add_item(None, None, "c");
        list.delete_item(&a);
        let d = list.add_item(None, None, "d").id;

        let names: Vec<&str> = list.items().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["b", "c", "d"]);
        assert_ne!(a, d);
    }

    #[test]
    fn test_item_id_round_trips_through_text() {
        let id = ItemId::generate();
        let parsed: ItemId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert!("not-an-id".parse::<ItemId>().is_err());
    }
}
