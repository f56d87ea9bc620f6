//! Folding joined rows back into products.

use std::collections::HashMap;
use std::hash::Hash;

use crate::model::{Product, ProductId, ProductRow};

/// Insertion-ordered accumulator keyed by identity.
///
/// Items are kept in an append-only list in first-seen order; the map only
/// locates an item by key and is never iterated.
#[derive(Debug, Clone)]
pub struct Collapser<K, T> {
    items: Vec<T>,
    index: HashMap<K, usize>,
}

impl<K, T> Default for Collapser<K, T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, T> Collapser<K, T> {
    /// Creates an empty collapser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the item for `key`, appending `init()` on first sight.
    pub fn entry(&mut self, key: K, init: impl FnOnce() -> T) -> &mut T {
        let position = match self.index.get(&key) {
            Some(&position) => position,
            None => {
                let position = self.items.len();
                self.items.push(init());
                self.index.insert(key, position);
                position
            }
        };
        &mut self.items[position]
    }

    /// Returns the number of distinct items.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether nothing was collected.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the items in first-seen order.
    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

/// Collapses joined rows into products, preserving first-seen order.
///
/// The brand is taken from the first row of each product; variations are
/// appended in row order.
pub fn collapse_rows(rows: impl IntoIterator<Item = ProductRow>) -> Vec<Product> {
    let mut collapser: Collapser<ProductId, Product> = Collapser::new();
    for row in rows {
        let product = collapser.entry(row.id, || row.to_product());
        if let Some(variation) = row.variation {
            product.variations.push(variation);
        }
    }
    collapser.into_vec()
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::model::{Brand, Variation};

    fn row(id: i64, variation: Option<Variation>) -> ProductRow {
        let created_at: Timestamp = "2022-05-23T13:29:16Z".parse().unwrap();
        ProductRow {
            id: ProductId(id),
            created_at,
            name: format!("P{id}"),
            price: 100,
            brand: Some(Brand::new(1, "Nike")),
            variation,
        }
    }

    #[test]
    fn collapses_rows_in_first_seen_order() {
        let v1 = Variation::new(1, "S", 2);
        let v2 = Variation::new(2, "M", 4);
        let rows = vec![
            row(1, Some(v1.clone())),
            row(1, Some(v2.clone())),
            row(2, None),
        ];

        let products = collapse_rows(rows);
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].id, ProductId(1));
        assert_eq!(products[0].variations, vec![v1, v2]);
        assert_eq!(products[0].brand, Some(Brand::new(1, "Nike")));
        assert_eq!(products[1].id, ProductId(2));
        assert!(products[1].variations.is_empty());
    }

    #[test]
    fn order_does_not_depend_on_ids() {
        let rows = vec![row(9, None), row(3, None), row(5, None), row(1, None)];
        let ids: Vec<i64> = collapse_rows(rows).into_iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![9, 3, 5, 1]);
    }

    #[test]
    fn collapser_entry_initializes_once() {
        let mut collapser: Collapser<&str, Vec<i32>> = Collapser::new();
        collapser.entry("a", Vec::new).push(1);
        collapser.entry("b", Vec::new).push(2);
        collapser.entry("a", || vec![100]).push(3);

        assert_eq!(collapser.len(), 2);
        assert_eq!(collapser.into_vec(), vec![vec![1, 3], vec![2]]);
    }

    #[test]
    fn empty_input() {
        assert!(collapse_rows(Vec::new()).is_empty());
    }
}
