use serde::{Deserialize, Serialize};

use storefront_core::{CartError, CartResult, Money, ProductId, Quantity};

/// One product entry in the cart with its purchased quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub price: Money,
    pub image: String,
    pub amount: Quantity,
}

impl LineItem {
    /// Copy of this line-item with a different quantity.
    pub fn with_amount(&self, amount: Quantity) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }

    /// Unit price times quantity.
    pub fn subtotal(&self) -> Money {
        self.price * self.amount
    }
}

/// The ordered collection of line-items a shopper intends to purchase.
///
/// Insertion order is preserved but not semantically meaningful; product id
/// uniqueness is the only structural invariant. Transitions never mutate in
/// place — they produce the next cart value, which the store commits
/// atomically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Empty cart (the state of a fresh session).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a cart from already-collected line-items, validating the
    /// structural invariants. Used when rehydrating a persisted cart.
    pub fn from_items(items: Vec<LineItem>) -> CartResult<Self> {
        let mut cart = Cart::empty();
        for item in items {
            if cart.get(item.id).is_some() {
                return Err(CartError::invariant(format!(
                    "duplicate line-item for product {}",
                    item.id
                )));
            }
            cart = cart.upsert(item)?;
        }
        Ok(cart)
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The line-item for a product, if it is in the cart.
    pub fn get(&self, id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Quantity of a product currently in the cart (zero when absent).
    pub fn amount_of(&self, id: ProductId) -> Quantity {
        self.get(id).map(|item| item.amount).unwrap_or(0)
    }

    /// Sum of all line subtotals.
    pub fn total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Next cart with `item` replacing any existing line-item for the same
    /// product, or appended when the product is new.
    ///
    /// Rejects zero quantities: dropping an item to zero is `remove`'s job,
    /// and a committed cart must never hold an `amount == 0` entry.
    pub fn upsert(&self, item: LineItem) -> CartResult<Cart> {
        if item.amount == 0 {
            return Err(CartError::invariant(format!(
                "line-item for product {} would have zero quantity",
                item.id
            )));
        }

        let mut items = self.items.clone();
        match items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
        Ok(Cart { items })
    }

    /// Next cart with the line-item for `id` excluded.
    ///
    /// Fails with `NotFound` when the product is not in the cart, so a
    /// second removal of the same id is observable as an error rather than a
    /// silent no-op.
    pub fn remove(&self, id: ProductId) -> CartResult<Cart> {
        if self.get(id).is_none() {
            return Err(CartError::not_found(id));
        }
        let items = self
            .items
            .iter()
            .filter(|item| item.id != id)
            .cloned()
            .collect();
        Ok(Cart { items })
    }
}
