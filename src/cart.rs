use std::collections::HashMap;
use std::sync::RwLock;

use serde::Serialize;
use tokio::sync::broadcast;
use utoipa::ToSchema;

use crate::models::FoodItemEntity;

/// Snapshot of the catalog row a cart line points at, taken when the line
/// is created so the cart renders without re-fetching the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct CartItem {
    pub id: i32,
    pub name: String,
    pub price: f32,
    pub image: String,
}

impl From<&FoodItemEntity> for CartItem {
    fn from(item: &FoodItemEntity) -> Self {
        Self {
            id: item.id,
            name: item.name.clone(),
            price: item.price,
            image: item.image.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, ToSchema)]
pub struct CartLine {
    pub item: CartItem,
    pub quantity: i32,
}

/// One user's cart. Lines keep insertion order and hold at most one entry
/// per food item; a line's quantity is always >= 1.
#[derive(Debug, Default, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Increment the quantity if the item is already in the cart, otherwise
    /// append a new line with quantity 1.
    pub fn add(&mut self, item: CartItem) {
        match self.lines.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine { item, quantity: 1 }),
        }
    }

    /// Non-positive quantities remove the line. An id that is not in the
    /// cart is ignored and never creates a line.
    pub fn set_quantity(&mut self, item_id: i32, quantity: i32) {
        if quantity <= 0 {
            self.remove(item_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove(&mut self, item_id: i32) {
        self.lines.retain(|line| line.item.id != item_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn total(&self) -> f32 {
        self.lines
            .iter()
            .map(|line| line.item.price * line.quantity as f32)
            .sum()
    }

    /// Sum of quantities across all lines, shown as the cart badge.
    pub fn count(&self) -> i32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }
}

/// Published on every cart mutation so subscribed consumers (badge counts,
/// displayed totals) observe changes without polling.
#[derive(Clone, Debug, PartialEq)]
pub struct CartEvent {
    pub user_id: i32,
    pub count: i32,
    pub total: f32,
}

/// Owns every active cart, keyed by user id, and the notification channel.
/// Carts live in process memory only; a restart starts every cart empty.
#[derive(Debug)]
pub struct CartStore {
    carts: RwLock<HashMap<i32, Cart>>,
    events: broadcast::Sender<CartEvent>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            carts: RwLock::new(HashMap::new()),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.events.subscribe()
    }

    /// Current cart for the user; an empty cart if they have none yet.
    pub fn snapshot(&self, user_id: i32) -> Cart {
        self.carts
            .read()
            .expect("cart store lock poisoned")
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn add_item(&self, user_id: i32, item: CartItem) -> Cart {
        self.mutate(user_id, |cart| cart.add(item))
    }

    pub fn set_quantity(&self, user_id: i32, item_id: i32, quantity: i32) -> Cart {
        self.mutate(user_id, |cart| cart.set_quantity(item_id, quantity))
    }

    pub fn remove_item(&self, user_id: i32, item_id: i32) -> Cart {
        self.mutate(user_id, |cart| cart.remove(item_id))
    }

    pub fn clear(&self, user_id: i32) -> Cart {
        self.mutate(user_id, |cart| cart.clear())
    }

    fn mutate(&self, user_id: i32, apply: impl FnOnce(&mut Cart)) -> Cart {
        let updated = {
            let mut carts = self.carts.write().expect("cart store lock poisoned");
            let cart = carts.entry(user_id).or_default();
            apply(cart);
            cart.clone()
        };

        // Nobody listening is fine; the send result only reports that.
        let _ = self.events.send(CartEvent {
            user_id,
            count: updated.count(),
            total: updated.total(),
        });

        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i32, price: f32) -> CartItem {
        CartItem {
            id,
            name: format!("Item {id}"),
            price,
            image: String::new(),
        }
    }

    #[test]
    fn adding_distinct_items_accumulates_count_and_total() {
        let mut cart = Cart::default();
        cart.add(item(1, 10.0));
        cart.add(item(2, 5.0));
        cart.add(item(3, 2.5));

        assert_eq!(cart.count(), 3);
        assert_eq!(cart.total(), 17.5);
        assert_eq!(cart.lines().len(), 3);
    }

    #[test]
    fn adding_same_item_twice_merges_into_one_line() {
        let mut cart = Cart::default();
        cart.add(item(1, 10.0));
        cart.add(item(1, 10.0));

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.count(), 2);
        assert_eq!(cart.total(), 20.0);
    }

    #[test]
    fn set_quantity_updates_an_existing_line() {
        let mut cart = Cart::default();
        cart.add(item(1, 4.0));
        cart.set_quantity(1, 5);

        assert_eq!(cart.count(), 5);
        assert_eq!(cart.total(), 20.0);
    }

    #[test]
    fn non_positive_quantity_removes_the_line() {
        let mut cart = Cart::default();
        cart.add(item(1, 4.0));
        cart.set_quantity(1, 0);
        assert!(cart.is_empty());

        cart.add(item(2, 4.0));
        cart.set_quantity(2, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn set_quantity_on_absent_item_is_a_no_op() {
        let mut cart = Cart::default();
        cart.set_quantity(42, 3);
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn remove_is_a_no_op_when_absent() {
        let mut cart = Cart::default();
        cart.add(item(1, 4.0));
        cart.remove(99);
        assert_eq!(cart.count(), 1);
        cart.remove(1);
        assert!(cart.is_empty());
    }

    #[test]
    fn clear_resets_count_and_total() {
        let mut cart = Cart::default();
        cart.add(item(1, 10.0));
        cart.add(item(2, 5.0));
        cart.clear();

        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn empty_cart_reports_zero_aggregates() {
        let cart = Cart::default();
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn store_keeps_carts_per_user() {
        let store = CartStore::new();
        store.add_item(1, item(10, 3.0));
        store.add_item(2, item(20, 7.0));

        assert_eq!(store.snapshot(1).total(), 3.0);
        assert_eq!(store.snapshot(2).total(), 7.0);
        assert!(store.snapshot(3).is_empty());
    }

    #[test]
    fn mutations_publish_events_to_subscribers() {
        let store = CartStore::new();
        let mut events = store.subscribe();

        store.add_item(1, item(10, 3.0));
        store.add_item(1, item(10, 3.0));
        store.clear(1);

        assert_eq!(
            events.try_recv().unwrap(),
            CartEvent {
                user_id: 1,
                count: 1,
                total: 3.0
            }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            CartEvent {
                user_id: 1,
                count: 2,
                total: 6.0
            }
        );
        assert_eq!(
            events.try_recv().unwrap(),
            CartEvent {
                user_id: 1,
                count: 0,
                total: 0.0
            }
        );
    }
}
