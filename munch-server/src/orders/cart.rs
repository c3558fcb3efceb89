//! Shopping Cart
//!
//! Carts are session-local and purely in-memory: they are never persisted
//! and die with the process. A cart holds one line per menu item in
//! insertion order; adding an item already present bumps its quantity
//! instead of appending a second line.
//!
//! Cart totals exclude tax — VAT enters once, at checkout.

use std::sync::Arc;

use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::money::{line_subtotal, to_decimal, to_f64};

/// One menu item in a cart.
///
/// Invariant: `subtotal == unit_price * quantity` and `quantity >= 1`; a
/// quantity reaching 0 removes the line.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub menu_id: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: i64,
    pub subtotal: f64,
}

/// A session's cart: lines in insertion order plus the flat delivery fee.
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    pub delivery_fee: f64,
}

/// Snapshot of cart state for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total: f64,
    pub item_count: usize,
    pub is_empty: bool,
}

impl Cart {
    pub fn new(delivery_fee: f64) -> Self {
        Self {
            lines: Vec::new(),
            delivery_fee,
        }
    }

    /// Add one unit of a menu item. An existing line for the same item gets
    /// its quantity incremented and subtotal recomputed.
    pub fn add(&mut self, menu_id: &str, name: &str, unit_price: f64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.menu_id == menu_id) {
            line.quantity += 1;
            line.subtotal = line_subtotal(line.unit_price, line.quantity);
            return;
        }
        self.lines.push(CartLine {
            menu_id: menu_id.to_string(),
            name: name.to_string(),
            unit_price,
            quantity: 1,
            subtotal: unit_price,
        });
    }

    /// Remove a line entirely. Returns false when no line matched.
    pub fn remove(&mut self, menu_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.menu_id != menu_id);
        self.lines.len() != before
    }

    /// Bump a line's quantity by one. Returns false when no line matched.
    pub fn increase(&mut self, menu_id: &str) -> bool {
        match self.lines.iter_mut().find(|l| l.menu_id == menu_id) {
            Some(line) => {
                line.quantity += 1;
                line.subtotal = line_subtotal(line.unit_price, line.quantity);
                true
            }
            None => false,
        }
    }

    /// Drop a line's quantity by one, removing the line when it reaches
    /// zero. Returns false when no line matched.
    pub fn decrease(&mut self, menu_id: &str) -> bool {
        let Some(pos) = self.lines.iter().position(|l| l.menu_id == menu_id) else {
            return false;
        };
        let line = &mut self.lines[pos];
        if line.quantity > 1 {
            line.quantity -= 1;
            line.subtotal = line_subtotal(line.unit_price, line.quantity);
        } else {
            self.lines.remove(pos);
        }
        true
    }

    /// Sum of line subtotals.
    pub fn subtotal(&self) -> f64 {
        let sum: Decimal = self.lines.iter().map(|l| to_decimal(l.subtotal)).sum();
        to_f64(sum)
    }

    /// Subtotal plus delivery fee. No tax here.
    pub fn total(&self) -> f64 {
        to_f64(to_decimal(self.subtotal()) + to_decimal(self.delivery_fee))
    }

    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            lines: self.lines.clone(),
            subtotal: self.subtotal(),
            delivery_fee: self.delivery_fee,
            total: self.total(),
            item_count: self.item_count(),
            is_empty: self.is_empty(),
        }
    }
}

/// Session-keyed cart store.
///
/// Sessions are opaque uuid handles; each maps to its own cart and nothing
/// ever crosses sessions. The map is shared across request handlers via
/// `Arc<DashMap>`.
#[derive(Clone)]
pub struct CartStore {
    carts: Arc<DashMap<String, Cart>>,
    delivery_fee: f64,
}

impl CartStore {
    pub fn new(delivery_fee: f64) -> Self {
        Self {
            carts: Arc::new(DashMap::new()),
            delivery_fee,
        }
    }

    /// Open a new session with an empty cart.
    pub fn create_session(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.carts
            .insert(session_id.clone(), Cart::new(self.delivery_fee));
        session_id
    }

    /// Run `f` against the session's cart. `None` for unknown sessions.
    pub fn with_cart<R>(&self, session_id: &str, f: impl FnOnce(&mut Cart) -> R) -> Option<R> {
        self.carts.get_mut(session_id).map(|mut cart| f(&mut cart))
    }

    /// Clone the session's cart (used to read checkout input without
    /// holding the map entry across awaits).
    pub fn snapshot(&self, session_id: &str) -> Option<Cart> {
        self.carts.get(session_id).map(|c| c.clone())
    }

    /// Empty the session's cart. Returns false for unknown sessions.
    pub fn clear(&self, session_id: &str) -> bool {
        self.with_cart(session_id, |cart| cart.clear()).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cart() -> Cart {
        Cart::new(50.0)
    }

    #[test]
    fn adding_the_same_item_twice_aggregates_one_line() {
        let mut cart = cart();
        cart.add("MENU1", "Chicken Adobo", 120.0);
        cart.add("MENU1", "Chicken Adobo", 120.0);

        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.lines()[0].subtotal, 240.0);
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut cart = cart();
        cart.add("MENU2", "Halo-Halo", 85.0);
        cart.add("MENU1", "Chicken Adobo", 120.0);
        cart.add("MENU2", "Halo-Halo", 85.0);

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.menu_id.as_str()).collect();
        assert_eq!(ids, ["MENU2", "MENU1"]);
    }

    #[test]
    fn total_is_subtotal_plus_delivery_fee_no_tax() {
        let mut cart = cart();
        cart.add("MENU1", "Chicken Adobo", 120.0);
        cart.add("MENU2", "Garlic Rice", 35.0);
        cart.increase("MENU1");

        assert_eq!(cart.subtotal(), 275.0);
        assert_eq!(cart.total(), 325.0);
    }

    #[test]
    fn decrease_to_zero_removes_the_line() {
        let mut cart = cart();
        cart.add("MENU1", "Chicken Adobo", 120.0);
        cart.increase("MENU1");

        assert!(cart.decrease("MENU1"));
        assert_eq!(cart.lines()[0].quantity, 1);
        assert!(cart.decrease("MENU1"));
        assert!(cart.is_empty());
        assert!(!cart.decrease("MENU1"));
    }

    #[test]
    fn remove_and_clear() {
        let mut cart = cart();
        cart.add("MENU1", "Chicken Adobo", 120.0);
        cart.add("MENU2", "Garlic Rice", 35.0);

        assert!(cart.remove("MENU1"));
        assert!(!cart.remove("MENU1"));
        assert_eq!(cart.item_count(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), 0.0);
        assert_eq!(cart.total(), 50.0);
    }

    #[test]
    fn subtotal_survives_many_small_lines() {
        let mut cart = cart();
        for i in 0..100 {
            cart.add(&format!("MENU{i}"), "Penny Item", 0.01);
        }
        assert_eq!(cart.subtotal(), 1.0);
    }

    #[test]
    fn sessions_are_isolated() {
        let store = CartStore::new(50.0);
        let a = store.create_session();
        let b = store.create_session();
        assert_ne!(a, b);

        store.with_cart(&a, |cart| cart.add("MENU1", "Chicken Adobo", 120.0));

        let a_summary = store.with_cart(&a, |c| c.summary()).unwrap();
        let b_summary = store.with_cart(&b, |c| c.summary()).unwrap();
        assert_eq!(a_summary.item_count, 1);
        assert!(b_summary.is_empty);

        assert!(store.with_cart("no-such-session", |c| c.summary()).is_none());
    }
}
