//! Owned admin state: the product and order collections plus their store.
//!
//! Collections are read from the store once in [`AdminState::load`]. Each
//! commit writes the replacement collection first and swaps it into memory
//! only when the write succeeded, so memory never runs ahead of the store.

use shopdesk_core::{OrderId, ProductId};

use crate::models::{Order, Product};
use crate::seed;
use crate::storage::{self, KeyValueStore, ORDERS_KEY, PRODUCTS_KEY, StorageError};

/// Products, orders, and the store they are mirrored to.
#[derive(Debug)]
pub struct AdminState<S> {
    store: S,
    products: Vec<Product>,
    orders: Vec<Order>,
}

impl<S: KeyValueStore> AdminState<S> {
    /// Load both collections from `store`.
    ///
    /// When no product collection has ever been stored and `seed_catalog` is
    /// set, the default catalog is installed and persisted.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if a stored collection cannot be read or the
    /// default catalog cannot be written.
    pub fn load(store: S, seed_catalog: bool) -> Result<Self, StorageError> {
        let stored_products = storage::load_collection::<_, Product>(&store, PRODUCTS_KEY)?;
        let orders = storage::load_collection::<_, Order>(&store, ORDERS_KEY)?.unwrap_or_default();

        let mut state = Self {
            store,
            products: Vec::new(),
            orders,
        };

        match stored_products {
            Some(products) => state.products = products,
            None if seed_catalog => {
                state.commit_products(seed::default_catalog())?;
                tracing::info!(
                    products = state.products.len(),
                    "Installed default catalog"
                );
            }
            None => {}
        }

        tracing::debug!(
            products = state.products.len(),
            orders = state.orders.len(),
            "Loaded admin state"
        );
        Ok(state)
    }

    /// All products in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All orders in creation order.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up an order by id.
    #[must_use]
    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// The underlying store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give up the state and return the store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// Persist `products` and make it the current catalog.
    pub(crate) fn commit_products(&mut self, products: Vec<Product>) -> Result<(), StorageError> {
        storage::save_collection(&mut self.store, PRODUCTS_KEY, &products)?;
        self.products = products;
        Ok(())
    }

    /// Persist `orders` and make it the current order list.
    pub(crate) fn commit_orders(&mut self, orders: Vec<Order>) -> Result<(), StorageError> {
        storage::save_collection(&mut self.store, ORDERS_KEY, &orders)?;
        self.orders = orders;
        Ok(())
    }

    /// Persist a stock change together with the order change that caused it.
    ///
    /// Products are written first. If the orders cannot be written, the
    /// previous products are written back and kept in memory, so a failed
    /// call leaves stock where it was and can be retried.
    pub(crate) fn commit_transition(
        &mut self,
        products: Vec<Product>,
        orders: Vec<Order>,
    ) -> Result<(), StorageError> {
        let previous = self.products.clone();
        self.commit_products(products)?;

        if let Err(e) = self.commit_orders(orders) {
            if let Err(rollback) = storage::save_collection(&mut self.store, PRODUCTS_KEY, &previous) {
                tracing::error!(
                    error = %rollback,
                    "Failed to restore products after order write failed"
                );
            }
            self.products = previous;
            return Err(e);
        }
        Ok(())
    }
}
