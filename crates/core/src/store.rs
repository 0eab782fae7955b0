//! Loading and saving the cart under its storage key.
//!
//! # Load-mutate-store
//!
//! Every cart action re-reads the full cart with [`CartStore::load`],
//! mutates the in-memory copy and writes the full cart back with
//! [`CartStore::save`]. There is no locking: two writers racing on the same
//! storage are last-writer-wins at the granularity of one action.

use thiserror::Error;

use crate::cart::Cart;
use crate::host::CountDisplay;
use crate::storage::{KeyValueStorage, StorageError};

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "closeoutCart";

/// Errors from [`CartStore::save`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The sole writer of the persisted cart.
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> CartStore<S> {
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Load the persisted cart.
    ///
    /// Never fails: a missing value, a storage error or malformed JSON all
    /// produce an empty cart. Errors are logged, not returned.
    pub async fn load(&self) -> Cart {
        let raw = match self.storage.get_item(CART_KEY).await {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return Cart::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cart from storage");
                return Cart::new();
            }
        };

        match serde_json::from_str::<Option<Cart>>(&raw) {
            Ok(cart) => cart.unwrap_or_default(),
            Err(e) => {
                tracing::error!(error = %e, "Error loading cart, starting empty");
                Cart::new()
            }
        }
    }

    /// Persist the full cart, then refresh the count display.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the cart cannot be serialized or written.
    /// The display is only refreshed after a successful write.
    pub async fn save<D>(&self, cart: &Cart, display: &mut D) -> Result<(), StoreError>
    where
        D: CountDisplay + ?Sized,
    {
        let raw = serde_json::to_string(cart)?;
        self.storage.set_item(CART_KEY, raw).await?;
        tracing::debug!(
            lines = cart.len(),
            cases = cart.total_quantity(),
            "Cart saved"
        );
        update_count(cart, display);
        Ok(())
    }
}

/// Push the cart's total case count to a display.
pub fn update_count<D>(cart: &Cart, display: &mut D)
where
    D: CountDisplay + ?Sized,
{
    display.show_count(cart.total_quantity());
}
