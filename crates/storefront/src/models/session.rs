//! Session-related types.
//!
//! The visitor's session plays the role browser local storage plays for a
//! client-only cart: a per-visitor string key-value store that outlives a
//! single page.

use closeout_core::storage::{KeyValueStorage, StorageError};
use tower_sessions::Session;

/// Session keys used by the storefront.
pub mod keys {
    /// Key holding the serialized cart.
    pub const CART: &str = closeout_core::store::CART_KEY;
}

/// [`KeyValueStorage`] over the current request's session.
#[derive(Clone)]
pub struct SessionStorage {
    session: Session,
}

impl SessionStorage {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self { session }
    }
}

impl KeyValueStorage for SessionStorage {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.session
            .get::<String>(key)
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.session
            .insert(key, value)
            .await
            .map_err(|e| StorageError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use closeout_core::{Cart, CartStore};
    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_session_storage_round_trip() {
        let storage = SessionStorage::new(session());
        assert_eq!(storage.get_item(keys::CART).await.unwrap(), None);

        storage
            .set_item(keys::CART, "[]".to_string())
            .await
            .unwrap();

        assert_eq!(
            storage.get_item(keys::CART).await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_cart_store_over_session() {
        let store = CartStore::new(SessionStorage::new(session()));
        let cart: Cart = serde_json::from_str(r#"[{"sku":"A","quantity":4}]"#).unwrap();

        store.save(&cart, &mut ()).await.unwrap();

        assert_eq!(store.load().await, cart);
    }
}
