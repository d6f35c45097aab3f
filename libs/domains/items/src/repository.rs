use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, ItemId};

/// Repository trait for Item persistence
///
/// Implementations own identifier assignment. Both `update` and `delete`
/// report `ItemError::NotFound` for an unknown id.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Persist a new item and return it with its assigned id
    async fn create(&self, item: Item) -> ItemResult<Item>;

    /// Get an item by ID; `None` when absent
    async fn find_by_id(&self, id: ItemId) -> ItemResult<Option<Item>>;

    /// All items, in a stable order
    async fn find_all(&self) -> ItemResult<Vec<Item>>;

    /// Overwrite name and price of an existing item
    async fn update(&self, id: ItemId, item: Item) -> ItemResult<Item>;

    /// Remove an item by ID
    async fn delete(&self, id: ItemId) -> ItemResult<()>;
}

#[derive(Debug)]
struct Store {
    items: Vec<Item>,
    next_id: ItemId,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: 1,
        }
    }
}

/// Process-local repository keeping items in insertion order.
///
/// Clones share the same storage. Ids start at 1 and are never reused
/// until [`InMemoryItemRepository::clear`] is called.
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every item and restart ids at 1.
    pub async fn clear(&self) {
        *self.store.write().await = Store::default();
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn create(&self, item: Item) -> ItemResult<Item> {
        let mut store = self.store.write().await;
        let id = store.next_id;
        let created = Item::with_id(id, item.name(), item.price())?;
        store.next_id += 1;
        store.items.push(created.clone());

        tracing::info!(item_id = id, "Created item");
        Ok(created)
    }

    async fn find_by_id(&self, id: ItemId) -> ItemResult<Option<Item>> {
        let store = self.store.read().await;
        Ok(store.items.iter().find(|i| i.id() == Some(id)).cloned())
    }

    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        Ok(self.store.read().await.items.clone())
    }

    async fn update(&self, id: ItemId, item: Item) -> ItemResult<Item> {
        let mut store = self.store.write().await;
        let slot = store
            .items
            .iter_mut()
            .find(|i| i.id() == Some(id))
            .ok_or(ItemError::NotFound(id))?;

        *slot = Item::with_id(id, item.name(), item.price())?;

        tracing::info!(item_id = id, "Updated item");
        Ok(slot.clone())
    }

    async fn delete(&self, id: ItemId) -> ItemResult<()> {
        let mut store = self.store.write().await;
        let index = store
            .items
            .iter()
            .position(|i| i.id() == Some(id))
            .ok_or(ItemError::NotFound(id))?;

        store.items.remove(index);

        tracing::info!(item_id = id, "Deleted item");
        Ok(())
    }
}
