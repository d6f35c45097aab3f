//! Item Service - application layer

use std::sync::Arc;
use tracing::instrument;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, ItemId, UpdateItem};
use crate::repository::ItemRepository;

/// Orchestrates item use cases over any [`ItemRepository`].
///
/// Existence is always checked here before `update` and `delete`, so an
/// unknown id yields `ItemError::NotFound` whichever repository is wired in.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
}

impl<R: ItemRepository> ItemService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(item_name = %input.name))]
    pub async fn create(&self, input: CreateItem) -> ItemResult<Item> {
        let item = Item::try_from(input)?;
        self.repository.create(item).await
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> ItemResult<Vec<Item>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: ItemId) -> ItemResult<Option<Item>> {
        self.repository.find_by_id(id).await
    }

    /// Apply the present fields of `input` to an existing item.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: ItemId, input: UpdateItem) -> ItemResult<Item> {
        let mut item = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))?;

        item.apply_update(input)?;

        self.repository.update(id, item).await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: ItemId) -> ItemResult<()> {
        if self.repository.find_by_id(id).await?.is_none() {
            return Err(ItemError::NotFound(id));
        }

        self.repository.delete(id).await
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
