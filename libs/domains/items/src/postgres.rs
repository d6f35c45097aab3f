use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{ItemError, ItemResult},
    models::{Item, ItemId},
    repository::ItemRepository,
};

/// PostgreSQL-backed repository.
///
/// Ids come from the `BIGSERIAL` column. `update` and `delete` check that the
/// row exists before writing; the two steps are not atomic, so a row removed
/// in between is reported as `NotFound` rather than written.
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn exists(&self, id: ItemId) -> ItemResult<bool> {
        Ok(entity::Entity::find_by_id(id).one(&self.db).await?.is_some())
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn create(&self, item: Item) -> ItemResult<Item> {
        let active_model = entity::ActiveModel {
            id: NotSet,
            name: Set(item.name().to_owned()),
            price: Set(item.price()),
        };

        let model = active_model.insert(&self.db).await?;

        tracing::info!(item_id = model.id, "Created item");
        model.try_into()
    }

    async fn find_by_id(&self, id: ItemId) -> ItemResult<Option<Item>> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(Item::try_from)
            .transpose()
    }

    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Item::try_from)
            .collect()
    }

    async fn update(&self, id: ItemId, item: Item) -> ItemResult<Item> {
        if !self.exists(id).await? {
            return Err(ItemError::NotFound(id));
        }

        let active_model = entity::ActiveModel {
            id: Unchanged(id),
            name: Set(item.name().to_owned()),
            price: Set(item.price()),
        };

        let model = active_model.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => ItemError::NotFound(id),
            other => other.into(),
        })?;

        tracing::info!(item_id = id, "Updated item");
        model.try_into()
    }

    async fn delete(&self, id: ItemId) -> ItemResult<()> {
        if !self.exists(id).await? {
            return Err(ItemError::NotFound(id));
        }

        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ItemError::NotFound(id));
        }

        tracing::info!(item_id = id, "Deleted item");
        Ok(())
    }
}
