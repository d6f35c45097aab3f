use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use axum_helpers::{ErrorResponse, IdPath, ValidatedJson, ValidationErrorResponse};
use serde::Serialize;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item, ItemId, UpdateItem};
use crate::repository::ItemRepository;
use crate::service::ItemService;

/// OpenAPI documentation for Items API
#[derive(OpenApi)]
#[openapi(
    paths(list_items, create_item, get_item, update_item, delete_item),
    components(schemas(Item, CreateItem, UpdateItem, ErrorResponse, ValidationErrorResponse)),
    tags(
        (name = "Items", description = "Item management endpoints")
    )
)]
pub struct ApiDoc;

/// The five item use cases, used to pick the failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOperation {
    Create,
    FetchOne,
    FetchAll,
    Update,
    Delete,
}

impl ItemOperation {
    pub fn failure_message(self) -> &'static str {
        match self {
            ItemOperation::Create => "Failed to create item",
            ItemOperation::FetchOne => "Failed to fetch item",
            ItemOperation::FetchAll => "Failed to fetch items",
            ItemOperation::Update => "Failed to update item",
            ItemOperation::Delete => "Failed to delete item",
        }
    }
}

/// Turns service results into HTTP responses.
///
/// Inputs are already schema-checked; this layer only picks status codes
/// and maps errors.
pub struct ItemController<R: ItemRepository> {
    service: ItemService<R>,
}

impl<R: ItemRepository> ItemController<R> {
    pub fn new(service: ItemService<R>) -> Self {
        Self { service }
    }

    pub async fn create(&self, input: CreateItem) -> Response {
        respond(
            ItemOperation::Create,
            StatusCode::CREATED,
            self.service.create(input).await,
        )
    }

    pub async fn get_one(&self, id: ItemId) -> Response {
        let result = self
            .service
            .find_by_id(id)
            .await
            .and_then(|item| item.ok_or(ItemError::NotFound(id)));
        respond(ItemOperation::FetchOne, StatusCode::OK, result)
    }

    pub async fn get_all(&self) -> Response {
        respond(
            ItemOperation::FetchAll,
            StatusCode::OK,
            self.service.find_all().await,
        )
    }

    pub async fn update(&self, id: ItemId, input: UpdateItem) -> Response {
        respond(
            ItemOperation::Update,
            StatusCode::OK,
            self.service.update(id, input).await,
        )
    }

    pub async fn delete(&self, id: ItemId) -> Response {
        match self.service.delete(id).await {
            Ok(()) => StatusCode::NO_CONTENT.into_response(),
            Err(e) => e
                .into_app_error(ItemOperation::Delete.failure_message())
                .into_response(),
        }
    }
}

fn respond<T: Serialize>(operation: ItemOperation, status: StatusCode, result: ItemResult<T>) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(e) => e.into_app_error(operation.failure_message()).into_response(),
    }
}

type SharedController<R> = Arc<ItemController<R>>;

/// Item routes, relative to where the app nests them (`/items`).
pub fn router<R: ItemRepository + 'static>(service: ItemService<R>) -> Router {
    let controller = Arc::new(ItemController::new(service));

    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/{id}", get(get_item).put(update_item).delete(delete_item))
        .with_state(controller)
}

/// List all items
#[utoipa::path(
    get,
    path = "/items",
    tag = "Items",
    responses(
        (status = 200, description = "All items, possibly empty", body = Vec<Item>),
        (status = 500, description = "Failed to fetch items", body = ErrorResponse)
    )
)]
async fn list_items<R: ItemRepository>(State(controller): State<SharedController<R>>) -> Response {
    controller.get_all().await
}

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "Items",
    request_body = CreateItem,
    responses(
        (status = 201, description = "Item created", body = Item),
        (status = 400, description = "Body failed the create schema", body = ValidationErrorResponse),
        (status = 500, description = "Failed to create item", body = ErrorResponse)
    )
)]
async fn create_item<R: ItemRepository>(
    State(controller): State<SharedController<R>>,
    ValidatedJson(input): ValidatedJson<CreateItem>,
) -> Response {
    controller.create(input).await
}

/// Get an item by ID
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 200, description = "Item found", body = Item),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Failed to fetch item", body = ErrorResponse)
    )
)]
async fn get_item<R: ItemRepository>(
    State(controller): State<SharedController<R>>,
    IdPath(id): IdPath,
) -> Response {
    controller.get_one(id).await
}

/// Update an item; absent fields are left unchanged
#[utoipa::path(
    put,
    path = "/items/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Body failed the update schema", body = ValidationErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Failed to update item", body = ErrorResponse)
    )
)]
async fn update_item<R: ItemRepository>(
    State(controller): State<SharedController<R>>,
    IdPath(id): IdPath,
    ValidatedJson(input): ValidatedJson<UpdateItem>,
) -> Response {
    controller.update(id, input).await
}

/// Delete an item
#[utoipa::path(
    delete,
    path = "/items/{id}",
    tag = "Items",
    params(
        ("id" = i64, Path, description = "Item ID")
    ),
    responses(
        (status = 204, description = "Item deleted"),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Failed to delete item", body = ErrorResponse)
    )
)]
async fn delete_item<R: ItemRepository>(
    State(controller): State<SharedController<R>>,
    IdPath(id): IdPath,
) -> Response {
    controller.delete(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockItemRepository;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};

    async fn parts(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn controller(repo: MockItemRepository) -> ItemController<MockItemRepository> {
        ItemController::new(ItemService::new(repo))
    }

    fn broken() -> ItemError {
        ItemError::Database("connection reset".into())
    }

    #[tokio::test]
    async fn test_create_returns_201_with_item() {
        let mut repo = MockItemRepository::new();
        repo.expect_create()
            .returning(|item| Item::with_id(1, item.name(), item.price()));

        let (status, body) = parts(
            controller(repo)
                .create(CreateItem {
                    name: "Widget".into(),
                    price: 9.99,
                })
                .await,
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"id": 1, "name": "Widget", "price": 9.99}));
    }

    #[tokio::test]
    async fn test_get_one_missing_is_404() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let (status, body) = parts(controller(repo).get_one(5).await).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Item not found"}));
    }

    #[tokio::test]
    async fn test_get_all_empty_is_empty_array() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_all().returning(|| Ok(vec![]));

        let (status, body) = parts(controller(repo).get_all().await).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id_are_404() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));
        let controller = controller(repo);

        let (status, body) = parts(
            controller
                .update(
                    3,
                    UpdateItem {
                        name: Some("Gadget".into()),
                        price: None,
                    },
                )
                .await,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Item not found"}));

        let (status, _) = parts(controller.delete(3).await).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_storage_failures_use_per_operation_messages() {
        let mut repo = MockItemRepository::new();
        repo.expect_create().returning(|_| Err(broken()));
        repo.expect_find_by_id().returning(|_| Err(broken()));
        repo.expect_find_all().returning(|| Err(broken()));
        let controller = controller(repo);

        let cases = [
            (
                controller
                    .create(CreateItem {
                        name: "Widget".into(),
                        price: 1.0,
                    })
                    .await,
                "Failed to create item",
            ),
            (controller.get_one(1).await, "Failed to fetch item"),
            (controller.get_all().await, "Failed to fetch items"),
            (
                controller
                    .update(
                        1,
                        UpdateItem {
                            name: None,
                            price: Some(2.0),
                        },
                    )
                    .await,
                "Failed to update item",
            ),
            (controller.delete(1).await, "Failed to delete item"),
        ];

        for (response, message) in cases {
            let (status, body) = parts(response).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({ "error": message }));
        }
    }

    #[tokio::test]
    async fn test_delete_returns_204_with_empty_body() {
        let mut repo = MockItemRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Ok(Some(Item::with_id(1, "Widget", 9.99).unwrap())));
        repo.expect_delete().returning(|_| Ok(()));

        let (status, body) = parts(controller(repo).delete(1).await).await;

        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(body, Value::Null);
    }

    #[test]
    fn test_openapi_lists_item_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/items"));
        assert!(doc.paths.paths.contains_key("/items/{id}"));
    }
}
