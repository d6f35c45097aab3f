use axum_helpers::{AppError, FieldViolation};
use thiserror::Error;

use crate::models::ItemId;
use crate::schema;

pub const NOT_FOUND_MESSAGE: &str = "Item not found";

#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item name cannot be empty")]
    EmptyName,

    #[error("Item price cannot be negative")]
    NegativePrice,

    #[error("Item not found: {0}")]
    NotFound(ItemId),

    #[error("Database error: {0}")]
    Database(String),
}

pub type ItemResult<T> = Result<T, ItemError>;

impl ItemError {
    /// Convert into the client-facing error.
    ///
    /// Storage failures are logged here and rendered only as
    /// `failure`, a fixed message naming the operation.
    pub fn into_app_error(self, failure: &str) -> AppError {
        match self {
            ItemError::NotFound(_) => AppError::NotFound(NOT_FOUND_MESSAGE.to_string()),
            ItemError::EmptyName => {
                AppError::Validation(vec![FieldViolation::new("name", schema::NAME_REQUIRED)])
            }
            ItemError::NegativePrice => {
                AppError::Validation(vec![FieldViolation::new("price", schema::PRICE_NEGATIVE)])
            }
            ItemError::Database(_) => {
                tracing::error!(error = %self, "{}", failure);
                AppError::InternalServerError(failure.to_string())
            }
        }
    }
}

impl From<sea_orm::DbErr> for ItemError {
    fn from(err: sea_orm::DbErr) -> Self {
        ItemError::Database(err.to_string())
    }
}
