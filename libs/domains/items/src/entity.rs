use sea_orm::entity::prelude::*;

use crate::error::ItemError;
use crate::models::Item;

/// Sea-ORM Entity for the items table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Double")]
    pub price: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

// Rows are not trusted blindly: a row that breaks the item invariants is a storage error
impl TryFrom<Model> for Item {
    type Error = ItemError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        let id = model.id;
        Item::with_id(id, model.name, model.price)
            .map_err(|e| ItemError::Database(format!("Invalid item row {}: {}", id, e)))
    }
}
