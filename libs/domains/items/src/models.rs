use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::error::{ItemError, ItemResult};

/// Store-assigned item identifier.
pub type ItemId = i64;

/// Item entity.
///
/// Fields are private so that every `Item` in the process has a non-empty
/// name and a non-negative price: construction, mutation and
/// deserialization all run the same checks.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Item {
    /// Absent until the repository assigns one
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 1)]
    id: Option<ItemId>,
    #[schema(example = "Widget")]
    name: String,
    #[schema(example = 9.99)]
    price: f64,
}

impl Item {
    /// A new, not yet persisted item.
    pub fn new(name: impl Into<String>, price: f64) -> ItemResult<Self> {
        Self::build(None, name.into(), price)
    }

    /// An item that already has an identity, e.g. one read back from storage.
    pub fn with_id(id: ItemId, name: impl Into<String>, price: f64) -> ItemResult<Self> {
        Self::build(Some(id), name.into(), price)
    }

    fn build(id: Option<ItemId>, name: String, price: f64) -> ItemResult<Self> {
        check_price(price)?;
        check_name(&name)?;
        Ok(Self { id, name, price })
    }

    pub fn id(&self) -> Option<ItemId> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn rename(&mut self, name: impl Into<String>) -> ItemResult<()> {
        let name = name.into();
        check_name(&name)?;
        self.name = name;
        Ok(())
    }

    pub fn reprice(&mut self, price: f64) -> ItemResult<()> {
        check_price(price)?;
        self.price = price;
        Ok(())
    }

    /// Apply the present fields of `update`; absent fields are left alone.
    ///
    /// All present fields are checked before any is written, so a failed
    /// update leaves the item unchanged.
    pub fn apply_update(&mut self, update: UpdateItem) -> ItemResult<()> {
        if let Some(price) = update.price {
            check_price(price)?;
        }
        if let Some(name) = &update.name {
            check_name(name)?;
        }

        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(name) = update.name {
            self.name = name;
        }
        Ok(())
    }
}

fn check_price(price: f64) -> ItemResult<()> {
    if price.is_nan() || price < 0.0 {
        return Err(ItemError::NegativePrice);
    }
    Ok(())
}

fn check_name(name: &str) -> ItemResult<()> {
    if name.is_empty() {
        return Err(ItemError::EmptyName);
    }
    Ok(())
}

#[derive(Deserialize)]
struct ItemRecord {
    #[serde(default)]
    id: Option<ItemId>,
    name: String,
    price: f64,
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = ItemRecord::deserialize(deserializer)?;
        Item::build(record.id, record.name, record.price).map_err(serde::de::Error::custom)
    }
}

/// Body of `POST /items`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateItem {
    #[schema(example = "Widget", min_length = 1)]
    pub name: String,
    #[schema(example = 9.99, minimum = 0)]
    pub price: f64,
}

impl TryFrom<CreateItem> for Item {
    type Error = ItemError;

    fn try_from(input: CreateItem) -> ItemResult<Self> {
        Item::new(input.name, input.price)
    }
}

/// Body of `PUT /items/{id}`; at least one field must be present
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Gadget", min_length = 1)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 12.5, exclusive_minimum = 0)]
    pub price: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_has_no_id() {
        let item = Item::new("Widget", 9.99).unwrap();
        assert_eq!(item.id(), None);
        assert_eq!(item.name(), "Widget");
        assert_eq!(item.price(), 9.99);
    }

    #[test]
    fn test_zero_price_is_allowed() {
        assert!(Item::new("Free", 0.0).is_ok());
    }

    #[test]
    fn test_negative_price_is_rejected() {
        assert!(matches!(Item::new("Widget", -0.01), Err(ItemError::NegativePrice)));
        assert!(matches!(Item::new("Widget", f64::NAN), Err(ItemError::NegativePrice)));
    }

    #[test]
    fn test_empty_name_is_rejected() {
        assert!(matches!(Item::new("", 1.0), Err(ItemError::EmptyName)));
    }

    #[test]
    fn test_price_is_checked_before_name() {
        assert!(matches!(Item::new("", -1.0), Err(ItemError::NegativePrice)));
    }

    #[test]
    fn test_mutators_keep_invariants() {
        let mut item = Item::with_id(7, "Widget", 1.0).unwrap();

        assert!(matches!(item.rename(""), Err(ItemError::EmptyName)));
        assert!(matches!(item.reprice(-5.0), Err(ItemError::NegativePrice)));
        assert_eq!(item, Item::with_id(7, "Widget", 1.0).unwrap());

        item.rename("Gadget").unwrap();
        item.reprice(2.0).unwrap();
        assert_eq!(item.name(), "Gadget");
        assert_eq!(item.price(), 2.0);
        assert_eq!(item.id(), Some(7));
    }

    #[test]
    fn test_apply_update_is_partial() {
        let mut item = Item::with_id(1, "Widget", 9.99).unwrap();
        item.apply_update(UpdateItem {
            name: None,
            price: Some(12.5),
        })
        .unwrap();

        assert_eq!(item.name(), "Widget");
        assert_eq!(item.price(), 12.5);
    }

    #[test]
    fn test_apply_update_name_only_keeps_price() {
        let mut item = Item::with_id(1, "Widget", 9.99).unwrap();
        item.apply_update(UpdateItem {
            name: Some("Gadget".into()),
            price: None,
        })
        .unwrap();

        assert_eq!(item.name(), "Gadget");
        assert_eq!(item.price(), 9.99);
        assert_eq!(item.id(), Some(1));
    }

    #[test]
    fn test_apply_update_is_all_or_nothing() {
        let mut item = Item::with_id(1, "Widget", 9.99).unwrap();
        let result = item.apply_update(UpdateItem {
            name: Some("Gadget".into()),
            price: Some(-1.0),
        });

        assert!(matches!(result, Err(ItemError::NegativePrice)));
        assert_eq!(item.name(), "Widget");
        assert_eq!(item.price(), 9.99);
    }

    #[test]
    fn test_json_shape() {
        let item = Item::with_id(1, "Widget", 9.99).unwrap();
        assert_eq!(
            serde_json::to_value(&item).unwrap(),
            serde_json::json!({"id": 1, "name": "Widget", "price": 9.99})
        );

        let transient = Item::new("Widget", 9.99).unwrap();
        assert_eq!(
            serde_json::to_value(&transient).unwrap(),
            serde_json::json!({"name": "Widget", "price": 9.99})
        );
    }

    #[test]
    fn test_deserialize_enforces_invariants() {
        let item: Item = serde_json::from_str(r#"{"id": 3, "name": "Widget", "price": 1}"#).unwrap();
        assert_eq!(item.id(), Some(3));

        let err = serde_json::from_str::<Item>(r#"{"name": "Widget", "price": -1}"#).unwrap_err();
        assert!(err.to_string().contains("negative"));
    }
}
