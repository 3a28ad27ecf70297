use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;
use crate::error::{InventoryError, InventoryResult};
use crate::store::types::{InventoryItem, ItemFields};
use crate::store::InventoryStore;

// Representation of the inventory as callers see it. Cheap to clone; every
// clone shares the same backing store.
#[derive(Clone)]
pub struct Inventory {
    store: Arc<dyn InventoryStore>,
}

impl Inventory {
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> InventoryResult<Vec<InventoryItem>> {
        self.store.list().await
    }

    pub async fn get(&self, id: &str) -> InventoryResult<InventoryItem> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))
    }

    /// Validates `fields`, assigns a fresh id and appends the item.
    pub async fn create(&self, fields: ItemFields) -> InventoryResult<InventoryItem> {
        fields.validate()?;
        let item = InventoryItem::new(Uuid::new_v4().to_string(), fields);
        self.store.insert(item.clone()).await?;
        tracing::info!("Created inventory item {}", item.id);
        Ok(item)
    }

    /// Replaces every field of `id` except the id itself.
    pub async fn update(&self, id: &str, fields: ItemFields) -> InventoryResult<InventoryItem> {
        fields.validate()?;
        let item = self
            .store
            .replace(id, fields)
            .await?
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;
        tracing::info!("Updated inventory item {}", id);
        Ok(item)
    }

    pub async fn delete(&self, id: &str) -> InventoryResult<InventoryItem> {
        let item = self
            .store
            .remove(id)
            .await?
            .ok_or_else(|| InventoryError::NotFound(id.to_string()))?;
        tracing::info!("Deleted inventory item {}", id);
        Ok(item)
    }
}
