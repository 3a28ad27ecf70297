use async_trait::async_trait;
use crate::error::InventoryResult;
use crate::store::types::{InventoryItem, ItemFields};

pub mod json_file;
pub mod memory;
pub mod rocks;
pub mod types;

/// Persistence behind an [`Inventory`](crate::Inventory).
///
/// Implementations keep items in insertion order and never validate field
/// contents; absent ids are reported as `None` rather than as errors.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All items, oldest first.
    async fn list(&self) -> InventoryResult<Vec<InventoryItem>>;

    async fn get(&self, id: &str) -> InventoryResult<Option<InventoryItem>>;

    /// Appends a new item. The id is assumed to be unused.
    async fn insert(&self, item: InventoryItem) -> InventoryResult<()>;

    /// Replaces the mutable fields of `id`, returning the updated item.
    async fn replace(&self, id: &str, fields: ItemFields) -> InventoryResult<Option<InventoryItem>>;

    /// Removes `id`, returning the item that was removed.
    async fn remove(&self, id: &str) -> InventoryResult<Option<InventoryItem>>;
}
