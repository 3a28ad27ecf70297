use async_trait::async_trait;
use tokio::sync::RwLock;
use crate::error::InventoryResult;
use crate::store::types::{InventoryItem, ItemFields};
use crate::store::InventoryStore;

/// Keeps the inventory in process memory only. Used as a fake in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<Vec<InventoryItem>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<InventoryItem>) -> Self {
        Self { items: RwLock::new(items) }
    }
}

#[async_trait]
impl InventoryStore for MemoryStore {
    async fn list(&self) -> InventoryResult<Vec<InventoryItem>> {
        Ok(self.items.read().await.clone())
    }

    async fn get(&self, id: &str) -> InventoryResult<Option<InventoryItem>> {
        Ok(self.items.read().await.iter().find(|i| i.id == id).cloned())
    }

    async fn insert(&self, item: InventoryItem) -> InventoryResult<()> {
        self.items.write().await.push(item);
        Ok(())
    }

    async fn replace(&self, id: &str, fields: ItemFields) -> InventoryResult<Option<InventoryItem>> {
        let mut items = self.items.write().await;
        Ok(items.iter_mut().find(|i| i.id == id).map(|item| {
            item.apply(fields);
            item.clone()
        }))
    }

    async fn remove(&self, id: &str) -> InventoryResult<Option<InventoryItem>> {
        let mut items = self.items.write().await;
        Ok(items.iter().position(|i| i.id == id).map(|idx| items.remove(idx)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::conformance;

    #[tokio::test]
    async fn test_memory_store() {
        conformance::check_store(&MemoryStore::new()).await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_memory_store_concurrent_mutations() {
        conformance::check_concurrent_mutations(std::sync::Arc::new(MemoryStore::new())).await;
    }

    #[tokio::test]
    async fn test_with_items_keeps_order() {
        let store = MemoryStore::with_items(vec![conformance::item("x", "One"), conformance::item("y", "Two")]);
        let ids: Vec<_> = store.list().await.unwrap().into_iter().map(|i| i.id).collect();
        assert_eq!(ids, vec!["x", "y"]);
    }
}
