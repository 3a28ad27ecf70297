use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;
use crate::error::InventoryResult;
use crate::store::types::{InventoryItem, ItemFields};
use crate::store::InventoryStore;

/// Stores the whole inventory as one JSON array in a single file.
///
/// Every mutation reads the full document, changes it in memory and writes
/// it back in full. Mutations are serialized by `write_lock`; the rewrite goes
/// through a sibling temp file that is renamed over the document, so readers
/// see either the old or the new array, never a partial one.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    /// A missing file is treated as an empty inventory and created on the
    /// first mutation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> InventoryResult<Vec<InventoryItem>> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn save(&self, items: &[InventoryItem]) -> InventoryResult<()> {
        let bytes = serde_json::to_vec_pretty(items)?;
        let tmp = self.temp_path();
        let written = match fs::write(&tmp, bytes).await {
            Ok(()) => fs::rename(&tmp, &self.path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                tracing::debug!("Could not remove {}: {}", tmp.display(), cleanup);
            }
            tracing::error!("Failed to save inventory document {}: {}", self.path.display(), e);
            return Err(e.into());
        }
        Ok(())
    }

    /// A sibling of the document, unique per save so that two stores on the
    /// same path never write the same temp file.
    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("inventory"));
        name.push(format!(".{}.tmp", Uuid::new_v4().simple()));
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl InventoryStore for JsonFileStore {
    async fn list(&self) -> InventoryResult<Vec<InventoryItem>> {
        self.load().await
    }

    async fn get(&self, id: &str) -> InventoryResult<Option<InventoryItem>> {
        Ok(self.load().await?.into_iter().find(|i| i.id == id))
    }

    async fn insert(&self, item: InventoryItem) -> InventoryResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        items.push(item);
        self.save(&items).await
    }

    async fn replace(&self, id: &str, fields: ItemFields) -> InventoryResult<Option<InventoryItem>> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let updated = match items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.apply(fields);
                item.clone()
            }
            None => return Ok(None),
        };
        self.save(&items).await?;
        Ok(Some(updated))
    }

    async fn remove(&self, id: &str) -> InventoryResult<Option<InventoryItem>> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.load().await?;
        let removed = match items.iter().position(|i| i.id == id) {
            Some(idx) => items.remove(idx),
            None => return Ok(None),
        };
        self.save(&items).await?;
        Ok(Some(removed))
    }
}
