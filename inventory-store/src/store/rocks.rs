use std::path::Path;
use std::sync::Arc;
use async_trait::async_trait;
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, IteratorMode, Options, WriteBatch, DB};
use tokio::sync::Mutex;
use crate::error::{InventoryError, InventoryResult};
use crate::store::types::{InventoryItem, ItemFields};
use crate::store::InventoryStore;

const ITEMS_CF: &str = "items";
const IDS_CF: &str = "ids";

/// An inventory kept in an embedded RocksDB instance.
///
/// Items live in the `items` column family keyed by a big-endian insertion
/// sequence, so iteration yields creation order. The `ids` column family maps
/// each item id to its sequence.
pub struct RocksInventoryStore {
    db: Arc<DB>,
    /// Next free sequence. Held for the duration of every mutation.
    next_seq: Mutex<u64>,
}

/// Converts a sequence to a byte vector for storage in RocksDB.
/// Uses big-endian encoding to ensure correct sorting of keys.
fn seq_to_bin(seq: u64) -> InventoryResult<Vec<u8>> {
    let mut buf = Vec::with_capacity(8);
    buf.write_u64::<BigEndian>(seq)?;
    Ok(buf)
}

fn bin_to_seq(mut buf: &[u8]) -> InventoryResult<u64> {
    Ok(buf.read_u64::<BigEndian>()?)
}

impl RocksInventoryStore {
    pub fn open<P: AsRef<Path>>(db_path: P) -> InventoryResult<Self> {
        let mut db_opts = Options::default();
        db_opts.create_missing_column_families(true);
        db_opts.create_if_missing(true);

        let items = ColumnFamilyDescriptor::new(ITEMS_CF, Options::default());
        let ids = ColumnFamilyDescriptor::new(IDS_CF, Options::default());

        let db = Arc::new(DB::open_cf_descriptors(&db_opts, db_path, vec![items, ids])?);

        let next_seq = {
            let cf = cf_handle(&db, ITEMS_CF)?;
            match db.iterator_cf(cf, IteratorMode::End).next().transpose()? {
                Some((key, _)) => bin_to_seq(&key)? + 1,
                None => 0,
            }
        };
        tracing::info!("Opened inventory database, next sequence {}", next_seq);

        Ok(Self {
            db,
            next_seq: Mutex::new(next_seq),
        })
    }

    fn items(&self) -> InventoryResult<&ColumnFamily> {
        cf_handle(&self.db, ITEMS_CF)
    }

    fn ids(&self) -> InventoryResult<&ColumnFamily> {
        cf_handle(&self.db, IDS_CF)
    }

    fn seq_of(&self, id: &str) -> InventoryResult<Option<Vec<u8>>> {
        Ok(self.db.get_cf(self.ids()?, id.as_bytes())?)
    }

    fn item_at(&self, seq_key: &[u8]) -> InventoryResult<Option<InventoryItem>> {
        match self.db.get_cf(self.items()?, seq_key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Err(InventoryError::Storage(format!(
                "id index points at missing sequence {}",
                bin_to_seq(seq_key)?
            ))),
        }
    }

    fn lookup(&self, id: &str) -> InventoryResult<Option<(Vec<u8>, InventoryItem)>> {
        let Some(seq_key) = self.seq_of(id)? else {
            return Ok(None);
        };
        Ok(self.item_at(&seq_key)?.map(|item| (seq_key, item)))
    }
}

fn cf_handle<'a>(db: &'a DB, name: &str) -> InventoryResult<&'a ColumnFamily> {
    db.cf_handle(name)
        .ok_or_else(|| InventoryError::Storage(format!("column family {} is missing", name)))
}

#[async_trait]
impl InventoryStore for RocksInventoryStore {
    async fn list(&self) -> InventoryResult<Vec<InventoryItem>> {
        self.db
            .iterator_cf(self.items()?, IteratorMode::Start)
            .map(|entry| -> InventoryResult<InventoryItem> {
                let (_, value) = entry?;
                Ok(serde_json::from_slice(&value)?)
            })
            .collect()
    }

    async fn get(&self, id: &str) -> InventoryResult<Option<InventoryItem>> {
        Ok(self.lookup(id)?.map(|(_, item)| item))
    }

    async fn insert(&self, item: InventoryItem) -> InventoryResult<()> {
        let mut next_seq = self.next_seq.lock().await;
        let seq_key = seq_to_bin(*next_seq)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(self.items()?, &seq_key, serde_json::to_vec(&item)?);
        batch.put_cf(self.ids()?, item.id.as_bytes(), &seq_key);
        self.db.write(batch)?;

        *next_seq += 1;
        Ok(())
    }

    async fn replace(&self, id: &str, fields: ItemFields) -> InventoryResult<Option<InventoryItem>> {
        let _next_seq = self.next_seq.lock().await;
        let Some((seq_key, mut item)) = self.lookup(id)? else {
            return Ok(None);
        };
        item.apply(fields);
        self.db.put_cf(self.items()?, &seq_key, serde_json::to_vec(&item)?)?;
        Ok(Some(item))
    }

    async fn remove(&self, id: &str) -> InventoryResult<Option<InventoryItem>> {
        let _next_seq = self.next_seq.lock().await;
        let Some((seq_key, item)) = self.lookup(id)? else {
            return Ok(None);
        };

        let mut batch = WriteBatch::default();
        batch.delete_cf(self.items()?, &seq_key);
        batch.delete_cf(self.ids()?, id.as_bytes());
        self.db.write(batch)?;
        Ok(Some(item))
    }
}
