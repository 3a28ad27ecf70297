#![allow(clippy::uninlined_format_args)]
#![deny(unused_qualifications)]

pub mod error;
pub mod inventory;
pub mod store;

pub use error::{ErrorKind, InventoryError, InventoryResult};
pub use inventory::Inventory;
pub use store::json_file::JsonFileStore;
pub use store::memory::MemoryStore;
pub use store::rocks::RocksInventoryStore;
pub use store::types::{InventoryItem, ItemFields};
pub use store::InventoryStore;
