//! Filesystem storage for uploaded inventory images.
//!
//! Images are written once under a generated storage filename and are never
//! modified or deleted afterwards. Callers refer to them through a reference
//! path rooted at [`IMAGE_REFERENCE_PREFIX`].

pub mod local_store;
pub mod store;

pub use local_store::LocalImageStore;
pub use store::{media_type_for, reference_for, BlobError, BlobResult, ImageBlob, ImageStore, StoredImage, IMAGE_REFERENCE_PREFIX};
